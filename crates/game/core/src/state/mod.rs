//! Player record representation and change detection.
//!
//! This module owns the data structures the binder observes (equipment slots
//! and the inventory sequence), the snapshot caches mirroring them, and the
//! diff records produced when the two drift apart.
pub mod delta;
pub mod snapshot;
pub mod types;

mod error;

pub use delta::{CollectionDelta, DiffKinds, EquipmentChange, Indexed, InventoryDiff, diff_kinds};
pub use error::RecordError;
pub use snapshot::{EquipmentSnapshot, InventorySnapshot};
pub use types::{
    AttrValue, Attributes, EquipmentBuilder, EquipmentState, Item, ItemKey, ItemKind, ItemUid,
    PlayerRecord, Slot,
};
