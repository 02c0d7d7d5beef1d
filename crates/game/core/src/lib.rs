//! Player item model and change detection shared by the binder.
//!
//! `game-core` defines the values a player carries (items, equipment slots,
//! the inventory sequence) and the pure diffing that turns two observations
//! of them into change records. It performs no I/O, no logging and knows
//! nothing about subscribers; the `inventory-binder` crate builds the
//! observable layer on top of these types.
pub mod error;
pub mod state;

pub use error::{ErrorSeverity, GameError};
pub use state::{
    AttrValue, Attributes, DiffKinds, EquipmentBuilder, EquipmentChange, EquipmentSnapshot,
    EquipmentState, InventoryDiff, InventorySnapshot, Item, ItemKey, ItemKind, ItemUid,
    PlayerRecord, RecordError, Slot, diff_kinds,
};
