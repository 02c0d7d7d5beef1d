//! Change records produced by diffing the player record against a snapshot.
//!
//! Deltas carry the old and new items by value; subscribers never look them
//! up in the record, which may already have moved on.
mod bitmask;
mod changes;
mod collection;

pub use bitmask::DiffKinds;
pub use changes::{EquipmentChange, InventoryDiff, diff_kinds};
pub use collection::{CollectionDelta, Indexed};

pub(crate) use collection::diff_indexed;
