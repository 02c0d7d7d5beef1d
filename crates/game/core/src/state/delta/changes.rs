use crate::state::types::{Item, ItemKey, Slot};

use super::bitmask::DiffKinds;

/// A single equipment slot transition.
///
/// `old_value == None` is an equip into an empty slot, `new_value == None` an
/// unequip, and both present a swap or in-place edit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EquipmentChange {
    pub slot: Slot,
    pub old_value: Option<Item>,
    pub new_value: Option<Item>,
}

impl EquipmentChange {
    pub fn new(slot: Slot, old_value: Option<Item>, new_value: Option<Item>) -> Self {
        Self {
            slot,
            old_value,
            new_value,
        }
    }

    /// An item went into a previously empty slot.
    pub fn is_equip(&self) -> bool {
        self.old_value.is_none() && self.new_value.is_some()
    }

    /// A slot was emptied.
    pub fn is_unequip(&self) -> bool {
        self.old_value.is_some() && self.new_value.is_none()
    }

    /// The slot now holds a different item (by key) than before.
    pub fn is_swap(&self) -> bool {
        match (&self.old_value, &self.new_value) {
            (Some(old), Some(new)) => old.key() != new.key(),
            _ => false,
        }
    }
}

/// One entry of an inventory diff.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")
)]
pub enum InventoryDiff {
    /// Key present only in the new scan.
    Added {
        key: ItemKey,
        item: Item,
        index: usize,
    },

    /// Key present in both scans with structurally different content.
    Modified {
        key: ItemKey,
        old_item: Item,
        new_item: Item,
        old_index: usize,
        index: usize,
    },

    /// Key present only in the previous scan.
    Removed {
        key: ItemKey,
        item: Item,
        index: usize,
    },
}

impl InventoryDiff {
    pub fn key(&self) -> &ItemKey {
        match self {
            InventoryDiff::Added { key, .. }
            | InventoryDiff::Modified { key, .. }
            | InventoryDiff::Removed { key, .. } => key,
        }
    }

    /// The item as it is now, or as it was last seen for removals.
    pub fn item(&self) -> &Item {
        match self {
            InventoryDiff::Added { item, .. } | InventoryDiff::Removed { item, .. } => item,
            InventoryDiff::Modified { new_item, .. } => new_item,
        }
    }

    /// Current index, or the last known index for removals.
    pub fn index(&self) -> usize {
        match self {
            InventoryDiff::Added { index, .. }
            | InventoryDiff::Modified { index, .. }
            | InventoryDiff::Removed { index, .. } => *index,
        }
    }

    pub fn kind(&self) -> DiffKinds {
        match self {
            InventoryDiff::Added { .. } => DiffKinds::ADDED,
            InventoryDiff::Modified { .. } => DiffKinds::MODIFIED,
            InventoryDiff::Removed { .. } => DiffKinds::REMOVED,
        }
    }
}

/// Folds the kinds of all entries into one mask.
pub fn diff_kinds(diffs: &[InventoryDiff]) -> DiffKinds {
    diffs
        .iter()
        .fold(DiffKinds::empty(), |mask, diff| mask | diff.kind())
}
