use game_core::{Item, ItemKey, Slot};
use serde::Serialize;

/// Where a tracked item currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ItemSource {
    Equipped { slot: Slot },
    Inventory { index: usize },
}

/// An equip-type item as seen by the snapshot cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedItem {
    pub key: ItemKey,
    pub item: Item,
    #[serde(flatten)]
    pub source: ItemSource,
}

impl TrackedItem {
    pub(crate) fn equipped(slot: Slot, item: Item) -> Self {
        Self {
            key: item.key(),
            item,
            source: ItemSource::Equipped { slot },
        }
    }

    pub(crate) fn carried(key: ItemKey, index: usize, item: Item) -> Self {
        Self {
            key,
            item,
            source: ItemSource::Inventory { index },
        }
    }

    pub fn is_equipped(&self) -> bool {
        matches!(self.source, ItemSource::Equipped { .. })
    }

    pub fn slot(&self) -> Option<Slot> {
        match self.source {
            ItemSource::Equipped { slot } => Some(slot),
            ItemSource::Inventory { .. } => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self.source {
            ItemSource::Inventory { index } => Some(index),
            ItemSource::Equipped { .. } => None,
        }
    }
}
