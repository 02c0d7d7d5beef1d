//! Snapshot caches mirroring the last observed player record.
//!
//! Both caches own deep copies of the items they track. Syncing a cache
//! against the live record returns the changes and leaves the cache equal to
//! the live contents, so there is never a window where a subscriber could see
//! a stale cache.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::delta::{EquipmentChange, Indexed, InventoryDiff, diff_indexed};
use super::types::{EquipmentState, Item, ItemKey, Slot};

/// Per-slot copy of the last observed equipment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EquipmentSnapshot {
    slots: EquipmentState,
}

impl EquipmentSnapshot {
    pub fn capture(live: &EquipmentState) -> Self {
        Self {
            slots: live.clone(),
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&Item> {
        self.slots.get(slot)
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Slot, &Item)> + '_ {
        self.slots.occupied()
    }

    pub fn as_state(&self) -> &EquipmentState {
        &self.slots
    }

    /// Brings one slot up to date, returning the transition if it changed.
    pub fn sync_slot(&mut self, live: &EquipmentState, slot: Slot) -> Option<EquipmentChange> {
        let current = live.get(slot);
        if self.slots.get(slot) == current {
            return None;
        }

        let new_value = current.cloned();
        let old_value = self.slots.set(slot, new_value.clone());
        Some(EquipmentChange::new(slot, old_value, new_value))
    }

    /// Brings every slot up to date, in slot order.
    pub fn sync(&mut self, live: &EquipmentState) -> Vec<EquipmentChange> {
        Slot::iter()
            .filter_map(|slot| self.sync_slot(live, slot))
            .collect()
    }

    pub fn clear(&mut self) {
        self.slots = EquipmentState::empty();
    }
}

/// `ItemKey → (item, index)` map of the equip-type inventory entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventorySnapshot {
    entries: HashMap<ItemKey, Indexed<Item>>,
}

impl InventorySnapshot {
    pub fn capture(inventory: &[Item]) -> Self {
        let mut snapshot = Self::default();
        snapshot.sync(inventory);
        snapshot
    }

    pub fn get(&self, key: &ItemKey) -> Option<&Indexed<Item>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked entries ordered by their inventory index.
    pub fn entries_by_index(&self) -> Vec<(&ItemKey, &Indexed<Item>)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.index);
        entries
    }

    /// Rescans `inventory` and returns every tracked difference.
    ///
    /// Added and modified entries come first, ordered by their new index;
    /// removed entries follow in their old order.
    pub fn sync(&mut self, inventory: &[Item]) -> Vec<InventoryDiff> {
        let delta = diff_indexed(&self.entries, inventory, Item::key, Item::is_equipment);

        let mut diffs = Vec::with_capacity(
            delta.added.len() + delta.updated.len() + delta.removed.len(),
        );

        for (key, entry) in delta.added {
            self.entries.insert(key.clone(), entry.clone());
            diffs.push(InventoryDiff::Added {
                key,
                item: entry.value,
                index: entry.index,
            });
        }

        for (key, old, new) in delta.updated {
            self.entries.insert(key.clone(), new.clone());
            diffs.push(InventoryDiff::Modified {
                key,
                old_item: old.value,
                new_item: new.value,
                old_index: old.index,
                index: new.index,
            });
        }

        diffs.sort_by_key(InventoryDiff::index);

        for (key, index) in delta.moved {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.index = index;
            }
        }

        for (key, entry) in delta.removed {
            self.entries.remove(&key);
            diffs.push(InventoryDiff::Removed {
                key,
                item: entry.value,
                index: entry.index,
            });
        }

        diffs
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::ItemKind;

    fn armor(uid: &str, level: i64) -> Item {
        Item::new(ItemKind::Armor)
            .with_uid(uid)
            .with_attr("enhanceLevel", level)
    }

    fn potion() -> Item {
        Item::new(ItemKind::Consumable).with_attr("name", "Potion")
    }

    #[test]
    fn equipment_sync_reports_only_changed_slots() {
        let mut live = EquipmentState::empty();
        let mut snapshot = EquipmentSnapshot::capture(&live);

        assert_eq!(snapshot.sync_slot(&live, Slot::Weapon), None);

        let sword = Item::new(ItemKind::Weapon).with_uid("sword");
        live.equip(Slot::Weapon, sword.clone());
        let change = snapshot.sync_slot(&live, Slot::Weapon).unwrap();
        assert!(change.is_equip());
        assert_eq!(change.new_value, Some(sword.clone()));
        assert_eq!(snapshot.get(Slot::Weapon), Some(&sword));

        live.unequip(Slot::Weapon);
        live.equip(Slot::Helm, Item::new(ItemKind::Helm).with_uid("cap"));
        let changes = snapshot.sync(&live);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].slot, Slot::Weapon);
        assert!(changes[0].is_unequip());
        assert_eq!(changes[1].slot, Slot::Helm);
        assert_eq!(snapshot.as_state(), &live);
    }

    #[test]
    fn inventory_sync_mirrors_live_contents() {
        let mut live = vec![armor("a", 3), potion()];
        let mut snapshot = InventorySnapshot::capture(&live);
        assert_eq!(snapshot.len(), 1);

        live[0] = armor("a", 4);
        let diffs = snapshot.sync(&live);
        assert_eq!(
            diffs,
            vec![InventoryDiff::Modified {
                key: armor("a", 3).key(),
                old_item: armor("a", 3),
                new_item: armor("a", 4),
                old_index: 0,
                index: 0,
            }]
        );
        assert_eq!(snapshot.get(&armor("a", 4).key()).unwrap().value, armor("a", 4));
    }

    #[test]
    fn consumables_never_produce_entries() {
        let mut live = vec![armor("a", 1)];
        let mut snapshot = InventorySnapshot::capture(&live);

        live.push(potion());
        assert!(snapshot.sync(&live).is_empty());
        live.pop();
        assert!(snapshot.sync(&live).is_empty());
    }

    #[test]
    fn shifted_items_update_cached_index_silently() {
        let mut live = vec![potion(), armor("a", 1), armor("b", 1)];
        let mut snapshot = InventorySnapshot::capture(&live);

        live.remove(0);
        assert!(snapshot.sync(&live).is_empty());
        assert_eq!(snapshot.get(&armor("a", 1).key()).unwrap().index, 0);
        assert_eq!(snapshot.get(&armor("b", 1).key()).unwrap().index, 1);
    }

    #[test]
    fn mixed_diff_orders_added_modified_then_removed() {
        let mut live = vec![armor("a", 1), armor("b", 1), armor("c", 1)];
        let mut snapshot = InventorySnapshot::capture(&live);

        live.remove(0);
        live.insert(0, armor("z", 1));
        live[2] = armor("c", 2);

        let diffs = snapshot.sync(&live);
        let summary: Vec<(&str, usize)> = diffs
            .iter()
            .map(|diff| match diff {
                InventoryDiff::Added { index, .. } => ("added", *index),
                InventoryDiff::Modified { index, .. } => ("modified", *index),
                InventoryDiff::Removed { index, .. } => ("removed", *index),
            })
            .collect();
        assert_eq!(summary, vec![("added", 0), ("modified", 2), ("removed", 0)]);

        let keys: Vec<String> = snapshot
            .entries_by_index()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect();
        assert_eq!(keys, vec!["z", "b", "c"]);
    }
}
