//! Intercepting facade over the inventory sequence.
//!
//! Each mutator forwards to the underlying `Vec`, then rescans the inventory
//! once. A single call therefore yields at most one event, no matter how many
//! entries it touched. Out-of-range calls leave the inventory unchanged and
//! emit nothing.

use game_core::Item;

use super::Binder;
use crate::events::InventoryOperation;

/// Inventory of a [`Binder`].
#[derive(Debug, Clone, Copy)]
pub struct InventoryView<'a> {
    binder: &'a Binder,
}

impl<'a> InventoryView<'a> {
    pub(super) fn new(binder: &'a Binder) -> Self {
        Self { binder }
    }

    pub fn len(&self) -> usize {
        self.binder.read(|record| record.inventory.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Item> {
        self.binder
            .read(|record| record.inventory.get(index).cloned())
    }

    pub fn to_vec(&self) -> Vec<Item> {
        self.binder.read(|record| record.inventory.clone())
    }

    /// Appends `item`, returning the new length.
    pub fn push(&self, item: Item) -> usize {
        self.binder
            .mutate_inventory(InventoryOperation::Push, |inventory| {
                inventory.push(item);
                inventory.len()
            })
    }

    /// Appends every item in order, returning the new length.
    pub fn extend(&self, items: impl IntoIterator<Item = Item>) -> usize {
        let items: Vec<Item> = items.into_iter().collect();
        self.binder
            .mutate_inventory(InventoryOperation::Extend, |inventory| {
                inventory.extend(items);
                inventory.len()
            })
    }

    pub fn pop(&self) -> Option<Item> {
        self.binder
            .mutate_inventory(InventoryOperation::Pop, Vec::pop)
    }

    /// Removes and returns the first item.
    pub fn shift(&self) -> Option<Item> {
        self.binder
            .mutate_inventory(InventoryOperation::Shift, |inventory| {
                (!inventory.is_empty()).then(|| inventory.remove(0))
            })
    }

    /// Prepends `items`, keeping their order, and returns the new length.
    pub fn unshift(&self, items: impl IntoIterator<Item = Item>) -> usize {
        let items: Vec<Item> = items.into_iter().collect();
        self.binder
            .mutate_inventory(InventoryOperation::Unshift, |inventory| {
                let tail = std::mem::replace(inventory, items);
                inventory.extend(tail);
                inventory.len()
            })
    }

    /// Removes `delete_count` items starting at `start` and inserts `items`
    /// in their place. Returns the removed items.
    ///
    /// `start` is clamped to the length and `delete_count` to the number of
    /// items after `start`.
    pub fn splice(
        &self,
        start: usize,
        delete_count: usize,
        items: impl IntoIterator<Item = Item>,
    ) -> Vec<Item> {
        let items: Vec<Item> = items.into_iter().collect();
        self.binder
            .mutate_inventory(InventoryOperation::Splice, |inventory| {
                let start = start.min(inventory.len());
                let end = start + delete_count.min(inventory.len() - start);
                inventory.splice(start..end, items).collect()
            })
    }

    /// Writes `item` at `index`, returning the previous occupant.
    ///
    /// Writing at `len()` appends. Beyond that, the item is handed back as
    /// `Err` and nothing changes.
    pub fn set(&self, index: usize, item: Item) -> Result<Option<Item>, Item> {
        self.binder
            .mutate_inventory(InventoryOperation::Set, |inventory| {
                if index < inventory.len() {
                    Ok(Some(std::mem::replace(&mut inventory[index], item)))
                } else if index == inventory.len() {
                    inventory.push(item);
                    Ok(None)
                } else {
                    Err(item)
                }
            })
    }

    /// Edits the item at `index` and writes the result back.
    ///
    /// `edit` runs on a copy with no binder borrow held. Returns false when
    /// `index` is out of range.
    pub fn update(&self, index: usize, edit: impl FnOnce(&mut Item)) -> bool {
        let Some(mut item) = self.get(index) else {
            return false;
        };
        edit(&mut item);
        self.set(index, item).is_ok()
    }

    /// Inserts `item` at `index`, handing it back as `Err` past the end.
    pub fn insert(&self, index: usize, item: Item) -> Result<(), Item> {
        self.binder
            .mutate_inventory(InventoryOperation::Insert, |inventory| {
                if index <= inventory.len() {
                    inventory.insert(index, item);
                    Ok(())
                } else {
                    Err(item)
                }
            })
    }

    pub fn remove(&self, index: usize) -> Option<Item> {
        self.binder
            .mutate_inventory(InventoryOperation::Remove, |inventory| {
                (index < inventory.len()).then(|| inventory.remove(index))
            })
    }

    /// Shortens the inventory to `len`, returning the dropped tail.
    pub fn truncate(&self, len: usize) -> Vec<Item> {
        self.binder
            .mutate_inventory(InventoryOperation::Truncate, |inventory| {
                let len = len.min(inventory.len());
                inventory.split_off(len)
            })
    }

    pub fn clear(&self) -> Vec<Item> {
        self.binder
            .mutate_inventory(InventoryOperation::Clear, std::mem::take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ItemKind, PlayerRecord};
    use rstest::rstest;

    fn inventory_of(uids: &[&str]) -> Binder {
        let items = uids
            .iter()
            .map(|uid| Item::new(ItemKind::Weapon).with_uid(*uid))
            .collect();
        Binder::new(PlayerRecord::new(Default::default(), items))
    }

    fn uids(binder: &Binder) -> Vec<String> {
        binder
            .inventory()
            .to_vec()
            .iter()
            .filter_map(|item| item.uid.as_ref().map(ToString::to_string))
            .collect()
    }

    fn weapons(uids: &[&str]) -> Vec<Item> {
        uids.iter()
            .map(|uid| Item::new(ItemKind::Weapon).with_uid(*uid))
            .collect()
    }

    #[rstest]
    #[case(1, 1, &["x"], &["a", "x", "c"], &["b"])]
    #[case(1, 0, &["x", "y"], &["a", "x", "y", "b", "c"], &[])]
    #[case(2, 99, &[], &["a", "b"], &["c"])]
    #[case(99, 1, &["x"], &["a", "b", "c", "x"], &[])]
    fn splice_clamps_like_arrays(
        #[case] start: usize,
        #[case] delete_count: usize,
        #[case] insert: &[&str],
        #[case] expected: &[&str],
        #[case] removed: &[&str],
    ) {
        let binder = inventory_of(&["a", "b", "c"]);
        let out = binder.inventory().splice(start, delete_count, weapons(insert));

        assert_eq!(uids(&binder), expected);
        let out: Vec<String> = out
            .iter()
            .filter_map(|item| item.uid.as_ref().map(ToString::to_string))
            .collect();
        assert_eq!(out, removed);
    }

    #[test]
    fn unshift_preserves_argument_order() {
        let binder = inventory_of(&["c"]);
        assert_eq!(binder.inventory().unshift(weapons(&["a", "b"])), 3);
        assert_eq!(uids(&binder), ["a", "b", "c"]);
    }

    #[test]
    fn out_of_range_writes_hand_the_item_back() {
        let binder = inventory_of(&["a"]);
        let stray = Item::new(ItemKind::Ring).with_uid("r");

        assert_eq!(binder.inventory().set(5, stray.clone()), Err(stray.clone()));
        assert_eq!(binder.inventory().insert(5, stray.clone()), Err(stray.clone()));
        assert_eq!(binder.inventory().remove(5), None);
        assert_eq!(binder.inventory().set(1, stray.clone()), Ok(None));
        assert_eq!(uids(&binder), ["a", "r"]);
    }

    #[test]
    fn shift_pop_truncate_clear() {
        let binder = inventory_of(&["a", "b", "c", "d"]);
        let inventory = binder.inventory();

        assert_eq!(inventory.shift().and_then(|item| item.uid), Some("a".into()));
        assert_eq!(inventory.pop().and_then(|item| item.uid), Some("d".into()));
        assert_eq!(inventory.truncate(1).len(), 1);
        assert_eq!(inventory.truncate(10).len(), 0);
        assert_eq!(inventory.clear().len(), 1);
        assert!(inventory.is_empty());
        assert_eq!(inventory.shift(), None);
    }
}
