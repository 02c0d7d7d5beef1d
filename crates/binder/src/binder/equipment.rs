//! Intercepting facade over the equipment slots.

use game_core::{EquipmentState, Item, Slot};

use tracing::debug;

use super::Binder;

/// Equipment slots of a [`Binder`].
///
/// Every write diffs the written slot against the cache and, while the binder
/// is initialized, emits one equipment event when the value actually changed.
/// Writing a structurally equal item emits nothing.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentView<'a> {
    binder: &'a Binder,
}

impl<'a> EquipmentView<'a> {
    pub(super) fn new(binder: &'a Binder) -> Self {
        Self { binder }
    }

    /// Writes `value` into `slot`, returning the previous occupant.
    ///
    /// Slots only hold equip-type items. A stackable item is handed back as
    /// `Err` and nothing changes.
    pub fn set(&self, slot: Slot, value: Option<Item>) -> Result<Option<Item>, Item> {
        match value {
            Some(item) if !item.is_equipment() => {
                debug!(
                    target: "binder",
                    %slot,
                    kind = %item.kind,
                    "Rejected non-equip item for slot"
                );
                Err(item)
            }
            value => Ok(self
                .binder
                .mutate_equipment(slot, |equipment| equipment.set(slot, value))),
        }
    }

    /// Puts `item` into `slot`, returning the previous occupant.
    pub fn equip(&self, slot: Slot, item: Item) -> Result<Option<Item>, Item> {
        self.set(slot, Some(item))
    }

    pub fn unequip(&self, slot: Slot) -> Option<Item> {
        self.binder
            .mutate_equipment(slot, |equipment| equipment.unequip(slot))
    }

    /// Edits the item in `slot` and writes the result back.
    ///
    /// `edit` runs on a copy with no binder borrow held, so it may itself use
    /// the binder. Returns false when the slot is empty or the edited item is
    /// no longer equip-type.
    pub fn update(&self, slot: Slot, edit: impl FnOnce(&mut Item)) -> bool {
        let Some(mut item) = self.get(slot) else {
            return false;
        };
        edit(&mut item);
        self.set(slot, Some(item)).is_ok()
    }

    /// Copy of the item in `slot`.
    pub fn get(&self, slot: Slot) -> Option<Item> {
        self.binder
            .read(|record| record.equipment.get(slot).cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.binder.read(|record| record.equipment.is_empty())
    }

    /// Copy of the whole equipment map.
    pub fn to_state(&self) -> EquipmentState {
        self.binder.read(|record| record.equipment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ItemKind, PlayerRecord};

    #[test]
    fn stackables_are_handed_back() {
        let binder = Binder::new(PlayerRecord::default());
        let potion = Item::new(ItemKind::Consumable).with_uid("p");

        assert_eq!(
            binder.equipment().equip(Slot::Ring, potion.clone()),
            Err(potion)
        );
        assert!(binder.equipment().is_empty());
        assert_eq!(binder.equipment().set(Slot::Ring, None), Ok(None));
    }

    #[test]
    fn update_refuses_to_turn_slot_into_stackable() {
        let sword = Item::new(ItemKind::Weapon).with_uid("s");
        let binder = Binder::new(PlayerRecord::new(
            EquipmentState::builder().weapon(sword.clone()).build(),
            Vec::new(),
        ));

        assert!(!binder
            .equipment()
            .update(Slot::Weapon, |item| item.kind = ItemKind::Material));
        assert_eq!(binder.equipment().get(Slot::Weapon), Some(sword));
    }
}
