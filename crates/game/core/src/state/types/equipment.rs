//! Equipment slots for the player.
//!
//! The equipment map has a fixed set of named slots, each holding at most one
//! item. Slots hold full item values, not handles: the binder snapshots and
//! compares them directly.

use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};

use super::{Item, ItemKind};
use crate::state::RecordError;

/// Named position in the equipment map.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Slot {
    Weapon,
    Armor,
    Helm,
    Boots,
    Ring,
    Amulet,
    Accessory,
}

impl Slot {
    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    /// Slot an item of `kind` is worn in, if it can be worn at all.
    pub const fn for_kind(kind: ItemKind) -> Option<Slot> {
        match kind {
            ItemKind::Weapon => Some(Slot::Weapon),
            ItemKind::Armor => Some(Slot::Armor),
            ItemKind::Helm => Some(Slot::Helm),
            ItemKind::Boots => Some(Slot::Boots),
            ItemKind::Ring => Some(Slot::Ring),
            ItemKind::Amulet => Some(Slot::Amulet),
            ItemKind::Accessory => Some(Slot::Accessory),
            ItemKind::Consumable | ItemKind::Currency | ItemKind::Material => None,
        }
    }
}

/// Equipment state for the player.
///
/// Represents what items are currently equipped. Every slot is always present;
/// an empty slot holds `None`.
///
/// Serialized as a map of slot name to item (or `null`), e.g.
/// `{"WEAPON": {"uid": "w-1", "type": "weapon"}, "ARMOR": null}`. Missing
/// slots deserialize as empty.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "BTreeMap<Slot, Option<Item>>",
        into = "BTreeMap<Slot, Option<Item>>"
    )
)]
pub struct EquipmentState {
    slots: [Option<Item>; Slot::COUNT],
}

impl EquipmentState {
    /// Creates empty equipment (every slot unoccupied).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing equipment.
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    /// Returns the item in `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<&Item> {
        self.slots[slot.index()].as_ref()
    }

    /// Writes `value` into `slot`, returning the previous occupant.
    pub fn set(&mut self, slot: Slot, value: Option<Item>) -> Option<Item> {
        std::mem::replace(&mut self.slots[slot.index()], value)
    }

    /// Equips an item, returning the previously equipped item if any.
    pub fn equip(&mut self, slot: Slot, item: Item) -> Option<Item> {
        self.slots[slot.index()].replace(item)
    }

    /// Empties a slot, returning its item if any was equipped.
    pub fn unequip(&mut self, slot: Slot) -> Option<Item> {
        self.slots[slot.index()].take()
    }

    /// Iterates all slots in declaration order, occupied or not.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&Item>)> + '_ {
        Slot::iter().map(move |slot| (slot, self.get(slot)))
    }

    /// Iterates occupied slots in declaration order.
    pub fn occupied(&self) -> impl Iterator<Item = (Slot, &Item)> + '_ {
        Slot::iter().filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Number of occupied slots.
    pub fn equipped_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.equipped_count() == 0
    }

    /// Checks that every occupied slot holds an equip-type item.
    pub fn validate(&self) -> Result<(), RecordError> {
        match self.occupied().find(|(_, item)| !item.is_equipment()) {
            Some((slot, item)) => Err(RecordError::SlotHoldsNonEquipment {
                slot,
                kind: item.kind,
            }),
            None => Ok(()),
        }
    }
}

impl From<BTreeMap<Slot, Option<Item>>> for EquipmentState {
    fn from(map: BTreeMap<Slot, Option<Item>>) -> Self {
        let mut state = Self::empty();
        for (slot, item) in map {
            state.set(slot, item);
        }
        state
    }
}

impl From<EquipmentState> for BTreeMap<Slot, Option<Item>> {
    fn from(state: EquipmentState) -> Self {
        Slot::iter().zip(state.slots).collect()
    }
}

/// Builder for constructing equipment.
#[derive(Default)]
pub struct EquipmentBuilder {
    state: EquipmentState,
}

impl EquipmentBuilder {
    /// Places `item` into `slot`.
    pub fn slot(mut self, slot: Slot, item: Item) -> Self {
        self.state.equip(slot, item);
        self
    }

    /// Sets the weapon.
    pub fn weapon(self, item: Item) -> Self {
        self.slot(Slot::Weapon, item)
    }

    /// Sets the armor.
    pub fn armor(self, item: Item) -> Self {
        self.slot(Slot::Armor, item)
    }

    /// Builds the equipment.
    pub fn build(self) -> EquipmentState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item::new(ItemKind::Weapon).with_uid("sword")
    }

    #[test]
    fn slots_start_empty() {
        let equipment = EquipmentState::empty();
        assert!(equipment.is_empty());
        assert_eq!(equipment.iter().count(), Slot::COUNT);
        assert!(equipment.iter().all(|(_, item)| item.is_none()));
    }

    #[test]
    fn equip_returns_previous_occupant() {
        let mut equipment = EquipmentState::builder().weapon(sword()).build();
        let axe = Item::new(ItemKind::Weapon).with_uid("axe");

        let previous = equipment.equip(Slot::Weapon, axe.clone());
        assert_eq!(previous, Some(sword()));
        assert_eq!(equipment.get(Slot::Weapon), Some(&axe));
        assert_eq!(equipment.unequip(Slot::Weapon), Some(axe));
        assert_eq!(equipment.unequip(Slot::Weapon), None);
    }

    #[test]
    fn occupied_follows_slot_order() {
        let ring = Item::new(ItemKind::Ring).with_uid("ring");
        let equipment = EquipmentState::builder()
            .slot(Slot::Ring, ring)
            .weapon(sword())
            .build();

        let slots: Vec<Slot> = equipment.occupied().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![Slot::Weapon, Slot::Ring]);
        assert_eq!(equipment.equipped_count(), 2);
    }

    #[test]
    fn validate_flags_first_stackable_slot() {
        let potion = Item::new(ItemKind::Consumable);
        let equipment = EquipmentState::builder()
            .weapon(sword())
            .slot(Slot::Ring, potion)
            .build();
        assert_eq!(
            equipment.validate(),
            Err(RecordError::SlotHoldsNonEquipment {
                slot: Slot::Ring,
                kind: ItemKind::Consumable,
            })
        );
        assert_eq!(EquipmentState::empty().validate(), Ok(()));
    }

    #[test]
    fn only_wearable_kinds_map_to_slots() {
        assert_eq!(Slot::for_kind(ItemKind::Ring), Some(Slot::Ring));
        assert_eq!(Slot::for_kind(ItemKind::Material), None);
    }

    #[test]
    fn slot_names_are_screaming_snake_case() {
        assert_eq!(Slot::Accessory.to_string(), "ACCESSORY");
        assert_eq!("BOOTS".parse::<Slot>().unwrap(), Slot::Boots);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_map_round_trip_keeps_empty_slots() {
        let state: EquipmentState = serde_json::from_value(serde_json::json!({
            "WEAPON": {"uid": "sword", "type": "weapon"},
            "HELM": null,
        }))
        .unwrap();
        assert_eq!(state.get(Slot::Weapon), Some(&sword()));
        assert_eq!(state.get(Slot::Helm), None);

        let json = serde_json::to_value(&state).unwrap();
        assert!(json["ARMOR"].is_null());
        assert_eq!(json["WEAPON"]["uid"], "sword");

        let unknown = serde_json::from_value::<EquipmentState>(serde_json::json!({
            "CAPE": null,
        }));
        assert!(unknown.is_err());
    }
}
