//! The player record observed by the binder.

use super::{EquipmentState, Item};
use crate::state::RecordError;

/// A player's equipment map and inventory sequence.
///
/// Any other player data (stats, currency totals, quest flags) belongs to the
/// host and never reaches the binder.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub equipment: EquipmentState,
    pub inventory: Vec<Item>,
}

impl PlayerRecord {
    pub fn new(equipment: EquipmentState, inventory: Vec<Item>) -> Self {
        Self {
            equipment,
            inventory,
        }
    }

    /// Checks the structural invariants the binder relies on.
    ///
    /// Every occupied slot must hold an equip-type item.
    pub fn validate(&self) -> Result<(), RecordError> {
        self.equipment.validate()
    }

    /// Iterates the equip-type entries of the inventory with their indices.
    pub fn inventory_equipment(&self) -> impl Iterator<Item = (usize, &Item)> + '_ {
        self.inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_equipment())
    }
}
