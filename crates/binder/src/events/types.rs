//! Change event types delivered to subscribers.

use bitflags::bitflags;
use game_core::{DiffKinds, EquipmentChange, InventoryDiff, diff_kinds};
use serde::Serialize;

/// Subscription channel.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Equipment slot changes only
    Equipment,
    /// Inventory changes only
    Inventory,
    /// Every change
    All,
}

bitflags! {
    /// Channels an event is routed to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ChannelMask: u8 {
        const EQUIPMENT = 1 << 0;
        const INVENTORY = 1 << 1;
    }
}

impl Channel {
    /// Mask of event routes this channel listens to.
    pub fn mask(self) -> ChannelMask {
        match self {
            Channel::Equipment => ChannelMask::EQUIPMENT,
            Channel::Inventory => ChannelMask::INVENTORY,
            Channel::All => ChannelMask::all(),
        }
    }
}

/// The inventory call that produced an event.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryOperation {
    /// Append one item
    Push,
    /// Append several items
    Extend,
    /// Remove from the end
    Pop,
    /// Remove from the front
    Shift,
    /// Insert at the front
    Unshift,
    /// Remove and/or insert a range
    Splice,
    /// Index assignment
    Set,
    Insert,
    Remove,
    Truncate,
    Clear,
}

/// Structured change notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChangeEvent {
    /// A single slot write.
    Equipment(EquipmentChange),

    /// Every tracked delta produced by one inventory call.
    Inventory {
        operation: InventoryOperation,
        diffs: Vec<InventoryDiff>,
    },

    /// Everything `refresh()` reconciled in one pass.
    Refresh {
        equipment: Vec<EquipmentChange>,
        inventory: Vec<InventoryDiff>,
    },
}

impl ChangeEvent {
    /// Channels this event is delivered on, besides [`Channel::All`].
    pub fn routes(&self) -> ChannelMask {
        match self {
            ChangeEvent::Equipment(_) => ChannelMask::EQUIPMENT,
            ChangeEvent::Inventory { .. } => ChannelMask::INVENTORY,
            ChangeEvent::Refresh {
                equipment,
                inventory,
            } => {
                let mut mask = ChannelMask::empty();
                mask.set(ChannelMask::EQUIPMENT, !equipment.is_empty());
                mask.set(ChannelMask::INVENTORY, !inventory.is_empty());
                mask
            }
        }
    }

    /// Whether a listener on `channel` receives this event.
    pub fn is_delivered_on(&self, channel: Channel) -> bool {
        channel == Channel::All || channel.mask().intersects(self.routes())
    }

    pub fn equipment_changes(&self) -> &[EquipmentChange] {
        match self {
            ChangeEvent::Equipment(change) => std::slice::from_ref(change),
            ChangeEvent::Inventory { .. } => &[],
            ChangeEvent::Refresh { equipment, .. } => equipment,
        }
    }

    pub fn inventory_diffs(&self) -> &[InventoryDiff] {
        match self {
            ChangeEvent::Equipment(_) => &[],
            ChangeEvent::Inventory { diffs, .. } => diffs,
            ChangeEvent::Refresh { inventory, .. } => inventory,
        }
    }

    /// Kinds of inventory entries carried by this event.
    pub fn inventory_kinds(&self) -> DiffKinds {
        diff_kinds(self.inventory_diffs())
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeEvent::Equipment(_) => "equipment",
            ChangeEvent::Inventory { .. } => "inventory",
            ChangeEvent::Refresh { .. } => "refresh",
        }
    }

    /// Number of individual deltas carried.
    pub fn len(&self) -> usize {
        self.equipment_changes().len() + self.inventory_diffs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
