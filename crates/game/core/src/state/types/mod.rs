pub mod equipment;
pub mod item;
pub mod player;

// Re-export equipment types
pub use equipment::{EquipmentBuilder, EquipmentState, Slot};

// Re-export item types
pub use item::{AttrValue, Attributes, Item, ItemKey, ItemKind, ItemUid};

// Re-export the player record
pub use player::PlayerRecord;
