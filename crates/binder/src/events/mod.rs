//! Change events and the listener registry that delivers them.
//!
//! Events are routed by channel: equipment-only, inventory-only, or all.
//! Delivery is synchronous and happens after the snapshot cache is updated.

mod bus;
mod types;

pub use bus::{ListenerId, ListenerResult, Subscription};
pub use types::{ChangeEvent, Channel, ChannelMask, InventoryOperation};

pub(crate) use bus::{ListenerRegistry, deliver};
