//! Reactive change detection for a player's equipment and inventory.
//!
//! A [`Binder`] wraps a [`PlayerRecord`](game_core::PlayerRecord) and keeps a
//! snapshot cache of every equip-type item it contains. Mutations made through
//! [`Binder::equipment`] and [`Binder::inventory`] are diffed against that
//! cache and reported to subscribers as structured [`ChangeEvent`]s.
//!
//! # Modules
//!
//! - [`binder`]: lifecycle, facades and read accessors
//! - [`events`]: event types, channels and subscriptions
//! - [`record`]: loading records from JSON
//! - [`config`]: tunables read from the environment
//! - [`logging`]: `tracing` subscriber setup for binaries
//!
//! # Example
//!
//! ```
//! use inventory_binder::{Binder, Channel, ChangeEvent};
//! use game_core::{Item, ItemKind, PlayerRecord, Slot};
//!
//! let binder = Binder::new(PlayerRecord::default());
//! binder.initialize()?;
//!
//! binder.on(Channel::Equipment, |event| {
//!     if let ChangeEvent::Equipment(change) = event {
//!         println!("{} changed", change.slot);
//!     }
//!     Ok(())
//! });
//!
//! binder
//!     .equipment()
//!     .equip(Slot::Weapon, Item::new(ItemKind::Weapon).with_uid("sword"))
//!     .expect("weapons fit the weapon slot");
//! # Ok::<(), inventory_binder::BinderError>(())
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod record;

pub use binder::{
    Binder, BinderPhase, EquipmentView, InventoryView, ItemSource, RefreshOutcome, TrackedItem,
    WeakBinder,
};
pub use config::{BinderConfig, LoggingConfig};
pub use error::{BinderError, Result};
pub use events::{
    ChangeEvent, Channel, ChannelMask, InventoryOperation, ListenerId, ListenerResult,
    Subscription,
};
pub use logging::init_logging;
pub use record::player_record_from_json;
