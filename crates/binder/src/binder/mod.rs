//! The binder: observable equipment and inventory for one player record.
//!
//! A [`Binder`] owns the player record. Callers reach the record only through
//! [`EquipmentView`] and [`InventoryView`], whose mutators forward to the
//! underlying containers and then run a diff pass against the snapshot cache.
//! Every effective call produces exactly one [`ChangeEvent`], delivered
//! synchronously after the cache has been brought up to date.
//!
//! ```text
//! Uninitialized ──initialize()──▶ Initialized ──destroy()──▶ Destroyed
//!        └──────────────────────destroy()─────────────────────────┘
//! ```
//!
//! Interception and diffing only run while `Initialized`. In the other phases
//! the facades still mutate the record, silently.

mod equipment;
mod inventory;
mod tracked;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use game_core::{
    EquipmentSnapshot, EquipmentState, InventoryDiff, InventorySnapshot, Item, PlayerRecord,
    Slot,
};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::BinderConfig;
use crate::error::{BinderError, Result};
use crate::events::{
    ChangeEvent, Channel, InventoryOperation, ListenerRegistry, ListenerResult, Subscription,
    deliver,
};
use crate::record::player_record_from_json;

pub use equipment::EquipmentView;
pub use inventory::InventoryView;
pub use tracked::{ItemSource, TrackedItem};

/// Lifecycle phase of a binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinderPhase {
    Uninitialized,
    Initialized,
    Destroyed,
}

/// What a [`Binder::refresh`] pass reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub equipment_changes: usize,
    pub inventory_diffs: usize,
}

impl RefreshOutcome {
    pub fn is_empty(&self) -> bool {
        self.equipment_changes == 0 && self.inventory_diffs == 0
    }
}

/// Observable view over a player's equipment and inventory.
///
/// Cloning is cheap and yields another handle to the same binder, which is how
/// subscribers mutate the record from inside a callback. Prefer capturing a
/// [`WeakBinder`] in callbacks: a strong handle stored in one of the binder's
/// own listeners keeps it alive until [`Binder::destroy`] runs.
#[derive(Clone)]
pub struct Binder {
    inner: Rc<BinderInner>,
}

/// Non-owning handle to a [`Binder`].
#[derive(Clone)]
pub struct WeakBinder {
    inner: Weak<BinderInner>,
}

impl WeakBinder {
    pub fn upgrade(&self) -> Option<Binder> {
        self.inner.upgrade().map(|inner| Binder { inner })
    }
}

struct BinderInner {
    config: BinderConfig,
    core: RefCell<BinderCore>,
    listeners: Rc<RefCell<ListenerRegistry>>,
    // Events waiting for delivery, oldest first
    queue: RefCell<VecDeque<ChangeEvent>>,
    draining: Cell<bool>,
}

struct BinderCore {
    phase: BinderPhase,
    record: PlayerRecord,
    equipment: EquipmentSnapshot,
    inventory: InventorySnapshot,
}

impl BinderCore {
    fn is_tracking(&self) -> bool {
        self.phase == BinderPhase::Initialized
    }
}

impl Binder {
    /// Creates an uninitialized binder owning `record`.
    pub fn new(record: PlayerRecord) -> Self {
        Self::with_config(record, BinderConfig::default())
    }

    pub fn with_config(record: PlayerRecord, config: BinderConfig) -> Self {
        Self {
            inner: Rc::new(BinderInner {
                config,
                core: RefCell::new(BinderCore {
                    phase: BinderPhase::Uninitialized,
                    record,
                    equipment: EquipmentSnapshot::default(),
                    inventory: InventorySnapshot::default(),
                }),
                listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
                queue: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }),
        }
    }

    /// Builds a binder from an untyped player record, e.g. a parsed save.
    ///
    /// Fails fast when the player, its equipment map or its inventory is
    /// missing or has the wrong shape.
    pub fn from_json(value: serde_json::Value, config: BinderConfig) -> Result<Self> {
        let record = player_record_from_json(value)?;
        Ok(Self::with_config(record, config))
    }

    pub fn downgrade(&self) -> WeakBinder {
        WeakBinder {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn config(&self) -> &BinderConfig {
        &self.inner.config
    }

    pub fn phase(&self) -> BinderPhase {
        self.inner.core.borrow().phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase() == BinderPhase::Initialized
    }

    /// Validates the record, takes the baseline snapshot and starts tracking.
    ///
    /// Calling this on an initialized binder logs a warning and leaves caches
    /// and subscribers untouched.
    ///
    /// # Errors
    ///
    /// - [`BinderError::InvalidRecord`] if a slot holds a non-equip item
    /// - [`BinderError::Destroyed`] after [`Binder::destroy`]
    pub fn initialize(&self) -> Result<()> {
        let mut guard = self.inner.core.borrow_mut();
        let core = &mut *guard;

        match core.phase {
            BinderPhase::Initialized => {
                warn!(target: "binder", "initialize() called twice, ignoring");
                return Ok(());
            }
            BinderPhase::Destroyed => {
                warn!(target: "binder", "initialize() called after destroy()");
                return Err(BinderError::Destroyed);
            }
            BinderPhase::Uninitialized => {}
        }

        core.record.validate()?;

        core.equipment = EquipmentSnapshot::capture(&core.record.equipment);
        core.inventory = InventorySnapshot::capture(&core.record.inventory);
        core.phase = BinderPhase::Initialized;

        info!(
            target: "binder",
            equipped = core.record.equipment.equipped_count(),
            inventory_len = core.record.inventory.len(),
            tracked = core.inventory.len(),
            "Binder initialized"
        );

        Ok(())
    }

    /// Stops tracking, clears caches and subscribers. Terminal and idempotent.
    ///
    /// Listeners still queued in a dispatch that is running right now are
    /// skipped.
    pub fn destroy(&self) {
        {
            let mut core = self.inner.core.borrow_mut();
            if core.phase == BinderPhase::Destroyed {
                return;
            }
            core.phase = BinderPhase::Destroyed;
            core.equipment.clear();
            core.inventory.clear();
        }
        self.inner.queue.borrow_mut().clear();

        let mut listeners = self.inner.listeners.borrow_mut();
        let dropped = listeners.len();
        listeners.clear();

        info!(target: "binder", listeners = dropped, "Binder destroyed");
    }

    /// Rescans both structures and emits one refresh event for every delta.
    ///
    /// Use this after [`Binder::load_inventory`] / [`Binder::load_equipment`],
    /// which replace a structure without being observed. Outside the
    /// `Initialized` phase this does nothing.
    pub fn refresh(&self) -> RefreshOutcome {
        let event = {
            let mut guard = self.inner.core.borrow_mut();
            let core = &mut *guard;
            if !core.is_tracking() {
                debug!(target: "binder", phase = ?core.phase, "refresh() ignored");
                return RefreshOutcome::default();
            }

            let equipment = core.equipment.sync(&core.record.equipment);
            let inventory = core.inventory.sync(&core.record.inventory);
            ChangeEvent::Refresh {
                equipment,
                inventory,
            }
        };

        let outcome = RefreshOutcome {
            equipment_changes: event.equipment_changes().len(),
            inventory_diffs: event.inventory_diffs().len(),
        };

        debug!(
            target: "binder",
            equipment_changes = outcome.equipment_changes,
            inventory_diffs = outcome.inventory_diffs,
            "Refresh pass complete"
        );

        if !outcome.is_empty() {
            self.dispatch(event);
        }

        outcome
    }

    /// Registers `callback` on `channel`.
    ///
    /// Callbacks run synchronously, in registration order, after the cache
    /// reflects the change. A callback may mutate the record through a
    /// binder handle; the nested call updates the cache at once and its event
    /// is delivered after the current one has reached every listener. Errors
    /// and panics are logged and contained.
    pub fn on<F>(&self, channel: Channel, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) -> ListenerResult + 'static,
    {
        let id = self.inner.listeners.borrow_mut().add(channel, callback);
        trace!(target: "binder", ?channel, listener = ?id, "Listener registered");
        Subscription::new(id, &self.inner.listeners)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Facade over the equipment slots.
    pub fn equipment(&self) -> EquipmentView<'_> {
        EquipmentView::new(self)
    }

    /// Facade over the inventory sequence.
    pub fn inventory(&self) -> InventoryView<'_> {
        InventoryView::new(self)
    }

    /// Equipped and carried equip-type items, equipped first.
    pub fn get_all_equipment(&self) -> Vec<TrackedItem> {
        let mut items = self.get_equipped_items();
        items.extend(self.get_inventory_equipment());
        items
    }

    /// Equipped items in slot order.
    pub fn get_equipped_items(&self) -> Vec<TrackedItem> {
        let core = self.inner.core.borrow();
        core.equipment
            .occupied()
            .map(|(slot, item)| TrackedItem::equipped(slot, item.clone()))
            .collect()
    }

    /// Equip-type inventory items in index order.
    pub fn get_inventory_equipment(&self) -> Vec<TrackedItem> {
        let core = self.inner.core.borrow();
        core.inventory
            .entries_by_index()
            .into_iter()
            .map(|(key, entry)| TrackedItem::carried(key.clone(), entry.index, entry.value.clone()))
            .collect()
    }

    /// Replaces the inventory wholesale without diffing.
    ///
    /// Subscribers hear nothing until [`Binder::refresh`] runs.
    pub fn load_inventory(&self, inventory: Vec<Item>) -> Vec<Item> {
        let previous = std::mem::replace(&mut self.inner.core.borrow_mut().record.inventory, inventory);
        debug!(target: "binder", "Inventory replaced out of band");
        previous
    }

    /// Replaces the equipment map wholesale without diffing.
    ///
    /// Subscribers hear nothing until [`Binder::refresh`] runs.
    ///
    /// # Errors
    ///
    /// [`BinderError::InvalidRecord`] if a slot holds a non-equip item. The
    /// current equipment is kept.
    pub fn load_equipment(&self, equipment: EquipmentState) -> Result<EquipmentState> {
        equipment.validate()?;
        let previous = std::mem::replace(&mut self.inner.core.borrow_mut().record.equipment, equipment);
        debug!(target: "binder", "Equipment replaced out of band");
        Ok(previous)
    }

    /// Copy of the live record.
    pub fn record(&self) -> PlayerRecord {
        self.inner.core.borrow().record.clone()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&PlayerRecord) -> R) -> R {
        f(&self.inner.core.borrow().record)
    }

    /// Applies `op` to the equipment map, then diffs `slot`.
    pub(crate) fn mutate_equipment<R>(
        &self,
        slot: Slot,
        op: impl FnOnce(&mut EquipmentState) -> R,
    ) -> R {
        let (result, change) = {
            let mut guard = self.inner.core.borrow_mut();
            let core = &mut *guard;
            let result = op(&mut core.record.equipment);
            let change = if core.is_tracking() {
                core.equipment.sync_slot(&core.record.equipment, slot)
            } else {
                None
            };
            (result, change)
        };

        if let Some(change) = change {
            debug!(
                target: "binder",
                slot = %change.slot,
                old = ?change.old_value.as_ref().map(Item::key),
                new = ?change.new_value.as_ref().map(Item::key),
                "Equipment slot changed"
            );
            self.dispatch(ChangeEvent::Equipment(change));
        }

        result
    }

    /// Applies `op` to the inventory, then rescans it.
    pub(crate) fn mutate_inventory<R>(
        &self,
        operation: InventoryOperation,
        op: impl FnOnce(&mut Vec<Item>) -> R,
    ) -> R {
        let (result, diffs) = {
            let mut guard = self.inner.core.borrow_mut();
            let core = &mut *guard;
            let result = op(&mut core.record.inventory);
            let diffs = if core.is_tracking() {
                core.inventory.sync(&core.record.inventory)
            } else {
                Vec::new()
            };
            (result, diffs)
        };

        if !diffs.is_empty() {
            debug!(
                target: "binder",
                ?operation,
                entries = diffs.len(),
                "Inventory changed"
            );
            self.log_diffs(&diffs);
            self.dispatch(ChangeEvent::Inventory { operation, diffs });
        }

        result
    }

    fn log_diffs(&self, diffs: &[InventoryDiff]) {
        if !self.inner.config.log_diffs {
            return;
        }
        for diff in diffs {
            trace!(
                target: "binder::diff",
                kind = ?diff.kind(),
                key = %diff.key(),
                index = diff.index(),
                "Inventory diff entry"
            );
        }
    }

    /// Queues `event` and delivers queued events in order.
    ///
    /// Events raised while a dispatch is running wait in the queue and are
    /// delivered by the outer call once the current event has reached every
    /// listener. No internal borrow is held while callbacks run.
    fn dispatch(&self, event: ChangeEvent) {
        let backlog = {
            let mut queue = self.inner.queue.borrow_mut();
            queue.push_back(event);
            queue.len()
        };

        if self.inner.draining.get() {
            if backlog == self.inner.config.queue_warn_len {
                warn!(
                    target: "binder",
                    backlog,
                    "Event queue is growing; a subscriber may be reacting to its own changes"
                );
            }
            return;
        }

        self.inner.draining.set(true);
        while let Some(event) = self.next_queued() {
            let listeners = self.inner.listeners.borrow().matching(&event);
            if listeners.is_empty() {
                continue;
            }

            let report = deliver(&listeners, &event);
            trace!(
                target: "binder",
                event = event.label(),
                delivered = report.delivered,
                failed = report.failed,
                "Event dispatched"
            );
        }
        self.inner.draining.set(false);
    }

    fn next_queued(&self) -> Option<ChangeEvent> {
        self.inner.queue.borrow_mut().pop_front()
    }
}

impl std::fmt::Debug for Binder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.inner.core.try_borrow();
        let mut debug = f.debug_struct("Binder");
        match core {
            Ok(core) => debug
                .field("phase", &core.phase)
                .field("equipped", &core.record.equipment.equipped_count())
                .field("inventory_len", &core.record.inventory.len()),
            Err(_) => debug.field("phase", &"<borrowed>"),
        };
        debug
            .field("listeners", &self.inner.listeners.try_borrow().map(|l| l.len()).ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ItemKind;

    fn weapon(uid: &str) -> Item {
        Item::new(ItemKind::Weapon).with_uid(uid)
    }

    fn record_events(binder: &Binder, channel: Channel) -> Rc<RefCell<Vec<ChangeEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        binder.on(channel, move |event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });
        events
    }

    #[test]
    fn uninitialized_binder_mutates_silently() {
        let binder = Binder::new(PlayerRecord::default());
        let events = record_events(&binder, Channel::All);

        binder.inventory().push(weapon("w"));
        binder.equipment().equip(Slot::Weapon, weapon("x")).unwrap();

        assert!(events.borrow().is_empty());
        assert!(binder.get_all_equipment().is_empty());
        assert_eq!(binder.inventory().len(), 1);
    }

    #[test]
    fn initialize_takes_baseline() {
        let record = PlayerRecord::new(
            EquipmentState::builder().weapon(weapon("w")).build(),
            vec![weapon("spare")],
        );
        let binder = Binder::new(record);
        let events = record_events(&binder, Channel::All);

        binder.initialize().unwrap();

        assert!(events.borrow().is_empty());
        assert_eq!(binder.get_all_equipment().len(), 2);
        assert_eq!(binder.phase(), BinderPhase::Initialized);
    }

    #[test]
    fn second_initialize_keeps_state() {
        let binder = Binder::new(PlayerRecord::default());
        binder.initialize().unwrap();
        let events = record_events(&binder, Channel::All);
        binder.inventory().push(weapon("w"));

        binder.initialize().unwrap();

        assert_eq!(binder.subscriber_count(), 1);
        assert_eq!(binder.get_inventory_equipment().len(), 1);
        binder.inventory().pop();
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn initialize_after_destroy_fails() {
        let binder = Binder::new(PlayerRecord::default());
        binder.destroy();
        assert!(matches!(binder.initialize(), Err(BinderError::Destroyed)));
        assert_eq!(binder.phase(), BinderPhase::Destroyed);
    }

    #[test]
    fn events_raised_by_subscribers_are_queued_in_order() {
        let binder = Binder::new(PlayerRecord::default());
        binder.initialize().unwrap();

        let depth = Rc::new(Cell::new(0usize));
        let max_depth = Rc::new(Cell::new(0usize));
        let (active, deepest) = (Rc::clone(&depth), Rc::clone(&max_depth));
        let handle = binder.downgrade();
        binder.on(Channel::Inventory, move |_| {
            active.set(active.get() + 1);
            deepest.set(deepest.get().max(active.get()));
            if let Some(binder) = handle.upgrade() {
                let n = binder.inventory().len();
                if n < 20 {
                    binder.inventory().push(weapon(&format!("w{n}")));
                }
            }
            active.set(active.get() - 1);
            Ok(())
        });
        let events = record_events(&binder, Channel::Inventory);

        binder.inventory().push(weapon("seed"));

        let added: Vec<usize> = events
            .borrow()
            .iter()
            .flat_map(|event| event.inventory_diffs().iter().map(|diff| diff.index()))
            .collect();
        assert_eq!(added, (0..20).collect::<Vec<_>>());
        assert_eq!(max_depth.get(), 1);
        assert_eq!(binder.get_inventory_equipment().len(), 20);
        assert!(binder.inner.queue.borrow().is_empty());
    }

    #[test]
    fn load_equipment_rejects_stackable_slot() {
        let binder = Binder::new(PlayerRecord::new(
            EquipmentState::builder().weapon(weapon("w")).build(),
            Vec::new(),
        ));
        binder.initialize().unwrap();

        let bad = EquipmentState::builder()
            .slot(Slot::Ring, Item::new(ItemKind::Material))
            .build();
        assert!(matches!(
            binder.load_equipment(bad),
            Err(BinderError::InvalidRecord(_))
        ));
        assert_eq!(binder.equipment().get(Slot::Weapon), Some(weapon("w")));
        assert!(binder.refresh().is_empty());
    }
}
