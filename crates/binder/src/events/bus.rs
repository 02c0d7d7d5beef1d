//! Channel-based listener registry with per-callback isolation.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use tracing::{error, trace};

use super::types::{Channel, ChangeEvent};

/// Result returned by subscriber callbacks.
///
/// An `Err` is logged and otherwise ignored: it never reaches the code whose
/// mutation triggered the event, and later subscribers still run.
pub type ListenerResult = anyhow::Result<()>;

type Callback = dyn Fn(&ChangeEvent) -> ListenerResult;

/// Identifier of a registered listener, unique within one binder.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub(crate) struct Listener {
    id: ListenerId,
    channel: Channel,
    // Cleared on unsubscribe so in-flight dispatches skip the listener
    active: Cell<bool>,
    callback: Box<Callback>,
}

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<Rc<Listener>>,
}

impl ListenerRegistry {
    pub(crate) fn add<F>(&mut self, channel: Channel, callback: F) -> ListenerId
    where
        F: Fn(&ChangeEvent) -> ListenerResult + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Rc::new(Listener {
            id,
            channel,
            active: Cell::new(true),
            callback: Box::new(callback),
        }));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|listener| listener.id == id) {
            Some(position) => {
                let listener = self.listeners.remove(position);
                listener.active.set(false);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.active.set(false);
        }
    }

    /// Active listeners that should receive `event`, in registration order.
    pub(crate) fn matching(&self, event: &ChangeEvent) -> Vec<Rc<Listener>> {
        self.listeners
            .iter()
            .filter(|listener| event.is_delivered_on(listener.channel))
            .cloned()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

/// Outcome of delivering one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Invokes each listener, containing errors and panics per callback.
///
/// Listeners deactivated while the loop runs (by an earlier callback
/// unsubscribing them, or by `destroy()`) are skipped.
pub(crate) fn deliver(listeners: &[Rc<Listener>], event: &ChangeEvent) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for listener in listeners {
        if !listener.active.get() {
            continue;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (listener.callback)(event)));
        match outcome {
            Ok(Ok(())) => {
                report.delivered += 1;
                trace!(
                    target: "binder::events",
                    listener = listener.id.0,
                    event = event.label(),
                    "Listener notified"
                );
            }
            Ok(Err(err)) => {
                report.failed += 1;
                error!(
                    target: "binder::events",
                    listener = listener.id.0,
                    channel = ?listener.channel,
                    event = event.label(),
                    error = %err,
                    "Listener returned an error, continuing"
                );
            }
            Err(payload) => {
                report.failed += 1;
                error!(
                    target: "binder::events",
                    listener = listener.id.0,
                    channel = ?listener.channel,
                    event = event.label(),
                    panic = panic_message(payload.as_ref()),
                    "Listener panicked, continuing"
                );
            }
        }
    }

    report
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

/// Handle returned by [`Binder::on`](crate::Binder::on).
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, registry: &Rc<RefCell<ListenerRegistry>>) -> Self {
        Self {
            id,
            registry: Rc::downgrade(registry),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Removes the listener. Calling this more than once, or after the binder
    /// is destroyed or dropped, does nothing.
    ///
    /// Returns true if this call removed the listener.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(self.id),
            None => false,
        }
    }

    /// Returns true while the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry
                .borrow()
                .listeners
                .iter()
                .any(|listener| listener.id == self.id)
        })
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
