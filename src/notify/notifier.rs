use std::cell::Cell;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use super::config::NotifyConfig;
use super::event::{ChangeEvent, ChangeListener};
use crate::model::object::ChemObject;

thread_local! {
    static DISPATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Listener list of one entity plus a back-reference used to stamp event origins.
pub(crate) struct Notifier {
    owner: Weak<dyn ChemObject>,
    listeners: Vec<Weak<dyn ChangeListener>>,
}

impl Notifier {
    pub(crate) fn new(owner: Weak<dyn ChemObject>) -> Self {
        Self {
            owner,
            listeners: Vec::new(),
        }
    }

    /// Returns `false` when the listener was already registered.
    pub(crate) fn add(&mut self, listener: Weak<dyn ChangeListener>) -> bool {
        if self.position(&listener).is_some() {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    pub(crate) fn remove(&mut self, listener: &Weak<dyn ChangeListener>) -> bool {
        self.prune();
        match self.position(listener) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }

    /// Live listeners in registration order. Dropped registrations are pruned.
    pub(crate) fn snapshot(&mut self) -> Vec<Rc<dyn ChangeListener>> {
        self.prune();
        self.listeners.iter().filter_map(Weak::upgrade).collect()
    }

    pub(crate) fn event(&self) -> Option<ChangeEvent> {
        self.owner.upgrade().map(ChangeEvent::new)
    }

    fn position(&self, listener: &Weak<dyn ChangeListener>) -> Option<usize> {
        self.listeners
            .iter()
            .position(|registered| std::ptr::addr_eq(registered.as_ptr(), listener.as_ptr()))
    }

    // Registrations made while the owning container is still under
    // construction have no strong count yet, so pruning only happens on the
    // removal and dispatch paths.
    fn prune(&mut self) {
        self.listeners.retain(|listener| listener.strong_count() > 0);
    }
}

/// Calls every listener with `event`, honouring the configured depth guard.
///
/// Only dispatches started here count towards the depth. A listener that
/// mutates the model while being called nests one level deeper.
pub(crate) fn dispatch(
    listeners: &[Rc<dyn ChangeListener>],
    event: &ChangeEvent,
    config: NotifyConfig,
) {
    let depth = DISPATCH_DEPTH.with(Cell::get);
    if let Some(max) = config.max_dispatch_depth {
        if depth >= max {
            warn!(
                depth,
                max,
                source = event.source().kind(),
                "dispatch depth limit reached, change event dropped"
            );
            return;
        }
    }

    let _guard = DepthGuard::enter(depth);
    trace!(
        listeners = listeners.len(),
        depth,
        source = event.source().kind(),
        "dispatching change event"
    );
    for listener in listeners {
        listener.on_changed(event);
    }
}

/// Forwards an event one level up the hierarchy.
///
/// Relays run inside the dispatch that produced the event and leave the depth
/// untouched, so a tall hierarchy never trips the guard on its own.
pub(crate) fn relay(listeners: &[Rc<dyn ChangeListener>], event: &ChangeEvent) {
    trace!(
        listeners = listeners.len(),
        source = event.source().kind(),
        "relaying change event"
    );
    for listener in listeners {
        listener.on_changed(event);
    }
}

struct DepthGuard {
    previous: usize,
}

impl DepthGuard {
    fn enter(previous: usize) -> Self {
        DISPATCH_DEPTH.with(|depth| depth.set(previous + 1));
        Self { previous }
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DISPATCH_DEPTH.with(|depth| depth.set(self.previous));
    }
}
