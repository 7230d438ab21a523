//! The notifiable-object capability shared by every entity in the model.
//!
//! Every entity embeds an [`ObjectCore`] holding its identifier, flags,
//! property map, notification settings and a lazily allocated notifier.
//! [`ChemObject`] exposes all of that through provided methods, so a concrete
//! type only has to hand out its core.
//!
//! Entities are always created inside an `Rc` by their constructors. The core
//! keeps a `Weak` back-reference to that allocation, which is what a change
//! event is stamped with.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::types::{Flag, Flags};
use crate::notify::{ChangeEvent, ChangeListener, Notifier, NotifyConfig};

/// State common to every chemical object.
pub struct ObjectCore {
    this: Weak<dyn ChemObject>,
    config: Cell<NotifyConfig>,
    notifier: RefCell<Option<Notifier>>,
    id: RefCell<Option<String>>,
    flags: Cell<Flags>,
    properties: RefCell<HashMap<String, Rc<dyn Any>>>,
}

impl ObjectCore {
    pub(crate) fn new(this: Weak<dyn ChemObject>) -> Self {
        Self {
            this,
            config: Cell::new(NotifyConfig::default()),
            notifier: RefCell::new(None),
            id: RefCell::new(None),
            flags: Cell::new(Flags::NONE),
            properties: RefCell::new(HashMap::new()),
        }
    }

    /// Copy for a duplicate living at `this`: same data, shared property
    /// values, no notifier.
    pub(crate) fn duplicate(&self, this: Weak<dyn ChemObject>) -> Self {
        Self {
            this,
            config: Cell::new(self.config.get()),
            notifier: RefCell::new(None),
            id: RefCell::new(self.id.borrow().clone()),
            flags: Cell::new(self.flags.get()),
            properties: RefCell::new(
                self.properties
                    .borrow()
                    .iter()
                    .map(|(key, value)| (key.clone(), Rc::clone(value)))
                    .collect(),
            ),
        }
    }

    fn add_listener(&self, listener: Weak<dyn ChangeListener>) {
        if !self.config.get().enabled {
            trace!("notifications disabled, listener ignored");
            return;
        }
        let mut slot = self.notifier.borrow_mut();
        let notifier = slot.get_or_insert_with(|| Notifier::new(self.this.clone()));
        if notifier.add(listener) {
            trace!(listeners = notifier.len(), "listener registered");
        }
    }

    fn remove_listener(&self, listener: Weak<dyn ChangeListener>) {
        if let Some(notifier) = self.notifier.borrow_mut().as_mut() {
            if notifier.remove(&listener) {
                trace!(listeners = notifier.len(), "listener removed");
            }
        }
    }

    fn listener_count(&self) -> usize {
        if !self.config.get().enabled {
            return 0;
        }
        self.notifier.borrow().as_ref().map_or(0, Notifier::len)
    }

    fn live_listeners(&self) -> Vec<Rc<dyn ChangeListener>> {
        if !self.config.get().enabled {
            return Vec::new();
        }
        self.notifier
            .borrow_mut()
            .as_mut()
            .map(Notifier::snapshot)
            .unwrap_or_default()
    }

    fn notify_changed(&self) {
        let listeners = self.live_listeners();
        if listeners.is_empty() {
            return;
        }
        let event = self.notifier.borrow().as_ref().and_then(Notifier::event);
        if let Some(event) = event {
            crate::notify::dispatch(&listeners, &event, self.config.get());
        }
    }

    fn notify_changed_with(&self, event: &ChangeEvent) {
        let listeners = self.live_listeners();
        if listeners.is_empty() {
            return;
        }
        crate::notify::relay(&listeners, event);
    }

    // Registrations made before disabling are kept and come back on re-enable.
    fn set_config(&self, config: NotifyConfig) {
        self.config.set(config);
        trace!(enabled = config.enabled, "notification config changed");
    }
}

impl fmt::Debug for ObjectCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.properties.borrow().keys().cloned().collect();
        keys.sort();
        f.debug_struct("ObjectCore")
            .field("id", &self.id.borrow())
            .field("flags", &self.flags.get())
            .field("properties", &keys)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// A chemical object that can be observed.
///
/// Setters on implementing types mutate and then call
/// [`notify_changed`](ChemObject::notify_changed) unconditionally; there is no
/// dirty checking.
pub trait ChemObject: Any {
    fn core(&self) -> &ObjectCore;

    fn as_any(&self) -> &dyn Any;

    /// Short type name, used in logs and debug output.
    fn kind(&self) -> &'static str;

    /// Registers `listener`. Registering the same listener twice has no effect.
    fn add_listener(&self, listener: Weak<dyn ChangeListener>) {
        self.core().add_listener(listener);
    }

    fn remove_listener(&self, listener: Weak<dyn ChangeListener>) {
        self.core().remove_listener(listener);
    }

    fn listener_count(&self) -> usize {
        self.core().listener_count()
    }

    /// Tells every listener that this object changed.
    fn notify_changed(&self) {
        self.core().notify_changed();
    }

    /// Forwards an event that originated elsewhere without restamping it.
    fn notify_changed_with(&self, event: &ChangeEvent) {
        self.core().notify_changed_with(event);
    }

    fn notify_config(&self) -> NotifyConfig {
        self.core().config.get()
    }

    /// While disabled, new registrations are ignored, nothing is dispatched
    /// and [`listener_count`](ChemObject::listener_count) reports zero.
    /// Existing registrations survive and are live again once re-enabled.
    fn set_notify_config(&self, config: NotifyConfig) {
        self.core().set_config(config);
    }

    fn id(&self) -> Option<String> {
        self.core().id.borrow().clone()
    }

    fn set_id(&self, id: &str) {
        *self.core().id.borrow_mut() = Some(id.to_owned());
        self.notify_changed();
    }

    fn flag(&self, flag: Flag) -> bool {
        self.core().flags.get().contains(flag)
    }

    fn set_flag(&self, flag: Flag, value: bool) {
        let core = self.core();
        core.flags.set(core.flags.get().with(flag, value));
        self.notify_changed();
    }

    fn flags(&self) -> Flags {
        self.core().flags.get()
    }

    fn set_flags(&self, flags: Flags) {
        self.core().flags.set(flags);
        self.notify_changed();
    }

    fn raw_property(&self, key: &str) -> Option<Rc<dyn Any>> {
        self.core().properties.borrow().get(key).cloned()
    }

    fn property<V: Any>(&self, key: &str) -> Option<Rc<V>>
    where
        Self: Sized,
    {
        self.raw_property(key)?.downcast::<V>().ok()
    }

    fn set_raw_property(&self, key: &str, value: Rc<dyn Any>) {
        self.core()
            .properties
            .borrow_mut()
            .insert(key.to_owned(), value);
        self.notify_changed();
    }

    fn set_property<V: Any>(&self, key: &str, value: V)
    where
        Self: Sized,
    {
        self.set_raw_property(key, Rc::new(value));
    }

    fn remove_property(&self, key: &str) {
        self.core().properties.borrow_mut().remove(key);
        self.notify_changed();
    }

    fn properties(&self) -> HashMap<String, Rc<dyn Any>> {
        self.core().properties.borrow().clone()
    }

    /// Replaces the whole property map.
    fn set_properties(&self, properties: HashMap<String, Rc<dyn Any>>) {
        *self.core().properties.borrow_mut() = properties;
        self.notify_changed();
    }
}

/// Copying with a fresh identity.
///
/// The copy carries the same plain data and shares property values, but
/// starts with no listeners. Containers copy their members and rewire
/// connectivity onto the copies.
pub trait Duplicate: ChemObject + Sized {
    fn duplicate(&self) -> Rc<Self>;
}

/// Address of an object, for identity comparisons across trait objects.
pub(crate) fn address<T: ?Sized>(object: &T) -> *const () {
    object as *const T as *const ()
}

macro_rules! chem_object {
    ($ty:ty, $kind:literal) => {
        impl $crate::model::object::ChemObject for $ty {
            fn core(&self) -> &$crate::model::object::ObjectCore {
                &self.core
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn kind(&self) -> &'static str {
                $kind
            }
        }
    };
}

macro_rules! relay_changes {
    ($ty:ty) => {
        impl $crate::notify::ChangeListener for $ty {
            fn on_changed(&self, event: &$crate::notify::ChangeEvent) {
                $crate::model::object::ChemObject::notify_changed_with(self, event);
            }
        }
    };
}
