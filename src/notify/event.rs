use std::fmt;
use std::rc::Rc;

use crate::model::object::ChemObject;

/// A change notification.
///
/// Carries nothing but the entity the change originated from. Containers
/// forward the same event unchanged, so a listener on a file sees the atom
/// that was edited, not the file.
#[derive(Clone)]
pub struct ChangeEvent {
    source: Rc<dyn ChemObject>,
}

impl ChangeEvent {
    pub fn new(source: Rc<dyn ChemObject>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Rc<dyn ChemObject> {
        &self.source
    }

    /// Whether `object` is the entity this event originated from (identity, not equality).
    pub fn is_from(&self, object: &dyn ChemObject) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.source), object as *const dyn ChemObject)
    }

    /// The origin downcast to a concrete kind, if it is one.
    pub fn source_as<T: ChemObject>(&self) -> Option<&T> {
        self.source.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEvent")
            .field("source", &self.source.kind())
            .finish()
    }
}

pub trait ChangeListener {
    fn on_changed(&self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: Fn(&ChangeEvent),
{
    fn on_changed(&self, event: &ChangeEvent) {
        self(event)
    }
}
