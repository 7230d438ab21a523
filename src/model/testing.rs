use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::model::object::ChemObject;
use crate::notify::{ChangeEvent, ChangeListener};

/// Listener that keeps every event it receives.
#[derive(Default)]
pub(crate) struct Recorder {
    events: RefCell<Vec<ChangeEvent>>,
}

impl ChangeListener for Recorder {
    fn on_changed(&self, event: &ChangeEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

impl Recorder {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn attach(self: &Rc<Self>, target: &dyn ChemObject) {
        target.add_listener(Rc::downgrade(self) as Weak<dyn ChangeListener>);
    }

    pub(crate) fn detach(self: &Rc<Self>, target: &dyn ChemObject) {
        target.remove_listener(Rc::downgrade(self) as Weak<dyn ChangeListener>);
    }

    pub(crate) fn count(&self) -> usize {
        self.events.borrow().len()
    }

    pub(crate) fn last(&self) -> Option<ChangeEvent> {
        self.events.borrow().last().cloned()
    }

    pub(crate) fn reset(&self) {
        self.events.borrow_mut().clear();
    }
}
