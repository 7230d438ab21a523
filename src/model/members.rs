//! Child collections that keep a container's subscriptions in step with membership.
//!
//! A container listens to a child exactly while the child is a member. When
//! the same child sits at several positions, it stays subscribed until its
//! last occurrence leaves. None of these helpers fire events; the owning
//! container fires once per public operation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::error::Error;
use super::object::{address, ChemObject};
use crate::notify::ChangeListener;

#[derive(Debug)]
pub(crate) struct Members<T: ChemObject> {
    label: &'static str,
    items: RefCell<Vec<Rc<T>>>,
}

impl<T: ChemObject> Members<T> {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            items: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<Rc<T>> {
        self.items.borrow().get(index).cloned()
    }

    pub(crate) fn snapshot(&self) -> Vec<Rc<T>> {
        self.items.borrow().clone()
    }

    pub(crate) fn index_of(&self, item: &T) -> Option<usize> {
        self.items
            .borrow()
            .iter()
            .position(|member| address(&**member) == address(item))
    }

    pub(crate) fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), Error> {
        let len = self.len();
        if index >= len {
            return Err(Error::index_out_of_bounds(self.label, index, len));
        }
        Ok(())
    }

    pub(crate) fn push(&self, item: Rc<T>, relay: &Weak<dyn ChangeListener>) {
        item.add_listener(relay.clone());
        trace!(collection = self.label, child = item.kind(), "child subscribed");
        self.items.borrow_mut().push(item);
    }

    pub(crate) fn remove_at(
        &self,
        index: usize,
        relay: &Weak<dyn ChangeListener>,
    ) -> Result<Rc<T>, Error> {
        self.check_index(index)?;
        let removed = self.items.borrow_mut().remove(index);
        self.release(&removed, relay);
        Ok(removed)
    }

    pub(crate) fn remove(&self, item: &T, relay: &Weak<dyn ChangeListener>) -> Option<Rc<T>> {
        let index = self.index_of(item)?;
        self.remove_at(index, relay).ok()
    }

    /// Puts `item` at `index`, returning the previous occupant.
    pub(crate) fn replace_at(
        &self,
        index: usize,
        item: Rc<T>,
        relay: &Weak<dyn ChangeListener>,
    ) -> Result<Rc<T>, Error> {
        self.check_index(index)?;
        let previous = std::mem::replace(&mut self.items.borrow_mut()[index], Rc::clone(&item));
        self.release(&previous, relay);
        item.add_listener(relay.clone());
        Ok(previous)
    }

    /// Swaps in a whole new collection, returning the old one.
    pub(crate) fn replace_all(
        &self,
        items: Vec<Rc<T>>,
        relay: &Weak<dyn ChangeListener>,
    ) -> Vec<Rc<T>> {
        let previous = std::mem::replace(&mut *self.items.borrow_mut(), items);
        for item in &previous {
            self.release(item, relay);
        }
        for item in self.snapshot() {
            item.add_listener(relay.clone());
        }
        trace!(
            collection = self.label,
            outgoing = previous.len(),
            incoming = self.len(),
            "collection replaced"
        );
        previous
    }

    pub(crate) fn clear(&self, relay: &Weak<dyn ChangeListener>) -> Vec<Rc<T>> {
        self.replace_all(Vec::new(), relay)
    }

    /// Keeps members for which `keep` holds, returning the removed ones.
    pub(crate) fn retain(
        &self,
        mut keep: impl FnMut(&Rc<T>) -> bool,
        relay: &Weak<dyn ChangeListener>,
    ) -> Vec<Rc<T>> {
        let (kept, removed): (Vec<_>, Vec<_>) =
            self.snapshot().into_iter().partition(|item| keep(item));
        *self.items.borrow_mut() = kept;
        for item in &removed {
            self.release(item, relay);
        }
        removed
    }

    fn release(&self, item: &Rc<T>, relay: &Weak<dyn ChangeListener>) {
        if !self.contains(item) {
            item.remove_listener(relay.clone());
            trace!(collection = self.label, child = item.kind(), "child unsubscribed");
        }
    }
}

/// A single-occupant slot of an aggregate.
#[derive(Debug)]
pub(crate) struct Slot<T: ChemObject> {
    occupant: RefCell<Option<Rc<T>>>,
}

impl<T: ChemObject> Slot<T> {
    pub(crate) fn empty() -> Self {
        Self {
            occupant: RefCell::new(None),
        }
    }

    pub(crate) fn get(&self) -> Option<Rc<T>> {
        self.occupant.borrow().clone()
    }

    /// Unsubscribes the outgoing occupant, then subscribes the incoming one.
    pub(crate) fn replace(
        &self,
        occupant: Option<Rc<T>>,
        relay: &Weak<dyn ChangeListener>,
    ) -> Option<Rc<T>> {
        let previous = std::mem::replace(&mut *self.occupant.borrow_mut(), occupant.clone());
        if let Some(previous) = &previous {
            previous.remove_listener(relay.clone());
        }
        if let Some(occupant) = &occupant {
            occupant.add_listener(relay.clone());
        }
        previous
    }
}
