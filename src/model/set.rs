//! Ordered sets of atom containers with a multiplier per member.
//!
//! Multipliers are stoichiometric coefficients when a set is a reaction's
//! reactant or product side. Changing one fires a set-level event and never
//! touches subscriptions.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::atom::Atom;
use super::container::{AtomContainer, AtomContainerOps, Molecule, Ring};
use super::error::Error;
use super::members::Members;
use super::object::{ChemObject, Duplicate, ObjectCore};
use crate::notify::{ChangeEvent, ChangeListener};

#[derive(Debug)]
pub struct AtomContainerSet<C: ChemObject> {
    core: ObjectCore,
    relay: Weak<dyn ChangeListener>,
    members: Members<C>,
    multipliers: RefCell<Vec<f64>>,
}

pub type MoleculeSet = AtomContainerSet<Molecule>;
pub type RingSet = AtomContainerSet<Ring>;
pub type ContainerSet = AtomContainerSet<AtomContainer>;

impl<C: ChemObject> AtomContainerSet<C> {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            relay: this.clone(),
            members: Members::new("containers"),
            multipliers: RefCell::new(Vec::new()),
        })
    }

    pub fn container_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn container(&self, index: usize) -> Option<Rc<C>> {
        self.members.get(index)
    }

    pub fn containers(&self) -> Vec<Rc<C>> {
        self.members.snapshot()
    }

    pub fn contains(&self, container: &C) -> bool {
        self.members.contains(container)
    }

    pub fn index_of(&self, container: &C) -> Option<usize> {
        self.members.index_of(container)
    }

    pub fn add_container(&self, container: Rc<C>) {
        self.add_container_with_multiplier(container, 1.0);
    }

    pub fn add_container_with_multiplier(&self, container: Rc<C>, multiplier: f64) {
        self.members.push(container, &self.relay);
        self.multipliers.borrow_mut().push(multiplier);
        self.notify_changed();
    }

    /// Appends every member of `other` with its multiplier, firing once.
    pub fn add_all(&self, other: &AtomContainerSet<C>) {
        let multipliers = other.multipliers();
        for (container, multiplier) in other.containers().into_iter().zip(multipliers) {
            self.members.push(container, &self.relay);
            self.multipliers.borrow_mut().push(multiplier);
        }
        self.notify_changed();
    }

    /// Replaces every member; multipliers reset to 1. Fires once.
    pub fn set_containers(&self, containers: Vec<Rc<C>>) {
        let count = containers.len();
        self.members.replace_all(containers, &self.relay);
        *self.multipliers.borrow_mut() = vec![1.0; count];
        self.notify_changed();
    }

    /// Removes the first occurrence of `container` with its multiplier.
    pub fn remove_container(&self, container: &C) -> Option<Rc<C>> {
        let index = self.members.index_of(container)?;
        self.remove_container_at(index).ok()
    }

    pub fn remove_container_at(&self, index: usize) -> Result<Rc<C>, Error> {
        let removed = self.members.remove_at(index, &self.relay)?;
        self.multipliers.borrow_mut().remove(index);
        self.notify_changed();
        Ok(removed)
    }

    pub fn remove_all(&self) {
        self.members.clear(&self.relay);
        self.multipliers.borrow_mut().clear();
        self.notify_changed();
    }

    /// Puts `container` at `index` keeping the multiplier, returning the
    /// member it replaced.
    pub fn replace_container(&self, index: usize, container: Rc<C>) -> Result<Rc<C>, Error> {
        let previous = self.members.replace_at(index, container, &self.relay)?;
        self.notify_changed();
        Ok(previous)
    }

    pub fn multiplier(&self, index: usize) -> Option<f64> {
        self.multipliers.borrow().get(index).copied()
    }

    pub fn multiplier_for(&self, container: &C) -> Option<f64> {
        self.multiplier(self.members.index_of(container)?)
    }

    pub fn multipliers(&self) -> Vec<f64> {
        self.multipliers.borrow().clone()
    }

    pub fn set_multiplier(&self, index: usize, multiplier: f64) -> Result<(), Error> {
        {
            let mut multipliers = self.multipliers.borrow_mut();
            let len = multipliers.len();
            let slot = multipliers
                .get_mut(index)
                .ok_or_else(|| Error::index_out_of_bounds("multipliers", index, len))?;
            *slot = multiplier;
        }
        self.notify_changed();
        Ok(())
    }

    /// Sets the multiplier of the first occurrence of `container`. Returns
    /// `false`, firing nothing, when it is not a member.
    pub fn set_multiplier_for(&self, container: &C, multiplier: f64) -> bool {
        match self.members.index_of(container) {
            Some(index) => self.set_multiplier(index, multiplier).is_ok(),
            None => false,
        }
    }

    /// Replaces every multiplier at once; the count must match the members.
    pub fn set_multipliers(&self, multipliers: Vec<f64>) -> Result<(), Error> {
        let expected = self.members.len();
        if multipliers.len() != expected {
            return Err(Error::multiplier_count_mismatch(expected, multipliers.len()));
        }
        *self.multipliers.borrow_mut() = multipliers;
        self.notify_changed();
        Ok(())
    }
}

impl<C: ChemObject> ChemObject for AtomContainerSet<C> {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> &'static str {
        "AtomContainerSet"
    }
}

impl<C: ChemObject> ChangeListener for AtomContainerSet<C> {
    fn on_changed(&self, event: &ChangeEvent) {
        self.notify_changed_with(event);
    }
}

impl<C: ChemObject + Duplicate> Duplicate for AtomContainerSet<C> {
    /// Members are duplicated too; the copy listens to its own members only.
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            relay: this.clone(),
            members: Members::new("containers"),
            multipliers: RefCell::new(self.multipliers()),
        });
        for container in self.members.snapshot() {
            copy.members.push(container.duplicate(), &copy.relay);
        }
        copy
    }
}

impl RingSet {
    /// Rings that contain `atom`.
    pub fn rings_containing(&self, atom: &Atom) -> Vec<Rc<Ring>> {
        self.containers()
            .into_iter()
            .filter(|ring| ring.contains_atom(atom))
            .collect()
    }

    pub fn contains_atom(&self, atom: &Atom) -> bool {
        self.containers().iter().any(|ring| ring.contains_atom(atom))
    }

    /// Rings sharing at least one atom with `ring`, excluding `ring` itself.
    pub fn connected_rings(&self, ring: &Ring) -> Vec<Rc<Ring>> {
        let atoms = ring.atoms();
        self.containers()
            .into_iter()
            .filter(|other| !std::ptr::eq(&**other, ring))
            .filter(|other| atoms.iter().any(|atom| other.contains_atom(atom)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::Recorder;
    use crate::model::types::Element;

    fn two_molecules() -> (Rc<MoleculeSet>, Rc<Molecule>, Rc<Molecule>) {
        let set = MoleculeSet::new();
        let m1 = Molecule::new();
        let m2 = Molecule::new();
        set.add_container(Rc::clone(&m1));
        set.add_container(Rc::clone(&m2));
        (set, m1, m2)
    }

    #[test]
    fn member_change_is_relayed_once() {
        let (set, m1, _) = two_molecules();
        let recorder = Recorder::new();
        recorder.attach(&*set);
        let x = Atom::new(Element::C);
        m1.add_atom(Rc::clone(&x));
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().unwrap().is_from(&*m1));

        x.set_charge(0.5);
        assert_eq!(recorder.count(), 2);
        assert!(recorder.last().unwrap().is_from(&*x));
    }

    #[test]
    fn multiplier_change_fires_set_event_without_touching_members() {
        let (set, m1, m2) = two_molecules();
        let recorder = Recorder::new();
        recorder.attach(&*set);

        set.set_multiplier(1, 2.0).unwrap();
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().unwrap().is_from(&*set));
        assert_eq!(set.multipliers(), vec![1.0, 2.0]);
        assert_eq!(m1.atom_count(), 0);
        assert_eq!(m2.listener_count(), 1);

        assert!(set.set_multiplier_for(&m1, 3.0));
        assert_eq!(recorder.count(), 2);
        assert_eq!(set.multiplier_for(&m1), Some(3.0));
        assert!(!set.set_multiplier_for(&Molecule::new(), 1.0));
        assert_eq!(recorder.count(), 2);
    }

    #[test]
    fn removed_member_is_silent() {
        let (set, m1, _) = two_molecules();
        let recorder = Recorder::new();
        recorder.attach(&*set);
        set.remove_container(&m1).unwrap();
        assert_eq!(set.multipliers(), vec![1.0]);
        recorder.reset();

        m1.add_atom(Atom::new(Element::O));
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn replace_container_rewires_and_keeps_multiplier() {
        let (set, m1, _) = two_molecules();
        set.set_multiplier(0, 4.0).unwrap();
        let replacement = Molecule::new();
        let recorder = Recorder::new();
        recorder.attach(&*set);

        let previous = set.replace_container(0, Rc::clone(&replacement)).unwrap();
        assert!(Rc::ptr_eq(&previous, &m1));
        assert_eq!(recorder.count(), 1);
        assert_eq!(m1.listener_count(), 0);
        assert_eq!(replacement.listener_count(), 1);
        assert_eq!(set.multiplier(0), Some(4.0));
    }

    #[test]
    fn positional_errors_fire_nothing() {
        let (set, _, _) = two_molecules();
        let recorder = Recorder::new();
        recorder.attach(&*set);
        assert_eq!(
            set.set_multiplier(2, 1.0).unwrap_err(),
            Error::index_out_of_bounds("multipliers", 2, 2)
        );
        assert!(set.remove_container_at(5).is_err());
        assert!(set.replace_container(2, Molecule::new()).is_err());
        assert_eq!(
            set.set_multipliers(vec![1.0]).unwrap_err(),
            Error::multiplier_count_mismatch(2, 1)
        );
        assert_eq!(recorder.count(), 0);
        assert_eq!(set.container_count(), 2);
    }

    #[test]
    fn bulk_operations_fire_once() {
        let (set, m1, m2) = two_molecules();
        let other = MoleculeSet::new();
        other.add_container_with_multiplier(Molecule::new(), 2.5);
        let recorder = Recorder::new();
        recorder.attach(&*set);

        set.add_all(&other);
        assert_eq!(recorder.count(), 1);
        assert_eq!(set.multipliers(), vec![1.0, 1.0, 2.5]);

        set.set_multipliers(vec![2.0, 2.0, 2.0]).unwrap();
        assert_eq!(recorder.count(), 2);

        set.set_containers(vec![Rc::clone(&m2)]);
        assert_eq!(recorder.count(), 3);
        assert_eq!(set.multipliers(), vec![1.0]);
        assert_eq!(m1.listener_count(), 0);

        set.remove_all();
        assert_eq!(recorder.count(), 4);
        assert!(set.is_empty());
        assert_eq!(m2.listener_count(), 0);
    }

    #[test]
    fn duplicate_copies_members_and_drops_listeners() {
        let (set, m1, _) = two_molecules();
        m1.add_atom(Atom::new(Element::N));
        set.set_multiplier(0, 2.0).unwrap();
        let recorder = Recorder::new();
        recorder.attach(&*set);

        let copy = set.duplicate();
        assert_eq!(copy.listener_count(), 0);
        assert_eq!(copy.container_count(), 2);
        assert_eq!(copy.multipliers(), vec![2.0, 1.0]);
        let copied = copy.container(0).unwrap();
        assert!(!Rc::ptr_eq(&copied, &m1));
        assert_eq!(copied.listener_count(), 1);
        assert_eq!(m1.listener_count(), 1);

        copied.add_atom(Atom::new(Element::C));
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn ring_set_atom_queries() {
        let rings = RingSet::new();
        let benzene = Ring::regular(6, Element::C);
        let fused = Ring::new();
        let shared = benzene.atom(0).unwrap();
        fused.add_atom(Rc::clone(&shared));
        fused.add_atom(Atom::new(Element::N));
        let lonely = Ring::regular(3, Element::C);
        rings.add_container(Rc::clone(&benzene));
        rings.add_container(Rc::clone(&fused));
        rings.add_container(Rc::clone(&lonely));

        assert_eq!(rings.rings_containing(&shared).len(), 2);
        assert!(rings.contains_atom(&shared));
        assert!(!rings.contains_atom(&Atom::new(Element::C)));
        let connected = rings.connected_rings(&benzene);
        assert_eq!(connected.len(), 1);
        assert!(Rc::ptr_eq(&connected[0], &fused));
    }
}
