//! Atom containers: molecules, rings and every other single-level holder of
//! atoms, bonds, lone pairs and single electrons.
//!
//! A container subscribes to each child it holds and relays the child's
//! events to its own listeners unchanged. The operations live on
//! [`AtomContainerOps`] as provided methods over an embedded
//! [`ContainerContents`], so the specialised containers (crystal, monomer,
//! strand, polymers) share one implementation of the wiring.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::atom::Atom;
use super::bond::Bond;
use super::electron::{LonePair, SingleElectron};
use super::error::Error;
use super::members::Members;
use super::object::{address, ChemObject, Duplicate, ObjectCore};
use super::types::{BondOrder, Element};
use crate::notify::ChangeListener;

/// Original atom address to its copy.
pub(crate) type AtomCopies = HashMap<*const (), Rc<Atom>>;

/// The four child collections of an atom container.
#[derive(Debug)]
pub struct ContainerContents {
    relay: Weak<dyn ChangeListener>,
    atoms: Members<Atom>,
    bonds: Members<Bond>,
    lone_pairs: Members<LonePair>,
    single_electrons: Members<SingleElectron>,
}

impl ContainerContents {
    /// `relay` is the owning container as a listener.
    pub(crate) fn new(relay: Weak<dyn ChangeListener>) -> Self {
        Self {
            relay,
            atoms: Members::new("atoms"),
            bonds: Members::new("bonds"),
            lone_pairs: Members::new("lone pairs"),
            single_electrons: Members::new("single electrons"),
        }
    }

    pub(crate) fn relay(&self) -> &Weak<dyn ChangeListener> {
        &self.relay
    }

    pub(crate) fn push_atom(&self, atom: Rc<Atom>) {
        self.atoms.push(atom, &self.relay);
    }

    pub(crate) fn push_atom_once(&self, atom: &Rc<Atom>) {
        if !self.atoms.contains(atom) {
            self.atoms.push(Rc::clone(atom), &self.relay);
        }
    }

    /// Drops every occurrence of each atom in `atoms` together with the
    /// electron containers attached to it.
    pub(crate) fn remove_atoms_and_connected(&self, atoms: &[Rc<Atom>]) {
        let doomed = |atom: &Rc<Atom>| atoms.iter().any(|other| Rc::ptr_eq(other, atom));
        self.atoms.retain(|atom| !doomed(atom), &self.relay);
        self.bonds
            .retain(|bond| !bond.atoms().iter().any(doomed), &self.relay);
        self.lone_pairs.retain(
            |pair| pair.atom().map_or(true, |atom| !doomed(&atom)),
            &self.relay,
        );
        self.single_electrons.retain(
            |electron| electron.atom().map_or(true, |atom| !doomed(&atom)),
            &self.relay,
        );
    }

    /// Fills `target` with copies of every member, with bonds and electrons
    /// re-pointed at the copied atoms.
    pub(crate) fn copy_into(&self, target: &ContainerContents) {
        self.copy_with(target, &mut AtomCopies::new());
    }

    /// Like [`copy_into`](Self::copy_into), reusing atom copies already made
    /// for another container (a strand and its monomers share atoms).
    pub(crate) fn copy_with(&self, target: &ContainerContents, copies: &mut AtomCopies) {
        for atom in self.atoms.snapshot() {
            let copy = copies
                .entry(address(&*atom))
                .or_insert_with(|| atom.duplicate());
            target.atoms.push(Rc::clone(copy), &target.relay);
        }

        let remap = |atom: &Rc<Atom>| {
            copies
                .get(&address(&**atom))
                .cloned()
                .unwrap_or_else(|| Rc::clone(atom))
        };
        for bond in self.bonds.snapshot() {
            let atoms = bond.atoms().iter().map(remap).collect();
            target.bonds.push(bond.duplicate_onto(atoms), &target.relay);
        }
        for pair in self.lone_pairs.snapshot() {
            let atom = pair.atom().as_ref().map(remap);
            target.lone_pairs.push(pair.duplicate_onto(atom), &target.relay);
        }
        for electron in self.single_electrons.snapshot() {
            let atom = electron.atom().as_ref().map(remap);
            target
                .single_electrons
                .push(electron.duplicate_onto(atom), &target.relay);
        }
    }
}

pub trait AtomContainerOps: ChemObject {
    fn contents(&self) -> &ContainerContents;

    fn is_empty(&self) -> bool {
        let contents = self.contents();
        contents.atoms.is_empty()
            && contents.bonds.is_empty()
            && contents.lone_pairs.is_empty()
            && contents.single_electrons.is_empty()
    }

    fn atom_count(&self) -> usize {
        self.contents().atoms.len()
    }

    fn atom(&self, index: usize) -> Option<Rc<Atom>> {
        self.contents().atoms.get(index)
    }

    fn atoms(&self) -> Vec<Rc<Atom>> {
        self.contents().atoms.snapshot()
    }

    fn first_atom(&self) -> Option<Rc<Atom>> {
        self.atom(0)
    }

    fn last_atom(&self) -> Option<Rc<Atom>> {
        self.atom_count().checked_sub(1).and_then(|index| self.atom(index))
    }

    fn contains_atom(&self, atom: &Atom) -> bool {
        self.contents().atoms.contains(atom)
    }

    fn atom_index(&self, atom: &Atom) -> Option<usize> {
        self.contents().atoms.index_of(atom)
    }

    fn add_atom(&self, atom: Rc<Atom>) {
        self.contents().push_atom(atom);
        self.notify_changed();
    }

    /// Removes the first occurrence of `atom`. Bonds to it are left alone;
    /// see [`remove_atom_and_connected`](AtomContainerOps::remove_atom_and_connected).
    fn remove_atom(&self, atom: &Atom) -> Option<Rc<Atom>> {
        let contents = self.contents();
        let removed = contents.atoms.remove(atom, &contents.relay)?;
        self.notify_changed();
        Some(removed)
    }

    fn remove_atom_at(&self, index: usize) -> Result<Rc<Atom>, Error> {
        let contents = self.contents();
        let removed = contents.atoms.remove_at(index, &contents.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    /// Replaces every atom, firing once.
    fn set_atoms(&self, atoms: Vec<Rc<Atom>>) {
        let contents = self.contents();
        contents.atoms.replace_all(atoms, &contents.relay);
        self.notify_changed();
    }

    /// Puts `atom` at `index`, returning the atom it replaced.
    fn set_atom(&self, index: usize, atom: Rc<Atom>) -> Result<Rc<Atom>, Error> {
        let contents = self.contents();
        let previous = contents.atoms.replace_at(index, atom, &contents.relay)?;
        self.notify_changed();
        Ok(previous)
    }

    /// Removes `atom` with every bond, lone pair and single electron attached
    /// to it, firing once. Returns `false` if the atom is not a member.
    fn remove_atom_and_connected(&self, atom: &Atom) -> bool {
        let contents = self.contents();
        let Some(member) = contents.atoms.index_of(atom).and_then(|i| contents.atoms.get(i))
        else {
            return false;
        };
        contents.remove_atoms_and_connected(&[member]);
        self.notify_changed();
        true
    }

    fn bond_count(&self) -> usize {
        self.contents().bonds.len()
    }

    fn bond(&self, index: usize) -> Option<Rc<Bond>> {
        self.contents().bonds.get(index)
    }

    fn bonds(&self) -> Vec<Rc<Bond>> {
        self.contents().bonds.snapshot()
    }

    fn contains_bond(&self, bond: &Bond) -> bool {
        self.contents().bonds.contains(bond)
    }

    fn bond_index(&self, bond: &Bond) -> Option<usize> {
        self.contents().bonds.index_of(bond)
    }

    fn add_bond(&self, bond: Rc<Bond>) {
        let contents = self.contents();
        contents.bonds.push(bond, &contents.relay);
        self.notify_changed();
    }

    fn remove_bond(&self, bond: &Bond) -> Option<Rc<Bond>> {
        let contents = self.contents();
        let removed = contents.bonds.remove(bond, &contents.relay)?;
        self.notify_changed();
        Some(removed)
    }

    fn remove_bond_at(&self, index: usize) -> Result<Rc<Bond>, Error> {
        let contents = self.contents();
        let removed = contents.bonds.remove_at(index, &contents.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    fn set_bonds(&self, bonds: Vec<Rc<Bond>>) {
        let contents = self.contents();
        contents.bonds.replace_all(bonds, &contents.relay);
        self.notify_changed();
    }

    fn remove_all_bonds(&self) {
        let contents = self.contents();
        contents.bonds.clear(&contents.relay);
        self.notify_changed();
    }

    fn connected_bonds(&self, atom: &Atom) -> Vec<Rc<Bond>> {
        self.bonds()
            .into_iter()
            .filter(|bond| bond.contains(atom))
            .collect()
    }

    fn connected_atoms(&self, atom: &Atom) -> Vec<Rc<Atom>> {
        self.connected_bonds(atom)
            .iter()
            .flat_map(|bond| bond.connected_atoms(atom))
            .collect()
    }

    fn bond_between(&self, first: &Atom, second: &Atom) -> Option<Rc<Bond>> {
        self.bonds()
            .into_iter()
            .find(|bond| bond.contains(first) && bond.contains(second))
    }

    fn lone_pair_count(&self) -> usize {
        self.contents().lone_pairs.len()
    }

    fn lone_pairs(&self) -> Vec<Rc<LonePair>> {
        self.contents().lone_pairs.snapshot()
    }

    fn contains_lone_pair(&self, pair: &LonePair) -> bool {
        self.contents().lone_pairs.contains(pair)
    }

    fn add_lone_pair(&self, pair: Rc<LonePair>) {
        let contents = self.contents();
        contents.lone_pairs.push(pair, &contents.relay);
        self.notify_changed();
    }

    fn remove_lone_pair(&self, pair: &LonePair) -> Option<Rc<LonePair>> {
        let contents = self.contents();
        let removed = contents.lone_pairs.remove(pair, &contents.relay)?;
        self.notify_changed();
        Some(removed)
    }

    fn remove_lone_pair_at(&self, index: usize) -> Result<Rc<LonePair>, Error> {
        let contents = self.contents();
        let removed = contents.lone_pairs.remove_at(index, &contents.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    fn connected_lone_pairs(&self, atom: &Atom) -> Vec<Rc<LonePair>> {
        self.lone_pairs()
            .into_iter()
            .filter(|pair| pair.contains(atom))
            .collect()
    }

    fn single_electron_count(&self) -> usize {
        self.contents().single_electrons.len()
    }

    fn single_electrons(&self) -> Vec<Rc<SingleElectron>> {
        self.contents().single_electrons.snapshot()
    }

    fn contains_single_electron(&self, electron: &SingleElectron) -> bool {
        self.contents().single_electrons.contains(electron)
    }

    fn add_single_electron(&self, electron: Rc<SingleElectron>) {
        let contents = self.contents();
        contents.single_electrons.push(electron, &contents.relay);
        self.notify_changed();
    }

    fn remove_single_electron(&self, electron: &SingleElectron) -> Option<Rc<SingleElectron>> {
        let contents = self.contents();
        let removed = contents.single_electrons.remove(electron, &contents.relay)?;
        self.notify_changed();
        Some(removed)
    }

    fn remove_single_electron_at(&self, index: usize) -> Result<Rc<SingleElectron>, Error> {
        let contents = self.contents();
        let removed = contents.single_electrons.remove_at(index, &contents.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    fn connected_single_electrons(&self, atom: &Atom) -> Vec<Rc<SingleElectron>> {
        self.single_electrons()
            .into_iter()
            .filter(|electron| electron.contains(atom))
            .collect()
    }

    /// Empties every collection, firing once.
    fn remove_all_elements(&self) {
        let contents = self.contents();
        contents.atoms.clear(&contents.relay);
        contents.bonds.clear(&contents.relay);
        contents.lone_pairs.clear(&contents.relay);
        contents.single_electrons.clear(&contents.relay);
        self.notify_changed();
    }

    /// Removes bonds, lone pairs and single electrons, keeping the atoms.
    fn remove_all_electron_containers(&self) {
        let contents = self.contents();
        contents.bonds.clear(&contents.relay);
        contents.lone_pairs.clear(&contents.relay);
        contents.single_electrons.clear(&contents.relay);
        self.notify_changed();
    }

    /// Adds every member of `other` that is not already here, firing once.
    fn add_all(&self, other: &dyn AtomContainerOps) {
        let contents = self.contents();
        for atom in other.atoms() {
            contents.push_atom_once(&atom);
        }
        for bond in other.bonds() {
            if !contents.bonds.contains(&bond) {
                contents.bonds.push(bond, &contents.relay);
            }
        }
        for pair in other.lone_pairs() {
            if !contents.lone_pairs.contains(&pair) {
                contents.lone_pairs.push(pair, &contents.relay);
            }
        }
        for electron in other.single_electrons() {
            if !contents.single_electrons.contains(&electron) {
                contents.single_electrons.push(electron, &contents.relay);
            }
        }
        self.notify_changed();
    }
}

macro_rules! atom_container {
    ($ty:ty, $kind:literal) => {
        chem_object!($ty, $kind);
        relay_changes!($ty);

        impl $crate::model::container::AtomContainerOps for $ty {
            fn contents(&self) -> &$crate::model::container::ContainerContents {
                &self.contents
            }
        }
    };
}

#[derive(Debug)]
pub struct AtomContainer {
    core: ObjectCore,
    contents: ContainerContents,
}

impl AtomContainer {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
        })
    }

    /// A container sharing (not copying) every member of `other`.
    pub fn from_container(other: &dyn AtomContainerOps) -> Rc<Self> {
        let container = Self::new();
        container.add_all(other);
        container
    }
}

atom_container!(AtomContainer, "AtomContainer");

impl Duplicate for AtomContainer {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
        });
        self.contents.copy_into(&copy.contents);
        copy
    }
}

#[derive(Debug)]
pub struct Molecule {
    core: ObjectCore,
    contents: ContainerContents,
}

impl Molecule {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
        })
    }

    pub fn from_container(other: &dyn AtomContainerOps) -> Rc<Self> {
        let molecule = Self::new();
        molecule.add_all(other);
        molecule
    }
}

atom_container!(Molecule, "Molecule");

impl Duplicate for Molecule {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
        });
        self.contents.copy_into(&copy.contents);
        copy
    }
}

#[derive(Debug)]
pub struct Ring {
    core: ObjectCore,
    contents: ContainerContents,
}

impl Ring {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
        })
    }

    /// A ring of `size` atoms of `element` closed by single bonds.
    pub fn regular(size: usize, element: Element) -> Rc<Self> {
        let ring = Self::new();
        let atoms: Vec<Rc<Atom>> = (0..size).map(|_| Atom::new(element)).collect();
        for atom in &atoms {
            ring.contents.push_atom(Rc::clone(atom));
        }
        // Two atoms close with one bond; the wrap-around would duplicate it.
        let bonds = if size > 2 { size } else { size.saturating_sub(1) };
        for (index, atom) in atoms.iter().enumerate().take(bonds) {
            let next = &atoms[(index + 1) % size];
            let bond = Bond::new(Rc::clone(atom), Rc::clone(next), BondOrder::Single);
            ring.contents.bonds.push(bond, &ring.contents.relay);
        }
        ring
    }

    pub fn ring_size(&self) -> usize {
        self.atom_count()
    }

    /// Sum of the numeric orders of every bond with a known order.
    pub fn bond_order_sum(&self) -> f64 {
        self.bonds()
            .iter()
            .filter_map(|bond| bond.order())
            .map(|order| order.value())
            .sum()
    }

    /// The other ring bond at `atom`, walking on from `bond`.
    pub fn next_bond(&self, bond: &Bond, atom: &Atom) -> Option<Rc<Bond>> {
        self.bonds()
            .into_iter()
            .find(|candidate| address(&**candidate) != address(bond) && candidate.contains(atom))
    }
}

atom_container!(Ring, "Ring");

impl Duplicate for Ring {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
        });
        self.contents.copy_into(&copy.contents);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::ElementProps;
    use crate::model::testing::Recorder;

    fn water() -> (Rc<Molecule>, Rc<Atom>, Rc<Atom>, Rc<Atom>) {
        let molecule = Molecule::new();
        let o = Atom::new(Element::O);
        let h1 = Atom::new(Element::H);
        let h2 = Atom::new(Element::H);
        molecule.add_atom(Rc::clone(&o));
        molecule.add_atom(Rc::clone(&h1));
        molecule.add_atom(Rc::clone(&h2));
        molecule.add_bond(Bond::new(Rc::clone(&o), Rc::clone(&h1), BondOrder::Single));
        molecule.add_bond(Bond::new(Rc::clone(&o), Rc::clone(&h2), BondOrder::Single));
        (molecule, o, h1, h2)
    }

    #[test]
    fn atom_change_is_relayed_once_with_atom_origin() {
        let container = AtomContainer::new();
        let atom = Atom::new(Element::C);
        container.add_atom(Rc::clone(&atom));
        let recorder = Recorder::new();
        recorder.attach(&*container);

        atom.set_charge(1.0);
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().unwrap().is_from(&*atom));
    }

    #[test]
    fn each_structural_operation_fires_once() {
        let (molecule, o, h1, _) = water();
        let recorder = Recorder::new();
        recorder.attach(&*molecule);

        molecule.add_lone_pair(LonePair::new(Some(Rc::clone(&o))));
        assert_eq!(recorder.count(), 1);
        molecule.add_single_electron(SingleElectron::new(Some(Rc::clone(&h1))));
        assert_eq!(recorder.count(), 2);
        molecule.remove_bond_at(0).unwrap();
        assert_eq!(recorder.count(), 3);
        let event = recorder.last().unwrap();
        assert!(event.is_from(&*molecule));
    }

    #[test]
    fn removed_atom_is_no_longer_relayed() {
        let (molecule, o, _, _) = water();
        let recorder = Recorder::new();
        recorder.attach(&*molecule);
        assert!(molecule.remove_atom(&o).is_some());
        recorder.reset();
        o.set_symbol("S");
        assert_eq!(recorder.count(), 0);
        assert_eq!(o.listener_count(), 0);
    }

    #[test]
    fn bond_and_electron_changes_are_relayed() {
        let (molecule, o, _, _) = water();
        let pair = LonePair::new(Some(Rc::clone(&o)));
        molecule.add_lone_pair(Rc::clone(&pair));
        let recorder = Recorder::new();
        recorder.attach(&*molecule);

        molecule.bond(0).unwrap().set_order(BondOrder::Double);
        pair.set_atom(None);
        assert_eq!(recorder.count(), 2);
        assert!(recorder.last().unwrap().is_from(&*pair));
    }

    #[test]
    fn set_atom_replaces_subscription() {
        let (molecule, o, _, _) = water();
        let sulfur = Atom::new(Element::S);
        let previous = molecule.set_atom(0, Rc::clone(&sulfur)).unwrap();
        assert!(Rc::ptr_eq(&previous, &o));
        assert_eq!(o.listener_count(), 0);
        assert_eq!(sulfur.listener_count(), 1);

        let err = molecule.set_atom(9, Atom::new(Element::C)).unwrap_err();
        assert_eq!(err, Error::index_out_of_bounds("atoms", 9, 3));
    }

    #[test]
    fn failed_positional_operation_fires_nothing() {
        let (molecule, _, _, _) = water();
        let recorder = Recorder::new();
        recorder.attach(&*molecule);
        assert!(molecule.remove_atom_at(3).is_err());
        assert!(molecule.remove_bond_at(2).is_err());
        assert!(molecule.remove_lone_pair_at(0).is_err());
        assert!(molecule.remove_single_electron_at(0).is_err());
        assert_eq!(recorder.count(), 0);
        assert_eq!(molecule.atom_count(), 3);
    }

    #[test]
    fn set_atoms_rewires_and_fires_once() {
        let (molecule, o, h1, h2) = water();
        let recorder = Recorder::new();
        recorder.attach(&*molecule);
        let carbon = Atom::new(Element::C);
        molecule.set_atoms(vec![Rc::clone(&carbon), Rc::clone(&h1)]);
        assert_eq!(recorder.count(), 1);
        assert_eq!(o.listener_count(), 0);
        assert_eq!(h2.listener_count(), 0);
        assert_eq!(h1.listener_count(), 1);
        assert_eq!(carbon.listener_count(), 1);
    }

    #[test]
    fn repeated_atom_stays_subscribed_until_last_copy_leaves() {
        let container = AtomContainer::new();
        let atom = Atom::new(Element::C);
        container.set_atoms(vec![Rc::clone(&atom), Rc::clone(&atom)]);
        let recorder = Recorder::new();
        recorder.attach(&*container);

        container.remove_atom_at(0).unwrap();
        recorder.reset();
        atom.set_charge(0.2);
        assert_eq!(recorder.count(), 1);

        container.remove_atom_at(0).unwrap();
        recorder.reset();
        atom.set_charge(0.3);
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn remove_atom_and_connected_drops_attached_members() {
        let (molecule, o, h1, _) = water();
        molecule.add_lone_pair(LonePair::new(Some(Rc::clone(&o))));
        molecule.add_single_electron(SingleElectron::new(Some(Rc::clone(&h1))));
        let recorder = Recorder::new();
        recorder.attach(&*molecule);

        assert!(molecule.remove_atom_and_connected(&o));
        assert_eq!(recorder.count(), 1);
        assert_eq!(molecule.atom_count(), 2);
        assert_eq!(molecule.bond_count(), 0);
        assert_eq!(molecule.lone_pair_count(), 0);
        assert_eq!(molecule.single_electron_count(), 1);
        assert!(!molecule.remove_atom_and_connected(&o));
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn bulk_clears_fire_once() {
        let (molecule, o, _, _) = water();
        molecule.add_lone_pair(LonePair::new(Some(Rc::clone(&o))));
        let recorder = Recorder::new();
        recorder.attach(&*molecule);

        molecule.remove_all_electron_containers();
        assert_eq!(recorder.count(), 1);
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.bond_count(), 0);

        molecule.remove_all_elements();
        assert_eq!(recorder.count(), 2);
        assert!(molecule.is_empty());
        assert_eq!(o.listener_count(), 0);
    }

    #[test]
    fn connectivity_queries() {
        let (molecule, o, h1, h2) = water();
        assert_eq!(molecule.connected_bonds(&o).len(), 2);
        assert_eq!(molecule.connected_atoms(&o).len(), 2);
        assert!(molecule.bond_between(&o, &h1).is_some());
        assert!(molecule.bond_between(&h1, &h2).is_none());
        assert_eq!(molecule.atom_index(&h2), Some(2));
        assert!(Rc::ptr_eq(&molecule.last_atom().unwrap(), &h2));
    }

    #[test]
    fn add_all_merges_without_duplicates() {
        let (molecule, o, _, _) = water();
        let target = AtomContainer::new();
        target.add_atom(Rc::clone(&o));
        let recorder = Recorder::new();
        recorder.attach(&*target);

        target.add_all(&*molecule);
        assert_eq!(recorder.count(), 1);
        assert_eq!(target.atom_count(), 3);
        assert_eq!(target.bond_count(), 2);
        assert_eq!(o.listener_count(), 2);

        let shared = Molecule::from_container(&*molecule);
        assert_eq!(shared.atom_count(), 3);
        assert!(Rc::ptr_eq(&shared.atom(0).unwrap(), &o));
    }

    #[test]
    fn duplicate_copies_structure_onto_new_atoms() {
        let (molecule, o, _, _) = water();
        molecule.add_lone_pair(LonePair::new(Some(Rc::clone(&o))));
        let recorder = Recorder::new();
        recorder.attach(&*molecule);

        let copy = molecule.duplicate();
        assert_eq!(copy.listener_count(), 0);
        assert_eq!(copy.atom_count(), 3);
        assert_eq!(copy.bond_count(), 2);
        let new_o = copy.atom(0).unwrap();
        assert!(!Rc::ptr_eq(&new_o, &o));
        assert!(copy.bond(0).unwrap().contains(&new_o));
        assert!(copy.lone_pairs()[0].contains(&new_o));

        let copy_recorder = Recorder::new();
        copy_recorder.attach(&*copy);
        new_o.set_charge(-0.8);
        assert_eq!(copy_recorder.count(), 1);
        assert_eq!(recorder.count(), 0);
        o.set_charge(-0.4);
        assert_eq!(copy_recorder.count(), 1);
    }

    #[test]
    fn regular_ring_is_closed() {
        let ring = Ring::regular(6, Element::C);
        assert_eq!(ring.ring_size(), 6);
        assert_eq!(ring.bond_count(), 6);
        assert!((ring.bond_order_sum() - 6.0).abs() < 1e-12);
        let first = ring.atom(0).unwrap();
        let bond = ring.bond(0).unwrap();
        let next = ring.next_bond(&bond, &first).unwrap();
        assert!(next.contains(&first));
        assert!(!Rc::ptr_eq(&next, &bond));
        assert_eq!(first.listener_count(), 1);
    }

    #[test]
    fn two_atom_ring_has_a_single_bond() {
        let ring = Ring::regular(2, Element::O);
        assert_eq!(ring.ring_size(), 2);
        assert_eq!(ring.bond_count(), 1);
        let bond = ring.bond(0).unwrap();
        assert!(bond.contains(&ring.atom(0).unwrap()));
        assert!(bond.contains(&ring.atom(1).unwrap()));

        assert_eq!(Ring::regular(1, Element::C).bond_count(), 0);
        assert_eq!(Ring::regular(0, Element::C).atom_count(), 0);
    }
}
