use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::atom::Atom;
use super::electron::ElectronContainerProps;
use super::error::Error;
use super::object::{address, ChemObject, Duplicate, ObjectCore};
use super::types::{BondOrder, BondStereo};

/// A bond between two or more atoms.
///
/// A bond refers to its atoms but does not listen to them; the container
/// holding both already does.
#[derive(Debug)]
pub struct Bond {
    core: ObjectCore,
    atoms: RefCell<Vec<Rc<Atom>>>,
    order: Cell<Option<BondOrder>>,
    stereo: Cell<BondStereo>,
    electron_count: Cell<Option<u32>>,
}

impl Bond {
    pub fn new(begin: Rc<Atom>, end: Rc<Atom>, order: BondOrder) -> Rc<Self> {
        Self::with_atoms(vec![begin, end], Some(order))
    }

    pub fn with_atoms(atoms: Vec<Rc<Atom>>, order: Option<BondOrder>) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            atoms: RefCell::new(atoms),
            order: Cell::new(order),
            stereo: Cell::new(BondStereo::None),
            electron_count: Cell::new(order.and_then(|o| o.electron_count())),
        })
    }

    /// Copy of this bond spanning `atoms` instead of the original ones.
    pub(crate) fn duplicate_onto(&self, atoms: Vec<Rc<Atom>>) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            atoms: RefCell::new(atoms),
            order: Cell::new(self.order.get()),
            stereo: Cell::new(self.stereo.get()),
            electron_count: Cell::new(self.electron_count.get()),
        })
    }

    pub fn atoms(&self) -> Vec<Rc<Atom>> {
        self.atoms.borrow().clone()
    }

    pub fn atom(&self, index: usize) -> Option<Rc<Atom>> {
        self.atoms.borrow().get(index).cloned()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.borrow().len()
    }

    pub fn begin(&self) -> Option<Rc<Atom>> {
        self.atom(0)
    }

    pub fn end(&self) -> Option<Rc<Atom>> {
        self.atom(1)
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.atoms
            .borrow()
            .iter()
            .any(|member| address(&**member) == address(atom))
    }

    /// The partner of `atom` in a two-atom bond.
    pub fn connected_atom(&self, atom: &Atom) -> Option<Rc<Atom>> {
        let atoms = self.atoms.borrow();
        match atoms.as_slice() {
            [a, b] if address(&**a) == address(atom) => Some(Rc::clone(b)),
            [a, b] if address(&**b) == address(atom) => Some(Rc::clone(a)),
            _ => None,
        }
    }

    /// Every atom of the bond other than `atom`.
    pub fn connected_atoms(&self, atom: &Atom) -> Vec<Rc<Atom>> {
        self.atoms
            .borrow()
            .iter()
            .filter(|member| address(&***member) != address(atom))
            .cloned()
            .collect()
    }

    pub fn is_connected_to(&self, other: &Bond) -> bool {
        self.atoms.borrow().iter().any(|atom| other.contains(atom))
    }

    /// Replaces every atom of the bond, firing once.
    pub fn set_atoms(&self, atoms: Vec<Rc<Atom>>) {
        *self.atoms.borrow_mut() = atoms;
        self.notify_changed();
    }

    pub fn set_atom(&self, atom: Rc<Atom>, position: usize) -> Result<(), Error> {
        {
            let mut atoms = self.atoms.borrow_mut();
            let len = atoms.len();
            let slot = atoms
                .get_mut(position)
                .ok_or_else(|| Error::index_out_of_bounds("bond atoms", position, len))?;
            *slot = atom;
        }
        self.notify_changed();
        Ok(())
    }

    pub fn order(&self) -> Option<BondOrder> {
        self.order.get()
    }

    /// Sets the order and the matching electron count, firing once.
    pub fn set_order(&self, order: BondOrder) {
        self.order.set(Some(order));
        if let Some(count) = order.electron_count() {
            self.electron_count.set(Some(count));
        }
        self.notify_changed();
    }

    pub fn stereo(&self) -> BondStereo {
        self.stereo.get()
    }

    pub fn set_stereo(&self, stereo: BondStereo) {
        self.stereo.set(stereo);
        self.notify_changed();
    }
}

chem_object!(Bond, "Bond");

impl ElectronContainerProps for Bond {
    fn electron_count_cell(&self) -> &Cell<Option<u32>> {
        &self.electron_count
    }
}

impl Duplicate for Bond {
    /// The copy spans the same atoms; containers re-point copied bonds at
    /// their copied atoms.
    fn duplicate(&self) -> Rc<Self> {
        self.duplicate_onto(self.atoms())
    }
}
