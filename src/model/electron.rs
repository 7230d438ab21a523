use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::atom::Atom;
use super::object::{address, ChemObject, Duplicate, ObjectCore};

/// Anything that holds electrons: bonds, lone pairs and single electrons.
pub trait ElectronContainerProps: ChemObject {
    fn electron_count_cell(&self) -> &Cell<Option<u32>>;

    fn electron_count(&self) -> Option<u32> {
        self.electron_count_cell().get()
    }

    fn set_electron_count(&self, count: u32) {
        self.electron_count_cell().set(Some(count));
        self.notify_changed();
    }
}

macro_rules! atom_bound_electrons {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $electrons:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            core: ObjectCore,
            atom: RefCell<Option<Rc<Atom>>>,
            electron_count: Cell<Option<u32>>,
        }

        impl $name {
            pub fn new(atom: Option<Rc<Atom>>) -> Rc<Self> {
                Rc::new_cyclic(|this: &Weak<Self>| Self {
                    core: ObjectCore::new(this.clone()),
                    atom: RefCell::new(atom),
                    electron_count: Cell::new(Some($electrons)),
                })
            }

            pub(crate) fn duplicate_onto(&self, atom: Option<Rc<Atom>>) -> Rc<Self> {
                Rc::new_cyclic(|this: &Weak<Self>| Self {
                    core: self.core.duplicate(this.clone()),
                    atom: RefCell::new(atom),
                    electron_count: Cell::new(self.electron_count.get()),
                })
            }

            pub fn atom(&self) -> Option<Rc<Atom>> {
                self.atom.borrow().clone()
            }

            pub fn set_atom(&self, atom: Option<Rc<Atom>>) {
                *self.atom.borrow_mut() = atom;
                self.notify_changed();
            }

            pub fn contains(&self, atom: &Atom) -> bool {
                self.atom
                    .borrow()
                    .as_ref()
                    .is_some_and(|carrier| address(&**carrier) == address(atom))
            }
        }

        chem_object!($name, $kind);

        impl ElectronContainerProps for $name {
            fn electron_count_cell(&self) -> &Cell<Option<u32>> {
                &self.electron_count
            }
        }

        impl Duplicate for $name {
            fn duplicate(&self) -> Rc<Self> {
                self.duplicate_onto(self.atom())
            }
        }
    };
}

atom_bound_electrons!(
    /// A non-bonding electron pair on an atom.
    LonePair,
    "LonePair",
    2
);

atom_bound_electrons!(
    /// An unpaired electron on an atom, as in a radical.
    SingleElectron,
    "SingleElectron",
    1
);
