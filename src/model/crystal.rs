use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::container::ContainerContents;
use super::object::{ChemObject, Duplicate, ObjectCore};

/// Unit cell of a crystal.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    pub a: Option<[f64; 3]>,
    pub b: Option<[f64; 3]>,
    pub c: Option<[f64; 3]>,
    pub space_group: String,
    /// Number of asymmetric units in the cell.
    pub z: Option<u32>,
}

impl Default for UnitCell {
    fn default() -> Self {
        Self {
            a: None,
            b: None,
            c: None,
            space_group: "P1".to_string(),
            z: None,
        }
    }
}

/// An atom container with a unit cell.
#[derive(Debug)]
pub struct Crystal {
    core: ObjectCore,
    contents: ContainerContents,
    cell: RefCell<UnitCell>,
}

impl Crystal {
    pub fn new() -> Rc<Self> {
        Self::with_cell(UnitCell::default())
    }

    pub fn with_cell(cell: UnitCell) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
            cell: RefCell::new(cell),
        })
    }

    pub fn cell(&self) -> UnitCell {
        self.cell.borrow().clone()
    }

    pub fn a(&self) -> Option<[f64; 3]> {
        self.cell.borrow().a
    }

    pub fn b(&self) -> Option<[f64; 3]> {
        self.cell.borrow().b
    }

    pub fn c(&self) -> Option<[f64; 3]> {
        self.cell.borrow().c
    }

    pub fn set_a(&self, axis: [f64; 3]) {
        self.cell.borrow_mut().a = Some(axis);
        self.notify_changed();
    }

    pub fn set_b(&self, axis: [f64; 3]) {
        self.cell.borrow_mut().b = Some(axis);
        self.notify_changed();
    }

    pub fn set_c(&self, axis: [f64; 3]) {
        self.cell.borrow_mut().c = Some(axis);
        self.notify_changed();
    }

    /// Sets all three axes, firing once.
    pub fn set_axes(&self, a: [f64; 3], b: [f64; 3], c: [f64; 3]) {
        {
            let mut cell = self.cell.borrow_mut();
            cell.a = Some(a);
            cell.b = Some(b);
            cell.c = Some(c);
        }
        self.notify_changed();
    }

    pub fn space_group(&self) -> String {
        self.cell.borrow().space_group.clone()
    }

    pub fn set_space_group(&self, space_group: &str) {
        self.cell.borrow_mut().space_group = space_group.to_string();
        self.notify_changed();
    }

    pub fn z(&self) -> Option<u32> {
        self.cell.borrow().z
    }

    pub fn set_z(&self, z: u32) {
        self.cell.borrow_mut().z = Some(z);
        self.notify_changed();
    }
}

atom_container!(Crystal, "Crystal");

impl Duplicate for Crystal {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
            cell: RefCell::new(self.cell()),
        });
        self.contents.copy_into(&copy.contents);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::container::AtomContainerOps;
    use crate::model::testing::Recorder;
    use crate::model::types::Element;

    #[test]
    fn cell_setters_fire() {
        let crystal = Crystal::new();
        assert_eq!(crystal.space_group(), "P1");
        let recorder = Recorder::new();
        recorder.attach(&*crystal);

        crystal.set_a([5.0, 0.0, 0.0]);
        crystal.set_space_group("P 21/c");
        crystal.set_z(4);
        crystal.set_axes([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(recorder.count(), 4);
        assert_eq!(crystal.b(), Some([0.0, 1.0, 0.0]));
    }

    #[test]
    fn crystal_relays_atom_changes() {
        let crystal = Crystal::new();
        let sodium = Atom::new(Element::Na);
        crystal.add_atom(Rc::clone(&sodium));
        let recorder = Recorder::new();
        recorder.attach(&*crystal);
        sodium.set_fractional_point3d(Some([0.0, 0.0, 0.0]));
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().unwrap().is_from(&*sodium));
    }

    #[test]
    fn duplicate_keeps_cell_and_drops_listeners() {
        let crystal = Crystal::new();
        crystal.set_c([0.0, 0.0, 7.5]);
        crystal.add_atom(Atom::new(Element::Cl));
        let recorder = Recorder::new();
        recorder.attach(&*crystal);
        let copy = crystal.duplicate();
        assert_eq!(copy.listener_count(), 0);
        assert_eq!(copy.cell(), crystal.cell());
        assert_eq!(copy.atom_count(), 1);
    }
}
