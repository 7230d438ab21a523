use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use super::container::{AtomContainer, AtomContainerOps};
use super::element::{
    AtomType, AtomTypeFields, AtomTypeProps, ElementFields, ElementProps, IsotopeFields,
    IsotopeProps,
};
use super::metadata::AtomResidueInfo;
use super::object::{ChemObject, Duplicate, ObjectCore};
use super::types::Element;

/// Per-atom data that goes beyond the atom type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomFields {
    pub charge: Option<f64>,
    pub hydrogen_count: Option<u32>,
    pub point2d: Option<[f64; 2]>,
    pub point3d: Option<[f64; 3]>,
    pub fractional_point3d: Option<[f64; 3]>,
    pub stereo_parity: Option<i32>,
    /// Set for pseudo atoms such as `R` groups.
    pub label: Option<String>,
    pub residue: Option<AtomResidueInfo>,
}

/// An atom, which is also an atom type, isotope and element.
#[derive(Debug)]
pub struct Atom {
    core: ObjectCore,
    atom_type: RefCell<AtomTypeFields>,
    fields: RefCell<AtomFields>,
}

impl Atom {
    pub fn new(element: Element) -> Rc<Self> {
        Self::build(AtomTypeFields::of(element), AtomFields::default())
    }

    pub fn at(element: Element, position: [f64; 3]) -> Rc<Self> {
        Self::build(
            AtomTypeFields::of(element),
            AtomFields {
                point3d: Some(position),
                ..AtomFields::default()
            },
        )
    }

    /// A pseudo atom carrying `label` instead of a real element.
    pub fn pseudo(label: &str) -> Rc<Self> {
        let atom_type = AtomTypeFields {
            isotope: IsotopeFields {
                element: ElementFields {
                    symbol: Some("R".to_string()),
                    atomic_number: None,
                },
                ..IsotopeFields::default()
            },
            ..AtomTypeFields::default()
        };
        Self::build(
            atom_type,
            AtomFields {
                label: Some(label.to_string()),
                ..AtomFields::default()
            },
        )
    }

    /// An atom of a macromolecular structure.
    pub fn pdb(element: Element, residue: AtomResidueInfo) -> Rc<Self> {
        Self::build(
            AtomTypeFields::of(element),
            AtomFields {
                residue: Some(residue),
                ..AtomFields::default()
            },
        )
    }

    /// An atom initialised from every field of `atom_type`.
    pub fn of_type(atom_type: &AtomType) -> Rc<Self> {
        Self::build(atom_type.fields(), AtomFields::default())
    }

    fn build(atom_type: AtomTypeFields, fields: AtomFields) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            atom_type: RefCell::new(atom_type),
            fields: RefCell::new(fields),
        })
    }

    pub fn fields(&self) -> AtomFields {
        self.fields.borrow().clone()
    }

    pub fn charge(&self) -> Option<f64> {
        self.fields.borrow().charge
    }

    pub fn set_charge(&self, charge: f64) {
        self.fields.borrow_mut().charge = Some(charge);
        self.notify_changed();
    }

    pub fn hydrogen_count(&self) -> Option<u32> {
        self.fields.borrow().hydrogen_count
    }

    pub fn set_hydrogen_count(&self, count: u32) {
        self.fields.borrow_mut().hydrogen_count = Some(count);
        self.notify_changed();
    }

    pub fn point2d(&self) -> Option<[f64; 2]> {
        self.fields.borrow().point2d
    }

    pub fn set_point2d(&self, point: Option<[f64; 2]>) {
        self.fields.borrow_mut().point2d = point;
        self.notify_changed();
    }

    pub fn point3d(&self) -> Option<[f64; 3]> {
        self.fields.borrow().point3d
    }

    pub fn set_point3d(&self, point: Option<[f64; 3]>) {
        self.fields.borrow_mut().point3d = point;
        self.notify_changed();
    }

    pub fn fractional_point3d(&self) -> Option<[f64; 3]> {
        self.fields.borrow().fractional_point3d
    }

    pub fn set_fractional_point3d(&self, point: Option<[f64; 3]>) {
        self.fields.borrow_mut().fractional_point3d = point;
        self.notify_changed();
    }

    pub fn stereo_parity(&self) -> Option<i32> {
        self.fields.borrow().stereo_parity
    }

    pub fn set_stereo_parity(&self, parity: i32) {
        self.fields.borrow_mut().stereo_parity = Some(parity);
        self.notify_changed();
    }

    pub fn label(&self) -> Option<String> {
        self.fields.borrow().label.clone()
    }

    pub fn set_label(&self, label: &str) {
        self.fields.borrow_mut().label = Some(label.to_string());
        self.notify_changed();
    }

    pub fn is_pseudo(&self) -> bool {
        self.fields.borrow().label.is_some()
    }

    pub fn residue(&self) -> Option<AtomResidueInfo> {
        self.fields.borrow().residue.clone()
    }

    /// Replaces the whole residue record, firing once.
    pub fn set_residue(&self, residue: Option<AtomResidueInfo>) {
        self.fields.borrow_mut().residue = residue;
        self.notify_changed();
    }

    /// Edits the residue record, firing once. Does nothing for atoms without
    /// a record.
    ///
    /// `edit` works on a copy, so it may read the atom; the record is written
    /// back once it returns.
    pub fn update_residue(&self, edit: impl FnOnce(&mut AtomResidueInfo)) {
        let Some(mut residue) = self.residue() else {
            return;
        };
        edit(&mut residue);
        self.fields.borrow_mut().residue = Some(residue);
        self.notify_changed();
    }
}

chem_object!(Atom, "Atom");

impl ElementProps for Atom {
    fn element_fields(&self) -> Ref<'_, ElementFields> {
        Ref::map(self.atom_type.borrow(), |fields| &fields.isotope.element)
    }

    fn element_fields_mut(&self) -> RefMut<'_, ElementFields> {
        RefMut::map(self.atom_type.borrow_mut(), |fields| {
            &mut fields.isotope.element
        })
    }
}

impl IsotopeProps for Atom {
    fn isotope_fields(&self) -> Ref<'_, IsotopeFields> {
        Ref::map(self.atom_type.borrow(), |fields| &fields.isotope)
    }

    fn isotope_fields_mut(&self) -> RefMut<'_, IsotopeFields> {
        RefMut::map(self.atom_type.borrow_mut(), |fields| &mut fields.isotope)
    }
}

impl AtomTypeProps for Atom {
    fn atom_type_fields(&self) -> Ref<'_, AtomTypeFields> {
        self.atom_type.borrow()
    }

    fn atom_type_fields_mut(&self) -> RefMut<'_, AtomTypeFields> {
        self.atom_type.borrow_mut()
    }
}

impl Duplicate for Atom {
    fn duplicate(&self) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            atom_type: RefCell::new(self.atom_type.borrow().clone()),
            fields: RefCell::new(self.fields.borrow().clone()),
        })
    }
}

/// Tetrahedral parity around a central atom.
///
/// The atoms are fixed at construction; only the common object data is mutable.
#[derive(Debug)]
pub struct AtomParity {
    core: ObjectCore,
    center: Rc<Atom>,
    surrounding: [Rc<Atom>; 4],
    parity: i32,
}

impl AtomParity {
    pub fn new(center: Rc<Atom>, surrounding: [Rc<Atom>; 4], parity: i32) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            center,
            surrounding,
            parity,
        })
    }

    pub fn center(&self) -> &Rc<Atom> {
        &self.center
    }

    pub fn surrounding(&self) -> &[Rc<Atom>; 4] {
        &self.surrounding
    }

    /// `+1` or `-1`.
    pub fn parity(&self) -> i32 {
        self.parity
    }
}

chem_object!(AtomParity, "AtomParity");

impl Duplicate for AtomParity {
    fn duplicate(&self) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            center: Rc::clone(&self.center),
            surrounding: self.surrounding.clone(),
            parity: self.parity,
        })
    }
}

/// A pseudo atom standing in for a whole fragment, such as an abbreviated
/// substituent.
///
/// The fragment is held but not observed: edits inside it do not reach this
/// atom's listeners.
#[derive(Debug)]
pub struct FragmentAtom {
    core: ObjectCore,
    label: RefCell<Option<String>>,
    fragment: RefCell<Option<Rc<AtomContainer>>>,
    expanded: Cell<bool>,
}

impl FragmentAtom {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            label: RefCell::new(None),
            fragment: RefCell::new(None),
            expanded: Cell::new(false),
        })
    }

    pub fn label(&self) -> Option<String> {
        self.label.borrow().clone()
    }

    pub fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = Some(label.to_string());
        self.notify_changed();
    }

    pub fn fragment(&self) -> Option<Rc<AtomContainer>> {
        self.fragment.borrow().clone()
    }

    pub fn set_fragment(&self, fragment: Option<Rc<AtomContainer>>) {
        *self.fragment.borrow_mut() = fragment;
        self.notify_changed();
    }

    /// Whether the fragment is drawn in full rather than as its label.
    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn set_expanded(&self, expanded: bool) {
        self.expanded.set(expanded);
        self.notify_changed();
    }

    /// Sum of the exact masses of the fragment's atoms. `None` without a
    /// fragment or when any atom lacks a mass.
    pub fn exact_mass(&self) -> Option<f64> {
        let fragment = self.fragment()?;
        fragment
            .atoms()
            .iter()
            .map(|atom| atom.exact_mass())
            .sum()
    }
}

chem_object!(FragmentAtom, "FragmentAtom");

impl Duplicate for FragmentAtom {
    fn duplicate(&self) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            label: RefCell::new(self.label()),
            fragment: RefCell::new(self.fragment().map(|fragment| fragment.duplicate())),
            expanded: Cell::new(self.expanded.get()),
        })
    }
}
