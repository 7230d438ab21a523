//! Elements, isotopes and atom types.
//!
//! The three kinds form a chain of field sets: an isotope carries everything
//! an element does, an atom type everything an isotope does. Each level is a
//! trait with provided accessors ([`ElementProps`], [`IsotopeProps`],
//! [`AtomTypeProps`]), so an [`Atom`](super::atom::Atom) gets every setter of
//! the chain by handing out its embedded field block.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use super::object::{ChemObject, Duplicate, ObjectCore};
use super::types::{BondOrder, Element, Hybridization};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementFields {
    pub symbol: Option<String>,
    pub atomic_number: Option<u8>,
}

impl ElementFields {
    pub fn of(element: Element) -> Self {
        Self {
            symbol: Some(element.symbol().to_string()),
            atomic_number: Some(element.atomic_number()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsotopeFields {
    pub element: ElementFields,
    pub mass_number: Option<u16>,
    pub exact_mass: Option<f64>,
    pub natural_abundance: Option<f64>,
}

impl IsotopeFields {
    pub fn of(element: Element) -> Self {
        Self {
            element: ElementFields::of(element),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomTypeFields {
    pub isotope: IsotopeFields,
    pub type_name: Option<String>,
    pub max_bond_order: Option<BondOrder>,
    pub bond_order_sum: Option<f64>,
    pub formal_charge: Option<i32>,
    pub formal_neighbour_count: Option<u32>,
    pub hybridization: Option<Hybridization>,
    pub covalent_radius: Option<f64>,
    pub valency: Option<u32>,
}

impl AtomTypeFields {
    pub fn of(element: Element) -> Self {
        Self {
            isotope: IsotopeFields::of(element),
            ..Self::default()
        }
    }
}

pub trait ElementProps: ChemObject {
    fn element_fields(&self) -> Ref<'_, ElementFields>;

    fn element_fields_mut(&self) -> RefMut<'_, ElementFields>;

    fn symbol(&self) -> Option<String> {
        self.element_fields().symbol.clone()
    }

    /// The periodic-table element, when the symbol names one.
    fn element(&self) -> Option<Element> {
        self.element_fields()
            .symbol
            .as_deref()
            .and_then(|symbol| symbol.parse().ok())
    }

    fn atomic_number(&self) -> Option<u8> {
        self.element_fields().atomic_number
    }

    fn set_symbol(&self, symbol: &str) {
        self.element_fields_mut().symbol = Some(symbol.to_string());
        self.notify_changed();
    }

    fn set_atomic_number(&self, atomic_number: u8) {
        self.element_fields_mut().atomic_number = Some(atomic_number);
        self.notify_changed();
    }

    /// Sets symbol and atomic number together, firing once.
    fn set_element(&self, element: Element) {
        *self.element_fields_mut() = ElementFields::of(element);
        self.notify_changed();
    }
}

pub trait IsotopeProps: ElementProps {
    fn isotope_fields(&self) -> Ref<'_, IsotopeFields>;

    fn isotope_fields_mut(&self) -> RefMut<'_, IsotopeFields>;

    fn mass_number(&self) -> Option<u16> {
        self.isotope_fields().mass_number
    }

    fn set_mass_number(&self, mass_number: u16) {
        self.isotope_fields_mut().mass_number = Some(mass_number);
        self.notify_changed();
    }

    fn exact_mass(&self) -> Option<f64> {
        self.isotope_fields().exact_mass
    }

    fn set_exact_mass(&self, exact_mass: f64) {
        self.isotope_fields_mut().exact_mass = Some(exact_mass);
        self.notify_changed();
    }

    fn natural_abundance(&self) -> Option<f64> {
        self.isotope_fields().natural_abundance
    }

    fn set_natural_abundance(&self, natural_abundance: f64) {
        self.isotope_fields_mut().natural_abundance = Some(natural_abundance);
        self.notify_changed();
    }
}

pub trait AtomTypeProps: IsotopeProps {
    fn atom_type_fields(&self) -> Ref<'_, AtomTypeFields>;

    fn atom_type_fields_mut(&self) -> RefMut<'_, AtomTypeFields>;

    fn atom_type_name(&self) -> Option<String> {
        self.atom_type_fields().type_name.clone()
    }

    fn set_atom_type_name(&self, name: &str) {
        self.atom_type_fields_mut().type_name = Some(name.to_string());
        self.notify_changed();
    }

    fn max_bond_order(&self) -> Option<BondOrder> {
        self.atom_type_fields().max_bond_order
    }

    fn set_max_bond_order(&self, order: BondOrder) {
        self.atom_type_fields_mut().max_bond_order = Some(order);
        self.notify_changed();
    }

    fn bond_order_sum(&self) -> Option<f64> {
        self.atom_type_fields().bond_order_sum
    }

    fn set_bond_order_sum(&self, sum: f64) {
        self.atom_type_fields_mut().bond_order_sum = Some(sum);
        self.notify_changed();
    }

    fn formal_charge(&self) -> Option<i32> {
        self.atom_type_fields().formal_charge
    }

    fn set_formal_charge(&self, charge: i32) {
        self.atom_type_fields_mut().formal_charge = Some(charge);
        self.notify_changed();
    }

    fn formal_neighbour_count(&self) -> Option<u32> {
        self.atom_type_fields().formal_neighbour_count
    }

    fn set_formal_neighbour_count(&self, count: u32) {
        self.atom_type_fields_mut().formal_neighbour_count = Some(count);
        self.notify_changed();
    }

    fn hybridization(&self) -> Option<Hybridization> {
        self.atom_type_fields().hybridization
    }

    fn set_hybridization(&self, hybridization: Hybridization) {
        self.atom_type_fields_mut().hybridization = Some(hybridization);
        self.notify_changed();
    }

    fn covalent_radius(&self) -> Option<f64> {
        self.atom_type_fields().covalent_radius
    }

    fn set_covalent_radius(&self, radius: f64) {
        self.atom_type_fields_mut().covalent_radius = Some(radius);
        self.notify_changed();
    }

    fn valency(&self) -> Option<u32> {
        self.atom_type_fields().valency
    }

    fn set_valency(&self, valency: u32) {
        self.atom_type_fields_mut().valency = Some(valency);
        self.notify_changed();
    }
}

#[derive(Debug)]
pub struct ChemElement {
    core: ObjectCore,
    fields: RefCell<ElementFields>,
}

impl ChemElement {
    pub fn new(element: Element) -> Rc<Self> {
        Self::from_fields(ElementFields::of(element))
    }

    /// An element known only by its symbol, e.g. `"R"` for a generic group.
    pub fn with_symbol(symbol: &str) -> Rc<Self> {
        let element = symbol.parse::<Element>().ok();
        Self::from_fields(ElementFields {
            symbol: Some(symbol.to_string()),
            atomic_number: element.map(|e| e.atomic_number()),
        })
    }

    fn from_fields(fields: ElementFields) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            fields: RefCell::new(fields),
        })
    }
}

chem_object!(ChemElement, "ChemElement");

impl ElementProps for ChemElement {
    fn element_fields(&self) -> Ref<'_, ElementFields> {
        self.fields.borrow()
    }

    fn element_fields_mut(&self) -> RefMut<'_, ElementFields> {
        self.fields.borrow_mut()
    }
}

impl Duplicate for ChemElement {
    fn duplicate(&self) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            fields: RefCell::new(self.fields.borrow().clone()),
        })
    }
}

#[derive(Debug)]
pub struct Isotope {
    core: ObjectCore,
    fields: RefCell<IsotopeFields>,
}

impl Isotope {
    pub fn new(element: Element, mass_number: u16) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            fields: RefCell::new(IsotopeFields {
                mass_number: Some(mass_number),
                ..IsotopeFields::of(element)
            }),
        })
    }
}

chem_object!(Isotope, "Isotope");

impl ElementProps for Isotope {
    fn element_fields(&self) -> Ref<'_, ElementFields> {
        Ref::map(self.fields.borrow(), |fields| &fields.element)
    }

    fn element_fields_mut(&self) -> RefMut<'_, ElementFields> {
        RefMut::map(self.fields.borrow_mut(), |fields| &mut fields.element)
    }
}

impl IsotopeProps for Isotope {
    fn isotope_fields(&self) -> Ref<'_, IsotopeFields> {
        self.fields.borrow()
    }

    fn isotope_fields_mut(&self) -> RefMut<'_, IsotopeFields> {
        self.fields.borrow_mut()
    }
}

impl Duplicate for Isotope {
    fn duplicate(&self) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            fields: RefCell::new(self.fields.borrow().clone()),
        })
    }
}

#[derive(Debug)]
pub struct AtomType {
    core: ObjectCore,
    fields: RefCell<AtomTypeFields>,
}

impl AtomType {
    pub fn new(type_name: &str, element: Element) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            fields: RefCell::new(AtomTypeFields {
                type_name: Some(type_name.to_string()),
                ..AtomTypeFields::of(element)
            }),
        })
    }

    pub fn fields(&self) -> AtomTypeFields {
        self.fields.borrow().clone()
    }
}

chem_object!(AtomType, "AtomType");

impl ElementProps for AtomType {
    fn element_fields(&self) -> Ref<'_, ElementFields> {
        Ref::map(self.fields.borrow(), |fields| &fields.isotope.element)
    }

    fn element_fields_mut(&self) -> RefMut<'_, ElementFields> {
        RefMut::map(self.fields.borrow_mut(), |fields| &mut fields.isotope.element)
    }
}

impl IsotopeProps for AtomType {
    fn isotope_fields(&self) -> Ref<'_, IsotopeFields> {
        Ref::map(self.fields.borrow(), |fields| &fields.isotope)
    }

    fn isotope_fields_mut(&self) -> RefMut<'_, IsotopeFields> {
        RefMut::map(self.fields.borrow_mut(), |fields| &mut fields.isotope)
    }
}

impl AtomTypeProps for AtomType {
    fn atom_type_fields(&self) -> Ref<'_, AtomTypeFields> {
        self.fields.borrow()
    }

    fn atom_type_fields_mut(&self) -> RefMut<'_, AtomTypeFields> {
        self.fields.borrow_mut()
    }
}

impl Duplicate for AtomType {
    fn duplicate(&self) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            fields: RefCell::new(self.fields.borrow().clone()),
        })
    }
}
