//! Biopolymers: monomers grouped into named strands, strands grouped into a polymer.
//!
//! A strand shares its atoms with its monomers and a polymer shares its
//! atoms with its strands. Each level subscribes to the atoms directly, so a
//! strand does not listen to its monomers and a polymer does not listen to
//! its strands: a second path would deliver every atom event twice.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::atom::Atom;
use super::container::{AtomContainerOps, AtomCopies, ContainerContents};
use super::members::Members;
use super::object::{ChemObject, Duplicate, ObjectCore};

#[derive(Debug)]
pub struct Monomer {
    core: ObjectCore,
    contents: ContainerContents,
    name: RefCell<Option<String>>,
    monomer_type: RefCell<Option<String>>,
}

impl Monomer {
    pub fn new(name: &str, monomer_type: &str) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
            name: RefCell::new(Some(name.to_string())),
            monomer_type: RefCell::new(Some(monomer_type.to_string())),
        })
    }

    pub fn monomer_name(&self) -> Option<String> {
        self.name.borrow().clone()
    }

    pub fn set_monomer_name(&self, name: &str) {
        *self.name.borrow_mut() = Some(name.to_string());
        self.notify_changed();
    }

    pub fn monomer_type(&self) -> Option<String> {
        self.monomer_type.borrow().clone()
    }

    pub fn set_monomer_type(&self, monomer_type: &str) {
        *self.monomer_type.borrow_mut() = Some(monomer_type.to_string());
        self.notify_changed();
    }

    fn duplicate_with(&self, copies: &mut AtomCopies) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
            name: RefCell::new(self.monomer_name()),
            monomer_type: RefCell::new(self.monomer_type()),
        });
        self.contents.copy_with(&copy.contents, copies);
        copy
    }
}

atom_container!(Monomer, "Monomer");

impl Duplicate for Monomer {
    fn duplicate(&self) -> Rc<Self> {
        self.duplicate_with(&mut AtomCopies::new())
    }
}

#[derive(Debug)]
pub struct Strand {
    core: ObjectCore,
    contents: ContainerContents,
    name: RefCell<Option<String>>,
    strand_type: RefCell<Option<String>>,
    monomers: RefCell<BTreeMap<String, Rc<Monomer>>>,
}

impl Strand {
    pub fn new(name: &str) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
            name: RefCell::new(Some(name.to_string())),
            strand_type: RefCell::new(None),
            monomers: RefCell::new(BTreeMap::new()),
        })
    }

    pub fn strand_name(&self) -> Option<String> {
        self.name.borrow().clone()
    }

    pub fn set_strand_name(&self, name: &str) {
        *self.name.borrow_mut() = Some(name.to_string());
        self.notify_changed();
    }

    pub fn strand_type(&self) -> Option<String> {
        self.strand_type.borrow().clone()
    }

    pub fn set_strand_type(&self, strand_type: &str) {
        *self.strand_type.borrow_mut() = Some(strand_type.to_string());
        self.notify_changed();
    }

    /// Adds `atom` to the strand and to `monomer`, registering the monomer
    /// under its name if it is new. The strand fires once.
    pub fn add_atom_to_monomer(&self, atom: Rc<Atom>, monomer: &Rc<Monomer>) {
        self.contents.push_atom_once(&atom);
        self.monomers
            .borrow_mut()
            .entry(monomer.monomer_name().unwrap_or_default())
            .or_insert_with(|| Rc::clone(monomer));
        if !monomer.contains_atom(&atom) {
            monomer.add_atom(atom);
        }
        self.notify_changed();
    }

    pub fn monomer(&self, name: &str) -> Option<Rc<Monomer>> {
        self.monomers.borrow().get(name).cloned()
    }

    pub fn monomers(&self) -> Vec<Rc<Monomer>> {
        self.monomers.borrow().values().cloned().collect()
    }

    pub fn monomer_names(&self) -> Vec<String> {
        self.monomers.borrow().keys().cloned().collect()
    }

    pub fn monomer_count(&self) -> usize {
        self.monomers.borrow().len()
    }

    /// Drops the monomer and its atoms from the strand, firing once.
    pub fn remove_monomer(&self, name: &str) -> Option<Rc<Monomer>> {
        let monomer = self.monomers.borrow_mut().remove(name)?;
        self.contents.remove_atoms_and_connected(&monomer.atoms());
        self.notify_changed();
        Some(monomer)
    }

    fn duplicate_with(&self, copies: &mut AtomCopies) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
            name: RefCell::new(self.strand_name()),
            strand_type: RefCell::new(self.strand_type()),
            monomers: RefCell::new(BTreeMap::new()),
        });
        self.contents.copy_with(&copy.contents, copies);
        let monomers = self
            .monomers
            .borrow()
            .iter()
            .map(|(name, monomer)| (name.clone(), monomer.duplicate_with(copies)))
            .collect();
        *copy.monomers.borrow_mut() = monomers;
        copy
    }
}

atom_container!(Strand, "Strand");

impl Duplicate for Strand {
    fn duplicate(&self) -> Rc<Self> {
        self.duplicate_with(&mut AtomCopies::new())
    }
}

/// Operations shared by polymers built from named strands.
pub trait PolymerOps: AtomContainerOps {
    fn strand_map(&self) -> &RefCell<BTreeMap<String, Rc<Strand>>>;

    /// Adds `atom` to the polymer and to `strand` (and `monomer`, if given),
    /// registering the strand under its name if it is new. The polymer fires
    /// once.
    fn add_atom_to_strand(&self, atom: Rc<Atom>, monomer: Option<&Rc<Monomer>>, strand: &Rc<Strand>) {
        self.contents().push_atom_once(&atom);
        self.strand_map()
            .borrow_mut()
            .entry(strand.strand_name().unwrap_or_default())
            .or_insert_with(|| Rc::clone(strand));
        match monomer {
            Some(monomer) => strand.add_atom_to_monomer(atom, monomer),
            None if !strand.contains_atom(&atom) => strand.add_atom(atom),
            None => {}
        }
        self.notify_changed();
    }

    fn strand(&self, name: &str) -> Option<Rc<Strand>> {
        self.strand_map().borrow().get(name).cloned()
    }

    fn strands(&self) -> Vec<Rc<Strand>> {
        self.strand_map().borrow().values().cloned().collect()
    }

    fn strand_names(&self) -> Vec<String> {
        self.strand_map().borrow().keys().cloned().collect()
    }

    fn strand_count(&self) -> usize {
        self.strand_map().borrow().len()
    }

    /// Drops the strand and its atoms from the polymer, firing once.
    fn remove_strand(&self, name: &str) -> Option<Rc<Strand>> {
        let strand = self.strand_map().borrow_mut().remove(name)?;
        self.contents().remove_atoms_and_connected(&strand.atoms());
        self.notify_changed();
        Some(strand)
    }

    fn monomer(&self, monomer_name: &str, strand_name: &str) -> Option<Rc<Monomer>> {
        self.strand(strand_name)?.monomer(monomer_name)
    }

    fn monomer_count(&self) -> usize {
        self.strands().iter().map(|strand| strand.monomer_count()).sum()
    }

    /// Monomer names over all strands, in strand order.
    fn monomer_names(&self) -> Vec<String> {
        self.strands()
            .iter()
            .flat_map(|strand| strand.monomer_names())
            .collect()
    }
}

fn duplicate_strands(
    strands: &RefCell<BTreeMap<String, Rc<Strand>>>,
    copies: &mut AtomCopies,
) -> BTreeMap<String, Rc<Strand>> {
    strands
        .borrow()
        .iter()
        .map(|(name, strand)| (name.clone(), strand.duplicate_with(copies)))
        .collect()
}

#[derive(Debug)]
pub struct BioPolymer {
    core: ObjectCore,
    contents: ContainerContents,
    strands: RefCell<BTreeMap<String, Rc<Strand>>>,
}

impl BioPolymer {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
            strands: RefCell::new(BTreeMap::new()),
        })
    }
}

atom_container!(BioPolymer, "BioPolymer");

impl PolymerOps for BioPolymer {
    fn strand_map(&self) -> &RefCell<BTreeMap<String, Rc<Strand>>> {
        &self.strands
    }
}

impl Duplicate for BioPolymer {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
            strands: RefCell::new(BTreeMap::new()),
        });
        let mut copies = AtomCopies::new();
        self.contents.copy_with(&copy.contents, &mut copies);
        *copy.strands.borrow_mut() = duplicate_strands(&self.strands, &mut copies);
        copy
    }
}

/// Secondary-structure record (helix, sheet, turn) of a PDB polymer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbStructureFields {
    pub structure_type: Option<String>,
    pub start_chain_id: Option<char>,
    pub start_insertion_code: Option<char>,
    pub start_sequence_number: Option<i32>,
    pub end_chain_id: Option<char>,
    pub end_insertion_code: Option<char>,
    pub end_sequence_number: Option<i32>,
}

#[derive(Debug)]
pub struct PdbStructure {
    core: ObjectCore,
    fields: RefCell<PdbStructureFields>,
}

impl PdbStructure {
    pub fn new(structure_type: &str) -> Rc<Self> {
        Self::from_fields(PdbStructureFields {
            structure_type: Some(structure_type.to_string()),
            ..PdbStructureFields::default()
        })
    }

    pub fn from_fields(fields: PdbStructureFields) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            fields: RefCell::new(fields),
        })
    }

    pub fn fields(&self) -> PdbStructureFields {
        self.fields.borrow().clone()
    }

    pub fn set_structure_type(&self, structure_type: &str) {
        self.fields.borrow_mut().structure_type = Some(structure_type.to_string());
        self.notify_changed();
    }

    /// Sets the chain id, insertion code and sequence number where the structure starts.
    pub fn set_start(&self, chain_id: char, insertion_code: Option<char>, sequence_number: i32) {
        {
            let mut fields = self.fields.borrow_mut();
            fields.start_chain_id = Some(chain_id);
            fields.start_insertion_code = insertion_code;
            fields.start_sequence_number = Some(sequence_number);
        }
        self.notify_changed();
    }

    pub fn set_end(&self, chain_id: char, insertion_code: Option<char>, sequence_number: i32) {
        {
            let mut fields = self.fields.borrow_mut();
            fields.end_chain_id = Some(chain_id);
            fields.end_insertion_code = insertion_code;
            fields.end_sequence_number = Some(sequence_number);
        }
        self.notify_changed();
    }
}

chem_object!(PdbStructure, "PdbStructure");

impl Duplicate for PdbStructure {
    fn duplicate(&self) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            fields: RefCell::new(self.fields()),
        })
    }
}

/// A biopolymer read from a PDB file, with its secondary structures.
#[derive(Debug)]
pub struct PdbPolymer {
    core: ObjectCore,
    contents: ContainerContents,
    strands: RefCell<BTreeMap<String, Rc<Strand>>>,
    structures: Members<PdbStructure>,
}

impl PdbPolymer {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            contents: ContainerContents::new(this.clone()),
            strands: RefCell::new(BTreeMap::new()),
            structures: Members::new("structures"),
        })
    }

    pub fn add_structure(&self, structure: Rc<PdbStructure>) {
        self.structures.push(structure, self.contents.relay());
        self.notify_changed();
    }

    pub fn remove_structure(&self, structure: &PdbStructure) -> Option<Rc<PdbStructure>> {
        let removed = self.structures.remove(structure, self.contents.relay())?;
        self.notify_changed();
        Some(removed)
    }

    pub fn structures(&self) -> Vec<Rc<PdbStructure>> {
        self.structures.snapshot()
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }
}

atom_container!(PdbPolymer, "PdbPolymer");

impl PolymerOps for PdbPolymer {
    fn strand_map(&self) -> &RefCell<BTreeMap<String, Rc<Strand>>> {
        &self.strands
    }
}

impl Duplicate for PdbPolymer {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            contents: ContainerContents::new(this.clone()),
            strands: RefCell::new(BTreeMap::new()),
            structures: Members::new("structures"),
        });
        let mut copies = AtomCopies::new();
        self.contents.copy_with(&copy.contents, &mut copies);
        *copy.strands.borrow_mut() = duplicate_strands(&self.strands, &mut copies);
        for structure in self.structures.snapshot() {
            copy.structures
                .push(structure.duplicate(), copy.contents.relay());
        }
        copy
    }
}
