//! A change-notifying object model for chemistry.
//! Atoms, bonds, molecules, sets, reactions and whole files report every
//! mutation to registered listeners, and containers relay the changes of
//! everything they hold so one listener at the root observes the full tree.
//!
//! # Features
//!
//! - **Listeners** – Any [`ChemObject`] accepts [`ChangeListener`]s, held
//!   weakly and deduplicated by identity
//! - **Propagation** – Containers subscribe to their children and forward
//!   each [`ChangeEvent`] unchanged, so the event always names the origin
//! - **Rewiring** – Removing or replacing a child unsubscribes it, so a
//!   detached object never reaches its former container's listeners
//! - **Duplication** – [`Duplicate`] deep-copies a hierarchy with fresh
//!   identities and no listeners
//! - **Configuration** – [`NotifyConfig`] turns delivery off or bounds
//!   re-entrant dispatch, loadable from TOML
//!
//! # Quick Start
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::{Rc, Weak};
//!
//! use chemwire::{
//!     Atom, AtomContainerOps, ChangeEvent, ChangeListener, ChemObject, Element, Molecule,
//! };
//!
//! let ethanol = Molecule::new();
//! let oxygen = Atom::new(Element::O);
//! ethanol.add_atom(Atom::new(Element::C));
//! ethanol.add_atom(Atom::new(Element::C));
//! ethanol.add_atom(Rc::clone(&oxygen));
//!
//! let seen = Rc::new(Cell::new(0));
//! let counter = {
//!     let seen = Rc::clone(&seen);
//!     Rc::new(move |_: &ChangeEvent| seen.set(seen.get() + 1))
//! };
//! let listener = Rc::downgrade(&counter) as Weak<dyn ChangeListener>;
//! ethanol.add_listener(listener);
//!
//! // The atom fires, the molecule relays it once.
//! oxygen.set_charge(-0.4);
//! assert_eq!(seen.get(), 1);
//!
//! // Once removed, the atom no longer reaches the molecule's listeners.
//! ethanol.remove_atom(&oxygen);
//! seen.set(0);
//! oxygen.set_charge(0.0);
//! assert_eq!(seen.get(), 0);
//! ```
//!
//! # Module Organization
//!
//! - [`notify`] – Events, the listener trait and notification settings
//! - [`ChemObjectBuilder`] – Creates entities under a shared [`NotifyConfig`]
//!
//! # Data Types
//!
//! ## Leaf Entities
//!
//! - [`ChemElement`], [`Isotope`], [`AtomType`] – Element data and typing
//! - [`Atom`] – Charge, coordinates, hydrogen count, optional PDB record
//! - [`FragmentAtom`] – Pseudo atom standing for a whole fragment
//! - [`Bond`], [`LonePair`], [`SingleElectron`] – Electron containers
//! - [`Mapping`], [`AtomParity`], [`PdbStructure`] – Auxiliary records
//!
//! ## Containers
//!
//! - [`AtomContainer`], [`Molecule`], [`Ring`], [`Crystal`]
//! - [`Monomer`], [`Strand`], [`BioPolymer`], [`PdbPolymer`]
//!
//! ## Aggregates
//!
//! - [`AtomContainerSet`] ([`MoleculeSet`], [`RingSet`], [`ContainerSet`])
//! - [`Reaction`], [`ReactionSet`], [`ReactionScheme`]
//! - [`ChemModel`], [`ChemSequence`], [`ChemFile`]

mod builder;
mod model;

pub mod notify;

pub use builder::ChemObjectBuilder;
pub use notify::{ChangeEvent, ChangeListener, ConfigError, NotifyConfig};

pub use model::object::{ChemObject, Duplicate, ObjectCore};
pub use model::types::{
    BondOrder, BondStereo, Element, Flag, Flags, Hybridization, ParseBondOrderError,
    ParseElementError, ReactionDirection,
};

pub use model::element::{
    AtomType, AtomTypeFields, AtomTypeProps, ChemElement, ElementFields, ElementProps, Isotope,
    IsotopeFields, IsotopeProps,
};
pub use model::atom::{Atom, AtomFields, AtomParity, FragmentAtom};
pub use model::bond::Bond;
pub use model::electron::{ElectronContainerProps, LonePair, SingleElectron};
pub use model::mapping::Mapping;

pub use model::metadata::{AtomResidueInfo, ResidueCategory, ResiduePosition, StandardResidue};

pub use model::container::{AtomContainer, AtomContainerOps, ContainerContents, Molecule, Ring};
pub use model::crystal::{Crystal, UnitCell};
pub use model::polymer::{
    BioPolymer, Monomer, PdbPolymer, PdbStructure, PdbStructureFields, PolymerOps, Strand,
};

pub use model::set::{AtomContainerSet, ContainerSet, MoleculeSet, RingSet};
pub use model::reaction::{Reaction, ReactionList, ReactionScheme, ReactionSet, ReactionSetOps};
pub use model::chem_model::ChemModel;
pub use model::sequence::{ChemFile, ChemSequence};

pub use model::Error as ModelError;
