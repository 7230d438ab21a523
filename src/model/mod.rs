//! The chemical object model.
//!
//! Every entity here is constructed behind an [`Rc`](std::rc::Rc), implements
//! [`ChemObject`](object::ChemObject) and can therefore be listened to. The
//! layers build on one another:
//!
//! - [`element`], [`atom`] – elements, isotopes, atom types and atoms.
//! - [`bond`], [`electron`] – electron containers bound to atoms.
//! - [`container`], [`crystal`], [`polymer`] – atom containers that relay
//!   every change of the atoms, bonds and electrons they hold.
//! - [`set`], [`reaction`] – ordered collections of containers and reactions.
//! - [`chem_model`], [`sequence`] – the model, sequence and file aggregates.
//!
//! A container subscribes to each child when the child is added and
//! unsubscribes when the last occurrence is removed, so an event raised deep
//! in the hierarchy reaches the root's listeners exactly once.

#[macro_use]
pub mod object;

pub mod types;
pub mod error;
pub mod metadata;
mod members;
pub mod element;
pub mod atom;
pub mod electron;
pub mod bond;
pub mod mapping;

#[macro_use]
pub mod container;

pub mod crystal;
pub mod polymer;
pub mod set;
pub mod reaction;
pub mod chem_model;
pub mod sequence;

#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;
