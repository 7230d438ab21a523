use std::rc::{Rc, Weak};

use tracing::trace;

use super::crystal::Crystal;
use super::members::Slot;
use super::object::{ChemObject, Duplicate, ObjectCore};
use super::reaction::ReactionSet;
use super::set::{MoleculeSet, RingSet};
use crate::notify::ChangeListener;

/// One model of a chemical system: optional molecule set, reaction set,
/// ring set and crystal.
#[derive(Debug)]
pub struct ChemModel {
    core: ObjectCore,
    relay: Weak<dyn ChangeListener>,
    molecule_set: Slot<MoleculeSet>,
    reaction_set: Slot<ReactionSet>,
    ring_set: Slot<RingSet>,
    crystal: Slot<Crystal>,
}

impl ChemModel {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            relay: this.clone(),
            molecule_set: Slot::empty(),
            reaction_set: Slot::empty(),
            ring_set: Slot::empty(),
            crystal: Slot::empty(),
        })
    }

    pub fn molecule_set(&self) -> Option<Rc<MoleculeSet>> {
        self.molecule_set.get()
    }

    /// Fills or clears the molecule set slot, returning the previous occupant.
    pub fn set_molecule_set(&self, set: Option<Rc<MoleculeSet>>) -> Option<Rc<MoleculeSet>> {
        let previous = self.molecule_set.replace(set, &self.relay);
        trace!(slot = "molecule_set", "model slot replaced");
        self.notify_changed();
        previous
    }

    pub fn reaction_set(&self) -> Option<Rc<ReactionSet>> {
        self.reaction_set.get()
    }

    pub fn set_reaction_set(&self, set: Option<Rc<ReactionSet>>) -> Option<Rc<ReactionSet>> {
        let previous = self.reaction_set.replace(set, &self.relay);
        trace!(slot = "reaction_set", "model slot replaced");
        self.notify_changed();
        previous
    }

    pub fn ring_set(&self) -> Option<Rc<RingSet>> {
        self.ring_set.get()
    }

    pub fn set_ring_set(&self, set: Option<Rc<RingSet>>) -> Option<Rc<RingSet>> {
        let previous = self.ring_set.replace(set, &self.relay);
        trace!(slot = "ring_set", "model slot replaced");
        self.notify_changed();
        previous
    }

    pub fn crystal(&self) -> Option<Rc<Crystal>> {
        self.crystal.get()
    }

    pub fn set_crystal(&self, crystal: Option<Rc<Crystal>>) -> Option<Rc<Crystal>> {
        let previous = self.crystal.replace(crystal, &self.relay);
        trace!(slot = "crystal", "model slot replaced");
        self.notify_changed();
        previous
    }
}

chem_object!(ChemModel, "ChemModel");
relay_changes!(ChemModel);

impl Duplicate for ChemModel {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            relay: this.clone(),
            molecule_set: Slot::empty(),
            reaction_set: Slot::empty(),
            ring_set: Slot::empty(),
            crystal: Slot::empty(),
        });
        copy.molecule_set
            .replace(self.molecule_set().map(|set| set.duplicate()), &copy.relay);
        copy.reaction_set
            .replace(self.reaction_set().map(|set| set.duplicate()), &copy.relay);
        copy.ring_set
            .replace(self.ring_set().map(|set| set.duplicate()), &copy.relay);
        copy.crystal
            .replace(self.crystal().map(|crystal| crystal.duplicate()), &copy.relay);
        copy
    }
}
