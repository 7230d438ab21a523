//! Ordered model sequences and the files that hold them.

use std::rc::{Rc, Weak};

use super::chem_model::ChemModel;
use super::error::Error;
use super::members::Members;
use super::object::{ChemObject, Duplicate, ObjectCore};
use crate::notify::ChangeListener;

/// An ordered list of models, e.g. the frames of a trajectory.
#[derive(Debug)]
pub struct ChemSequence {
    core: ObjectCore,
    relay: Weak<dyn ChangeListener>,
    models: Members<ChemModel>,
}

impl ChemSequence {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            relay: this.clone(),
            models: Members::new("models"),
        })
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn model(&self, index: usize) -> Option<Rc<ChemModel>> {
        self.models.get(index)
    }

    pub fn models(&self) -> Vec<Rc<ChemModel>> {
        self.models.snapshot()
    }

    pub fn add_model(&self, model: Rc<ChemModel>) {
        self.models.push(model, &self.relay);
        self.notify_changed();
    }

    pub fn remove_model(&self, model: &ChemModel) -> Option<Rc<ChemModel>> {
        let removed = self.models.remove(model, &self.relay)?;
        self.notify_changed();
        Some(removed)
    }

    pub fn remove_model_at(&self, index: usize) -> Result<Rc<ChemModel>, Error> {
        let removed = self.models.remove_at(index, &self.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    pub fn set_models(&self, models: Vec<Rc<ChemModel>>) {
        self.models.replace_all(models, &self.relay);
        self.notify_changed();
    }
}

chem_object!(ChemSequence, "ChemSequence");
relay_changes!(ChemSequence);

impl Duplicate for ChemSequence {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            relay: this.clone(),
            models: Members::new("models"),
        });
        for model in self.models.snapshot() {
            copy.models.push(model.duplicate(), &copy.relay);
        }
        copy
    }
}

/// The root of a hierarchy: an ordered list of sequences.
#[derive(Debug)]
pub struct ChemFile {
    core: ObjectCore,
    relay: Weak<dyn ChangeListener>,
    sequences: Members<ChemSequence>,
}

impl ChemFile {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            relay: this.clone(),
            sequences: Members::new("sequences"),
        })
    }

    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    pub fn sequence(&self, index: usize) -> Option<Rc<ChemSequence>> {
        self.sequences.get(index)
    }

    pub fn sequences(&self) -> Vec<Rc<ChemSequence>> {
        self.sequences.snapshot()
    }

    pub fn add_sequence(&self, sequence: Rc<ChemSequence>) {
        self.sequences.push(sequence, &self.relay);
        self.notify_changed();
    }

    pub fn remove_sequence(&self, sequence: &ChemSequence) -> Option<Rc<ChemSequence>> {
        let removed = self.sequences.remove(sequence, &self.relay)?;
        self.notify_changed();
        Some(removed)
    }

    pub fn remove_sequence_at(&self, index: usize) -> Result<Rc<ChemSequence>, Error> {
        let removed = self.sequences.remove_at(index, &self.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    pub fn set_sequences(&self, sequences: Vec<Rc<ChemSequence>>) {
        self.sequences.replace_all(sequences, &self.relay);
        self.notify_changed();
    }
}

chem_object!(ChemFile, "ChemFile");
relay_changes!(ChemFile);

impl Duplicate for ChemFile {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            relay: this.clone(),
            sequences: Members::new("sequences"),
        });
        for sequence in self.sequences.snapshot() {
            copy.sequences.push(sequence.duplicate(), &copy.relay);
        }
        copy
    }
}
