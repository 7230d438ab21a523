use std::rc::Rc;

use tracing::debug;

use crate::model::atom::{Atom, FragmentAtom};
use crate::model::bond::Bond;
use crate::model::chem_model::ChemModel;
use crate::model::container::{AtomContainer, Molecule, Ring};
use crate::model::crystal::Crystal;
use crate::model::mapping::Mapping;
use crate::model::object::ChemObject;
use crate::model::polymer::{BioPolymer, Monomer, PdbPolymer, Strand};
use crate::model::reaction::{Reaction, ReactionScheme, ReactionSet};
use crate::model::sequence::{ChemFile, ChemSequence};
use crate::model::set::{MoleculeSet, RingSet};
use crate::model::types::{BondOrder, Element};
use crate::notify::{ConfigError, NotifyConfig};

/// Creates entities that all share one [`NotifyConfig`].
///
/// A builder made with [`ChemObjectBuilder::non_notifying`] yields objects
/// that accept no listeners, which is useful for bulk construction where no
/// one observes the model.
///
/// # Examples
///
/// ```
/// use chemwire::{AtomContainerOps, ChemObject, ChemObjectBuilder, Element};
///
/// let builder = ChemObjectBuilder::non_notifying();
/// let molecule = builder.molecule();
/// molecule.add_atom(builder.atom(Element::C));
/// assert_eq!(molecule.atom_count(), 1);
/// assert!(!molecule.notify_config().enabled);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChemObjectBuilder {
    config: NotifyConfig,
}

impl ChemObjectBuilder {
    pub fn new(config: NotifyConfig) -> Self {
        Self { config }
    }

    pub fn non_notifying() -> Self {
        Self::new(NotifyConfig::silent())
    }

    /// Builder for the configuration in `text` (see [`NotifyConfig::from_toml_str`]).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config = NotifyConfig::from_toml_str(text)?;
        debug!(enabled = config.enabled, "builder configured from toml");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> NotifyConfig {
        self.config
    }

    /// Applies this builder's configuration to an object built elsewhere.
    pub fn configure<T: ChemObject>(&self, object: Rc<T>) -> Rc<T> {
        object.set_notify_config(self.config);
        object
    }

    pub fn atom(&self, element: Element) -> Rc<Atom> {
        self.configure(Atom::new(element))
    }

    pub fn pseudo_atom(&self, label: &str) -> Rc<Atom> {
        self.configure(Atom::pseudo(label))
    }

    pub fn fragment_atom(&self) -> Rc<FragmentAtom> {
        self.configure(FragmentAtom::new())
    }

    pub fn bond(&self, begin: Rc<Atom>, end: Rc<Atom>, order: BondOrder) -> Rc<Bond> {
        self.configure(Bond::new(begin, end, order))
    }

    pub fn mapping(&self, first: Rc<dyn ChemObject>, second: Rc<dyn ChemObject>) -> Rc<Mapping> {
        self.configure(Mapping::new(first, second))
    }

    pub fn atom_container(&self) -> Rc<AtomContainer> {
        self.configure(AtomContainer::new())
    }

    pub fn molecule(&self) -> Rc<Molecule> {
        self.configure(Molecule::new())
    }

    pub fn ring(&self) -> Rc<Ring> {
        self.configure(Ring::new())
    }

    pub fn crystal(&self) -> Rc<Crystal> {
        self.configure(Crystal::new())
    }

    pub fn monomer(&self, name: &str, monomer_type: &str) -> Rc<Monomer> {
        self.configure(Monomer::new(name, monomer_type))
    }

    pub fn strand(&self, name: &str) -> Rc<Strand> {
        self.configure(Strand::new(name))
    }

    pub fn bio_polymer(&self) -> Rc<BioPolymer> {
        self.configure(BioPolymer::new())
    }

    pub fn pdb_polymer(&self) -> Rc<PdbPolymer> {
        self.configure(PdbPolymer::new())
    }

    pub fn molecule_set(&self) -> Rc<MoleculeSet> {
        self.configure(MoleculeSet::new())
    }

    pub fn ring_set(&self) -> Rc<RingSet> {
        self.configure(RingSet::new())
    }

    /// A reaction whose reactant, product and agent sets share its configuration.
    pub fn reaction(&self) -> Rc<Reaction> {
        let reaction = self.configure(Reaction::new());
        for side in [reaction.reactants(), reaction.products(), reaction.agents()] {
            self.configure(side);
        }
        reaction
    }

    pub fn reaction_set(&self) -> Rc<ReactionSet> {
        self.configure(ReactionSet::new())
    }

    pub fn reaction_scheme(&self) -> Rc<ReactionScheme> {
        self.configure(ReactionScheme::new())
    }

    pub fn chem_model(&self) -> Rc<ChemModel> {
        self.configure(ChemModel::new())
    }

    pub fn chem_sequence(&self) -> Rc<ChemSequence> {
        self.configure(ChemSequence::new())
    }

    pub fn chem_file(&self) -> Rc<ChemFile> {
        self.configure(ChemFile::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::container::AtomContainerOps;
    use crate::model::testing::Recorder;

    #[test]
    fn default_builder_notifies() {
        let builder = ChemObjectBuilder::default();
        let atom = builder.atom(Element::N);
        let recorder = Recorder::new();
        recorder.attach(&*atom);
        atom.set_charge(-1.0);
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn non_notifying_objects_ignore_listeners() {
        let builder = ChemObjectBuilder::non_notifying();
        let molecule = builder.molecule();
        let atom = builder.atom(Element::C);
        molecule.add_atom(Rc::clone(&atom));
        let recorder = Recorder::new();
        recorder.attach(&*molecule);
        assert_eq!(molecule.listener_count(), 0);

        atom.set_charge(0.5);
        molecule.add_atom(builder.atom(Element::H));
        assert_eq!(recorder.count(), 0);
        assert_eq!(molecule.atom_count(), 2);
    }

    #[test]
    fn reaction_sides_share_the_configuration() {
        let builder = ChemObjectBuilder::non_notifying();
        let reaction = builder.reaction();
        assert!(!reaction.notify_config().enabled);
        assert!(!reaction.reactants().notify_config().enabled);
        assert!(!reaction.products().notify_config().enabled);
        assert!(!reaction.agents().notify_config().enabled);
    }

    #[test]
    fn toml_configures_depth_guard() {
        let builder = ChemObjectBuilder::from_toml_str("max_dispatch_depth = 8").unwrap();
        assert_eq!(builder.config().max_dispatch_depth, Some(8));
        let file = builder.chem_file();
        assert_eq!(file.notify_config().max_dispatch_depth, Some(8));
        assert!(file.notify_config().enabled);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(matches!(
            ChemObjectBuilder::from_toml_str("max_dispatch_depth = 0"),
            Err(ConfigError::ZeroDispatchDepth)
        ));
        assert!(matches!(
            ChemObjectBuilder::from_toml_str("verbose = true"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn configure_applies_to_foreign_objects() {
        let builder = ChemObjectBuilder::non_notifying();
        let set = RingSet::new();
        let recorder = Recorder::new();
        recorder.attach(&*set);
        assert_eq!(set.listener_count(), 1);
        let set = builder.configure(set);
        assert_eq!(set.listener_count(), 0);
        set.set_id("rings");
        assert_eq!(recorder.count(), 0);

        let set = ChemObjectBuilder::default().configure(set);
        assert_eq!(set.listener_count(), 1);
        set.set_id("rings again");
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn fragment_atom_follows_the_builder() {
        let atom = ChemObjectBuilder::non_notifying().fragment_atom();
        let recorder = Recorder::new();
        recorder.attach(&*atom);
        atom.set_expanded(true);
        assert_eq!(recorder.count(), 0);
        assert!(atom.is_expanded());
    }
}
