//! Reactions, reaction sets and reaction schemes.
//!
//! A reaction holds three molecule sets (reactants, products, agents) whose
//! multipliers are the stoichiometric coefficients. Convenience methods such
//! as [`Reaction::add_reactant`] delegate to the set, and the set's own event
//! reaches the reaction's listeners through the relay, exactly once.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::atom::Atom;
use super::container::{AtomContainerOps, Molecule};
use super::error::Error;
use super::mapping::Mapping;
use super::members::Members;
use super::object::{address, ChemObject, Duplicate, ObjectCore};
use super::set::MoleculeSet;
use super::types::ReactionDirection;
use crate::notify::ChangeListener;

#[derive(Debug)]
pub struct Reaction {
    core: ObjectCore,
    relay: Weak<dyn ChangeListener>,
    reactants: RefCell<Rc<MoleculeSet>>,
    products: RefCell<Rc<MoleculeSet>>,
    agents: RefCell<Rc<MoleculeSet>>,
    mappings: Members<Mapping>,
    direction: Cell<ReactionDirection>,
}

impl Reaction {
    pub fn new() -> Rc<Self> {
        Self::with_sides(
            ObjectCore::new,
            [MoleculeSet::new(), MoleculeSet::new(), MoleculeSet::new()],
        )
    }

    fn with_sides(
        core: impl FnOnce(Weak<dyn ChemObject>) -> ObjectCore,
        [reactants, products, agents]: [Rc<MoleculeSet>; 3],
    ) -> Rc<Self> {
        let reaction = Rc::new_cyclic(|this: &Weak<Self>| {
            let owner: Weak<dyn ChemObject> = this.clone();
            Self {
                core: core(owner),
                relay: this.clone(),
                reactants: RefCell::new(reactants),
                products: RefCell::new(products),
                agents: RefCell::new(agents),
                mappings: Members::new("mappings"),
                direction: Cell::new(ReactionDirection::Forward),
            }
        });
        for side in reaction.sides() {
            side.add_listener(reaction.relay.clone());
        }
        reaction
    }

    fn sides(&self) -> [Rc<MoleculeSet>; 3] {
        [self.reactants(), self.products(), self.agents()]
    }

    pub fn reactants(&self) -> Rc<MoleculeSet> {
        Rc::clone(&self.reactants.borrow())
    }

    pub fn products(&self) -> Rc<MoleculeSet> {
        Rc::clone(&self.products.borrow())
    }

    pub fn agents(&self) -> Rc<MoleculeSet> {
        Rc::clone(&self.agents.borrow())
    }

    pub fn set_reactants(&self, reactants: Rc<MoleculeSet>) {
        self.replace_side(&self.reactants, reactants);
    }

    pub fn set_products(&self, products: Rc<MoleculeSet>) {
        self.replace_side(&self.products, products);
    }

    pub fn set_agents(&self, agents: Rc<MoleculeSet>) {
        self.replace_side(&self.agents, agents);
    }

    /// Swaps one side, unsubscribing the outgoing set unless it still fills
    /// another side, then subscribing the incoming one. Fires once.
    fn replace_side(&self, side: &RefCell<Rc<MoleculeSet>>, set: Rc<MoleculeSet>) {
        let previous = side.replace(Rc::clone(&set));
        let still_held = self.sides().iter().any(|held| Rc::ptr_eq(held, &previous));
        if !still_held {
            previous.remove_listener(self.relay.clone());
        }
        set.add_listener(self.relay.clone());
        trace!(still_held, "reaction side replaced");
        self.notify_changed();
    }

    pub fn reactant_count(&self) -> usize {
        self.reactants.borrow().container_count()
    }

    pub fn product_count(&self) -> usize {
        self.products.borrow().container_count()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.borrow().container_count()
    }

    pub fn add_reactant(&self, molecule: Rc<Molecule>) {
        self.reactants().add_container(molecule);
    }

    pub fn add_reactant_with_coefficient(&self, molecule: Rc<Molecule>, coefficient: f64) {
        self.reactants()
            .add_container_with_multiplier(molecule, coefficient);
    }

    pub fn add_product(&self, molecule: Rc<Molecule>) {
        self.products().add_container(molecule);
    }

    pub fn add_product_with_coefficient(&self, molecule: Rc<Molecule>, coefficient: f64) {
        self.products()
            .add_container_with_multiplier(molecule, coefficient);
    }

    pub fn add_agent(&self, molecule: Rc<Molecule>) {
        self.agents().add_container(molecule);
    }

    pub fn reactant_coefficient(&self, molecule: &Molecule) -> Option<f64> {
        self.reactants().multiplier_for(molecule)
    }

    pub fn product_coefficient(&self, molecule: &Molecule) -> Option<f64> {
        self.products().multiplier_for(molecule)
    }

    pub fn set_reactant_coefficient(&self, molecule: &Molecule, coefficient: f64) -> bool {
        self.reactants().set_multiplier_for(molecule, coefficient)
    }

    pub fn set_product_coefficient(&self, molecule: &Molecule, coefficient: f64) -> bool {
        self.products().set_multiplier_for(molecule, coefficient)
    }

    pub fn reactant_coefficients(&self) -> Vec<f64> {
        self.reactants().multipliers()
    }

    pub fn product_coefficients(&self) -> Vec<f64> {
        self.products().multipliers()
    }

    pub fn set_reactant_coefficients(&self, coefficients: Vec<f64>) -> Result<(), Error> {
        self.reactants().set_multipliers(coefficients)
    }

    pub fn set_product_coefficients(&self, coefficients: Vec<f64>) -> Result<(), Error> {
        self.products().set_multipliers(coefficients)
    }

    pub fn direction(&self) -> ReactionDirection {
        self.direction.get()
    }

    pub fn set_direction(&self, direction: ReactionDirection) {
        self.direction.set(direction);
        self.notify_changed();
    }

    pub fn add_mapping(&self, mapping: Rc<Mapping>) {
        self.mappings.push(mapping, &self.relay);
        self.notify_changed();
    }

    pub fn remove_mapping(&self, mapping: &Mapping) -> Option<Rc<Mapping>> {
        let removed = self.mappings.remove(mapping, &self.relay)?;
        self.notify_changed();
        Some(removed)
    }

    pub fn remove_mapping_at(&self, index: usize) -> Result<Rc<Mapping>, Error> {
        let removed = self.mappings.remove_at(index, &self.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    pub fn mapping(&self, index: usize) -> Option<Rc<Mapping>> {
        self.mappings.get(index)
    }

    pub fn mappings(&self) -> Vec<Rc<Mapping>> {
        self.mappings.snapshot()
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }
}

chem_object!(Reaction, "Reaction");
relay_changes!(Reaction);

/// Pairs every atom of `original` with the atom at the same position in `copy`.
fn atom_correspondence(original: &MoleculeSet, copy: &MoleculeSet) -> HashMap<*const (), Rc<Atom>> {
    original
        .containers()
        .iter()
        .zip(copy.containers())
        .flat_map(|(from, to)| from.atoms().into_iter().zip(to.atoms()))
        .map(|(from, to)| (address(&*from), to))
        .collect()
}

impl Duplicate for Reaction {
    /// Sides are duplicated, and mappings that relate atoms of the reaction
    /// are re-pointed at the copied atoms.
    fn duplicate(&self) -> Rc<Self> {
        let copy = Self::with_sides(
            |owner| self.core.duplicate(owner),
            self.sides().map(|side| side.duplicate()),
        );

        let mut atoms = HashMap::new();
        for (original, copied) in self.sides().iter().zip(copy.sides()) {
            atoms.extend(atom_correspondence(original, &copied));
        }
        let remap = |object: Rc<dyn ChemObject>| -> Rc<dyn ChemObject> {
            match atoms.get(&address(&*object)) {
                Some(atom) => Rc::clone(atom) as Rc<dyn ChemObject>,
                None => object,
            }
        };
        for mapping in self.mappings.snapshot() {
            let [first, second] = mapping.related_chem_objects();
            let remapped = mapping.duplicate_onto([remap(first), remap(second)]);
            copy.mappings.push(remapped, &copy.relay);
        }
        copy.direction.set(self.direction());
        copy
    }
}

/// The reactions of a [`ReactionSet`] or [`ReactionScheme`].
#[derive(Debug)]
pub struct ReactionList {
    relay: Weak<dyn ChangeListener>,
    reactions: Members<Reaction>,
}

impl ReactionList {
    pub(crate) fn new(relay: Weak<dyn ChangeListener>) -> Self {
        Self {
            relay,
            reactions: Members::new("reactions"),
        }
    }

    fn copy_into(&self, target: &ReactionList) {
        for reaction in self.reactions.snapshot() {
            target.reactions.push(reaction.duplicate(), &target.relay);
        }
    }
}

pub trait ReactionSetOps: ChemObject {
    fn reaction_list(&self) -> &ReactionList;

    fn reaction_count(&self) -> usize {
        self.reaction_list().reactions.len()
    }

    fn reaction(&self, index: usize) -> Option<Rc<Reaction>> {
        self.reaction_list().reactions.get(index)
    }

    fn reactions(&self) -> Vec<Rc<Reaction>> {
        self.reaction_list().reactions.snapshot()
    }

    fn contains_reaction(&self, reaction: &Reaction) -> bool {
        self.reaction_list().reactions.contains(reaction)
    }

    fn add_reaction(&self, reaction: Rc<Reaction>) {
        let list = self.reaction_list();
        list.reactions.push(reaction, &list.relay);
        self.notify_changed();
    }

    fn remove_reaction(&self, reaction: &Reaction) -> Option<Rc<Reaction>> {
        let list = self.reaction_list();
        let removed = list.reactions.remove(reaction, &list.relay)?;
        self.notify_changed();
        Some(removed)
    }

    fn remove_reaction_at(&self, index: usize) -> Result<Rc<Reaction>, Error> {
        let list = self.reaction_list();
        let removed = list.reactions.remove_at(index, &list.relay)?;
        self.notify_changed();
        Ok(removed)
    }

    fn remove_all_reactions(&self) {
        let list = self.reaction_list();
        list.reactions.clear(&list.relay);
        self.notify_changed();
    }
}

#[derive(Debug)]
pub struct ReactionSet {
    core: ObjectCore,
    reactions: ReactionList,
}

impl ReactionSet {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            reactions: ReactionList::new(this.clone()),
        })
    }
}

chem_object!(ReactionSet, "ReactionSet");
relay_changes!(ReactionSet);

impl ReactionSetOps for ReactionSet {
    fn reaction_list(&self) -> &ReactionList {
        &self.reactions
    }
}

impl Duplicate for ReactionSet {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            reactions: ReactionList::new(this.clone()),
        });
        self.reactions.copy_into(&copy.reactions);
        copy
    }
}

/// Reactions plus nested sub-schemes.
#[derive(Debug)]
pub struct ReactionScheme {
    core: ObjectCore,
    reactions: ReactionList,
    schemes: Members<ReactionScheme>,
}

impl ReactionScheme {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: ObjectCore::new(this.clone()),
            reactions: ReactionList::new(this.clone()),
            schemes: Members::new("schemes"),
        })
    }

    pub fn add_scheme(&self, scheme: Rc<ReactionScheme>) {
        self.schemes.push(scheme, &self.reactions.relay);
        self.notify_changed();
    }

    pub fn remove_scheme(&self, scheme: &ReactionScheme) -> Option<Rc<ReactionScheme>> {
        let removed = self.schemes.remove(scheme, &self.reactions.relay)?;
        self.notify_changed();
        Some(removed)
    }

    pub fn schemes(&self) -> Vec<Rc<ReactionScheme>> {
        self.schemes.snapshot()
    }

    pub fn scheme_count(&self) -> usize {
        self.schemes.len()
    }
}

chem_object!(ReactionScheme, "ReactionScheme");
relay_changes!(ReactionScheme);

impl ReactionSetOps for ReactionScheme {
    fn reaction_list(&self) -> &ReactionList {
        &self.reactions
    }
}

impl Duplicate for ReactionScheme {
    fn duplicate(&self) -> Rc<Self> {
        let copy = Rc::new_cyclic(|this: &Weak<Self>| Self {
            core: self.core.duplicate(this.clone()),
            reactions: ReactionList::new(this.clone()),
            schemes: Members::new("schemes"),
        });
        self.reactions.copy_into(&copy.reactions);
        for scheme in self.schemes.snapshot() {
            copy.schemes.push(scheme.duplicate(), &copy.reactions.relay);
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::Recorder;
    use crate::model::types::Element;

    fn water() -> Rc<Molecule> {
        let molecule = Molecule::new();
        molecule.add_atom(Atom::new(Element::O));
        molecule.add_atom(Atom::new(Element::H));
        molecule.add_atom(Atom::new(Element::H));
        molecule
    }

    #[test]
    fn add_reactant_fires_once_from_the_set() {
        let reaction = Reaction::new();
        let recorder = Recorder::new();
        recorder.attach(&*reaction);

        reaction.add_reactant_with_coefficient(water(), 2.0);
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().unwrap().is_from(&*reaction.reactants()));
        assert_eq!(reaction.reactant_count(), 1);
        assert_eq!(reaction.reactant_coefficients(), vec![2.0]);
    }

    #[test]
    fn atom_edits_reach_reaction_listeners() {
        let reaction = Reaction::new();
        let product = water();
        reaction.add_product(Rc::clone(&product));
        let recorder = Recorder::new();
        recorder.attach(&*reaction);

        let oxygen = product.atom(0).unwrap();
        oxygen.set_charge(-0.8);
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().unwrap().is_from(&*oxygen));
    }

    #[test]
    fn coefficients_by_molecule() {
        let reaction = Reaction::new();
        let hydrogen = Molecule::new();
        reaction.add_reactant(Rc::clone(&hydrogen));
        assert_eq!(reaction.reactant_coefficient(&hydrogen), Some(1.0));
        assert!(reaction.set_reactant_coefficient(&hydrogen, 2.0));
        assert_eq!(reaction.reactant_coefficient(&hydrogen), Some(2.0));
        assert!(!reaction.set_product_coefficient(&hydrogen, 3.0));
        assert_eq!(reaction.product_coefficient(&hydrogen), None);
    }

    #[test]
    fn coefficient_vector_length_must_match() {
        let reaction = Reaction::new();
        reaction.add_product(water());
        let recorder = Recorder::new();
        recorder.attach(&*reaction);

        let err = reaction.set_product_coefficients(vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::MultiplierCountMismatch { .. }));
        assert_eq!(recorder.count(), 0);
        reaction.set_product_coefficients(vec![4.0]).unwrap();
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn replacing_a_side_moves_the_subscription() {
        let reaction = Reaction::new();
        let old_reactants = reaction.reactants();
        let new_reactants = MoleculeSet::new();
        let recorder = Recorder::new();
        recorder.attach(&*reaction);

        reaction.set_reactants(Rc::clone(&new_reactants));
        assert_eq!(recorder.count(), 1);
        assert_eq!(old_reactants.listener_count(), 0);
        assert_eq!(new_reactants.listener_count(), 1);

        old_reactants.add_container(Molecule::new());
        assert_eq!(recorder.count(), 1);
        new_reactants.add_container(Molecule::new());
        assert_eq!(recorder.count(), 2);
    }

    #[test]
    fn shared_side_stays_subscribed_until_fully_replaced() {
        let reaction = Reaction::new();
        let shared = MoleculeSet::new();
        reaction.set_reactants(Rc::clone(&shared));
        reaction.set_agents(Rc::clone(&shared));
        reaction.set_reactants(MoleculeSet::new());
        assert_eq!(shared.listener_count(), 1);
        reaction.set_agents(MoleculeSet::new());
        assert_eq!(shared.listener_count(), 0);
    }

    #[test]
    fn direction_and_mappings_fire() {
        let reaction = Reaction::new();
        let recorder = Recorder::new();
        recorder.attach(&*reaction);

        reaction.set_direction(ReactionDirection::Bidirectional);
        assert_eq!(reaction.direction(), ReactionDirection::Bidirectional);
        let mapping = Mapping::new(Atom::new(Element::C), Atom::new(Element::C));
        reaction.add_mapping(Rc::clone(&mapping));
        assert_eq!(recorder.count(), 2);
        assert_eq!(reaction.mapping_count(), 1);

        assert!(reaction.remove_mapping_at(3).is_err());
        assert_eq!(recorder.count(), 2);
        assert!(reaction.remove_mapping(&mapping).is_some());
        assert_eq!(recorder.count(), 3);
        assert_eq!(mapping.listener_count(), 0);
    }

    #[test]
    fn duplicate_remaps_mappings_onto_copied_atoms() {
        let reaction = Reaction::new();
        let reactant = water();
        let product = water();
        reaction.add_reactant(Rc::clone(&reactant));
        reaction.add_product(Rc::clone(&product));
        let outside = Atom::new(Element::N);
        reaction.add_mapping(Mapping::new(reactant.atom(0).unwrap(), product.atom(0).unwrap()));
        reaction.add_mapping(Mapping::new(reactant.atom(1).unwrap(), Rc::clone(&outside) as Rc<dyn ChemObject>));
        reaction.set_direction(ReactionDirection::Backward);
        let recorder = Recorder::new();
        recorder.attach(&*reaction);

        let copy = reaction.duplicate();
        assert_eq!(copy.listener_count(), 0);
        assert_eq!(copy.direction(), ReactionDirection::Backward);
        assert_eq!(copy.reactant_count(), 1);
        assert_eq!(copy.product_count(), 1);

        let copied_reactant = copy.reactants().container(0).unwrap();
        let copied_product = copy.products().container(0).unwrap();
        assert!(!Rc::ptr_eq(&copied_reactant, &reactant));

        let [first, second] = copy.mapping(0).unwrap().related_chem_objects();
        assert_eq!(address(&*first), address(&*copied_reactant.atom(0).unwrap()));
        assert_eq!(address(&*second), address(&*copied_product.atom(0).unwrap()));
        let [_, unrelated] = copy.mapping(1).unwrap().related_chem_objects();
        assert_eq!(address(&*unrelated), address(&*outside));

        let copy_recorder = Recorder::new();
        copy_recorder.attach(&*copy);
        copied_reactant.atom(2).unwrap().set_charge(0.4);
        assert_eq!(copy_recorder.count(), 1);
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn reaction_set_relays_and_forgets_removed_reactions() {
        let set = ReactionSet::new();
        let first = Reaction::new();
        let second = Reaction::new();
        set.add_reaction(Rc::clone(&first));
        set.add_reaction(Rc::clone(&second));
        let recorder = Recorder::new();
        recorder.attach(&*set);

        first.add_agent(Molecule::new());
        assert_eq!(recorder.count(), 1);

        set.remove_reaction(&first);
        assert_eq!(recorder.count(), 2);
        first.set_direction(ReactionDirection::Backward);
        assert_eq!(recorder.count(), 2);

        assert!(matches!(
            set.remove_reaction_at(5),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert_eq!(recorder.count(), 2);
        set.remove_all_reactions();
        assert_eq!(set.reaction_count(), 0);
        assert_eq!(second.listener_count(), 0);
    }

    #[test]
    fn scheme_nests_and_duplicates_deeply() {
        let root = ReactionScheme::new();
        let child = ReactionScheme::new();
        let step = Reaction::new();
        child.add_reaction(Rc::clone(&step));
        root.add_scheme(Rc::clone(&child));
        root.add_reaction(Reaction::new());
        let recorder = Recorder::new();
        recorder.attach(&*root);

        step.add_reactant(water());
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().unwrap().is_from(&*step.reactants()));

        let copy = root.duplicate();
        assert_eq!(copy.scheme_count(), 1);
        assert_eq!(copy.reaction_count(), 1);
        let copied_step = copy.schemes()[0].reaction(0).unwrap();
        assert!(!Rc::ptr_eq(&copied_step, &step));
        assert_eq!(copied_step.reactant_count(), 1);

        assert!(root.remove_scheme(&child).is_some());
        assert_eq!(child.listener_count(), 0);
        assert!(root.contains_reaction(&root.reaction(0).unwrap()));
    }
}
