use std::fmt;
use std::rc::{Rc, Weak};

use super::object::{address, ChemObject, Duplicate, ObjectCore};

/// Links two related objects, typically an atom of a reactant with the atom
/// of a product it becomes.
///
/// A mapping does not listen to the objects it relates.
pub struct Mapping {
    core: ObjectCore,
    objects: [Rc<dyn ChemObject>; 2],
}

impl Mapping {
    pub fn new(first: Rc<dyn ChemObject>, second: Rc<dyn ChemObject>) -> Rc<Self> {
        Self::build(ObjectCore::new, [first, second])
    }

    fn build(
        core: impl FnOnce(Weak<dyn ChemObject>) -> ObjectCore,
        objects: [Rc<dyn ChemObject>; 2],
    ) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let owner: Weak<dyn ChemObject> = this.clone();
            Self {
                core: core(owner),
                objects,
            }
        })
    }

    /// Copy relating `objects` instead of the original pair.
    pub(crate) fn duplicate_onto(&self, objects: [Rc<dyn ChemObject>; 2]) -> Rc<Self> {
        Self::build(|this| self.core.duplicate(this), objects)
    }

    pub fn chem_object(&self, index: usize) -> Option<Rc<dyn ChemObject>> {
        self.objects.get(index).cloned()
    }

    pub fn related_chem_objects(&self) -> [Rc<dyn ChemObject>; 2] {
        self.objects.clone()
    }

    pub fn contains(&self, object: &dyn ChemObject) -> bool {
        self.objects
            .iter()
            .any(|related| address(&**related) == address(object))
    }
}

chem_object!(Mapping, "Mapping");

impl Duplicate for Mapping {
    fn duplicate(&self) -> Rc<Self> {
        self.duplicate_onto(self.related_chem_objects())
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("core", &self.core)
            .field("objects", &[self.objects[0].kind(), self.objects[1].kind()])
            .finish()
    }
}
