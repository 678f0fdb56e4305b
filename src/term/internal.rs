use crate::term::{GoChildren, GoGroup, GoParents, GoTermId};
use crate::DEFAULT_NUM_ALL_PARENTS;
use crate::DEFAULT_NUM_PARENTS;

/// The owned term record stored inside the ontology arena
///
/// Clients never interact with this type directly, they use the
/// [`crate::GoTerm`] facade instead.
#[derive(Debug)]
pub(crate) struct GoTermInternal {
    id: GoTermId,
    name: String,
    namespace: String,
    parents: GoParents,
    all_parents: GoParents,
    children: GoChildren,
    all_children: GoChildren,
}

impl GoTermInternal {
    pub fn new(name: String, namespace: String, id: GoTermId) -> GoTermInternal {
        GoTermInternal {
            id,
            name,
            namespace,
            parents: GoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: GoGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS),
            children: GoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_children: GoGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS),
        }
    }

    pub fn id(&self) -> &GoTermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn parents(&self) -> &GoParents {
        &self.parents
    }

    pub fn children(&self) -> &GoChildren {
        &self.children
    }

    pub fn all_parents(&self) -> &GoParents {
        &self.all_parents
    }

    pub fn all_parents_mut(&mut self) -> &mut GoParents {
        &mut self.all_parents
    }

    pub fn all_children(&self) -> &GoChildren {
        &self.all_children
    }

    /// `true` once the ancestor closure has been calculated
    ///
    /// Terms without parents have a trivially complete closure.
    pub fn parents_cached(&self) -> bool {
        if self.parents.is_empty() {
            true
        } else {
            !self.all_parents.is_empty()
        }
    }

    pub fn add_parent(&mut self, parent_id: GoTermId) {
        self.parents.insert(parent_id);
    }

    pub fn add_child(&mut self, child_id: GoTermId) {
        self.children.insert(child_id);
    }

    pub fn add_descendant(&mut self, descendant_id: GoTermId) {
        self.all_children.insert(descendant_id);
    }
}

impl PartialEq for GoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GoTermInternal {}
