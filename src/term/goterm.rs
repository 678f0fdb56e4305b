use crate::term::internal::GoTermInternal;
use crate::term::{GoChildren, GoParents};
use crate::GoError;
use crate::GoResult;
use crate::GoTermId;
use crate::Ontology;

/// The `GoTerm` represents a single term of the Gene Ontology
///
/// It borrows all its data from the [`Ontology`] and is cheap to copy.
/// Besides the term metadata it exposes the direct and transitive
/// parent/child relationships that the enrichment engine traverses.
#[derive(Debug, Clone, Copy)]
pub struct GoTerm<'a> {
    id: GoTermId,
    name: &'a str,
    namespace: &'a str,
    parents: &'a GoParents,
    all_parents: &'a GoParents,
    children: &'a GoChildren,
    all_children: &'a GoChildren,
    ontology: &'a Ontology,
}

impl<'a> GoTerm<'a> {
    /// Constructs a new [`GoTerm`]
    ///
    /// # Errors
    ///
    /// If the given [`GoTermId`] does not match an existing term
    /// it returns [`GoError::UnknownTerm`]
    pub fn try_new(ontology: &'a Ontology, term_id: GoTermId) -> GoResult<GoTerm<'a>> {
        let term = ontology
            .get(term_id)
            .ok_or(GoError::UnknownTerm(term_id))?;
        Ok(GoTerm::new(ontology, term))
    }

    /// Constructs a new [`GoTerm`] from a `GoTermInternal`
    pub(crate) fn new(ontology: &'a Ontology, term: &'a GoTermInternal) -> GoTerm<'a> {
        GoTerm {
            id: *term.id(),
            name: term.name(),
            namespace: term.namespace(),
            parents: term.parents(),
            all_parents: term.all_parents(),
            children: term.children(),
            all_children: term.all_children(),
            ontology,
        }
    }

    /// Returns the [`GoTermId`] of the term
    ///
    /// e.g.: `GO:0061024`
    pub fn id(&self) -> GoTermId {
        self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `membrane organization`
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the namespace of the term
    ///
    /// e.g.: `biological_process`
    pub fn namespace(&self) -> &str {
        self.namespace
    }

    /// Returns an iterator of the direct parents of the term
    pub fn parents(&self) -> GoTerms<'a> {
        GoTerms::new(self.parents, self.ontology)
    }

    /// Returns an iterator of the direct children of the term
    pub fn children(&self) -> GoTerms<'a> {
        GoTerms::new(self.children, self.ontology)
    }

    /// Returns the [`GoTermId`]s of the direct parents
    pub fn parent_ids(&self) -> &'a GoParents {
        self.parents
    }

    /// Returns the [`GoTermId`]s of all direct and indirect parents
    ///
    /// The ancestor closure is only available after
    /// [`Ontology::create_cache`] has run.
    pub fn all_parent_ids(&self) -> &'a GoParents {
        self.all_parents
    }

    /// Returns the [`GoTermId`]s of the direct children
    pub fn child_ids(&self) -> &'a GoChildren {
        self.children
    }

    /// Returns the [`GoTermId`]s of all direct and indirect children
    ///
    /// The descendant closure is only available after
    /// [`Ontology::create_cache`] has run.
    pub fn all_child_ids(&self) -> &'a GoChildren {
        self.all_children
    }

    /// Returns `true` if `self` is a child (direct or indirect) of `other`
    pub fn child_of(&self, other: &GoTerm) -> bool {
        self.all_parent_ids().contains(&other.id())
    }

    /// Returns `true` if `self` is a parent (direct or indirect) of `other`
    pub fn parent_of(&self, other: &GoTerm) -> bool {
        other.child_of(self)
    }
}

/// Iterates [`GoTerm`]s of a [`crate::GoGroup`]
pub struct GoTerms<'a> {
    ids: crate::term::GoTermIds<'a>,
    ontology: &'a Ontology,
}

impl<'a> GoTerms<'a> {
    pub(crate) fn new(group: &'a crate::GoGroup, ontology: &'a Ontology) -> Self {
        Self {
            ids: group.iter(),
            ontology,
        }
    }
}

impl<'a> Iterator for GoTerms<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        match self.ids.next() {
            Some(id) => self.ontology.term(id),
            None => None,
        }
    }
}
