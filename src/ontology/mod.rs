use core::fmt::Debug;
use std::ops::BitOr;

use tracing::debug;

use crate::term::internal::GoTermInternal;
use crate::term::{GoParents, GoTerm};
use crate::GoError;
use crate::GoResult;
use crate::GoTermId;

mod termarena;
use termarena::Arena;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` holds all [`GoTerm`]s and their `is_a` relationships
///
/// Terms form a directed acyclic graph: every term except the three
/// namespace roots has at least one parent. In addition to the direct
/// parent/child links, the `Ontology` caches the full ancestor and
/// descendant closure of every term, so enrichment runs never have to
/// walk the graph to collect a term's descendants.
///
/// # Construction
///
/// Most clients parse a `go.obo` file using [`crate::parser::obo`].
/// An ontology can also be assembled by hand:
///
/// 1. construct an empty Ontology with [`Ontology::default`]
/// 2. add all terms with [`Ontology::insert_term`]
/// 3. connect terms to their parents with [`Ontology::add_parent`]
/// 4. cache the ancestor/descendant closures with [`Ontology::create_cache`]
///
/// After `create_cache`, neither new terms nor new connections should be
/// added. The cache assumes the `is_a` graph is acyclic.
///
/// # Examples
///
/// ```
/// use go_enrich::{GoTermId, Ontology};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("cellular_component".to_string(), "cellular_component".to_string(), 5575u32);
/// ontology.insert_term("membrane".to_string(), "cellular_component".to_string(), 16020u32);
/// ontology.insert_term("mitochondrial membrane".to_string(), "cellular_component".to_string(), 31966u32);
/// ontology.add_parent(5575u32, 16020u32).unwrap();
/// ontology.add_parent(16020u32, 31966u32).unwrap();
/// ontology.create_cache();
///
/// let term = ontology.term(31966u32).unwrap();
/// assert_eq!(term.name(), "mitochondrial membrane");
/// assert!(term.all_parent_ids().contains(&5575u32.into()));
///
/// let root = ontology.term(5575u32).unwrap();
/// assert!(root.all_child_ids().contains(&31966u32.into()));
///
/// // Iterate all terms
/// assert_eq!(ontology.into_iter().count(), 3);
/// ```
///
/// # Layout
///
/// ```mermaid
/// graph TD
/// GO:0005575["GO:0005575<br>cellular_component"]
/// GO:0005575 --> GO:0016020
/// GO:0005575 --> GO:0043226
/// GO:0016020["GO:0016020<br>membrane"]
/// GO:0016020 --> GO:0031966
/// GO:0043226["GO:0043226<br>organelle"]
/// GO:0043226 --> GO:0005739
/// GO:0005739["GO:0005739<br>mitochondrion"]
/// GO:0005739 --> GO:0031966
/// GO:0031966["GO:0031966<br>mitochondrial membrane"]
/// ```
#[derive(Default)]
pub struct Ontology {
    terms: Arena,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.terms.len())
    }
}

/// Public API of the Ontology
impl Ontology {
    /// Returns the number of terms in the Ontology
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the Ontology does not contain any terms
    ///
    /// # Examples
    ///
    /// ```
    /// use go_enrich::Ontology;
    /// let ontology = Ontology::default();
    /// assert!(ontology.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the [`GoTerm`] of the provided [`GoTermId`]
    ///
    /// If no such term is present in the Ontology, `None` is returned
    ///
    /// # Examples
    ///
    /// ```
    /// use go_enrich::Ontology;
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("membrane".to_string(), "cellular_component".to_string(), 16020u32);
    ///
    /// assert_eq!(ontology.term(16020u32).unwrap().name(), "membrane");
    /// assert!(ontology.term(66666u32).is_none());
    /// ```
    pub fn term<I: Into<GoTermId>>(&self, term_id: I) -> Option<GoTerm> {
        GoTerm::try_new(self, term_id.into()).ok()
    }

    /// Returns an Iterator of all [`GoTerm`]s of the Ontology
    ///
    /// The iteration order is arbitrary.
    pub fn terms(&self) -> Iter<'_> {
        self.into_iter()
    }
}

/// Methods for setting up and building the Ontology
impl Ontology {
    /// Creates and inserts a new term
    ///
    /// This method does not link the term to its parents. A term that
    /// already exists is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use go_enrich::Ontology;
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("membrane".to_string(), "cellular_component".to_string(), 16020u32);
    ///
    /// assert_eq!(ontology.len(), 1);
    /// ```
    pub fn insert_term<I: Into<GoTermId>>(&mut self, name: String, namespace: String, id: I) {
        let term = GoTermInternal::new(name, namespace, id.into());
        self.terms.insert(term);
    }

    /// Adds a connection from a term to its parent term
    ///
    /// This method is called once for every `is_a` relation during
    /// ontology building and must be called before [`Ontology::create_cache`].
    ///
    /// # Errors
    ///
    /// If `parent_id` or `child_id` is not present in the Ontology,
    /// [`GoError::UnknownTerm`] is returned and no connection is made
    pub fn add_parent<I: Into<GoTermId>, J: Into<GoTermId>>(
        &mut self,
        parent_id: I,
        child_id: J,
    ) -> GoResult<()> {
        let parent_id = parent_id.into();
        let child_id = child_id.into();
        if !self.terms.contains(parent_id) {
            return Err(GoError::UnknownTerm(parent_id));
        }
        if !self.terms.contains(child_id) {
            return Err(GoError::UnknownTerm(child_id));
        }

        let parent = self.terms.get_unchecked_mut(parent_id);
        parent.add_child(child_id);

        let child = self.terms.get_unchecked_mut(child_id);
        child.add_parent(parent_id);
        Ok(())
    }

    /// Creates and caches the ancestor and descendant closures of every term
    ///
    /// This method must be called once, after all terms and connections
    /// are added. Afterwards the Ontology should not be modified anymore.
    /// Rerunning it will not recalculate already cached closures.
    ///
    /// The calculation requires the `is_a` graph to be acyclic, like the
    /// actual Gene Ontology. Cyclic input will overflow the stack here,
    /// it is not detected or repaired.
    pub fn create_cache(&mut self) {
        let term_ids: Vec<GoTermId> = self.terms.keys();

        for id in &term_ids {
            self.create_cache_of_ancestors(*id);
        }
        debug!("cached ancestors of {} terms", term_ids.len());

        // descendant closures are the inverse of the ancestor closures
        for id in term_ids {
            let ancestors = self.terms.get_unchecked(id).all_parents().clone();
            for ancestor in &ancestors {
                self.terms.get_unchecked_mut(ancestor).add_descendant(id);
            }
        }
    }

    fn all_ancestors(&mut self, term_id: GoTermId) -> &GoParents {
        // This looks weird, but I could not find another way to satisfy the borrow checker
        let cached = {
            let term = self.terms.get_unchecked(term_id);
            term.parents_cached()
        };
        if !cached {
            self.create_cache_of_ancestors(term_id);
        }
        let term = self.terms.get_unchecked(term_id);
        term.all_parents()
    }

    fn create_cache_of_ancestors(&mut self, term_id: GoTermId) {
        let term = self.terms.get_unchecked(term_id);
        let parents = term.parents().clone();
        let mut res = GoParents::default();
        for parent in &parents {
            let ancestors = self.all_ancestors(parent);
            for ancestor in ancestors {
                res.insert(ancestor);
            }
        }
        let term = self.terms.get_unchecked_mut(term_id);
        *term.all_parents_mut() = res.bitor(&parents);
    }
}

/// Crate-only accessors
impl Ontology {
    /// Inserts a fully assembled term record
    pub(crate) fn add_term(&mut self, term: GoTermInternal) -> GoTermId {
        let id = *term.id();
        self.terms.insert(term);
        id
    }

    pub(crate) fn get(&self, term_id: GoTermId) -> Option<&GoTermInternal> {
        self.terms.get(term_id)
    }
}

/// An iterator over all [`GoTerm`]s of the [`Ontology`]
pub struct Iter<'a> {
    inner: std::collections::hash_map::Values<'a, GoTermId, GoTermInternal>,
    ontology: &'a Ontology,
}

impl<'a> Iterator for Iter<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|term| GoTerm::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = GoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.terms.values(),
            ontology: self,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// ```text
    ///       1
    ///      / \
    ///     2   3
    ///      \ /
    ///       4
    ///       |
    ///       5
    /// ```
    fn diamond() -> Ontology {
        let mut ontology = Ontology::default();
        for id in 1u32..=5 {
            ontology.insert_term(
                format!("term {id}"),
                String::from("biological_process"),
                id,
            );
        }
        ontology.add_parent(1u32, 2u32).unwrap();
        ontology.add_parent(1u32, 3u32).unwrap();
        ontology.add_parent(2u32, 4u32).unwrap();
        ontology.add_parent(3u32, 4u32).unwrap();
        ontology.add_parent(4u32, 5u32).unwrap();
        ontology.create_cache();
        ontology
    }

    #[test]
    fn ancestor_closure_of_diamond() {
        let ontology = diamond();

        let leaf = ontology.term(5u32).unwrap();
        let ancestors: Vec<GoTermId> = leaf.all_parent_ids().iter().collect();
        assert_eq!(
            ancestors,
            vec![1u32.into(), 2u32.into(), 3u32.into(), 4u32.into()]
        );

        let root = ontology.term(1u32).unwrap();
        assert!(root.all_parent_ids().is_empty());
        assert!(root.parent_of(&leaf));
        assert!(leaf.child_of(&root));
    }

    #[test]
    fn descendant_closure_of_diamond() {
        let ontology = diamond();

        let root = ontology.term(1u32).unwrap();
        let descendants: Vec<GoTermId> = root.all_child_ids().iter().collect();
        assert_eq!(
            descendants,
            vec![2u32.into(), 3u32.into(), 4u32.into(), 5u32.into()]
        );

        let mid = ontology.term(2u32).unwrap();
        assert_eq!(mid.all_child_ids().len(), 2);
        assert!(mid.all_child_ids().contains(&5u32.into()));

        let leaf = ontology.term(5u32).unwrap();
        assert!(leaf.all_child_ids().is_empty());
    }

    #[test]
    fn direct_relations() {
        let ontology = diamond();

        let inner = ontology.term(4u32).unwrap();
        assert_eq!(inner.parent_ids().len(), 2);
        assert_eq!(inner.parents().count(), 2);
        assert_eq!(inner.child_ids().len(), 1);
        assert_eq!(inner.children().next().unwrap().id(), 5u32.into());
    }

    #[test]
    fn create_cache_can_be_rerun() {
        let mut ontology = diamond();
        ontology.create_cache();

        let root = ontology.term(1u32).unwrap();
        assert_eq!(root.all_child_ids().len(), 4);
    }

    #[test]
    fn add_parent_requires_both_terms() {
        let mut ontology = Ontology::default();
        ontology.insert_term("term 1".to_string(), String::new(), 1u32);
        ontology.insert_term("term 2".to_string(), String::new(), 2u32);

        assert!(matches!(
            ontology.add_parent(1u32, 7u32),
            Err(GoError::UnknownTerm(_))
        ));
        assert!(matches!(
            ontology.add_parent(7u32, 1u32),
            Err(GoError::UnknownTerm(_))
        ));
        assert!(ontology.add_parent(1u32, 2u32).is_ok());
        assert!(ontology
            .term(2u32)
            .unwrap()
            .parent_ids()
            .contains(&1u32.into()));
    }
}
