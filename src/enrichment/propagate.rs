//! Upward propagation of enrichment tests through the term hierarchy
//!
//! An enrichment run does not test every term of the ontology. It starts
//! at the [`base_terms`] of the subset and tests each one. Whenever a
//! term is not significant, the test propagates to its parents, so a
//! signal that is spread across several specific terms can still surface
//! at a shared ancestor. A significant term ends its climb: its ancestors
//! describe the same members less specifically.

use std::collections::hash_map::Iter;
use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::annotations::AssociationMap;
use crate::stats::hypergeom;
use crate::term::{GoGroup, GoTerm};
use crate::{GoResult, GoTermId, Ontology};

/// Selects the terms an enrichment run starts from
///
/// A base term is a subset-annotated term that is not an ancestor of
/// another subset-annotated term. Ancestors are excluded because the
/// climb reaches them anyway once the terms below turn out not to be
/// significant. Directly annotated terms stay base terms even when they
/// have children of their own.
///
/// # Errors
///
/// Fails with [`crate::GoError::UnknownTerm`] if the subset is annotated
/// with a term the ontology does not contain.
pub fn base_terms(ontology: &Ontology, subset: &AssociationMap) -> GoResult<GoGroup> {
    let candidates = subset.terms();
    let mut ancestors = GoGroup::new();
    for term_id in &candidates {
        let term = GoTerm::try_new(ontology, term_id)?;
        ancestors = &ancestors | term.all_parent_ids();
    }
    Ok(&candidates - &ancestors)
}

/// The outcome of testing a single term
#[derive(Debug, Clone, Copy)]
pub struct TestedTerm {
    pvalue: f64,
    subset_count: u64,
    background_count: u64,
}

impl TestedTerm {
    pub(crate) fn new(pvalue: f64, subset_count: u64, background_count: u64) -> Self {
        Self {
            pvalue,
            subset_count,
            background_count,
        }
    }

    /// Returns the raw, uncorrected p-value of the term
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// Returns the number of subset members annotated with the term
    /// or one of its descendants
    pub fn subset_count(&self) -> u64 {
        self.subset_count
    }

    /// Returns the number of background members annotated with the term
    /// or one of its descendants
    pub fn background_count(&self) -> u64 {
        self.background_count
    }
}

/// The tested terms of one enrichment run, keyed by term id
///
/// Every term is recorded at most once, no matter how many paths of the
/// hierarchy lead to it.
#[derive(Debug, Default)]
pub struct ResultTable {
    tested: HashMap<GoTermId, TestedTerm>,
}

impl ResultTable {
    pub(crate) fn insert(&mut self, term_id: GoTermId, tested: TestedTerm) {
        self.tested.entry(term_id).or_insert(tested);
    }

    /// Returns the test outcome of the given term, if it was tested
    pub fn get(&self, term_id: &GoTermId) -> Option<&TestedTerm> {
        self.tested.get(term_id)
    }

    /// Returns `true` if the term was tested
    pub fn contains(&self, term_id: &GoTermId) -> bool {
        self.tested.contains_key(term_id)
    }

    /// Returns the number of tested terms
    pub fn len(&self) -> usize {
        self.tested.len()
    }

    /// Returns `true` if no term was tested
    pub fn is_empty(&self) -> bool {
        self.tested.is_empty()
    }

    /// Returns an iterator of all tested terms and their outcome
    pub fn iter(&self) -> Iter<'_, GoTermId, TestedTerm> {
        self.tested.iter()
    }

    /// Returns the number of terms with a raw p-value at or below the
    /// threshold
    pub fn n_significant(&self, threshold: f64) -> usize {
        self.tested
            .values()
            .filter(|tested| tested.pvalue() <= threshold)
            .count()
    }
}

/// Run state of a single enrichment run
///
/// Holds the memoized results and the visited guard while the run
/// climbs from the base terms towards the root.
pub(crate) struct Propagation<'a> {
    ontology: &'a Ontology,
    background: &'a AssociationMap,
    subset: &'a AssociationMap,
    background_total: u64,
    subset_total: u64,
    min_genes: u64,
    threshold: f64,
    results: ResultTable,
    visited: HashSet<GoTermId>,
}

impl<'a> Propagation<'a> {
    pub(crate) fn new(
        ontology: &'a Ontology,
        background: &'a AssociationMap,
        subset: &'a AssociationMap,
        min_genes: u64,
        threshold: f64,
    ) -> Self {
        Self {
            ontology,
            background,
            subset,
            background_total: background.len() as u64,
            subset_total: subset.len() as u64,
            min_genes,
            threshold,
            results: ResultTable::default(),
            visited: HashSet::new(),
        }
    }

    /// Tests one term, then climbs towards the root until a significant
    /// or an already handled term is reached
    pub(crate) fn test_term(&mut self, term_id: GoTermId) -> GoResult<()> {
        if self.results.contains(&term_id) {
            return Ok(());
        }
        // Terms skipped for low counts are never recorded, so the result
        // table alone cannot stop a second arrival or a cyclic climb
        if !self.visited.insert(term_id) {
            return Ok(());
        }

        let term = GoTerm::try_new(self.ontology, term_id)?;

        // a member annotated to any descendant is annotated to the term
        let mut valid = term.all_child_ids().clone();
        valid.insert(term_id);

        let background_count = self.background.count_associated(&valid);
        let subset_count = self.subset.count_associated(&valid);

        if background_count < self.min_genes {
            debug!(
                "skipping {}: only {} annotated background members",
                term_id, background_count
            );
            return self.climb(&term);
        }

        let pvalue = hypergeom::pvalue(
            subset_count,
            self.subset_total,
            background_count,
            self.background_total,
        )?;
        self.results
            .insert(term_id, TestedTerm::new(pvalue, subset_count, background_count));

        if pvalue <= self.threshold {
            trace!("{} is significant, ending the climb", term_id);
            return Ok(());
        }
        self.climb(&term)
    }

    fn climb(&mut self, term: &GoTerm<'a>) -> GoResult<()> {
        for parent_id in term.parent_ids() {
            self.test_term(parent_id)?;
        }
        Ok(())
    }

    pub(crate) fn into_results(self) -> ResultTable {
        self.results
    }
}
