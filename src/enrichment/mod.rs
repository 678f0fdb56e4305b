//! GO term enrichment analysis of a subset against a background
//!
//! The analysis takes an [`Ontology`], the annotations of a background
//! population and the annotations of a subset of interest. Starting from
//! the subset's [base terms](base_terms), each term is scored with a
//! one-sided hypergeometric test; terms that are not significant
//! propagate the test to their parents. The raw p-values of all tested
//! terms are then corrected for multiple testing and returned as an
//! [`EnrichmentResult`], ordered by corrected p-value.
//!
//! [`analyze`] is the main entry point. [`enrichment_tests`] runs the
//! same tests but returns the raw [`ResultTable`] without correction and
//! annotation.

use tracing::info;

use crate::annotations::AssociationMap;
use crate::stats::correction::CorrectionMethod;
use crate::stats::f64_from_u64;
use crate::{GoError, GoResult, GoTermId, Ontology};

pub mod propagate;

use propagate::Propagation;
pub use propagate::{base_terms, ResultTable, TestedTerm};

/// Parameters of an enrichment run
///
/// ```
/// use go_enrich::enrichment::EnrichmentConfig;
///
/// let config = EnrichmentConfig {
///     threshold: 0.01,
///     ..Default::default()
/// };
/// assert_eq!(config.min_genes, 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentConfig {
    /// Terms with fewer annotated background members are skipped
    pub min_genes: u64,
    /// Significance threshold for raw and corrected p-values
    pub threshold: f64,
    /// Multiple-testing correction applied to the raw p-values
    pub method: CorrectionMethod,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            min_genes: 3,
            threshold: 0.05,
            method: CorrectionMethod::default(),
        }
    }
}

impl EnrichmentConfig {
    /// Checks that the configuration is usable
    ///
    /// # Errors
    ///
    /// Fails with [`GoError::InvalidConfiguration`] if the threshold is
    /// not within `(0, 1]`.
    pub fn validate(&self) -> GoResult<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(GoError::InvalidConfiguration(format!(
                "threshold must be within (0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Runs the enrichment tests and returns the raw, uncorrected results
///
/// Every base term of the subset is tested; terms that are not
/// significant propagate the test to their parents. The returned
/// [`ResultTable`] holds the p-value and the annotation counts of every
/// tested term.
///
/// # Errors
///
/// - [`GoError::InvalidConfiguration`] if the config does not validate
/// - [`GoError::UnknownTerm`] if the subset is annotated with a term
///   the ontology does not contain
/// - [`GoError::InvalidHypergeometric`] if the annotation counts are
///   inconsistent, e.g. when the subset is not part of the background
pub fn enrichment_tests(
    ontology: &Ontology,
    background: &AssociationMap,
    subset: &AssociationMap,
    config: &EnrichmentConfig,
) -> GoResult<ResultTable> {
    config.validate()?;

    let base = base_terms(ontology, subset)?;
    info!(
        "testing {} base terms from {} subset members",
        base.len(),
        subset.len()
    );

    let mut run = Propagation::new(
        ontology,
        background,
        subset,
        config.min_genes,
        config.threshold,
    );
    for term_id in &base {
        run.test_term(term_id)?;
    }

    let results = run.into_results();
    info!(
        "tested {} of {} ontology terms",
        results.len(),
        ontology.len()
    );
    Ok(results)
}

/// Runs a full enrichment analysis: test, correct, annotate
///
/// The returned [`EnrichmentResult`] contains one [`EnrichedTerm`] per
/// tested term, ordered by corrected p-value, then raw p-value, then
/// term id.
///
/// # Examples
///
/// ```
/// use go_enrich::annotations::AssociationMap;
/// use go_enrich::enrichment::{analyze, EnrichmentConfig};
/// use go_enrich::Ontology;
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term(
///     String::from("biological_process"),
///     String::from("biological_process"),
///     8150u32,
/// );
/// ontology.insert_term(
///     String::from("membrane organization"),
///     String::from("biological_process"),
///     61024u32,
/// );
/// ontology.add_parent(8150u32, 61024u32).unwrap();
/// ontology.create_cache();
///
/// let mut background = AssociationMap::new();
/// for member in 0..4 {
///     background.add(&format!("P1000{member}"), 61024u32.into());
/// }
/// for member in 4..10 {
///     background.add(&format!("P1000{member}"), 8150u32.into());
/// }
/// let subset = background.subset(["P10000", "P10001", "P10004"]);
///
/// let result = analyze(&ontology, &background, &subset, &EnrichmentConfig::default()).unwrap();
///
/// assert_eq!(result.n_tested(), 2);
/// let top = &result.terms()[0];
/// assert_eq!(top.name(), "membrane organization");
/// assert_eq!(top.subset_frequency(), "2/3 (66.67%)");
/// ```
///
/// # Errors
///
/// Fails for the same reasons as [`enrichment_tests`].
pub fn analyze(
    ontology: &Ontology,
    background: &AssociationMap,
    subset: &AssociationMap,
    config: &EnrichmentConfig,
) -> GoResult<EnrichmentResult> {
    let results = enrichment_tests(ontology, background, subset, config)?;

    // correction must not depend on hash iteration order
    let mut rows: Vec<(GoTermId, TestedTerm)> =
        results.iter().map(|(id, tested)| (*id, *tested)).collect();
    rows.sort_by_key(|(id, _)| *id);
    let n_tested = rows.len();

    let raw: Vec<f64> = rows.iter().map(|(_, tested)| tested.pvalue()).collect();
    let corrected = config.method.adjust(&raw);

    let n_significant = raw.iter().filter(|p| **p <= config.threshold).count();
    let n_significant_corrected = corrected
        .iter()
        .filter(|p| **p <= config.threshold)
        .count();
    info!(
        "{} of {} terms significant after {} correction",
        n_significant_corrected, n_tested, config.method
    );

    let background_total = background.len() as u64;
    let subset_total = subset.len() as u64;

    let mut terms = Vec::with_capacity(n_tested);
    for ((id, tested), corrected_pvalue) in rows.into_iter().zip(corrected) {
        let term = ontology.term(id).ok_or(GoError::UnknownTerm(id))?;
        terms.push(EnrichedTerm {
            id,
            name: term.name().to_string(),
            namespace: term.namespace().to_string(),
            pvalue: tested.pvalue(),
            corrected_pvalue,
            subset_count: tested.subset_count(),
            subset_total,
            background_count: tested.background_count(),
            background_total,
        });
    }
    terms.sort_by(|a, b| {
        a.corrected_pvalue
            .total_cmp(&b.corrected_pvalue)
            .then(a.pvalue.total_cmp(&b.pvalue))
            .then(a.id.cmp(&b.id))
    });

    Ok(EnrichmentResult {
        terms,
        n_tested,
        n_significant,
        n_significant_corrected,
    })
}

/// A single term of an [`EnrichmentResult`]
#[derive(Debug, Clone)]
pub struct EnrichedTerm {
    id: GoTermId,
    name: String,
    namespace: String,
    pvalue: f64,
    corrected_pvalue: f64,
    subset_count: u64,
    subset_total: u64,
    background_count: u64,
    background_total: u64,
}

impl EnrichedTerm {
    /// Returns the id of the term
    pub fn id(&self) -> GoTermId {
        self.id
    }

    /// Returns the name of the term
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace of the term
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the raw, uncorrected p-value
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// Returns the p-value after multiple-testing correction
    pub fn corrected_pvalue(&self) -> f64 {
        self.corrected_pvalue
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

    /// Returns the subset annotation frequency, e.g. `2/3 (66.67%)`
    pub fn subset_frequency(&self) -> String {
        frequency(self.subset_count, self.subset_total)
    }

    /// Returns the background annotation frequency, e.g. `4/10 (40.00%)`
    pub fn background_frequency(&self) -> String {
        frequency(self.background_count, self.background_total)
    }
}

fn frequency(count: u64, total: u64) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        f64_from_u64(count) * 100.0 / f64_from_u64(total)
    };
    format!("{count}/{total} ({percent:.2}%)")
}

/// The annotated outcome of an enrichment run
///
/// Terms are ordered by corrected p-value, with the raw p-value and the
/// term id breaking ties, so the most enriched term comes first.
#[derive(Debug, Default)]
pub struct EnrichmentResult {
    terms: Vec<EnrichedTerm>,
    n_tested: usize,
    n_significant: usize,
    n_significant_corrected: usize,
}

impl EnrichmentResult {
    /// Returns all tested terms, most enriched first
    pub fn terms(&self) -> &[EnrichedTerm] {
        &self.terms
    }

    /// Returns the number of tested terms
    pub fn n_tested(&self) -> usize {
        self.n_tested
    }

    /// Returns the number of terms with a significant raw p-value
    pub fn n_significant(&self) -> usize {
        self.n_significant
    }

    /// Returns the number of terms still significant after correction
    pub fn n_significant_corrected(&self) -> usize {
        self.n_significant_corrected
    }
}

impl IntoIterator for EnrichmentResult {
    type Item = EnrichedTerm;
    type IntoIter = std::vec::IntoIter<EnrichedTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_level_ontology() -> Ontology {
        let mut ontology = Ontology::default();
        ontology.insert_term(
            String::from("biological_process"),
            String::from("biological_process"),
            8150u32,
        );
        ontology.insert_term(
            String::from("membrane organization"),
            String::from("biological_process"),
            61024u32,
        );
        ontology.add_parent(8150u32, 61024u32).unwrap();
        ontology.create_cache();
        ontology
    }

    fn ten_member_background() -> AssociationMap {
        let mut background = AssociationMap::new();
        for member in 0..4 {
            background.add(&format!("P1000{member}"), 61024u32.into());
        }
        for member in 4..10 {
            background.add(&format!("P1000{member}"), 8150u32.into());
        }
        background
    }

    #[test]
    fn analyze_ranks_the_specific_term_first() {
        let ontology = two_level_ontology();
        let background = ten_member_background();
        let subset = background.subset(["P10000", "P10001", "P10004"]);

        let result =
            analyze(&ontology, &background, &subset, &EnrichmentConfig::default()).unwrap();

        assert_eq!(result.n_tested(), 2);
        assert_eq!(result.n_significant(), 0);
        assert_eq!(result.n_significant_corrected(), 0);

        let top = &result.terms()[0];
        assert_eq!(top.id(), 61024u32.into());
        assert_eq!(top.name(), "membrane organization");
        assert_eq!(top.namespace(), "biological_process");
        assert!((top.pvalue() - 1.0 / 3.0).abs() < 1e-9);
        assert!((top.corrected_pvalue() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(top.subset_frequency(), "2/3 (66.67%)");
        assert_eq!(top.background_frequency(), "4/10 (40.00%)");

        let root = &result.terms()[1];
        assert_eq!(root.id(), 8150u32.into());
        assert!((root.pvalue() - 1.0).abs() < 1e-12);
        assert!((root.corrected_pvalue() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bonferroni_correction_is_applied() {
        let ontology = two_level_ontology();
        let background = ten_member_background();
        let subset = background.subset(["P10000", "P10001", "P10004"]);

        let config = EnrichmentConfig {
            method: CorrectionMethod::Bonferroni,
            ..Default::default()
        };
        let result = analyze(&ontology, &background, &subset, &config).unwrap();

        let top = &result.terms()[0];
        assert!((top.corrected_pvalue() - 2.0 / 3.0).abs() < 1e-9);
        let root = &result.terms()[1];
        assert!((root.corrected_pvalue() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn min_genes_filters_sparse_terms() {
        let ontology = two_level_ontology();
        let background = ten_member_background();
        let subset = background.subset(["P10000", "P10001", "P10004"]);

        let config = EnrichmentConfig {
            min_genes: 5,
            ..Default::default()
        };
        let result = analyze(&ontology, &background, &subset, &config).unwrap();

        assert_eq!(result.n_tested(), 1);
        assert_eq!(result.terms()[0].id(), 8150u32.into());
    }

    #[test]
    fn invalid_thresholds_fail_fast() {
        let ontology = two_level_ontology();
        let background = ten_member_background();
        let subset = background.subset(["P10000"]);

        for threshold in [0.0, -0.1, 1.5, f64::NAN] {
            let config = EnrichmentConfig {
                threshold,
                ..Default::default()
            };
            assert!(matches!(
                analyze(&ontology, &background, &subset, &config),
                Err(GoError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn unknown_subset_terms_fail() {
        let ontology = two_level_ontology();
        let background = ten_member_background();
        let mut subset = AssociationMap::new();
        subset.add("P10000", 99u32.into());

        assert!(matches!(
            analyze(&ontology, &background, &subset, &EnrichmentConfig::default()),
            Err(GoError::UnknownTerm(_))
        ));
    }

    #[test]
    fn empty_subset_yields_an_empty_result() {
        let ontology = two_level_ontology();
        let background = ten_member_background();
        let subset = AssociationMap::new();

        let result =
            analyze(&ontology, &background, &subset, &EnrichmentConfig::default()).unwrap();
        assert_eq!(result.n_tested(), 0);
        assert!(result.terms().is_empty());
    }
}
