//! A library for Gene Ontology (GO) term enrichment analysis
//!
//! `go-enrich` determines which GO terms are over-represented in a set of
//! genes or proteins of interest, compared to a background population.
//! Every candidate term is scored with a one-sided hypergeometric test over
//! the members annotated to the term or any of its descendants. Testing
//! starts at the most specific annotated terms and climbs towards the root,
//! stopping along each path once a term is significantly enriched. The raw
//! p-values are corrected for multiple testing with either Bonferroni or
//! Benjamini-Hochberg.
//!
//! The ontology is usually loaded from a `go.obo` file
//! ([`parser::obo`]) and the annotations from a GAF file ([`parser::gaf`]),
//! but both can also be assembled programmatically:
//!
//! ```
//! use go_enrich::annotations::AssociationMap;
//! use go_enrich::enrichment::{analyze, EnrichmentConfig};
//! use go_enrich::Ontology;
//!
//! let mut ontology = Ontology::default();
//! ontology.insert_term("biological_process".to_string(), "biological_process".to_string(), 8150u32);
//! ontology.insert_term("membrane organization".to_string(), "biological_process".to_string(), 61024u32);
//! ontology.add_parent(8150u32, 61024u32).unwrap();
//! ontology.create_cache();
//!
//! let mut background = AssociationMap::default();
//! for (member, term) in [
//!     ("P10000", 61024u32), ("P10001", 61024), ("P10002", 61024), ("P10003", 61024),
//!     ("P10004", 8150), ("P10005", 8150), ("P10006", 8150), ("P10007", 8150),
//!     ("P10008", 8150), ("P10009", 8150),
//! ] {
//!     background.add(member, term.into());
//! }
//! let subset = background.subset(["P10000", "P10001", "P10004"]);
//!
//! let result = analyze(&ontology, &background, &subset, &EnrichmentConfig::default()).unwrap();
//!
//! // "membrane organization" covers 2 of 3 subset members vs 4 of 10 background members
//! assert_eq!(result.n_tested(), 2);
//! let top = &result.terms()[0];
//! assert_eq!(top.id(), 61024u32.into());
//! assert!((top.pvalue() - 1.0 / 3.0).abs() < 1e-9);
//! ```
//!
//! The library does not install a `tracing` subscriber. Clients that want to
//! see the run statistics or per-term test decisions must set one up
//! themselves.

use std::num::ParseIntError;

use thiserror::Error;

pub mod annotations;
pub mod enrichment;
mod ontology;
pub mod parser;
pub mod stats;
pub mod term;

pub use annotations::AssociationMap;
pub use enrichment::{analyze, EnrichedTerm, EnrichmentConfig, EnrichmentResult};
pub use ontology::Ontology;
pub use term::{GoGroup, GoTerm, GoTermId};

const DEFAULT_NUM_PARENTS: usize = 10;
const DEFAULT_NUM_ALL_PARENTS: usize = 50;

/// The errors of `go-enrich`
///
/// Every fallible operation in the crate returns one of these variants.
/// There is no retry logic anywhere: inconsistent input data is reported
/// as an error and never silently patched up.
#[derive(Error, Debug)]
pub enum GoError {
    /// A term id was referenced that is not part of the [`Ontology`]
    #[error("term {0} does not exist in the ontology")]
    UnknownTerm(GoTermId),
    /// A string could not be parsed into a [`GoTermId`]
    #[error("invalid GO term id: {0}")]
    InvalidTermId(String),
    /// The counts handed to the hypergeometric test contradict each other
    #[error("inconsistent hypergeometric parameters: {0}")]
    InvalidHypergeometric(String),
    /// The enrichment configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// An input file could not be opened or read
    #[error("cannot open file: {0}")]
    CannotOpenFile(String),
    /// The numeric part of a term id is not a valid integer
    #[error("unable to parse Integer")]
    ParseIntError,
}

impl From<ParseIntError> for GoError {
    fn from(_: ParseIntError) -> Self {
        GoError::ParseIntError
    }
}

/// Convenience alias for `Result<T, GoError>`
pub type GoResult<T> = Result<T, GoError>;
