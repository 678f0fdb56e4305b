//! Statistical tests and multiple-testing correction for enrichment runs
//!
//! This module contains the one-sided hypergeometric test that scores a
//! single GO term and the corrections that are applied across all tested
//! terms afterwards.

pub mod correction;
pub mod hypergeom;

/// We have to frequently do divisions starting with u64 values
/// and need to return f64 values. To ensure some kind of safety
/// we use this method to panic in case of overflows.
pub(crate) fn f64_from_u64(n: u64) -> f64 {
    let intermediate: u32 = n
        .try_into()
        .expect("cannot safely create f64 from large u64");
    intermediate.into()
}
