//! One-sided hypergeometric test for overrepresentation of a single GO term
//!
//! The test asks: given a background population in which `background_go`
//! of `background_total` members carry the term, how probable is it to
//! observe `subset_go` or more carriers in a random draw of
//! `subset_total` members? Small p-values indicate overrepresentation.
//!
//! # Examples
//!
//! ```
//! use go_enrich::stats::hypergeom::pvalue;
//!
//! // 2 of 3 drawn members carry a term that 4 of 10 background members carry
//! let p = pvalue(2, 3, 4, 10).unwrap();
//! assert!((p - 1.0 / 3.0).abs() < 1e-12);
//! ```

use statrs::distribution::{DiscreteCDF, Hypergeometric};
use tracing::debug;

use crate::{GoError, GoResult};

/// Calculates the probability of observing `subset_go` or more term
/// carriers in the subset, under the hypergeometric null model
///
/// # Errors
///
/// Fails with [`GoError::InvalidHypergeometric`] if the counts are
/// inconsistent, e.g. when a subset outgrows its background.
pub fn pvalue(
    subset_go: u64,
    subset_total: u64,
    background_go: u64,
    background_total: u64,
) -> GoResult<f64> {
    if subset_total > background_total {
        return Err(GoError::InvalidHypergeometric(format!(
            "subset size {subset_total} exceeds background size {background_total}"
        )));
    }
    if background_go > background_total {
        return Err(GoError::InvalidHypergeometric(format!(
            "{background_go} annotated members in a background of {background_total}"
        )));
    }
    if subset_go > subset_total {
        return Err(GoError::InvalidHypergeometric(format!(
            "{subset_go} annotated members in a subset of {subset_total}"
        )));
    }
    if subset_go > background_go {
        return Err(GoError::InvalidHypergeometric(format!(
            "{subset_go} annotated members in the subset, but only {background_go} in the background"
        )));
    }

    // Zero observations are at least as probable as any draw
    if subset_go == 0 {
        return Ok(1.0);
    }

    let hyper = Hypergeometric::new(
        // Total number of members in the background
        // ==> population
        background_total,
        // Number of background members annotated with the term
        // ==> successes
        background_go,
        // Number of members in the subset
        // ==> draws
        subset_total,
    )
    .map_err(|e| GoError::InvalidHypergeometric(e.to_string()))?;

    // subtracting 1, because we want to test including subset_go
    // e.g. "7 or more", but sf by default calculates "more than 7"
    let pvalue = hyper.sf(subset_go - 1);
    debug!(
        "Population: {}, Successes: {}, Draws: {}, Observed: {}, p: {}",
        background_total, background_go, subset_total, subset_go, pvalue
    );
    Ok(pvalue)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn two_of_three_against_four_of_ten() {
        // P(X >= 2) with N=10, K=4, n=3 is 1/3
        let p = pvalue(2, 3, 4, 10).unwrap();
        assert!((p - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn full_overlap_is_certain() {
        // every member carries the term, so any draw observes only carriers
        let p = pvalue(3, 3, 10, 10).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_observations_yield_one() {
        let p = pvalue(0, 3, 4, 10).unwrap();
        assert!((p - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn all_observed_in_smallest_draw() {
        // P(X >= 1) with N=10, K=1, n=1 is 1/10
        let p = pvalue(1, 1, 1, 10).unwrap();
        assert!((p - 0.1).abs() < 1e-12);
    }

    #[test]
    fn inconsistent_counts_fail() {
        assert!(matches!(
            pvalue(2, 11, 4, 10),
            Err(GoError::InvalidHypergeometric(_))
        ));
        assert!(matches!(
            pvalue(2, 3, 11, 10),
            Err(GoError::InvalidHypergeometric(_))
        ));
        assert!(matches!(
            pvalue(4, 3, 4, 10),
            Err(GoError::InvalidHypergeometric(_))
        ));
        assert!(matches!(
            pvalue(3, 3, 2, 10),
            Err(GoError::InvalidHypergeometric(_))
        ));
    }
}
