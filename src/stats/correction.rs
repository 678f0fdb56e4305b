//! Multiple-testing correction of p-values
//!
//! Every enrichment run tests many GO terms, so the raw p-values must be
//! corrected before calling a term significant. Two procedures are
//! available: the Bonferroni family-wise error rate correction and the
//! Benjamini-Hochberg false discovery rate, the default.
//!
//! # Examples
//!
//! ```
//! use go_enrich::stats::correction::CorrectionMethod;
//!
//! let method: CorrectionMethod = "fdr".parse().unwrap();
//! let corrected = method.adjust(&[0.01, 0.04, 0.03, 0.005]);
//! assert_eq!(corrected, vec![0.02, 0.04, 0.04, 0.02]);
//! ```

use std::fmt::Display;
use std::str::FromStr;

use crate::{GoError, GoResult};

/// The procedure used to correct p-values for multiple testing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionMethod {
    /// Family-wise error rate control, `p * n` clamped to 1
    Bonferroni,
    /// Benjamini-Hochberg false discovery rate
    #[default]
    Fdr,
}

impl CorrectionMethod {
    /// Corrects the given p-values, preserving their order
    pub fn adjust(&self, pvalues: &[f64]) -> Vec<f64> {
        match self {
            CorrectionMethod::Bonferroni => bonferroni(pvalues),
            CorrectionMethod::Fdr => benjamini_hochberg(pvalues),
        }
    }
}

impl FromStr for CorrectionMethod {
    type Err = GoError;
    fn from_str(s: &str) -> GoResult<Self> {
        match s.to_lowercase().as_str() {
            "bonferroni" => Ok(CorrectionMethod::Bonferroni),
            "fdr" => Ok(CorrectionMethod::Fdr),
            other => Err(GoError::InvalidConfiguration(format!(
                "unknown correction method: {other}"
            ))),
        }
    }
}

impl Display for CorrectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionMethod::Bonferroni => write!(f, "bonferroni"),
            CorrectionMethod::Fdr => write!(f, "fdr"),
        }
    }
}

/// Bonferroni correction: every p-value is multiplied by the number of
/// tests and clamped to 1
pub fn bonferroni(pvalues: &[f64]) -> Vec<f64> {
    let n = pvalues.len() as f64;
    pvalues.iter().map(|p| (p * n).min(1.0)).collect()
}

/// Benjamini-Hochberg step-up correction
///
/// Ranks the p-values, scales each by `n / rank` and enforces
/// monotonicity from the largest rank downwards. The returned vector
/// keeps the input order.
pub fn benjamini_hochberg(pvalues: &[f64]) -> Vec<f64> {
    let n = pvalues.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| {
        pvalues[*a]
            .partial_cmp(&pvalues[*b])
            .expect("p-values are never NaN")
    });

    let mut corrected = vec![0.0; n];
    let mut prev = 1.0f64;
    for (rank, idx) in order.iter().enumerate().rev() {
        let scaled = pvalues[*idx] * n as f64 / (rank + 1) as f64;
        prev = scaled.min(1.0).min(prev);
        corrected[*idx] = prev;
    }
    corrected
}
