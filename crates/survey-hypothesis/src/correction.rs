//! Multiple-testing correction
//!
//! Family-wise (Bonferroni, Holm, Šidák) and false-discovery-rate
//! (Benjamini-Hochberg, Benjamini-Yekutieli) adjustments of a list of
//! p-values. Output vectors always line up one-to-one with the input.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use survey_core::{Error, Result};

/// Correction procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionMethod {
    /// Benjamini-Hochberg, independent or positively correlated tests
    #[default]
    FdrBh,
    /// Benjamini-Yekutieli, arbitrary dependence
    FdrBy,
    Bonferroni,
    /// Holm step-down
    Holm,
    Sidak,
}

impl CorrectionMethod {
    pub const ALL: [&'static str; 5] = ["fdr_bh", "fdr_by", "bonferroni", "holm", "sidak"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FdrBh => "fdr_bh",
            Self::FdrBy => "fdr_by",
            Self::Bonferroni => "bonferroni",
            Self::Holm => "holm",
            Self::Sidak => "sidak",
        }
    }
}

impl FromStr for CorrectionMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fdr_bh" => Ok(Self::FdrBh),
            "fdr_by" => Ok(Self::FdrBy),
            "bonferroni" => Ok(Self::Bonferroni),
            "holm" => Ok(Self::Holm),
            "sidak" => Ok(Self::Sidak),
            other => Err(Error::unknown_method("correction method", other, &Self::ALL)),
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a correction, index-aligned with the input p-values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionResult {
    pub reject: Vec<bool>,
    pub p_corrected: Vec<f64>,
    /// Per-test alpha under Šidák
    pub alpha_sidak: f64,
    /// Per-test alpha under Bonferroni
    pub alpha_bonferroni: f64,
    pub method: CorrectionMethod,
}

impl CorrectionResult {
    pub fn len(&self) -> usize {
        self.p_corrected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p_corrected.is_empty()
    }

    pub fn n_rejected(&self) -> usize {
        self.reject.iter().filter(|&&r| r).count()
    }
}

/// Correct `p_values` for multiple comparisons.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `alpha` is outside (0, 1) or a p-value is
/// outside [0, 1] (NaN included).
///
/// # Example
///
/// ```rust
/// use survey_hypothesis::{apply_fdr_correction, CorrectionMethod};
///
/// let result = apply_fdr_correction(&[0.01, 0.04, 0.03], CorrectionMethod::FdrBh, 0.05).unwrap();
/// let expected = [0.03, 0.04, 0.04];
/// for (got, want) in result.p_corrected.iter().zip(expected) {
///     assert!((got - want).abs() < 1e-12);
/// }
/// assert!(result.reject.iter().all(|&r| r));
/// ```
pub fn apply_fdr_correction(
    p_values: &[f64],
    method: CorrectionMethod,
    alpha: f64,
) -> Result<CorrectionResult> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::InvalidArgument(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    if let Some(p) = p_values.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(Error::InvalidArgument(format!(
            "p-values must be in [0, 1], got {p}"
        )));
    }

    let m = p_values.len();
    if m == 0 {
        return Ok(CorrectionResult {
            reject: Vec::new(),
            p_corrected: Vec::new(),
            alpha_sidak: alpha,
            alpha_bonferroni: alpha,
            method,
        });
    }

    let mf = m as f64;
    let alpha_sidak = 1.0 - (1.0 - alpha).powf(1.0 / mf);
    let alpha_bonferroni = alpha / mf;

    let (reject, p_corrected) = match method {
        CorrectionMethod::Bonferroni => (
            p_values.iter().map(|&p| p <= alpha_bonferroni).collect(),
            p_values.iter().map(|&p| (p * mf).min(1.0)).collect(),
        ),
        CorrectionMethod::Sidak => (
            p_values.iter().map(|&p| p <= alpha_sidak).collect(),
            p_values
                .iter()
                .map(|&p| -(mf * (-p).ln_1p()).exp_m1())
                .collect(),
        ),
        CorrectionMethod::Holm => holm(p_values, alpha),
        CorrectionMethod::FdrBh => step_up(p_values, alpha, 1.0),
        CorrectionMethod::FdrBy => {
            let cm: f64 = (1..=m).map(|i| 1.0 / i as f64).sum();
            step_up(p_values, alpha, cm)
        }
    };

    Ok(CorrectionResult {
        reject,
        p_corrected,
        alpha_sidak,
        alpha_bonferroni,
        method,
    })
}

/// Indices of `p_values` in ascending order of p, stable for ties
fn ascending_order(p_values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..p_values.len()).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));
    order
}

fn holm(p_values: &[f64], alpha: f64) -> (Vec<bool>, Vec<f64>) {
    let m = p_values.len();
    let order = ascending_order(p_values);

    let mut reject = vec![false; m];
    for (rank, &i) in order.iter().enumerate() {
        if p_values[i] > alpha / (m - rank) as f64 {
            break;
        }
        reject[i] = true;
    }

    let mut p_corrected = vec![0.0; m];
    let mut running_max = 0.0_f64;
    for (rank, &i) in order.iter().enumerate() {
        running_max = running_max.max(p_values[i] * (m - rank) as f64);
        p_corrected[i] = running_max.min(1.0);
    }
    (reject, p_corrected)
}

/// Benjamini-Hochberg step-up; `cm` scales the thresholds (1 for BH, the
/// harmonic number for BY)
fn step_up(p_values: &[f64], alpha: f64, cm: f64) -> (Vec<bool>, Vec<f64>) {
    let m = p_values.len();
    let mf = m as f64;
    let order = ascending_order(p_values);
    let factor = |rank: usize| (rank + 1) as f64 / mf / cm;

    let last_rejected = order
        .iter()
        .enumerate()
        .filter(|&(rank, &i)| p_values[i] <= factor(rank) * alpha)
        .map(|(rank, _)| rank)
        .last();

    let mut reject = vec![false; m];
    if let Some(last) = last_rejected {
        for &i in &order[..=last] {
            reject[i] = true;
        }
    }

    let mut p_corrected = vec![0.0; m];
    let mut running_min = f64::INFINITY;
    for (rank, &i) in order.iter().enumerate().rev() {
        running_min = running_min.min(p_values[i] / factor(rank));
        p_corrected[i] = running_min.min(1.0);
    }
    (reject, p_corrected)
}
