//! Cramér's V: association strength of a contingency table

use crate::{EffectSize, EffectSizeEstimator, EffectSizeType};

/// Cramér's V effect size estimator
///
/// V = √(χ² / (N · min(r-1, c-1)))
#[derive(Debug, Clone, Copy, Default)]
pub struct CramersV;

impl CramersV {
    pub fn new() -> Self {
        Self
    }

    /// Compute V from a chi-square statistic, the table total and its shape.
    ///
    /// Returns 0 when the table is degenerate (`min(r-1, c-1) == 0`) or
    /// empty. The result is clamped to [0, 1].
    pub fn from_chi_square(chi2: f64, n: f64, rows: usize, cols: usize) -> EffectSize {
        EffectSize::new(cramers_v(chi2, n, rows, cols), EffectSizeType::CramersV, None)
    }
}

impl EffectSizeEstimator for CramersV {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::CramersV
    }

    fn is_symmetric(&self) -> bool {
        false
    }
}

/// Plain Cramér's V value
pub fn cramers_v(chi2: f64, n: f64, rows: usize, cols: usize) -> f64 {
    let min_dim = rows.min(cols).saturating_sub(1);
    if min_dim == 0 || n <= 0.0 || !chi2.is_finite() {
        return 0.0;
    }
    (chi2 / (n * min_dim as f64)).sqrt().clamp(0.0, 1.0)
}
