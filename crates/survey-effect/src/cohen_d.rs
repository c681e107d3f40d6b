//! Cohen's d: standardized mean difference with pooled standard deviation

use crate::{EffectSize, EffectSizeEstimator, EffectSizeType, TwoGroupEffectSize};
use statrs::statistics::Statistics;
use survey_core::{Error, Result};

/// Cohen's d effect size estimator
///
/// d = (mean₁ - mean₂) / s_pooled, where
/// s_pooled = √(((n₁-1)s₁² + (n₂-1)s₂²) / (n₁+n₂-2))
///
/// A pooled standard deviation of zero yields d = 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CohenD;

impl CohenD {
    /// Create a new Cohen's d estimator
    pub fn new() -> Self {
        Self
    }

    /// Compute d from group means, sample variances and sizes
    pub fn from_moments(
        mean1: f64,
        mean2: f64,
        var1: f64,
        var2: f64,
        n1: usize,
        n2: usize,
    ) -> f64 {
        let pooled = pooled_std(var1, var2, n1, n2);
        if pooled > 0.0 && pooled.is_finite() {
            (mean1 - mean2) / pooled
        } else {
            0.0
        }
    }
}

/// Pooled standard deviation of two groups from their sample variances
pub fn pooled_std(var1: f64, var2: f64, n1: usize, n2: usize) -> f64 {
    let dof = (n1 + n2) as f64 - 2.0;
    if dof <= 0.0 {
        return 0.0;
    }
    (((n1 as f64 - 1.0) * var1 + (n2 as f64 - 1.0) * var2) / dof).sqrt()
}

impl TwoGroupEffectSize for CohenD {
    fn compute(&self, group1: &[f64], group2: &[f64]) -> Result<EffectSize> {
        if group1.len() < 2 || group2.len() < 2 {
            return Err(Error::insufficient(
                2,
                group1.len().min(group2.len()),
                "Cohen's d group size",
            ));
        }

        let d = Self::from_moments(
            group1.mean(),
            group2.mean(),
            group1.variance(),
            group2.variance(),
            group1.len(),
            group2.len(),
        );

        Ok(EffectSize::new(
            d,
            EffectSizeType::CohensD,
            Some((group1.len(), group2.len())),
        ))
    }
}

impl EffectSizeEstimator for CohenD {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::CohensD
    }
}
