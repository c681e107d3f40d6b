//! Core traits for effect size estimation

use crate::types::{EffectSize, EffectSizeType};
use survey_core::Result;

/// Base trait for effect size estimators
pub trait EffectSizeEstimator {
    /// Get the type of effect size this estimator computes
    fn effect_size_type(&self) -> EffectSizeType;

    /// Check if the estimator is symmetric (effect_size(A,B) = -effect_size(B,A))
    fn is_symmetric(&self) -> bool {
        true
    }
}

/// Effect sizes comparing two independent groups
pub trait TwoGroupEffectSize: EffectSizeEstimator {
    /// Compute the effect size of group 1 relative to group 2
    fn compute(&self, group1: &[f64], group2: &[f64]) -> Result<EffectSize>;
}

/// Effect sizes over any number of independent groups
pub trait MultiGroupEffectSize: EffectSizeEstimator {
    /// Compute the effect size of group membership
    fn compute_groups(&self, groups: &[&[f64]]) -> Result<EffectSize>;
}
