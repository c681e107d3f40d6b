//! Variance explained effect size (eta-squared)

use crate::{
    EffectSize, EffectSizeEstimator, EffectSizeType, MultiGroupEffectSize, TwoGroupEffectSize,
};
use survey_core::{Error, Result};

/// Eta-squared (η²) effect size estimator
///
/// Eta-squared represents the proportion of total variance that is explained
/// by group membership. It ranges from 0 to 1.
///
/// η² = SS_between / SS_total
#[derive(Debug, Clone, Copy, Default)]
pub struct EtaSquared;

/// Between-group and total sums of squares of a one-way layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumsOfSquares {
    pub between: f64,
    pub within: f64,
    pub total: f64,
}

impl SumsOfSquares {
    /// Partition the variance of the pooled groups. Empty groups contribute
    /// nothing.
    pub fn from_groups(groups: &[&[f64]]) -> Self {
        let n_total: usize = groups.iter().map(|g| g.len()).sum();
        if n_total == 0 {
            return Self {
                between: 0.0,
                within: 0.0,
                total: 0.0,
            };
        }

        let grand_mean =
            groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n_total as f64;

        let mut between = 0.0;
        let mut within = 0.0;
        for group in groups.iter().filter(|g| !g.is_empty()) {
            let mean = group.iter().sum::<f64>() / group.len() as f64;
            between += group.len() as f64 * (mean - grand_mean).powi(2);
            within += group.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
        }

        Self {
            between,
            within,
            total: between + within,
        }
    }

    /// η² from these sums; zero total variance gives 0
    pub fn eta_squared(&self) -> f64 {
        if self.total > 0.0 {
            self.between / self.total
        } else {
            0.0
        }
    }
}

impl EtaSquared {
    /// Create a new eta-squared estimator
    pub fn new() -> Self {
        Self
    }
}

impl MultiGroupEffectSize for EtaSquared {
    fn compute_groups(&self, groups: &[&[f64]]) -> Result<EffectSize> {
        let non_empty = groups.iter().filter(|g| !g.is_empty()).count();
        if non_empty < 2 {
            return Err(Error::insufficient(2, non_empty, "eta-squared non-empty groups"));
        }

        let eta_squared = SumsOfSquares::from_groups(groups).eta_squared();
        let sample_sizes = match groups {
            [a, b] => Some((a.len(), b.len())),
            _ => None,
        };
        Ok(EffectSize::new(eta_squared, EffectSizeType::EtaSquared, sample_sizes))
    }
}

impl TwoGroupEffectSize for EtaSquared {
    fn compute(&self, group1: &[f64], group2: &[f64]) -> Result<EffectSize> {
        self.compute_groups(&[group1, group2])
    }
}

impl EffectSizeEstimator for EtaSquared {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::EtaSquared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_eta_squared_no_difference() {
        let group1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let group2 = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let effect_size = EtaSquared::new().compute(&group1, &group2).unwrap();

        assert_abs_diff_eq!(effect_size.magnitude, 0.0, epsilon = 1e-10);
        assert_eq!(effect_size.effect_type, EffectSizeType::EtaSquared);
    }

    #[test]
    fn test_eta_squared_clear_difference() {
        let group1 = vec![1.0, 1.0, 1.0];
        let group2 = vec![5.0, 5.0, 5.0];

        let effect_size = EtaSquared::new().compute(&group1, &group2).unwrap();

        // all variance is between groups
        assert_abs_diff_eq!(effect_size.magnitude, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_eta_squared_three_groups() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 3.0, 4.0];
        let c = [6.0, 7.0, 8.0];
        let sums = SumsOfSquares::from_groups(&[&a[..], &b[..], &c[..]]);
        // grand mean 4, group means 2, 3, 7
        assert_abs_diff_eq!(sums.between, 3.0 * (4.0 + 1.0 + 9.0), epsilon = 1e-10);
        assert_abs_diff_eq!(sums.within, 6.0, epsilon = 1e-10);

        let effect = EtaSquared::new()
            .compute_groups(&[a.as_slice(), b.as_slice(), c.as_slice()])
            .unwrap();
        assert_abs_diff_eq!(effect.magnitude, 42.0 / 48.0, epsilon = 1e-10);
        assert_eq!(effect.sample_sizes, None);
    }

    #[test]
    fn test_constant_values_give_zero() {
        let effect = EtaSquared::new().compute(&[2.0, 2.0], &[2.0]).unwrap();
        assert_eq!(effect.magnitude, 0.0);
    }

    #[test]
    fn test_single_group_is_insufficient() {
        let empty: [f64; 0] = [];
        let err = EtaSquared::new()
            .compute_groups(&[&[1.0, 2.0][..], &empty[..]])
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }
}
