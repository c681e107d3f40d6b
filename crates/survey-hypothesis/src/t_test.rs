//! Independent two-sample t-test

use crate::distribution::t_two_sided;
use crate::types::{HypothesisTest, TestKind};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fmt;
use survey_core::{resolve, Dataset, Error, Result, SurveyConfig};
use survey_effect::{CohenD, EffectSize, EffectSizeType};
use tracing::debug;

/// Variance model of the two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceAssumption {
    /// Student's test with a pooled variance estimate
    #[default]
    Equal,
    /// Welch's test with Welch–Satterthwaite degrees of freedom
    Welch,
}

impl fmt::Display for VarianceAssumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "Student"),
            Self::Welch => write!(f, "Welch"),
        }
    }
}

/// Result of an independent two-sample t-test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestResult {
    pub group_var: String,
    pub value_var: String,
    pub group1: String,
    pub group2: String,
    pub variance: VarianceAssumption,
    pub t_statistic: f64,
    pub p_value: f64,
    pub df: f64,
    pub cohens_d: f64,
    pub n1: usize,
    pub n2: usize,
    pub mean1: f64,
    pub mean2: f64,
    pub std1: f64,
    pub std2: f64,
}

impl HypothesisTest for TTestResult {
    fn kind(&self) -> TestKind {
        TestKind::TTest
    }

    fn statistic(&self) -> f64 {
        self.t_statistic
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }

    fn effect_size(&self) -> EffectSize {
        EffectSize::new(
            self.cohens_d,
            EffectSizeType::CohensD,
            Some((self.n1, self.n2)),
        )
    }
}

/// Student's t-test comparing `value_var` between two groups of
/// `group_var`. See [`t_test_independent_with`].
pub fn t_test_independent(
    data: &Dataset,
    group_var: &str,
    value_var: &str,
    group1: &str,
    group2: &str,
    config: Option<&dyn SurveyConfig>,
) -> Result<TTestResult> {
    t_test_independent_with(
        data,
        group_var,
        value_var,
        group1,
        group2,
        config,
        VarianceAssumption::Equal,
    )
}

/// Two-sample t-test with an explicit variance model.
///
/// Respondents belong to a group when their `group_var` label equals
/// `group1` or `group2`. Missing values of `value_var` are dropped per group.
/// Cohen's d always uses the pooled standard deviation.
///
/// # Errors
///
/// * [`Error::ColumnNotFound`] if either variable has no column
/// * [`Error::NonNumeric`] if `value_var` is not numeric
/// * [`Error::InsufficientData`] if either group has fewer than two values
pub fn t_test_independent_with(
    data: &Dataset,
    group_var: &str,
    value_var: &str,
    group1: &str,
    group2: &str,
    config: Option<&dyn SurveyConfig>,
    variance: VarianceAssumption,
) -> Result<TTestResult> {
    let group_column = data.require(resolve(config, group_var))?;
    let value_column = data.require(resolve(config, value_var))?;
    let values = value_column.numeric_values()?;

    let select = |group: &str| -> Vec<f64> {
        (0..data.n_rows())
            .filter(|&row| group_column.label(row).as_deref() == Some(group))
            .filter_map(|row| values[row])
            .collect()
    };
    let data1 = select(group1);
    let data2 = select(group2);

    if data1.len() < 2 || data2.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "t-test needs at least 2 values per group: {group1}={}, {group2}={}",
            data1.len(),
            data2.len()
        )));
    }

    let (n1, n2) = (data1.len(), data2.len());
    let (mean1, mean2) = (data1.iter().mean(), data2.iter().mean());
    let (var1, var2) = (data1.iter().variance(), data2.iter().variance());
    let (nf1, nf2) = (n1 as f64, n2 as f64);

    let (se, df) = match variance {
        VarianceAssumption::Equal => {
            let df = nf1 + nf2 - 2.0;
            let pooled_var = ((nf1 - 1.0) * var1 + (nf2 - 1.0) * var2) / df;
            ((pooled_var * (1.0 / nf1 + 1.0 / nf2)).sqrt(), df)
        }
        VarianceAssumption::Welch => {
            let a = var1 / nf1;
            let b = var2 / nf2;
            let df = (a + b).powi(2) / (a * a / (nf1 - 1.0) + b * b / (nf2 - 1.0));
            ((a + b).sqrt(), df)
        }
    };

    let diff = mean1 - mean2;
    let (t_statistic, p_value) = if se > 0.0 {
        let t = diff / se;
        (t, t_two_sided(t, df)?)
    } else if diff != 0.0 {
        // no spread at all but different means
        (diff.signum() * f64::INFINITY, 0.0)
    } else {
        (f64::NAN, f64::NAN)
    };

    let cohens_d = CohenD::from_moments(mean1, mean2, var1, var2, n1, n2);
    debug!(group_var, value_var, t_statistic, p_value, %variance, "t-test");

    Ok(TTestResult {
        group_var: group_var.to_string(),
        value_var: value_var.to_string(),
        group1: group1.to_string(),
        group2: group2.to_string(),
        variance,
        t_statistic,
        p_value,
        df,
        cohens_d,
        n1,
        n2,
        mean1,
        mean2,
        std1: var1.sqrt(),
        std2: var2.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Dataset {
        Dataset::builder()
            .text("group", ["a", "a", "a", "a", "b", "b", "b", "b", "c"])
            .numeric_opt(
                "score",
                [
                    Some(5.0),
                    Some(5.0),
                    Some(4.0),
                    Some(5.0),
                    Some(1.0),
                    Some(2.0),
                    Some(2.0),
                    Some(3.0),
                    Some(9.0),
                ],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_student_t_test() {
        let result = t_test_independent(&sample(), "group", "score", "a", "b", None).unwrap();
        assert_eq!((result.n1, result.n2), (4, 4));
        assert_relative_eq!(result.mean1, 4.75);
        assert_relative_eq!(result.mean2, 2.0);
        assert_relative_eq!(result.df, 6.0);

        // pooled variance (0.75 + 2) / 6
        let se = ((2.75_f64 / 6.0) * 0.5).sqrt();
        assert_relative_eq!(result.t_statistic, 2.75 / se, epsilon = 1e-12);
        assert!(result.p_value < 0.01);
        assert_eq!(result.marker(), "**");
    }

    #[test]
    fn test_welch_degrees_of_freedom() {
        let result = t_test_independent_with(
            &sample(),
            "group",
            "score",
            "a",
            "b",
            None,
            VarianceAssumption::Welch,
        )
        .unwrap();
        let (a, b) = (0.25 / 4.0, (2.0 / 3.0) / 4.0);
        let df = (a + b) * (a + b) / (a * a / 3.0 + b * b / 3.0);
        assert_relative_eq!(result.df, df, epsilon = 1e-12);
        assert!(result.df < 6.0);
    }

    #[test]
    fn test_small_group_is_insufficient() {
        let err = t_test_independent(&sample(), "group", "score", "a", "c", None).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_text_values_are_rejected() {
        let err = t_test_independent(&sample(), "score", "group", "1", "2", None).unwrap_err();
        assert!(matches!(err, Error::NonNumeric { .. }));
    }

    #[test]
    fn test_identical_constant_groups() {
        let data = Dataset::builder()
            .text("g", ["a", "a", "b", "b"])
            .numeric("v", [3.0, 3.0, 3.0, 3.0])
            .build()
            .unwrap();
        let result = t_test_independent(&data, "g", "v", "a", "b", None).unwrap();
        assert!(result.t_statistic.is_nan());
        assert_eq!(result.cohens_d, 0.0);
    }
}
