//! One-way analysis of variance

use crate::distribution::f_sf;
use crate::types::{HypothesisTest, TestKind};
use serde::Serialize;
use std::collections::HashMap;
use survey_core::{resolve, Dataset, Error, Result, SurveyConfig};
use survey_effect::{EffectSize, EffectSizeType, SumsOfSquares};
use tracing::debug;

/// Result of a one-way ANOVA
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaResult {
    pub group_var: String,
    pub value_var: String,
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub eta_squared: f64,
    pub n_groups: usize,
    /// Observations per group label, in the group column's level order
    pub group_sizes: Vec<(String, usize)>,
}

impl HypothesisTest for AnovaResult {
    fn kind(&self) -> TestKind {
        TestKind::Anova
    }

    fn statistic(&self) -> f64 {
        self.f_statistic
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }

    fn effect_size(&self) -> EffectSize {
        EffectSize::new(self.eta_squared, EffectSizeType::EtaSquared, None)
    }
}

/// Compare the mean of `value_var` across every group of `group_var`.
///
/// Respondents missing either value are dropped and groups left empty are
/// discarded. When all within-group variance is zero, F is infinite (p = 0)
/// if the group means differ and undefined otherwise.
///
/// # Errors
///
/// * [`Error::ColumnNotFound`] if either variable has no column
/// * [`Error::NonNumeric`] if `value_var` is not numeric
/// * [`Error::InsufficientData`] if fewer than two non-empty groups remain,
///   or there are no within-group degrees of freedom
pub fn anova_test(
    data: &Dataset,
    group_var: &str,
    value_var: &str,
    config: Option<&dyn SurveyConfig>,
) -> Result<AnovaResult> {
    let group_column = data.require(resolve(config, group_var))?;
    let value_column = data.require(resolve(config, value_var))?;
    let values = value_column.numeric_values()?;

    let labels = group_column.levels();
    let index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];
    // infinite values are left out, so group sizes count only what enters the sums
    for (row, value) in values.iter().enumerate() {
        let value = value.filter(|v| v.is_finite());
        if let (Some(label), Some(value)) = (group_column.label(row), value) {
            let i = index.get(&*label).copied().ok_or_else(|| {
                Error::InvalidInput(format!(
                    "label {label:?} of column '{}' is not among its levels",
                    group_column.name()
                ))
            })?;
            groups[i].push(value);
        }
    }

    let (group_sizes, groups): (Vec<(String, usize)>, Vec<Vec<f64>>) = labels
        .into_iter()
        .zip(groups)
        .filter(|(_, g)| !g.is_empty())
        .map(|(label, g)| ((label, g.len()), g))
        .unzip();

    let k = groups.len();
    if k < 2 {
        return Err(Error::insufficient(2, k, "ANOVA non-empty groups"));
    }
    let n: usize = groups.iter().map(Vec::len).sum();
    if n <= k {
        return Err(Error::InsufficientData(format!(
            "ANOVA needs more observations than groups: {n} observations in {k} groups"
        )));
    }

    let slices: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();
    let sums = SumsOfSquares::from_groups(&slices);
    let df_between = k - 1;
    let df_within = n - k;

    let (f_statistic, p_value) = if sums.within > 0.0 {
        let f = (sums.between / df_between as f64) / (sums.within / df_within as f64);
        (f, f_sf(f, df_between as f64, df_within as f64))
    } else if sums.between > 0.0 {
        (f64::INFINITY, 0.0)
    } else {
        (f64::NAN, f64::NAN)
    };

    let eta_squared = sums.eta_squared();
    debug!(group_var, value_var, f_statistic, p_value, eta_squared, "ANOVA");

    Ok(AnovaResult {
        group_var: group_var.to_string(),
        value_var: value_var.to_string(),
        f_statistic,
        p_value,
        df_between,
        df_within,
        eta_squared,
        n_groups: k,
        group_sizes,
    })
}
