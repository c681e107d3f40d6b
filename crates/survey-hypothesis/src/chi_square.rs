//! Chi-square test of independence

use crate::distribution::chi_square_sf;
use crate::types::{HypothesisTest, TestKind};
use serde::Serialize;
use survey_core::{Dataset, Error, Result, SurveyConfig};
use survey_crosstab::{build_crosstab, CountTable};
use survey_effect::{cramers_v, EffectSize, EffectSizeType};
use tracing::debug;

/// Result of a chi-square test of independence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareResult {
    pub var1: String,
    pub var2: String,
    pub chi2: f64,
    pub p_value: f64,
    pub dof: usize,
    pub cramers_v: f64,
    /// Whether Yates' continuity correction was applied (2×2 tables)
    pub yates_correction: bool,
    /// Total count of the table
    pub n: u64,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub observed: Vec<Vec<u64>>,
    pub expected: Vec<Vec<f64>>,
}

impl HypothesisTest for ChiSquareResult {
    fn kind(&self) -> TestKind {
        TestKind::ChiSquare
    }

    fn statistic(&self) -> f64 {
        self.chi2
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }

    fn effect_size(&self) -> EffectSize {
        EffectSize::new(self.cramers_v, EffectSizeType::CramersV, None)
    }
}

/// Test whether two categorical variables are independent.
///
/// Rows missing either value are left out of the table.
///
/// # Errors
///
/// * [`Error::ColumnNotFound`] if either variable has no column
/// * [`Error::InsufficientData`] if the table has fewer than two rows or
///   columns
pub fn chi_square_test(
    data: &Dataset,
    var1: &str,
    var2: &str,
    config: Option<&dyn SurveyConfig>,
) -> Result<ChiSquareResult> {
    let table = build_crosstab(data, var1, var2, config, false)?;
    chi_square_from_table(&table, var1, var2)
}

/// Chi-square test on an existing contingency table. Margins are ignored.
pub fn chi_square_from_table(
    table: &CountTable,
    var1: &str,
    var2: &str,
) -> Result<ChiSquareResult> {
    let table = table.without_margins();
    let (n_rows, n_cols) = table.shape();
    if n_rows < 2 || n_cols < 2 {
        return Err(Error::InsufficientData(format!(
            "contingency table {var1} x {var2} is {n_rows}x{n_cols}; both dimensions need at least 2 categories"
        )));
    }

    let row_sums: Vec<f64> = table.row_sums().into_iter().map(|v| v as f64).collect();
    let col_sums: Vec<f64> = table.col_sums().into_iter().map(|v| v as f64).collect();
    let n = table.interior_total();
    let total = n as f64;

    let expected: Vec<Vec<f64>> = row_sums
        .iter()
        .map(|r| col_sums.iter().map(|c| r * c / total).collect())
        .collect();
    let observed: Vec<Vec<u64>> = (0..n_rows).map(|i| table.row(i).to_vec()).collect();

    let dof = (n_rows - 1) * (n_cols - 1);
    let yates_correction = dof == 1;

    let mut chi2 = 0.0;
    for (obs_row, exp_row) in observed.iter().zip(&expected) {
        for (&o, &e) in obs_row.iter().zip(exp_row) {
            if e > 0.0 {
                let mut diff = (o as f64 - e).abs();
                if yates_correction {
                    diff -= diff.min(0.5);
                }
                chi2 += diff * diff / e;
            }
        }
    }

    let p_value = chi_square_sf(chi2, dof as f64);
    let cramers_v = cramers_v(chi2, total, n_rows, n_cols);
    debug!(var1, var2, chi2, p_value, dof, "chi-square test");

    Ok(ChiSquareResult {
        var1: var1.to_string(),
        var2: var2.to_string(),
        chi2,
        p_value,
        dof,
        cramers_v,
        yates_correction,
        n,
        row_labels: table.row_labels().to_vec(),
        col_labels: table.col_labels().to_vec(),
        observed,
        expected,
    })
}
