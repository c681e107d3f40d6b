//! Data audit checks: completeness, validity against category orders and
//! consistency.

use crate::{ColumnData, DataQualityWarning, Dataset, SurveyConfig};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Share of distinct values above which a column counts as high-cardinality
pub const HIGH_CARDINALITY_RATIO: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCompleteness {
    pub column: String,
    pub non_null_count: usize,
    pub null_count: usize,
    /// Percentage of non-missing cells
    pub completeness_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub expected_columns: usize,
    /// Configured columns absent from the dataset
    pub missing_columns: Vec<String>,
    /// Dataset columns not mentioned in the configuration
    pub extra_columns: Vec<String>,
    pub columns: Vec<ColumnCompleteness>,
    pub warnings: Vec<DataQualityWarning>,
}

/// Compare the dataset against the configured questions and measure missing
/// cells per column.
pub fn check_completeness(data: &Dataset, config: &dyn SurveyConfig) -> CompletenessReport {
    let expected: BTreeSet<&str> = config.questions().values().map(String::as_str).collect();
    let actual: BTreeSet<&str> = data.column_names().collect();

    let missing_columns: Vec<String> = expected
        .difference(&actual)
        .map(|c| c.to_string())
        .collect();
    let extra_columns = actual
        .difference(&expected)
        .map(|c| c.to_string())
        .collect();

    let warnings = missing_columns
        .iter()
        .map(|column| {
            DataQualityWarning::MissingColumn {
                question_id: config.question_id(column).map(str::to_string),
                column: column.clone(),
            }
            .emit()
        })
        .collect();

    let n = data.n_rows();
    let columns = data
        .columns()
        .iter()
        .map(|column| {
            let null_count = column.missing_count();
            let non_null_count = n - null_count;
            ColumnCompleteness {
                column: column.name().to_string(),
                non_null_count,
                null_count,
                completeness_rate: percentage(non_null_count, n),
            }
        })
        .collect();

    CompletenessReport {
        total_rows: n,
        total_columns: data.n_columns(),
        expected_columns: config.questions().len(),
        missing_columns,
        extra_columns,
        columns,
        warnings,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValidity {
    pub variable: String,
    pub column: String,
    pub expected_values: Vec<String>,
    pub invalid_values: Vec<String>,
}

impl CategoryValidity {
    pub fn is_valid(&self) -> bool {
        self.invalid_values.is_empty()
    }
}

/// Check every configured category order against the values actually
/// present. Ordered columns only hold valid codes, so this is meaningful on
/// data before [`crate::apply_category_orders`] runs.
pub fn check_validity(data: &Dataset, config: &dyn SurveyConfig) -> Vec<CategoryValidity> {
    config
        .category_orders()
        .iter()
        .filter_map(|(variable, order)| {
            let column_name = config.column_name(variable);
            let column = data.column(column_name)?;
            let allowed: HashSet<&str> = order.iter().map(String::as_str).collect();
            let invalid_values = column
                .levels()
                .into_iter()
                .filter(|value| !allowed.contains(value.as_str()))
                .collect();
            Some(CategoryValidity {
                variable: variable.clone(),
                column: column_name.to_string(),
                expected_values: order.clone(),
                invalid_values,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighCardinality {
    pub column: String,
    pub unique_count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    /// Rows identical to an earlier row
    pub duplicate_rows: Vec<usize>,
    /// Columns with at most one distinct value
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<HighCardinality>,
}

/// Look for duplicated respondents, constant columns and columns that are
/// nearly unique per respondent (typically free text or ids).
pub fn check_consistency(data: &Dataset) -> ConsistencyReport {
    let mut seen = HashSet::new();
    let duplicate_rows = (0..data.n_rows())
        .filter(|&row| !seen.insert(data.row_labels(row)))
        .collect();

    let mut constant_columns = Vec::new();
    let mut high_cardinality_columns = Vec::new();
    let n = data.n_rows();

    for column in data.columns() {
        let unique_count = column.n_unique();
        if unique_count <= 1 {
            constant_columns.push(column.name().to_string());
        } else if unique_count as f64 > n as f64 * HIGH_CARDINALITY_RATIO {
            high_cardinality_columns.push(HighCardinality {
                column: column.name().to_string(),
                unique_count,
                percentage: percentage(unique_count, n),
            });
        }
    }

    ConsistencyReport {
        duplicate_rows,
        constant_columns,
        high_cardinality_columns,
    }
}

/// One row of a dataset profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub column: String,
    pub kind: &'static str,
    pub non_null_count: usize,
    pub null_count: usize,
    pub unique_count: usize,
}

/// Per-column type, missing and distinct counts
pub fn profile(data: &Dataset) -> Vec<ColumnProfile> {
    data.columns()
        .iter()
        .map(|column| {
            let null_count = column.missing_count();
            ColumnProfile {
                column: column.name().to_string(),
                kind: match column.data() {
                    ColumnData::Text(_) => "text",
                    ColumnData::Numeric(_) => "numeric",
                    ColumnData::Ordered { .. } => "ordered",
                },
                non_null_count: column.len() - null_count,
                null_count,
                unique_count: column.n_unique(),
            }
        })
        .collect()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
