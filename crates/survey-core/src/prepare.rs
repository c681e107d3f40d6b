//! Cleaning steps applied to a freshly loaded dataset

use crate::{Column, ColumnData, DataQualityWarning, Dataset, Error, Result, SurveyConfig};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Default delimiter between the choices of a multiple-selection answer
pub const DEFAULT_MULTISELECT_DELIMITER: &str = "、";

/// What to do with missing cells
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MissingStrategy {
    /// Leave missing cells as they are
    #[default]
    Keep,
    /// Drop every row that has a missing cell in any column
    DropRows,
    /// Replace missing text cells with the given label; numeric cells are
    /// filled when the label parses as a number
    Fill(String),
}

impl FromStr for MissingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" => Ok(Self::Keep),
            "drop" => Ok(Self::DropRows),
            "fill" => Ok(Self::Fill(String::new())),
            other => Err(Error::unknown_method(
                "missing-value strategy",
                other,
                &["keep", "drop", "fill"],
            )),
        }
    }
}

/// Apply a missing-value strategy, returning a new dataset
pub fn handle_missing_values(data: &Dataset, strategy: &MissingStrategy) -> Result<Dataset> {
    match strategy {
        MissingStrategy::Keep => Ok(data.clone()),
        MissingStrategy::DropRows => {
            let rows: Vec<usize> = (0..data.n_rows())
                .filter(|&row| data.columns().iter().all(|c| !c.is_missing(row)))
                .collect();
            debug!(
                dropped = data.n_rows() - rows.len(),
                "dropped rows with missing values"
            );
            Ok(data.take_rows(&rows))
        }
        MissingStrategy::Fill(label) => {
            let numeric_fill = label.trim().parse::<f64>().ok();
            let columns = data
                .columns()
                .iter()
                .map(|column| fill_column(column, label, numeric_fill))
                .collect();
            Dataset::new(columns)
        }
    }
}

fn fill_column(column: &Column, label: &str, numeric_fill: Option<f64>) -> Column {
    match column.data() {
        ColumnData::Text(values) => Column::text(
            column.name(),
            values
                .iter()
                .map(|v| Some(v.clone().unwrap_or_else(|| label.to_string()))),
        ),
        ColumnData::Numeric(values) => match numeric_fill {
            Some(fill) => Column::numeric(
                column.name(),
                values.iter().map(|v| Some(v.unwrap_or(fill))),
            ),
            None => column.clone(),
        },
        ColumnData::Ordered { categories, .. } if categories.iter().any(|c| c == label) => {
            let labels: Vec<Option<&str>> = (0..column.len())
                .map(|row| Some(column.text_value(row).unwrap_or(label)))
                .collect();
            Column::ordered(column.name(), labels, categories).0
        }
        ColumnData::Ordered { .. } => column.clone(),
    }
}

/// Convert every column named in the configured category orders into an
/// ordered categorical column.
///
/// Values outside the declared order become missing and are reported as
/// [`DataQualityWarning::ValuesNotInOrder`]. Orders for columns absent from
/// the dataset are skipped.
pub fn apply_category_orders(
    data: &Dataset,
    config: &dyn SurveyConfig,
) -> Result<(Dataset, Vec<DataQualityWarning>)> {
    let mut result = data.clone();
    let mut warnings = Vec::new();

    for (variable, order) in config.category_orders() {
        let column_name = config.column_name(variable);
        let Some(column) = data.column(column_name) else {
            debug!(variable, column = column_name, "no column for category order");
            continue;
        };

        let labels: Vec<Option<String>> = (0..column.len())
            .map(|row| column.label(row).map(|l| l.into_owned()))
            .collect();
        let (ordered, outside) = Column::ordered(column_name, labels, order);

        if !outside.is_empty() {
            warnings.push(
                DataQualityWarning::ValuesNotInOrder {
                    column: column_name.to_string(),
                    values: outside,
                }
                .emit(),
            );
        }
        result = result.with_column(ordered)?;
    }

    Ok((result, warnings))
}

/// Split a multiple-selection cell into trimmed, non-empty choices
pub fn split_multiselect_cell(cell: Option<&str>, delimiter: &str) -> Vec<String> {
    let Some(cell) = cell else {
        return Vec::new();
    };
    cell.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Computes one derived column from the dataset prepared so far
pub type Derivation = Box<dyn Fn(&Dataset, &dyn SurveyConfig) -> Result<Column>>;

/// Named, project-specific column derivations, applied in insertion order
/// after missing values and category orders have been handled.
///
/// Each derivation sees the columns added by the ones before it. The
/// returned column is renamed to the derivation's name, replacing any
/// column of that name.
#[derive(Default)]
pub struct DerivedColumns {
    derivations: Vec<(String, Derivation)>,
}

impl DerivedColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a derivation producing the column `name`
    pub fn with<F>(mut self, name: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&Dataset, &dyn SurveyConfig) -> Result<Column> + 'static,
    {
        self.derivations.push((name.into(), Box::new(derive)));
        self
    }

    pub fn len(&self) -> usize {
        self.derivations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.derivations.is_empty()
    }

    /// Names of the derived columns, in application order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.derivations.iter().map(|(name, _)| name.as_str())
    }
}

impl std::fmt::Debug for DerivedColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Add every derived column to a copy of `data`.
///
/// A derivation that fails, or returns a column of the wrong length, is
/// skipped and reported as [`DataQualityWarning::DerivationFailed`]; the
/// remaining derivations still run.
pub fn add_derived_columns(
    data: &Dataset,
    config: &dyn SurveyConfig,
    derivations: &DerivedColumns,
) -> (Dataset, Vec<DataQualityWarning>) {
    let mut result = data.clone();
    let mut warnings = Vec::new();
    for (name, derive) in &derivations.derivations {
        let derived = derive(&result, config).and_then(|c| result.with_column(c.renamed(name)));
        match derived {
            Ok(extended) => result = extended,
            Err(e) => warnings.push(
                DataQualityWarning::DerivationFailed {
                    column: name.clone(),
                    reason: e.to_string(),
                }
                .emit(),
            ),
        }
    }
    debug!(
        added = derivations.len() - warnings.len(),
        failed = warnings.len(),
        "derived columns"
    );
    (result, warnings)
}

/// Map the labels of a column to numeric scores, producing a new numeric
/// column named `target`. Labels without a score become missing.
pub fn numeric_scores(
    data: &Dataset,
    column: &str,
    mapping: &HashMap<String, f64>,
    target: &str,
) -> Result<Column> {
    let source = data.require(column)?;
    Ok(Column::numeric(
        target,
        (0..source.len()).map(|row| {
            source
                .label(row)
                .and_then(|label| mapping.get(&*label).copied())
        }),
    ))
}
