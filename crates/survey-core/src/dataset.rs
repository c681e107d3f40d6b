//! In-memory tabular survey data
//!
//! A [`Dataset`] is a rectangular table of named [`Column`]s, one row per
//! respondent. It is read-only: every transformation returns a new value.

use crate::{Error, Result};
use ordered_float::OrderedFloat;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Storage for one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Categorical or free-text answers
    Text(Vec<Option<String>>),
    /// Numeric answers; NaN is stored as missing
    Numeric(Vec<Option<f64>>),
    /// Ordered categorical answers: rank codes into `categories`
    Ordered {
        codes: Vec<Option<u32>>,
        categories: Vec<String>,
    },
}

/// A named column of respondent answers
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a text column
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        }
    }

    /// Create a numeric column
    pub fn numeric<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(
                values
                    .into_iter()
                    .map(|v| v.filter(|x| !x.is_nan()).map(|x| x + 0.0))
                    .collect(),
            ),
        }
    }

    /// Create an ordered categorical column.
    ///
    /// Values outside `order` become missing; they are returned, sorted and
    /// de-duplicated, as the second element.
    pub fn ordered<I, S>(name: impl Into<String>, values: I, order: &[String]) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let rank: HashMap<&str, u32> = order
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i as u32))
            .collect();

        let mut outside = BTreeSet::new();
        let codes = values
            .into_iter()
            .map(|value| {
                let value = value?;
                let value = value.as_ref();
                match rank.get(value) {
                    Some(&code) => Some(code),
                    None => {
                        outside.insert(value.to_string());
                        None
                    }
                }
            })
            .collect();

        let column = Self {
            name: name.into(),
            data: ColumnData::Ordered {
                codes,
                categories: order.to_vec(),
            },
        };
        (column, outside.into_iter().collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// The same column under a different name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: self.data.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Text(v) => v.len(),
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Ordered { codes, .. } => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self.data, ColumnData::Ordered { .. })
    }

    /// Category list of an ordered column
    pub fn categories(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Ordered { categories, .. } => Some(categories),
            _ => None,
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Text(v) => v[row].is_none(),
            ColumnData::Numeric(v) => v[row].is_none(),
            ColumnData::Ordered { codes, .. } => codes[row].is_none(),
        }
    }

    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_missing(row)).count()
    }

    /// Display label of a cell, `None` when missing
    pub fn label(&self, row: usize) -> Option<Cow<'_, str>> {
        match &self.data {
            ColumnData::Text(v) => v[row].as_deref().map(Cow::Borrowed),
            ColumnData::Numeric(v) => v[row].map(|x| Cow::Owned(format_number(x))),
            ColumnData::Ordered { codes, categories } => {
                codes[row].map(|c| Cow::Borrowed(categories[c as usize].as_str()))
            }
        }
    }

    /// Textual value of a cell; numeric cells are not text
    pub fn text_value(&self, row: usize) -> Option<&str> {
        match &self.data {
            ColumnData::Text(v) => v[row].as_deref(),
            ColumnData::Numeric(_) => None,
            ColumnData::Ordered { codes, categories } => {
                codes[row].map(|c| categories[c as usize].as_str())
            }
        }
    }

    /// Numeric view of the column.
    ///
    /// Ordered columns yield their rank codes. Text columns must parse as
    /// numbers (blank cells count as missing).
    pub fn numeric_values(&self) -> Result<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Numeric(v) => Ok(v.clone()),
            ColumnData::Ordered { codes, .. } => {
                Ok(codes.iter().map(|c| c.map(f64::from)).collect())
            }
            ColumnData::Text(v) => v
                .iter()
                .map(|cell| match cell.as_deref().map(str::trim) {
                    None | Some("") => Ok(None),
                    Some(s) => s
                        .parse::<f64>()
                        .map(|x| Some(x).filter(|x| !x.is_nan()))
                        .map_err(|_| Error::NonNumeric {
                            column: self.name.clone(),
                        }),
                })
                .collect(),
        }
    }

    /// Distinct non-missing labels in canonical order: rank order for
    /// ordered columns, value order for numeric columns, lexicographic
    /// order for text.
    pub fn levels(&self) -> Vec<String> {
        match &self.data {
            ColumnData::Text(v) => v
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
            ColumnData::Numeric(v) => v
                .iter()
                .flatten()
                .map(|&x| OrderedFloat(x))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|x| format_number(x.0))
                .collect(),
            ColumnData::Ordered { codes, categories } => codes
                .iter()
                .flatten()
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|c| categories[c as usize].clone())
                .collect(),
        }
    }

    /// Number of distinct non-missing values
    pub fn n_unique(&self) -> usize {
        self.levels().len()
    }

    /// Keep only the given rows, in the given order
    pub fn take(&self, rows: &[usize]) -> Self {
        let data = match &self.data {
            ColumnData::Text(v) => ColumnData::Text(rows.iter().map(|&r| v[r].clone()).collect()),
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Ordered { codes, categories } => ColumnData::Ordered {
                codes: rows.iter().map(|&r| codes[r]).collect(),
                categories: categories.clone(),
            },
        };
        Self {
            name: self.name.clone(),
            data,
        }
    }
}

/// Render a number the way it should appear as a category label:
/// integral values without a fractional part.
pub fn format_number(x: f64) -> String {
    // -0.0 + 0.0 is 0.0, so both zeros share one label
    let x = x + 0.0;
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{x:.0}")
    } else {
        format!("{x}")
    }
}

/// Rectangular table of respondent answers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Create a dataset, checking that all columns have the same length and
    /// distinct names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::new();
        for column in &columns {
            if column.len() != n_rows {
                return Err(Error::length_mismatch(column.name(), n_rows, column.len()));
            }
            if !seen.insert(column.name()) {
                return Err(Error::InvalidInput(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
        }
        Ok(Self { columns, n_rows })
    }

    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Look up a column, failing with [`Error::ColumnNotFound`]
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| Error::column_not_found(name))
    }

    /// A copy of this dataset with `column` added, or replacing the column of
    /// the same name.
    pub fn with_column(&self, column: Column) -> Result<Self> {
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(Error::length_mismatch(column.name(), self.n_rows, column.len()));
        }
        let mut columns = self.columns.clone();
        match columns.iter_mut().find(|c| c.name() == column.name()) {
            Some(slot) => *slot = column,
            None => columns.push(column),
        }
        Self::new(columns)
    }

    /// A copy of this dataset restricted to `rows`
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            n_rows: rows.len(),
        }
    }

    /// Labels of every cell in a row, used for duplicate detection
    pub fn row_labels(&self, row: usize) -> Vec<Option<Cow<'_, str>>> {
        self.columns.iter().map(|c| c.label(row)).collect()
    }
}

/// Incremental construction of a [`Dataset`]
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
}

impl DatasetBuilder {
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a fully observed text column
    pub fn text<S: Into<String>>(self, name: &str, values: impl IntoIterator<Item = S>) -> Self {
        self.column(Column::text(name, values.into_iter().map(Some)))
    }

    /// Add a text column with missing cells
    pub fn text_opt<S: Into<String>>(
        self,
        name: &str,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        self.column(Column::text(name, values))
    }

    /// Add a fully observed numeric column
    pub fn numeric(self, name: &str, values: impl IntoIterator<Item = f64>) -> Self {
        self.column(Column::numeric(name, values.into_iter().map(Some)))
    }

    /// Add a numeric column with missing cells
    pub fn numeric_opt(self, name: &str, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        self.column(Column::numeric(name, values))
    }

    pub fn build(self) -> Result<Dataset> {
        Dataset::new(self.columns)
    }
}
