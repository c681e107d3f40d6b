//! Contingency table storage and the operations that reshape it

use num_traits::{AsPrimitive, Zero};
use serde::Serialize;
use std::fmt;
use survey_core::{Error, Result};

/// Reserved label of the margin row and column
pub const TOTAL_LABEL: &str = "Total";

/// How a table is turned into percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalize {
    /// Each row sums to 100
    Index,
    /// Each column sums to 100
    Columns,
    /// The whole table sums to 100
    All,
}

/// A two-way table of `T` indexed by row and column labels.
///
/// Cells are stored row-major. Rows and columns labelled [`TOTAL_LABEL`]
/// are margins; every per-cell statistic strips them first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTable<T> {
    row_name: String,
    col_name: String,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    cells: Vec<T>,
}

/// Raw counts
pub type CountTable = CrossTable<u64>;
/// Percentages on a 0-100 scale
pub type PercentTable = CrossTable<f64>;

impl<T: Copy + Zero> CrossTable<T> {
    /// Create a table from row-major cells
    pub fn from_cells(
        row_name: impl Into<String>,
        col_name: impl Into<String>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        cells: Vec<T>,
    ) -> Result<Self> {
        let expected = row_labels.len() * col_labels.len();
        if cells.len() != expected {
            return Err(Error::InvalidInput(format!(
                "table of {}x{} needs {expected} cells, got {}",
                row_labels.len(),
                col_labels.len(),
                cells.len()
            )));
        }
        Ok(Self {
            row_name: row_name.into(),
            col_name: col_name.into(),
            row_labels,
            col_labels,
            cells,
        })
    }

    /// A table with no rows and no columns
    pub fn empty(row_name: impl Into<String>, col_name: impl Into<String>) -> Self {
        Self {
            row_name: row_name.into(),
            col_name: col_name.into(),
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Name of the row variable
    pub fn row_name(&self) -> &str {
        &self.row_name
    }

    /// Name of the column variable
    pub fn col_name(&self) -> &str {
        &self.col_name
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell by position
    pub fn get(&self, row: usize, col: usize) -> T {
        self.cells[row * self.n_cols() + col]
    }

    /// Cell by labels, `None` when either label is absent
    pub fn cell(&self, row_label: &str, col_label: &str) -> Option<T> {
        let row = self.row_index(row_label)?;
        let col = self.col_index(col_label)?;
        Some(self.get(row, col))
    }

    /// One row of cells
    pub fn row(&self, row: usize) -> &[T] {
        let n = self.n_cols();
        &self.cells[row * n..(row + 1) * n]
    }

    /// One column of cells
    pub fn column(&self, col: usize) -> impl Iterator<Item = T> + '_ {
        (0..self.n_rows()).map(move |row| self.get(row, col))
    }

    pub fn row_index(&self, label: &str) -> Option<usize> {
        self.row_labels.iter().position(|l| l == label)
    }

    pub fn col_index(&self, label: &str) -> Option<usize> {
        self.col_labels.iter().position(|l| l == label)
    }

    /// Iterate `(row label, column label, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, T)> + '_ {
        self.row_labels.iter().enumerate().flat_map(move |(i, row)| {
            self.col_labels
                .iter()
                .enumerate()
                .map(move |(j, col)| (row.as_str(), col.as_str(), self.get(i, j)))
        })
    }

    /// Whether a margin row or column is present
    pub fn has_margins(&self) -> bool {
        self.row_index(TOTAL_LABEL).is_some() || self.col_index(TOTAL_LABEL).is_some()
    }

    /// Sum of all cells outside the margins
    pub fn interior_total(&self) -> T {
        self.without_margins()
            .cells
            .iter()
            .fold(T::zero(), |acc, &v| acc + v)
    }

    /// Row sums, ignoring the margin column
    pub fn row_sums(&self) -> Vec<T> {
        let keep = interior_positions(&self.col_labels);
        (0..self.n_rows())
            .map(|i| keep.iter().fold(T::zero(), |acc, &j| acc + self.get(i, j)))
            .collect()
    }

    /// Column sums, ignoring the margin row
    pub fn col_sums(&self) -> Vec<T> {
        let keep = interior_positions(&self.row_labels);
        (0..self.n_cols())
            .map(|j| keep.iter().fold(T::zero(), |acc, &i| acc + self.get(i, j)))
            .collect()
    }

    /// A copy with margin rows and columns removed
    pub fn without_margins(&self) -> Self {
        let rows = interior_positions(&self.row_labels);
        let cols = interior_positions(&self.col_labels);
        self.select(&rows, &cols)
    }

    /// A copy with fresh margins: a "Total" column of row sums and a
    /// "Total" row of column sums. Existing margins are replaced.
    pub fn with_margins(&self) -> Self {
        let interior = self.without_margins();
        let (n_rows, n_cols) = interior.shape();
        let row_sums = interior.row_sums();
        let col_sums = interior.col_sums();

        let mut cells = Vec::with_capacity((n_rows + 1) * (n_cols + 1));
        for (i, &row_sum) in row_sums.iter().enumerate() {
            cells.extend_from_slice(interior.row(i));
            cells.push(row_sum);
        }
        cells.extend_from_slice(&col_sums);
        cells.push(col_sums.iter().fold(T::zero(), |acc, &v| acc + v));

        let mut row_labels = interior.row_labels;
        row_labels.push(TOTAL_LABEL.to_string());
        let mut col_labels = interior.col_labels;
        col_labels.push(TOTAL_LABEL.to_string());

        Self {
            row_name: interior.row_name,
            col_name: interior.col_name,
            row_labels,
            col_labels,
            cells,
        }
    }

    /// Keep only the requested labels that exist, in the requested order.
    ///
    /// `None` (or an empty list) keeps that axis unchanged; absent labels are
    /// ignored.
    pub fn filter<S: AsRef<str>>(
        &self,
        row_categories: Option<&[S]>,
        col_categories: Option<&[S]>,
    ) -> Self {
        let rows = positions(&self.row_labels, row_categories);
        let cols = positions(&self.col_labels, col_categories);
        self.select(&rows, &cols)
    }

    /// Apply `f` to every cell
    pub fn map<U, F>(&self, f: F) -> CrossTable<U>
    where
        F: Fn(T) -> U,
    {
        CrossTable {
            row_name: self.row_name.clone(),
            col_name: self.col_name.clone(),
            row_labels: self.row_labels.clone(),
            col_labels: self.col_labels.clone(),
            cells: self.cells.iter().map(|&v| f(v)).collect(),
        }
    }

    fn select(&self, rows: &[usize], cols: &[usize]) -> Self {
        let cells = rows
            .iter()
            .flat_map(|&i| cols.iter().map(move |&j| self.get(i, j)))
            .collect();
        Self {
            row_name: self.row_name.clone(),
            col_name: self.col_name.clone(),
            row_labels: rows.iter().map(|&i| self.row_labels[i].clone()).collect(),
            col_labels: cols.iter().map(|&j| self.col_labels[j].clone()).collect(),
            cells,
        }
    }
}

impl<T: Copy + Zero + AsPrimitive<f64>> CrossTable<T> {
    /// Convert to percentages.
    ///
    /// Denominators are always interior sums, so margins never count
    /// twice. If this table has margins, the result carries margins too:
    /// each margin cell is divided by the same denominator as its row
    /// ([`Normalize::Index`]), its column ([`Normalize::Columns`]) or the
    /// grand total ([`Normalize::All`]). Zero denominators yield 0.
    pub fn normalize(&self, normalize: Normalize) -> CrossTable<f64> {
        let interior = self.without_margins();
        let base = if self.has_margins() {
            interior.with_margins()
        } else {
            interior
        };

        let row_sums: Vec<f64> = base.row_sums().into_iter().map(|v| v.as_()).collect();
        let col_sums: Vec<f64> = base.col_sums().into_iter().map(|v| v.as_()).collect();
        let grand_total: f64 = base.interior_total().as_();

        let n_cols = base.n_cols();
        let cells = base
            .cells
            .iter()
            .enumerate()
            .map(|(k, &v)| {
                let denominator = match normalize {
                    Normalize::Index => row_sums[k / n_cols],
                    Normalize::Columns => col_sums[k % n_cols],
                    Normalize::All => grand_total,
                };
                percent(v.as_(), denominator)
            })
            .collect();

        CrossTable {
            row_name: base.row_name,
            col_name: base.col_name,
            row_labels: base.row_labels,
            col_labels: base.col_labels,
            cells,
        }
    }

    /// Interior cells as a percentage of their row sum, rounded to one
    /// decimal place
    pub fn row_percentages(&self) -> CrossTable<f64> {
        self.without_margins()
            .normalize(Normalize::Index)
            .map(round1)
    }

    /// Interior cells as a percentage of their column sum, rounded to one
    /// decimal place
    pub fn column_percentages(&self) -> CrossTable<f64> {
        self.without_margins()
            .normalize(Normalize::Columns)
            .map(round1)
    }
}

impl<T: Copy + Zero + fmt::Display> fmt::Display for CrossTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \\ {}", self.row_name, self.col_name)?;
        for col in &self.col_labels {
            write!(f, "\t{col}")?;
        }
        for (i, row) in self.row_labels.iter().enumerate() {
            write!(f, "\n{row}")?;
            for value in self.row(i) {
                write!(f, "\t{value}")?;
            }
        }
        Ok(())
    }
}

fn interior_positions(labels: &[String]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.as_str() != TOTAL_LABEL)
        .map(|(i, _)| i)
        .collect()
}

fn positions<S: AsRef<str>>(labels: &[String], wanted: Option<&[S]>) -> Vec<usize> {
    match wanted {
        Some(wanted) if !wanted.is_empty() => wanted
            .iter()
            .filter_map(|w| labels.iter().position(|l| l == w.as_ref()))
            .collect(),
        _ => (0..labels.len()).collect(),
    }
}

fn percent(value: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        value / denominator * 100.0
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> CountTable {
        // rows: male, female; columns: yes, no
        CrossTable::from_cells(
            "gender",
            "answer",
            labels(&["male", "female"]),
            labels(&["yes", "no"]),
            vec![3, 1, 2, 4],
        )
        .unwrap()
    }

    #[test]
    fn test_cell_lookup() {
        let table = sample();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.cell("female", "no"), Some(4));
        assert_eq!(table.cell("other", "no"), None);
        assert_eq!(table.interior_total(), 10);
    }

    #[test]
    fn test_bad_cell_count_rejected() {
        let result = CountTable::from_cells("a", "b", labels(&["x"]), labels(&["y", "z"]), vec![1]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_with_margins() {
        let table = sample().with_margins();
        assert_eq!(table.shape(), (3, 3));
        assert_eq!(table.cell("male", TOTAL_LABEL), Some(4));
        assert_eq!(table.cell(TOTAL_LABEL, "yes"), Some(5));
        assert_eq!(table.cell(TOTAL_LABEL, TOTAL_LABEL), Some(10));
        assert!(table.has_margins());

        // margins are not counted twice
        assert_eq!(table.interior_total(), 10);
        assert_eq!(table.with_margins(), table);
        assert_eq!(table.without_margins(), sample());
    }

    #[test]
    fn test_normalize_index() {
        let pct = sample().normalize(Normalize::Index);
        assert_relative_eq!(pct.cell("male", "yes").unwrap(), 75.0);
        assert_relative_eq!(pct.cell("female", "no").unwrap(), 200.0 / 3.0);
    }

    #[test]
    fn test_normalize_columns_and_all() {
        let pct = sample().normalize(Normalize::Columns);
        assert_relative_eq!(pct.cell("male", "yes").unwrap(), 60.0);
        assert_relative_eq!(pct.cell("female", "no").unwrap(), 80.0);

        let pct = sample().normalize(Normalize::All);
        assert_relative_eq!(pct.cell("female", "no").unwrap(), 40.0);
    }

    #[test]
    fn test_normalize_with_margins_uses_interior_denominators() {
        let pct = sample().with_margins().normalize(Normalize::Index);
        assert_relative_eq!(pct.cell("male", "yes").unwrap(), 75.0);
        assert_relative_eq!(pct.cell("male", TOTAL_LABEL).unwrap(), 100.0);
        assert_relative_eq!(pct.cell(TOTAL_LABEL, "yes").unwrap(), 50.0);
        assert_relative_eq!(pct.cell(TOTAL_LABEL, TOTAL_LABEL).unwrap(), 100.0);
    }

    #[test]
    fn test_percentages_strip_margins_and_round() {
        let table = sample().with_margins();

        let rows = table.row_percentages();
        assert!(!rows.has_margins());
        assert_eq!(rows.cell("female", "yes"), Some(33.3));
        assert_eq!(rows.cell("female", "no"), Some(66.7));

        let cols = table.column_percentages();
        assert_eq!(cols.cell("male", "no"), Some(20.0));
    }

    #[test]
    fn test_zero_row_is_zero_percent() {
        let table = CountTable::from_cells(
            "a",
            "b",
            labels(&["x", "y"]),
            labels(&["p", "q"]),
            vec![0, 0, 1, 1],
        )
        .unwrap();
        let rows = table.row_percentages();
        assert_eq!(rows.row(0), &[0.0, 0.0]);
        assert_eq!(rows.row(1), &[50.0, 50.0]);
    }

    #[test]
    fn test_filter_ignores_absent_labels() {
        let table = sample();
        let filtered = table.filter(Some(&["female", "nobody"][..]), None);
        assert_eq!(filtered.row_labels(), ["female"]);
        assert_eq!(filtered.col_labels(), ["yes", "no"]);
        assert_eq!(filtered.row(0), &[2, 4]);

        let filtered = table.filter(None, Some(&["no"][..]));
        assert_eq!(filtered.shape(), (2, 1));
        assert_eq!(filtered.cell("male", "no"), Some(1));
    }

    #[test]
    fn test_iter_row_major() {
        let table = sample();
        let cells: Vec<_> = table.iter().collect();
        assert_eq!(cells[0], ("male", "yes", 3));
        assert_eq!(cells[1], ("male", "no", 1));
        assert_eq!(cells[3], ("female", "no", 4));
    }
}
