//! Headline figures of a contingency table

use crate::table::CountTable;
use serde::Serialize;

/// The highest-count interior cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxCell {
    pub row: String,
    pub col: String,
    pub count: u64,
    /// Share of the table total, 0 when the table is empty
    pub percentage: f64,
}

/// Shape, total and most frequent cell of a crosstab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrosstabSummary {
    pub row_var: String,
    pub col_var: String,
    pub n_rows: usize,
    pub n_cols: usize,
    pub total_n: u64,
    /// `None` for a table without cells
    pub max_cell: Option<MaxCell>,
}

/// Summarize a crosstab with its margins stripped.
///
/// Ties for the largest cell go to the first one in row-major order.
pub fn summarize_crosstab(table: &CountTable, row_var: &str, col_var: &str) -> CrosstabSummary {
    let interior = table.without_margins();
    let total_n = interior.interior_total();

    let mut best: Option<(&str, &str, u64)> = None;
    for (row, col, count) in interior.iter() {
        if best.map_or(true, |(_, _, max)| count > max) {
            best = Some((row, col, count));
        }
    }

    let max_cell = best.map(|(row, col, count)| MaxCell {
        row: row.to_string(),
        col: col.to_string(),
        count,
        percentage: if total_n > 0 {
            count as f64 / total_n as f64 * 100.0
        } else {
            0.0
        },
    });

    CrosstabSummary {
        row_var: row_var.to_string(),
        col_var: col_var.to_string(),
        n_rows: interior.n_rows(),
        n_cols: interior.n_cols(),
        total_n,
        max_cell,
    }
}
