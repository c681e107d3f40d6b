//! Building contingency tables from dataset columns

use crate::table::{CountTable, CrossTable, Normalize, PercentTable};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use survey_core::{
    resolve, split_multiselect_cell, Column, Dataset, Error, Result, SurveyConfig,
};
use tracing::debug;

/// Count co-occurrences of two categorical variables.
///
/// Both variables are resolved through `config` when given. Rows missing
/// either value are left out. Labels follow the canonical level order of
/// each column. With `margins`, a "Total" row and column are appended.
///
/// # Errors
///
/// [`survey_core::Error::ColumnNotFound`] when either column is absent. This
/// is checked before anything is counted.
pub fn build_crosstab(
    data: &Dataset,
    row_var: &str,
    col_var: &str,
    config: Option<&dyn SurveyConfig>,
    margins: bool,
) -> Result<CountTable> {
    let row_column = data.require(resolve(config, row_var))?;
    let col_column = data.require(resolve(config, col_var))?;

    let table = count_pairs(row_column, col_column)?;
    debug!(
        row = row_column.name(),
        col = col_column.name(),
        shape = ?table.shape(),
        "built crosstab"
    );

    Ok(if margins { table.with_margins() } else { table })
}

/// Build a crosstab and convert it to percentages on a 0-100 scale
pub fn build_normalized_crosstab(
    data: &Dataset,
    row_var: &str,
    col_var: &str,
    config: Option<&dyn SurveyConfig>,
    normalize: Normalize,
    margins: bool,
) -> Result<PercentTable> {
    Ok(build_crosstab(data, row_var, col_var, config, margins)?.normalize(normalize))
}

/// Crosstab of a single-choice row variable against a multiple-selection
/// column variable.
///
/// Every column cell is split on `delimiter` into trimmed choices and each
/// choice counts once for the respondent's row category. Rows whose column
/// value is missing or not text are dropped before splitting, as are rows
/// with a missing row value. Choices become columns in lexicographic order.
/// When nothing remains the result is an empty table, not an error.
pub fn build_multiselect_crosstab(
    data: &Dataset,
    row_var: &str,
    col_var: &str,
    config: Option<&dyn SurveyConfig>,
    delimiter: &str,
) -> Result<CountTable> {
    let row_column = data.require(resolve(config, row_var))?;
    let col_column = data.require(resolve(config, col_var))?;

    let mut observations: Vec<(usize, String)> = Vec::new();
    for row in 0..data.n_rows() {
        if row_column.is_missing(row) {
            continue;
        }
        let Some(cell) = col_column.text_value(row) else {
            continue;
        };
        for choice in split_multiselect_cell(Some(cell), delimiter) {
            observations.push((row, choice));
        }
    }

    if observations.is_empty() {
        debug!(
            row = row_column.name(),
            col = col_column.name(),
            "no multiselect observations"
        );
        return Ok(CrossTable::empty(row_column.name(), col_column.name()));
    }

    let mut rows: Vec<usize> = observations.iter().map(|(row, _)| *row).collect();
    rows.dedup();
    let row_labels = row_column.take(&rows).levels();
    let row_index = index_of(&row_labels);

    let col_labels: Vec<String> = observations
        .iter()
        .map(|(_, choice)| choice.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let col_index = index_of(&col_labels);

    let mut cells = vec![0u64; row_labels.len() * col_labels.len()];
    for (row, choice) in &observations {
        if let Some(label) = row_column.label(*row) {
            let i = position(&row_index, &label, row_column)?;
            let j = position(&col_index, choice, col_column)?;
            cells[i * col_labels.len() + j] += 1;
        }
    }

    CrossTable::from_cells(
        row_column.name(),
        col_column.name(),
        row_labels,
        col_labels,
        cells,
    )
}

/// Count the rows where both columns have a value
fn count_pairs(row_column: &Column, col_column: &Column) -> Result<CountTable> {
    let rows: Vec<usize> = (0..row_column.len())
        .filter(|&r| !row_column.is_missing(r) && !col_column.is_missing(r))
        .collect();

    let row_labels = row_column.take(&rows).levels();
    let col_labels = col_column.take(&rows).levels();
    let row_index = index_of(&row_labels);
    let col_index = index_of(&col_labels);

    let mut counts: BTreeMap<(usize, usize), u64> = BTreeMap::new();
    for &r in &rows {
        if let (Some(row_label), Some(col_label)) = (row_column.label(r), col_column.label(r)) {
            let key = (
                position(&row_index, &row_label, row_column)?,
                position(&col_index, &col_label, col_column)?,
            );
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let n_cols = col_labels.len();
    let mut cells = vec![0u64; row_labels.len() * n_cols];
    for ((i, j), count) in counts {
        cells[i * n_cols + j] = count;
    }

    CrossTable::from_cells(
        row_column.name(),
        col_column.name(),
        row_labels,
        col_labels,
        cells,
    )
}

/// Index of a cell label among the column's levels
fn position(index: &HashMap<&str, usize>, label: &str, column: &Column) -> Result<usize> {
    index.get(label).copied().ok_or_else(|| {
        Error::InvalidInput(format!(
            "label {label:?} of column '{}' is not among its levels",
            column.name()
        ))
    })
}

fn index_of(labels: &[String]) -> HashMap<&str, usize> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TOTAL_LABEL;
    use survey_core::{Error, ProjectConfig};

    fn sample() -> Dataset {
        Dataset::builder()
            .text_opt(
                "Q1. Gender",
                [Some("male"), Some("female"), Some("male"), None, Some("female")],
            )
            .text_opt(
                "Q2. Answer",
                [Some("yes"), Some("no"), Some("no"), Some("yes"), None],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_counts_skip_missing_pairs() {
        let table = build_crosstab(&sample(), "Q1. Gender", "Q2. Answer", None, false).unwrap();
        assert_eq!(table.row_labels(), ["female", "male"]);
        assert_eq!(table.col_labels(), ["no", "yes"]);
        assert_eq!(table.cell("male", "yes"), Some(1));
        assert_eq!(table.cell("female", "no"), Some(1));
        assert_eq!(table.interior_total(), 3);
    }

    #[test]
    fn test_resolves_through_config() {
        let config = ProjectConfig::new("d.csv", "out")
            .with_question("gender", "Q1. Gender")
            .with_question("answer", "Q2. Answer");
        let table = build_crosstab(&sample(), "gender", "answer", Some(&config), true).unwrap();
        assert_eq!(table.row_name(), "Q1. Gender");
        assert_eq!(table.cell(TOTAL_LABEL, TOTAL_LABEL), Some(3));
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let err = build_crosstab(&sample(), "Q1. Gender", "Q9", None, false).unwrap_err();
        match err {
            Error::ColumnNotFound { column } => assert_eq!(column, "Q9"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ordered_columns_keep_rank_order() {
        let order: Vec<String> = ["low", "mid", "high"].iter().map(|s| s.to_string()).collect();
        let (level, _) = Column::ordered(
            "level",
            [Some("high"), Some("low"), Some("mid"), Some("high")],
            &order,
        );
        let data = Dataset::builder()
            .column(level)
            .text("group", ["a", "b", "a", "b"])
            .build()
            .unwrap();

        let table = build_crosstab(&data, "level", "group", None, false).unwrap();
        assert_eq!(table.row_labels(), ["low", "mid", "high"]);
    }

    #[test]
    fn test_normalized_rows_sum_to_100() {
        let table = build_normalized_crosstab(
            &sample(),
            "Q1. Gender",
            "Q2. Answer",
            None,
            Normalize::Index,
            false,
        )
        .unwrap();
        for i in 0..table.n_rows() {
            let sum: f64 = table.row(i).iter().sum();
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_multiselect_counts_each_choice() {
        let data = Dataset::builder()
            .text("group", ["a", "b"])
            .text("hobby", ["A、B", "B、C"])
            .build()
            .unwrap();
        let table = build_multiselect_crosstab(&data, "group", "hobby", None, "、").unwrap();
        assert_eq!(table.col_labels(), ["A", "B", "C"]);
        let b_total: u64 = table.column(1).sum();
        assert_eq!(b_total, 2);
    }

    #[test]
    fn test_multiselect_drops_missing_and_blank_choices() {
        let data = Dataset::builder()
            .text_opt("group", [Some("a"), Some("a"), None, Some("b")])
            .text_opt("hobby", [Some(" x 、、 y "), None, Some("x"), Some("  ")])
            .build()
            .unwrap();
        let table = build_multiselect_crosstab(&data, "group", "hobby", None, "、").unwrap();
        assert_eq!(table.row_labels(), ["a"]);
        assert_eq!(table.col_labels(), ["x", "y"]);
        assert_eq!(table.row(0), &[1, 1]);
    }

    #[test]
    fn test_multiselect_non_text_column_is_empty() {
        let data = Dataset::builder()
            .text("group", ["a", "b"])
            .numeric("score", [1.0, 2.0])
            .build()
            .unwrap();
        let table = build_multiselect_crosstab(&data, "group", "score", None, "、").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.shape(), (0, 0));
    }
}
