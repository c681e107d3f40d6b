//! Cross-tabulation of categorical survey answers
//!
//! This crate turns pairs of dataset columns into contingency tables:
//!
//! - [`build_crosstab`] counts co-occurrences, optionally with a "Total"
//!   margin row and column
//! - [`CrossTable::normalize`] rescales to percentages by row, column or
//!   grand total, always on margin-free denominators
//! - [`build_multiselect_crosstab`] expands multiple-selection answers into
//!   one observation per choice
//! - [`run_tiered_crosstabs`] builds every pair of a configured tier,
//!   recording failing pairs as warnings
//!
//! # Example
//!
//! ```rust
//! use survey_core::Dataset;
//! use survey_crosstab::{build_crosstab, summarize_crosstab, TOTAL_LABEL};
//!
//! let data = Dataset::builder()
//!     .text("gender", ["m", "f", "f", "m", "f"])
//!     .text("answer", ["yes", "no", "yes", "yes", "no"])
//!     .build()
//!     .unwrap();
//!
//! let table = build_crosstab(&data, "gender", "answer", None, true).unwrap();
//! assert_eq!(table.cell(TOTAL_LABEL, TOTAL_LABEL), Some(5));
//!
//! let summary = summarize_crosstab(&table, "gender", "answer");
//! assert_eq!(summary.total_n, 5);
//! ```

mod builder;
mod export;
mod summary;
mod table;
mod tiers;

pub use builder::{build_crosstab, build_multiselect_crosstab, build_normalized_crosstab};
pub use export::{export_csv, write_csv};
pub use summary::{summarize_crosstab, CrosstabSummary, MaxCell};
pub use table::{CountTable, CrossTable, Normalize, PercentTable, TOTAL_LABEL};
pub use tiers::{pair_key, run_tiered_crosstabs, TierCrosstabs};
