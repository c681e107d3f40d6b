//! Hypothesis testing and descriptive statistics for survey data
//!
//! Every test resolves its variables through an optional [`SurveyConfig`],
//! fails fast with [`survey_core::Error`] on a missing column or an
//! undersized sample, and returns an immutable, serializable result that
//! implements [`HypothesisTest`].
//!
//! # Tests
//!
//! - [`chi_square_test`]: independence of two categorical variables, with
//!   Cramér's V
//! - [`t_test_independent`]: difference of means between two groups, with
//!   Cohen's d
//! - [`anova_test`]: one-way analysis of variance, with eta-squared
//! - [`correlation_test`]: Spearman, Pearson or Kendall correlation
//!
//! # Batches
//!
//! [`run_tiered_chi_square`] runs a list of pairs, keeping each failure as
//! an item instead of aborting, and optionally applies
//! [`apply_fdr_correction`] over the successful tests.
//!
//! # Example
//!
//! ```rust
//! use survey_core::Dataset;
//! use survey_hypothesis::{correlation_test, CorrelationMethod, HypothesisTest};
//!
//! let data = Dataset::builder()
//!     .numeric("x", [1.0, 2.0, 3.0, 4.0, 5.0])
//!     .numeric("y", [5.0, 4.0, 3.0, 2.0, 1.0])
//!     .build()
//!     .unwrap();
//!
//! let result = correlation_test(&data, "x", "y", CorrelationMethod::Spearman, None).unwrap();
//! assert_eq!(result.correlation, -1.0);
//! assert!(result.is_significant(0.05));
//! ```
//!
//! [`SurveyConfig`]: survey_core::SurveyConfig

mod anova;
mod batch;
mod chi_square;
mod correction;
mod correlation;
mod descriptive;
pub mod distribution;
mod t_test;
mod types;

pub use anova::{anova_test, AnovaResult};
pub use batch::{
    batch_warnings, run_tier_chi_square, run_tiered_chi_square, ChiSquareBatchItem, Correction,
};
pub use chi_square::{chi_square_from_table, chi_square_test, ChiSquareResult};
pub use correction::{apply_fdr_correction, CorrectionMethod, CorrectionResult};
pub use correlation::{
    average_ranks, correlation_test, pearson, CorrelationMethod, CorrelationResult,
};
pub use descriptive::{
    all_frequencies, analyze_missing_values, frequency_distribution, numeric_summary,
    quantile_sorted, summary_statistics, AllFrequencies, CategoricalSummary, FrequencyEntry,
    FrequencyTable, MissingSummary, NumericSummary, SummaryStatistics,
};
pub use t_test::{t_test_independent, t_test_independent_with, TTestResult, VarianceAssumption};
pub use types::{significance_marker, HypothesisTest, TestKind};
