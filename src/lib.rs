//! Survey questionnaire analysis
//!
//! This crate re-exports the survey-analysis workspace:
//!
//! - [`survey_core`]: datasets, project configuration, cleaning and audits
//! - [`survey_effect`]: effect sizes and their interpretation bands
//! - [`survey_crosstab`]: cross-tabulation, tiers, summaries and CSV export
//! - [`survey_hypothesis`]: chi-square, t-test, ANOVA, correlation,
//!   multiple comparison correction and descriptive statistics
//! - `survey_polars` (feature `polars`): CSV loading through Polars
//!
//! # Example
//!
//! ```rust
//! use survey_analysis::prelude::*;
//!
//! let config = ProjectConfig::new("data/survey.csv", "output")
//!     .with_question("gender", "Q1. Gender")
//!     .with_question("answer", "Q2. Answer");
//!
//! let data = Dataset::builder()
//!     .text("Q1. Gender", ["m", "f", "m", "f", "m", "f"])
//!     .text("Q2. Answer", ["yes", "no", "yes", "no", "yes", "yes"])
//!     .build()
//!     .unwrap();
//!
//! let table = build_crosstab(&data, "gender", "answer", Some(&config), true).unwrap();
//! assert_eq!(table.cell("Total", "Total"), Some(6));
//!
//! let result = chi_square_test(&data, "gender", "answer", Some(&config)).unwrap();
//! assert!(result.yates_correction);
//! ```

pub use survey_core;
pub use survey_crosstab;
pub use survey_effect;
pub use survey_hypothesis;

#[cfg(feature = "polars")]
pub use survey_polars;

/// Commonly used types and functions
pub mod prelude {
    pub use survey_core::{
        apply_category_orders, handle_missing_values, DataQualityWarning, Dataset,
        MissingStrategy, ProjectConfig, SurveyConfig,
    };
    pub use survey_crosstab::{
        build_crosstab, build_multiselect_crosstab, build_normalized_crosstab, export_csv,
        run_tiered_crosstabs, summarize_crosstab, CountTable, Normalize,
    };
    pub use survey_effect::{EffectSize, EffectSizeInterpretation, EffectSizeType};
    pub use survey_hypothesis::{
        all_frequencies, analyze_missing_values, anova_test, apply_fdr_correction,
        chi_square_test, correlation_test, frequency_distribution, run_tier_chi_square,
        summary_statistics, t_test_independent, CorrectionMethod, CorrelationMethod,
        HypothesisTest,
    };

    #[cfg(feature = "polars")]
    pub use survey_polars::{load_and_prepare, SurveyFrameExt};
}
