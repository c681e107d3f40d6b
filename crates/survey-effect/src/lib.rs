//! Effect size measurement for survey analysis
//!
//! Effect sizes quantify how strong an association or group difference is,
//! independently of sample size. This crate provides the measures reported
//! by the survey hypothesis tests and their interpretation bands.
//!
//! # Supported Effect Sizes
//!
//! - **Cramér's V**: association strength of a contingency table
//! - **Cohen's d**: standardized mean difference using the pooled standard
//!   deviation
//! - **Eta-squared (η²)**: proportion of variance explained by groups
//! - **Correlation coefficients**: banded only; computed by the tests
//!
//! Interpretation bands are display aids. They never alter the computed
//! magnitude.
//!
//! # Examples
//!
//! ```rust
//! use survey_effect::{interpret_cramers_v, CohenD, TwoGroupEffectSize};
//!
//! let group1 = vec![5.0, 5.0, 4.0, 5.0];
//! let group2 = vec![1.0, 2.0, 2.0, 3.0];
//!
//! let effect = CohenD::new().compute(&group1, &group2).unwrap();
//! assert_eq!(effect.label(), "large");
//! assert_eq!(interpret_cramers_v(0.35), "moderate");
//! ```

mod cohen_d;
mod cramers_v;
mod traits;
mod types;
mod variance_explained;

pub use cohen_d::{pooled_std, CohenD};
pub use cramers_v::{cramers_v, CramersV};
pub use traits::{EffectSizeEstimator, MultiGroupEffectSize, TwoGroupEffectSize};
pub use types::{
    interpret, interpret_cohens_d, interpret_correlation, interpret_cramers_v,
    interpret_eta_squared, EffectSize, EffectSizeInterpretation, EffectSizeType,
};
pub use variance_explained::{EtaSquared, SumsOfSquares};
