//! Core types for survey questionnaire analysis
//!
//! This crate provides the pieces every other survey-analysis crate builds on:
//!
//! - [`Dataset`]: a read-only, column-oriented table of respondent answers
//!   with text, numeric and ordered-categorical columns
//! - [`SurveyConfig`]: the per-project configuration provider (question
//!   mapping, category orders, significance level, cross-tabulation tiers)
//! - [`Error`] and [`DataQualityWarning`]: the failure taxonomy shared by the
//!   engines
//! - cleaning steps ([`apply_category_orders`], [`handle_missing_values`])
//!   and data audit checks ([`audit`])
//! - [`DerivedColumns`]: project-specific columns computed after cleaning
//! - [`parsers`]: numbers out of free-text answers (yen amounts, ranges)
//!
//! # Example
//!
//! ```rust
//! use survey_core::{Dataset, ProjectConfig, SurveyConfig};
//!
//! let config = ProjectConfig::new("data/survey.csv", "output")
//!     .with_question("age", "Q1. Age");
//!
//! let data = Dataset::builder()
//!     .text("Q1. Age", ["20s", "30s", "20s"])
//!     .numeric("score", [4.0, 3.0, 5.0])
//!     .build()
//!     .unwrap();
//!
//! let column = data.require(config.column_name("age")).unwrap();
//! assert_eq!(column.levels(), vec!["20s", "30s"]);
//! ```

pub mod audit;
pub mod config;
pub mod dataset;
pub mod error;
pub mod parsers;
pub mod prepare;
pub mod warning;

pub use config::{
    resolve, CategoryOrders, ProjectConfig, QuestionMap, SurveyConfig, TierMap, DEFAULT_ALPHA,
};
pub use dataset::{format_number, Column, ColumnData, Dataset, DatasetBuilder};
pub use error::{Error, Result};
pub use prepare::{
    add_derived_columns, apply_category_orders, handle_missing_values, numeric_scores,
    split_multiselect_cell, Derivation, DerivedColumns, MissingStrategy,
    DEFAULT_MULTISELECT_DELIMITER,
};
pub use warning::DataQualityWarning;
