//! Polars integration for survey analysis
//!
//! This crate is the tabular data provider of the survey-analysis workspace:
//! it reads survey CSV files with Polars and converts DataFrames into
//! [`survey_core::Dataset`]s through the [`SurveyFrameExt`] extension trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use survey_polars::SurveyFrameExt;
//!
//! let df = df![
//!     "Q1. Gender" => ["m", "f", "f"],
//!     "Q2. Score" => [4i64, 5, 3],
//! ]?;
//!
//! let data = df.to_dataset()?;
//! assert!(data.require("Q2. Score")?.is_numeric());
//! ```

mod error;
mod loader;
mod traits;


pub use error::{Error, Result};
pub use loader::{
    load_and_prepare, load_and_prepare_with, load_raw_data, prepare, prepare_with, read_csv,
    PreparedData,
};
pub use traits::SurveyFrameExt;
