//! Error types for survey-polars

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Survey error: {0}")]
    Survey(#[from] survey_core::Error),

    #[error("Data file not found: {}", .0.display())]
    DataFileNotFound(PathBuf),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),
}

pub type Result<T> = std::result::Result<T, Error>;
