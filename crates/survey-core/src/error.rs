//! Error types for survey analysis
//!
//! Provides a unified error type for all survey-analysis crates.

use thiserror::Error;

/// Core error type for survey analysis operations
#[derive(Error, Debug)]
pub enum Error {
    /// A referenced variable does not resolve to a column of the dataset
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// Minimum sample or category requirements of an operation are not met
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Unsupported method or strategy name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A numeric operation was requested on a column whose values are not numbers
    #[error("Column '{column}' is not numeric")]
    NonNumeric { column: String },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a missing column
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Create an error for an unmet sample-size requirement
    pub fn insufficient(required: usize, actual: usize, what: &str) -> Self {
        Self::InsufficientData(format!(
            "{what}: expected at least {required}, got {actual}"
        ))
    }

    /// Create an error for an unsupported method name
    pub fn unknown_method(kind: &str, name: &str, allowed: &[&str]) -> Self {
        Self::InvalidArgument(format!(
            "unsupported {kind} '{name}' (expected one of: {})",
            allowed.join(", ")
        ))
    }

    /// Create an error for columns of differing lengths
    pub fn length_mismatch(column: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidInput(format!(
            "column '{column}' has {actual} rows, expected {expected}"
        ))
    }

    /// Whether this error belongs to the per-item taxonomy that batch
    /// operations record and skip.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ColumnNotFound { .. }
                | Self::InsufficientData(_)
                | Self::InvalidArgument(_)
                | Self::NonNumeric { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::column_not_found("Q1. Age");
        assert_eq!(err.to_string(), "Column not found: Q1. Age");

        let err = Error::InsufficientData("need two groups".to_string());
        assert_eq!(err.to_string(), "Insufficient data: need two groups");

        let err = Error::InvalidArgument("bad method".to_string());
        assert_eq!(err.to_string(), "Invalid argument: bad method");

        let err = Error::NonNumeric {
            column: "comment".to_string(),
        };
        assert_eq!(err.to_string(), "Column 'comment' is not numeric");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::insufficient(2, 1, "group 'a'");
        assert_eq!(
            err.to_string(),
            "Insufficient data: group 'a': expected at least 2, got 1"
        );

        let err = Error::unknown_method("correlation method", "foo", &["spearman", "pearson"]);
        assert!(err.to_string().contains("'foo'"));
        assert!(err.to_string().contains("spearman, pearson"));

        let err = Error::length_mismatch("age", 3, 2);
        assert_eq!(
            err.to_string(),
            "Invalid input: column 'age' has 2 rows, expected 3"
        );
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::column_not_found("x").is_recoverable());
        assert!(Error::InsufficientData(String::new()).is_recoverable());
        assert!(!Error::InvalidInput(String::new()).is_recoverable());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("file not found"));
    }
}
