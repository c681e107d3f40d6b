//! Non-fatal data-quality signals

use serde::Serialize;
use std::fmt;

/// A detected condition that does not block computation but should be
/// surfaced to whoever reads the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// Values found in a column that are not part of its declared category order
    ValuesNotInOrder { column: String, values: Vec<String> },
    /// A column the configuration expects is absent from the dataset
    MissingColumn {
        question_id: Option<String>,
        column: String,
    },
    /// One item of a batch failed and was skipped
    PairFailed { key: String, reason: String },
    /// A derived column could not be computed and was left out
    DerivationFailed { column: String, reason: String },
}

impl DataQualityWarning {
    /// Log the warning through `tracing` and hand it back, so detection
    /// sites can write `warnings.push(w.emit())`.
    pub fn emit(self) -> Self {
        tracing::warn!("{self}");
        self
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValuesNotInOrder { column, values } => write!(
                f,
                "'{column}' has values not in order definition: {}",
                values.join(", ")
            ),
            Self::MissingColumn {
                question_id: Some(id),
                column,
            } => write!(f, "column '{column}' (question '{id}') not found"),
            Self::MissingColumn {
                question_id: None,
                column,
            } => write!(f, "column '{column}' not found"),
            Self::PairFailed { key, reason } => write!(f, "{key} skipped: {reason}"),
            Self::DerivationFailed { column, reason } => {
                write!(f, "derived column '{column}' not added: {reason}")
            }
        }
    }
}
