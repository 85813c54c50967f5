//! Error types for rule parsing and grid access

use thiserror::Error;

/// A rule string that does not follow the `B<digits>/S<digits>[/A<number>]` grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("malformed rule '{rule}': {reason}")]
    Malformed { rule: String, reason: String },
}

impl RuleError {
    pub(crate) fn malformed(rule: &str, reason: impl Into<String>) -> Self {
        RuleError::Malformed {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by grid construction and cell access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinates ({row}, {col}) out of bounds for {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    #[error("grid cannot be empty")]
    Empty,

    #[error("{width}x{height} grid cannot hold {actual} cells")]
    CellCountMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        actual: usize,
        expected: usize,
    },
}
