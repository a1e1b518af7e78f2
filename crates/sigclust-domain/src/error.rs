//! Validation errors for domain values

use thiserror::Error;

/// Errors raised when constructing or combining domain values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Signature set is empty, has blank names, or repeats a name
    #[error("Invalid signature set: {0}")]
    InvalidSignatureSet(String),

    /// Unknown mutation type tag
    #[error("Invalid mutation type: {0}")]
    InvalidMutationType(String),

    /// A row does not have one value per column
    #[error("Row for sample '{sample}' has {found} values, expected {expected}")]
    RowLength {
        /// Sample the row belongs to
        sample: String,
        /// Number of columns in the matrix
        expected: usize,
        /// Number of values supplied
        found: usize,
    },

    /// Exposure values must be finite and non-negative
    #[error("Invalid exposure for sample '{sample}' in column '{column}': {value}")]
    InvalidExposure {
        /// Sample the value belongs to
        sample: String,
        /// Signature column
        column: String,
        /// Offending value
        value: f64,
    },

    /// Two matrices with different column sets cannot be concatenated
    #[error("Column mismatch: expected [{expected}], found [{found}]")]
    ColumnMismatch {
        /// Columns of the receiving matrix
        expected: String,
        /// Columns of the appended matrix
        found: String,
    },
}
