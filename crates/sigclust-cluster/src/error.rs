//! Error types for clustering and labeling

use thiserror::Error;

/// Errors that can occur while building or labeling a merge tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Hierarchical clustering needs at least two observations
    #[error("Insufficient observations: {found} (need at least 2)")]
    InsufficientObservations {
        /// Number of observations supplied
        found: usize,
    },

    /// Observation vectors have no dimensions
    #[error("Observation vectors must have at least one dimension")]
    EmptyDimension,

    /// Observation vectors differ in length
    #[error("Observation {row} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        /// Offending row
        row: usize,
        /// Dimension of the first row
        expected: usize,
        /// Dimension of the offending row
        found: usize,
    },

    /// An input value is NaN or infinite
    #[error("Non-finite value at observation {row}, dimension {column}")]
    NonFinite {
        /// Offending row
        row: usize,
        /// Offending column
        column: usize,
    },

    /// A distance became non-finite during linkage
    #[error("Numerical failure: {0}")]
    Numerical(String),

    /// The label list does not match the number of leaves
    #[error("Expected {leaves} labels, got {labels}")]
    LabelCountMismatch {
        /// Labels supplied
        labels: usize,
        /// Leaves in the tree
        leaves: usize,
    },

    /// A node was missing or reached twice during traversal
    #[error("Malformed merge tree: {0}")]
    MalformedTree(String),

    /// Linkage was aborted through its cancel flag
    #[error("Clustering cancelled")]
    Cancelled,
}
