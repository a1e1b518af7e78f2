//! Error types for the clustering pipeline

use sigclust_cluster::ClusterError;
use sigclust_domain::DomainError;
use thiserror::Error;

/// Terminal errors of a clustering request
///
/// Per-project problems (missing counts, failed decomposition) are not
/// errors; they are recorded in the aggregation report and the request
/// continues without that project.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Request failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Fewer than two samples were left after aggregation
    #[error("Insufficient samples for clustering: {found} (need at least 2)")]
    InsufficientSamples {
        /// Number of aggregated samples
        found: usize,
    },

    /// Linkage or labeling failed
    #[error("Clustering failed: {0}")]
    Clustering(#[from] ClusterError),

    /// Domain validation failed
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Request exceeded its time budget
    #[error("Clustering timed out after {0}s")]
    Timeout(u64),

    /// Request was cancelled before completion
    #[error("Clustering cancelled")]
    Cancelled,

    /// Background task failed
    #[error("Worker error: {0}")]
    Worker(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
