//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Data directory error
    #[error("Data error: {0}")]
    Store(#[from] sigclust_store::StoreError),

    /// Exposure table error
    #[error("Exposure error: {0}")]
    Solver(#[from] sigclust_solver::SolverError),

    /// Clustering error
    #[error("{0}")]
    Engine(#[from] sigclust_engine::EngineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
