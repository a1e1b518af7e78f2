//! Sigclust Exposure Solvers
//!
//! Implementations of the `ExposureSolver` trait from `sigclust-domain`.
//! Signature fitting itself (NMF/NNLS) is not done here; the pipeline treats
//! decomposition as an injected capability.
//!
//! # Solvers
//!
//! - `MockSolver`: deterministic per-sample exposures for testing
//! - `PrecomputedSolver`: looks exposures up in a precomputed samples × signatures table
//!
//! # Examples
//!
//! ```
//! use sigclust_domain::traits::ExposureSolver;
//! use sigclust_domain::{CountMatrix, MutationType, SignatureSet};
//! use sigclust_solver::MockSolver;
//!
//! let mut solver = MockSolver::new(vec![0.0, 0.0]);
//! solver.add_exposures("S1", vec![3.0, 1.0]);
//!
//! let mut counts = CountMatrix::new(vec!["C>A".to_string()]);
//! counts.push_row("S1", vec![Some(4.0)]).unwrap();
//! let signatures = SignatureSet::new(MutationType::Sbs, ["SBS1", "SBS5"]).unwrap();
//!
//! let exposures = solver.exposures(&counts, &signatures).unwrap();
//! assert_eq!(exposures.vectors(), vec![vec![3.0, 1.0]]);
//! ```

#![warn(missing_docs)]

mod mock;
mod precomputed;

use thiserror::Error;

pub use mock::MockSolver;
pub use precomputed::PrecomputedSolver;

/// Errors that can occur during exposure decomposition
#[derive(Error, Debug)]
pub enum SolverError {
    /// A sample has no exposures available
    #[error("No exposures for sample '{0}'")]
    UnknownSample(String),

    /// A requested signature is not available
    #[error("Unknown signature '{0}'")]
    UnknownSignature(String),

    /// Counts could not be decomposed
    #[error("Decomposition failed: {0}")]
    Decomposition(String),

    /// Exposure table could not be loaded
    #[error("Failed to load exposures: {0}")]
    Load(#[from] sigclust_store::StoreError),

    /// Produced exposures failed domain validation
    #[error("Invalid exposures: {0}")]
    InvalidExposures(#[from] sigclust_domain::DomainError),
}
