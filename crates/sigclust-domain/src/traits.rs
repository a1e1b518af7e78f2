//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the clustering pipeline and
//! the infrastructure that feeds it. Implementations live in other crates.

use crate::{CountMatrix, ExposureMatrix, MutationType, ProjectId, ProjectSummary, SignatureSet};

/// Read-only source of per-project mutation counts
///
/// Implemented by the storage layer (sigclust-store). Implementations must
/// tolerate concurrent readers.
pub trait CountSource {
    /// Error type for source operations
    type Error;

    /// Fetch the count table of one project
    ///
    /// Returns `Ok(None)` when the project has no counts for `mutation_type`.
    fn counts(
        &self,
        project: &ProjectId,
        mutation_type: MutationType,
    ) -> Result<Option<CountMatrix>, Self::Error>;

    /// List every project the source knows about
    fn projects(&self) -> Result<Vec<ProjectSummary>, Self::Error>;
}

/// Signature exposure decomposition
///
/// Implemented by the solver layer (sigclust-solver). Given complete counts,
/// returns a non-negative exposure table with the same row keys in the same
/// order and one column per requested signature, in requested order.
pub trait ExposureSolver {
    /// Error type for decomposition failures
    type Error;

    /// Decompose `counts` over `signatures`
    fn exposures(
        &self,
        counts: &CountMatrix,
        signatures: &SignatureSet,
    ) -> Result<ExposureMatrix, Self::Error>;
}
