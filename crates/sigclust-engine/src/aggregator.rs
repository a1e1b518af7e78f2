//! Exposure aggregation across projects
//!
//! For each requested project, in order: fetch counts, drop samples with
//! missing values, decompose into signature exposures, append. Projects
//! that cannot contribute are skipped and recorded in the report; they
//! never fail the request.

use sigclust_domain::{
    CountMatrix, CountSource, ExposureMatrix, ExposureSolver, ProjectId, SampleId,
};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use crate::{AggregationReport, ClusteringRequest, EngineError, SkipReason};

/// Pools per-project exposure tables into one
pub struct ExposureAggregator<'a, S, X> {
    source: &'a S,
    solver: &'a X,
}

impl<'a, S, X> ExposureAggregator<'a, S, X>
where
    S: CountSource,
    S::Error: Display,
    X: ExposureSolver,
    X::Error: Display,
{
    /// Create an aggregator over borrowed collaborators
    pub fn new(source: &'a S, solver: &'a X) -> Self {
        Self { source, solver }
    }

    /// Aggregate exposures for every project in the request
    ///
    /// Rows appear in project order, then in source row order within a
    /// project. Columns follow the request's signature order.
    pub fn aggregate(
        &self,
        request: &ClusteringRequest,
        cancel: &AtomicBool,
    ) -> Result<(ExposureMatrix, AggregationReport), EngineError> {
        let mut aggregate = ExposureMatrix::for_signatures(&request.signatures);
        let mut report = AggregationReport::default();

        for project in &request.projects {
            if cancel.load(Ordering::Relaxed) {
                return Err(EngineError::Cancelled);
            }

            match self.project_exposures(project, request)? {
                Ok((exposures, dropped)) => {
                    let rows = exposures.len();
                    aggregate.append(exposures)?;
                    debug!(project = %project, rows, dropped, "Project contributed");
                    report.contributed(project, rows, dropped);
                }
                Err(reason) => {
                    report.skipped(project, reason);
                }
            }
        }

        report.duplicate_samples = aggregate.duplicate_samples();

        info!(
            projects = request.projects.len(),
            contributing = report.contributing_projects(),
            rows = aggregate.len(),
            "Aggregation complete"
        );

        Ok((aggregate, report))
    }

    /// Exposures of one project, or the reason it was skipped
    ///
    /// The outer error is reserved for solver output that violates the
    /// solver contract (wrong rows or columns).
    fn project_exposures(
        &self,
        project: &ProjectId,
        request: &ClusteringRequest,
    ) -> Result<Result<(ExposureMatrix, usize), SkipReason>, EngineError> {
        let counts = match self.source.counts(project, request.mutation_type()) {
            Ok(Some(counts)) => counts,
            Ok(None) => {
                debug!(project = %project, "No count data, skipping");
                return Ok(Err(SkipReason::NoCountData));
            }
            Err(e) => {
                warn!(project = %project, error = %e, "Failed to read counts, skipping");
                return Ok(Err(SkipReason::SourceFailure(e.to_string())));
            }
        };

        let (complete, dropped) = counts.drop_incomplete();
        if complete.is_empty() {
            debug!(project = %project, dropped, "No complete samples, skipping");
            return Ok(Err(SkipReason::NoCompleteSamples { dropped }));
        }

        let exposures = match self.solver.exposures(&complete, &request.signatures) {
            Ok(exposures) => exposures,
            Err(e) => {
                warn!(project = %project, error = %e, "Decomposition failed, skipping");
                return Ok(Err(SkipReason::DecompositionFailure(e.to_string())));
            }
        };

        check_solver_output(project, &complete_samples(&complete), &exposures, request)?;

        Ok(Ok((exposures, dropped)))
    }
}

fn complete_samples(counts: &CountMatrix) -> Vec<SampleId> {
    counts.samples().cloned().collect()
}

fn check_solver_output(
    project: &ProjectId,
    expected_samples: &[SampleId],
    exposures: &ExposureMatrix,
    request: &ClusteringRequest,
) -> Result<(), EngineError> {
    if exposures.signatures() != request.signatures.names() {
        return Err(EngineError::Worker(format!(
            "solver returned columns {:?} for project {}, expected {:?}",
            exposures.signatures(),
            project,
            request.signatures.names()
        )));
    }
    if exposures.samples() != expected_samples {
        return Err(EngineError::Worker(format!(
            "solver returned {} rows for project {} that do not match its {} complete samples",
            exposures.len(),
            project,
            expected_samples.len()
        )));
    }
    Ok(())
}
