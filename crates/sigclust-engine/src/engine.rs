//! The clustering pipeline: Aggregate → Cluster → Label

use sigclust_cluster::{label_tree, ward_linkage_cancellable, ClusterError};
use sigclust_domain::{CountSource, ExposureSolver};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    ClusteringOutcome, ClusteringRequest, EngineConfig, EngineError, ExposureAggregator,
};

/// Runs clustering requests against a count source and an exposure solver
///
/// Collaborators are shared behind `Arc`, so cloning an engine is cheap and
/// clones can serve requests concurrently. Requests share no mutable state.
pub struct ClusteringEngine<S, X> {
    source: Arc<S>,
    solver: Arc<X>,
    config: EngineConfig,
}

impl<S, X> Clone for ClusteringEngine<S, X> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            solver: Arc::clone(&self.solver),
            config: self.config.clone(),
        }
    }
}

impl<S, X> ClusteringEngine<S, X>
where
    S: CountSource + Send + Sync + 'static,
    S::Error: Display,
    X: ExposureSolver + Send + Sync + 'static,
    X::Error: Display,
{
    /// Create an engine that owns its collaborators
    pub fn new(source: S, solver: X, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(source), Arc::new(solver), config)
    }

    /// Create an engine over already-shared collaborators
    pub fn from_shared(source: Arc<S>, solver: Arc<X>, config: EngineConfig) -> Self {
        Self {
            source,
            solver,
            config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Count source used by this engine
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one request to completion on the current thread
    pub fn cluster(&self, request: &ClusteringRequest) -> Result<ClusteringOutcome, EngineError> {
        let cancel = AtomicBool::new(false);
        run_pipeline(&*self.source, &*self.solver, &self.config, request, &cancel)
    }

    /// Run one request on the blocking pool under the configured time budget
    ///
    /// When the budget expires the request's cancel flag is raised, the
    /// worker stops at its next checkpoint and [`EngineError::Timeout`] is
    /// returned. A partial tree is never produced.
    pub async fn cluster_with_timeout(
        &self,
        request: ClusteringRequest,
    ) -> Result<ClusteringOutcome, EngineError> {
        let source = Arc::clone(&self.source);
        let solver = Arc::clone(&self.solver);
        let config = self.config.clone();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        let handle = tokio::task::spawn_blocking(move || {
            run_pipeline(&*source, &*solver, &config, &request, &worker_cancel)
        });

        match timeout(self.config.request_timeout(), handle).await {
            Ok(joined) => {
                joined.map_err(|e| EngineError::Worker(format!("Task join error: {}", e)))?
            }
            Err(_) => {
                cancel.store(true, Ordering::Relaxed);
                warn!(
                    timeout_secs = self.config.request_timeout_secs,
                    "Clustering request timed out"
                );
                Err(EngineError::Timeout(self.config.request_timeout_secs))
            }
        }
    }
}

fn run_pipeline<S, X>(
    source: &S,
    solver: &X,
    config: &EngineConfig,
    request: &ClusteringRequest,
    cancel: &AtomicBool,
) -> Result<ClusteringOutcome, EngineError>
where
    S: CountSource,
    S::Error: Display,
    X: ExposureSolver,
    X::Error: Display,
{
    info!(
        projects = request.projects.len(),
        signatures = request.signatures.len(),
        mut_type = %request.mutation_type(),
        "Starting clustering request"
    );

    let (exposures, report) = ExposureAggregator::new(source, solver).aggregate(request, cancel)?;

    if exposures.len() < 2 {
        return Err(EngineError::InsufficientSamples {
            found: exposures.len(),
        });
    }
    if exposures.len() > config.max_samples {
        return Err(EngineError::InvalidRequest(format!(
            "{} samples exceed the limit of {}",
            exposures.len(),
            config.max_samples
        )));
    }
    if config.warn_on_duplicates && !report.duplicate_samples.is_empty() {
        warn!(
            duplicates = report.duplicate_samples.len(),
            "Sample ids occur in more than one row; labels will repeat them"
        );
    }

    let samples = exposures.samples();
    let merge_tree = ward_linkage_cancellable(&exposures.vectors(), cancel).map_err(|e| match e {
        ClusterError::Cancelled => EngineError::Cancelled,
        other => EngineError::Clustering(other),
    })?;
    debug!(merges = merge_tree.leaf_count() - 1, "Linkage complete");

    let tree = label_tree(&merge_tree, &samples)?;

    info!(samples = samples.len(), "Clustering request complete");

    Ok(ClusteringOutcome {
        tree,
        samples,
        report,
    })
}
