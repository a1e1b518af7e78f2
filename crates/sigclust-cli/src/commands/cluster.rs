//! Cluster command implementation.

use crate::cli::ClusterArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sigclust_engine::{ClusteringEngine, ClusteringOutcome, ClusteringRequest, EngineConfig};
use sigclust_solver::PrecomputedSolver;
use sigclust_store::TsvCountStore;
use tracing::debug;

/// Execute the cluster command.
pub async fn execute_cluster(args: ClusterArgs, formatter: &Formatter) -> Result<()> {
    let format = args.format;
    let show_report = args.report;

    let outcome = run_cluster(args).await?;

    if show_report {
        eprintln!("{}", formatter.format_report(&outcome.report));
    }
    println!("{}", formatter.format_tree(&outcome.tree, format)?);

    Ok(())
}

/// Load the data, run the clustering pipeline and return its outcome.
pub async fn run_cluster(args: ClusterArgs) -> Result<ClusteringOutcome> {
    let mut config = EngineConfig::default();
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    config.validate().map_err(CliError::InvalidInput)?;

    let request = ClusteringRequest::parse(
        args.projects,
        args.signatures,
        Some(args.mut_type.as_str()),
    )?;

    let store = TsvCountStore::open(&args.data_dir)?;
    let solver = PrecomputedSolver::from_file(&args.exposures)?;
    debug!(
        projects = store.project_count(),
        samples = solver.sample_count(),
        "Loaded data"
    );

    let engine = ClusteringEngine::new(store, solver, config);
    Ok(engine.cluster_with_timeout(request).await?)
}
