//! Sigclust Router
//!
//! HTTP front end for the clustering engine. Serves labeled sample trees
//! built from a TSV data directory and a precomputed exposure table.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::RouterConfig;
use handlers::{create_router, AppState};
use sigclust_engine::ClusteringEngine;
use sigclust_solver::{PrecomputedSolver, SolverError};
use sigclust_store::{StoreError, TsvCountStore};
use tokio::net::TcpListener;
use tracing::info;

/// Router error
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Data directory could not be opened
    #[error("Failed to open data directory: {0}")]
    Store(#[from] StoreError),

    /// Exposure table could not be loaded
    #[error("Failed to load exposures: {0}")]
    Solver(#[from] SolverError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build application state from configuration
///
/// Opens the data directory and loads the exposure table.
pub fn build_state(
    config: &RouterConfig,
) -> Result<AppState<TsvCountStore, PrecomputedSolver>, RouterError> {
    let store = TsvCountStore::open(&config.data_dir)?;
    let solver = PrecomputedSolver::from_file(&config.exposures_path)?;

    info!(
        projects = store.project_count(),
        samples = solver.sample_count(),
        "Loaded clustering data"
    );

    Ok(AppState::new(ClusteringEngine::new(
        store,
        solver,
        config.engine.clone(),
    )))
}

/// Start the Router HTTP server
///
/// Loads data, builds the clustering engine and starts the axum server.
pub async fn start_server(config: RouterConfig) -> Result<(), RouterError> {
    info!("Starting Sigclust Router");
    info!("Bind address: {}", config.bind_addr());
    info!("Data directory: {}", config.data_dir.display());
    info!("Request timeout: {} seconds", config.engine.request_timeout_secs);

    let state = build_state(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Router listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| RouterError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_missing_data_dir() {
        let mut config = RouterConfig::default_test_config();
        config.data_dir = "/nonexistent/sigclust/data".into();
        assert!(matches!(build_state(&config), Err(RouterError::Store(_))));
    }
}
