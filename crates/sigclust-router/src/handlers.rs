//! HTTP request handlers for the Router service.
//!
//! Implements the clustering, project listing and health check endpoints
//! using axum.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use sigclust_cluster::LabeledTree;
use sigclust_domain::{CountSource, ExposureSolver, ProjectSummary};
use sigclust_engine::{ClusteringEngine, ClusteringRequest, EngineError};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
pub struct AppState<S, X> {
    /// Clustering engine over the configured count source and solver
    pub engine: Arc<ClusteringEngine<S, X>>,
}

impl<S, X> Clone for AppState<S, X> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<S, X> AppState<S, X> {
    /// Wrap an engine
    pub fn new(engine: ClusteringEngine<S, X>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Clustering request body
#[derive(Debug, Deserialize)]
pub struct ClusterRequestBody {
    /// Ordered signature names
    pub signatures: Vec<String>,
    /// Project identifiers
    pub projects: Vec<String>,
    /// Mutation type, SBS when absent
    #[serde(default)]
    pub mut_type: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of projects known to the count source
    pub project_count: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request body could not be decoded
    BadRequest(String),
    /// Clustering pipeline error
    Engine(EngineError),
    /// Count source error
    Source(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Engine(e) => {
                let status = match &e {
                    EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                    EngineError::InsufficientSamples { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    EngineError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            AppError::Source(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        AppError::Engine(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

/// POST /clustering - Cluster the samples of the given projects
///
/// Returns the labeled tree rooted at the synthetic `"root"` node.
async fn cluster<S, X>(
    State(state): State<AppState<S, X>>,
    payload: Result<Json<ClusterRequestBody>, JsonRejection>,
) -> Result<Json<LabeledTree>, AppError>
where
    S: CountSource + Send + Sync + 'static,
    S::Error: Display,
    X: ExposureSolver + Send + Sync + 'static,
    X::Error: Display,
{
    let Json(body) = payload?;
    let request =
        ClusteringRequest::parse(body.projects, body.signatures, body.mut_type.as_deref())?;

    let outcome = state.engine.cluster_with_timeout(request).await.map_err(|e| {
        warn!(error = %e, "Clustering request failed");
        e
    })?;

    info!(
        samples = outcome.samples.len(),
        skipped = outcome.report.skipped_projects().count(),
        "Clustering request served"
    );

    Ok(Json(outcome.tree))
}

/// GET /projects - List known projects
async fn list_projects<S, X>(
    State(state): State<AppState<S, X>>,
) -> Result<Json<Vec<ProjectSummary>>, AppError>
where
    S: CountSource + Send + Sync + 'static,
    S::Error: Display,
    X: ExposureSolver + Send + Sync + 'static,
    X::Error: Display,
{
    let projects = state
        .engine
        .source()
        .projects()
        .map_err(|e| AppError::Source(e.to_string()))?;
    Ok(Json(projects))
}

/// GET /health - Health check
async fn health_check<S, X>(State(state): State<AppState<S, X>>) -> Json<HealthCheckResponse>
where
    S: CountSource + Send + Sync + 'static,
    S::Error: Display,
    X: ExposureSolver + Send + Sync + 'static,
    X::Error: Display,
{
    let (status, project_count) = match state.engine.source().projects() {
        Ok(projects) => ("healthy", projects.len()),
        Err(e) => {
            warn!(error = %e, "Count source unavailable");
            ("unhealthy", 0)
        }
    };

    Json(HealthCheckResponse {
        status: status.to_string(),
        project_count,
    })
}

/// Create the axum router with all routes
pub fn create_router<S, X>(state: AppState<S, X>) -> AxumRouter
where
    S: CountSource + Send + Sync + 'static,
    S::Error: Display,
    X: ExposureSolver + Send + Sync + 'static,
    X::Error: Display,
{
    AxumRouter::new()
        .route("/clustering", post(cluster::<S, X>))
        .route("/projects", get(list_projects::<S, X>))
        .route("/health", get(health_check::<S, X>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use sigclust_domain::{CountMatrix, MutationType};
    use sigclust_engine::EngineConfig;
    use sigclust_solver::MockSolver;
    use sigclust_store::MemoryCountSource;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState<MemoryCountSource, MockSolver> {
        let mut counts = CountMatrix::new(vec!["C>A".to_string()]);
        counts.push_row("S2", vec![Some(1.0)]).unwrap();
        counts.push_row("S1", vec![Some(2.0)]).unwrap();

        let mut source = MemoryCountSource::new();
        source.insert("P1", MutationType::Sbs, counts);

        let mut solver = MockSolver::new(vec![0.0]);
        solver.add_exposures("S1", vec![1.0]);

        AppState::new(ClusteringEngine::new(source, solver, EngineConfig::default()))
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cluster() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/clustering")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"signatures": ["SBS1"], "projects": ["P1"]}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Engine(EngineError::InsufficientSamples { found: 1 }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Engine(EngineError::Timeout(60)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                AppError::Engine(EngineError::Cancelled),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
