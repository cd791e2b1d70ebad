use axum::extract::State;
use axum::{routing::get, Json, Router};
use cinetrack_db::Catalog;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Which storage backend the process composed.
    pub backend: &'static str,
    /// Whether the backend is reachable.
    pub backend_healthy: bool,
}

/// GET /health -- returns service and storage backend health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_healthy = state.catalog.healthy().await;

    let status = if backend_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        backend: state.catalog.backend_name(),
        backend_healthy,
    })
}

/// Mount health check routes at the root level.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
