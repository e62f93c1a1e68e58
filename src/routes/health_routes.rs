//! Health check endpoints.

use crate::models::HealthStatus;
use crate::state::AppState;
use axum::{routing::get, Json, Router};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

/// Reports `{"status": "ok"}` while the service is up.
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
