//! HTTP route definitions and handlers.
//!
//! Routes are grouped by concern: health, generation backend, voice uploads,
//! the authenticating edge proxy and metrics.

mod health_routes;
mod metrics_routes;
pub mod proxy_routes;
pub mod upload_routes;
mod video_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Creates the application router with all configured routes.
///
/// The proxy route is only mounted when a `proxy` section is configured.
/// Generated videos and uploaded samples are served from their directories.
pub fn create_router(state: AppState) -> Router {
    let backend = &state.config.backend;
    let mut router = Router::new()
        .merge(health_routes::routes())
        .merge(video_routes::routes())
        .merge(upload_routes::routes(backend.max_upload_bytes))
        .merge(metrics_routes::routes());

    if state.config.proxy.is_some() {
        router = router.merge(proxy_routes::routes());
    }

    router
        .nest_service("/videos", ServeDir::new(&backend.videos_dir))
        .nest_service(upload_routes::UPLOADS_PATH, ServeDir::new(&backend.uploads_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
