//! Application startup and server initialization.
//!
//! This module wires the identity providers, metadata store, generator and
//! routes together and starts the HTTP server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::auth::Auth;
use crate::config::ConfigV1;
use crate::generator::PlaceholderGenerator;
use crate::metrics::Metrics;
use crate::routes;
use crate::state::AppState;
use crate::store::create_store;

/// Builds the shared state from configuration.
pub async fn build_state(config: Arc<ConfigV1>) -> AppState {
    let store = create_store(&config.store).await;
    let auth = Arc::new(Auth::new(&config.providers, config.auth.clone()));
    let generator = Arc::new(PlaceholderGenerator::new(&config.backend.videos_dir));

    if config.proxy.is_some() {
        info!("Edge proxy enabled with {} identity provider(s)", auth.providers.len());
    }

    AppState {
        config,
        auth,
        store,
        generator,
        metrics: Metrics::new(),
        http: reqwest::Client::new(),
    }
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting server on {}", config.bind_address);

    tokio::fs::create_dir_all(&config.backend.videos_dir).await?;
    tokio::fs::create_dir_all(&config.backend.uploads_dir).await?;

    let bind_address = config.bind_address.clone();
    let state = build_state(config).await;
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&bind_address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
