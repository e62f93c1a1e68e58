//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, authentication, and metadata storage.

use crate::auth::Auth;
use crate::config::ConfigV1;
use crate::generator::Generator;
use crate::metrics::Metrics;
use crate::store::Store;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Identity provider chain for proxy callers.
    pub auth: Arc<Auth>,
    /// Metadata store for stories, scenes and videos.
    pub store: Arc<dyn Store>,
    /// Produces video artifacts for backend requests.
    pub generator: Arc<dyn Generator>,
    pub metrics: Metrics,
    /// Outbound client used by the proxy to reach the generation backend.
    pub http: reqwest::Client,
}
