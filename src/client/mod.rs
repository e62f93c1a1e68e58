//! Client side of the generation API.
//!
//! [`VideoApi`] is what the view layer talks to. Which strategy answers is
//! decided once by [`create_client`] from a [`ClientConfig`].

pub mod error;
pub mod http_client;
pub mod identity;
pub mod mock_client;
pub mod proxy_client;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use error::ApiError;
pub use http_client::HttpClient;
pub use identity::IdentityClient;
pub use mock_client::MockClient;
pub use proxy_client::ProxyClient;

use crate::models::{HealthStatus, VideoRequest, VideoResponse, VoiceSample, VoiceUpload};

#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn generate_video(&self, request: &VideoRequest) -> Result<VideoResponse, ApiError>;
    async fn get_healthcheck(&self) -> Result<HealthStatus, ApiError>;
    async fn upload_voice(&self, sample: &VoiceSample) -> Result<VoiceUpload, ApiError>;

    /// Bearer token of the signed-in user. Only strategies that send one care.
    fn set_access_token(&self, _token: Option<String>) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    Mock,
    #[default]
    Direct,
    Proxy,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_mock_delay_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub kind: ClientKind,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Edge function root, e.g. `https://<project>.supabase.co/functions/v1`.
    #[serde(default)]
    pub functions_url: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            kind: ClientKind::default(),
            base_url: default_base_url(),
            functions_url: None,
            timeout_ms: None,
            mock_delay_ms: default_mock_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `SHORTSGEN_CLIENT__*` variables,
    /// e.g. `SHORTSGEN_CLIENT__BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Env::prefixed("SHORTSGEN_CLIENT__"))
            .extract()
            .map_err(|e| ApiError::new(format!("Invalid client configuration: {}", e), 0))
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

pub fn create_client(config: &ClientConfig) -> Result<Arc<dyn VideoApi>, ApiError> {
    info!("Using {:?} API client against {}", config.kind, config.base_url);
    let client: Arc<dyn VideoApi> = match config.kind {
        ClientKind::Mock => Arc::new(MockClient::new(Duration::from_millis(
            config.mock_delay_ms,
        ))),
        ClientKind::Direct => Arc::new(HttpClient::new(&config.base_url, config.timeout())?),
        ClientKind::Proxy => {
            let functions_url = config.functions_url.as_deref().ok_or_else(|| {
                ApiError::new("functions_url is required for the proxy client", 0)
            })?;
            Arc::new(ProxyClient::new(
                functions_url,
                &config.base_url,
                config.timeout(),
            )?)
        }
    };
    Ok(client)
}
