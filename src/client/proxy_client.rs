use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use super::error::ApiError;
use super::http_client::{post_generation, HttpClient};
use super::VideoApi;
use crate::models::{HealthStatus, VideoRequest, VideoResponse, VoiceSample, VoiceUpload};

/// Sends generation requests through the authenticating edge function.
/// Health checks and uploads still go straight to the backend.
pub struct ProxyClient {
    functions_url: String,
    backend: HttpClient,
    access_token: RwLock<Option<String>>,
}

impl ProxyClient {
    pub fn new(
        functions_url: impl Into<String>,
        backend_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        Ok(ProxyClient {
            functions_url: functions_url.into().trim_end_matches('/').to_string(),
            backend: HttpClient::new(backend_url, timeout)?,
            access_token: RwLock::new(None),
        })
    }

    /// Sets or clears the bearer token sent to the edge function.
    pub fn set_access_token(&self, token: Option<String>) {
        let mut guard = self
            .access_token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }

    fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl VideoApi for ProxyClient {
    async fn generate_video(&self, request: &VideoRequest) -> Result<VideoResponse, ApiError> {
        // The edge function would answer 401 anyway; fail without the round trip
        let token = self
            .access_token()
            .ok_or_else(|| ApiError::new("Missing authorization header", 401))?;
        let builder = self
            .backend
            .http()
            .post(format!("{}/generate-video", self.functions_url))
            .bearer_auth(token);
        post_generation(builder, request).await
    }

    async fn get_healthcheck(&self) -> Result<HealthStatus, ApiError> {
        self.backend.get_healthcheck().await
    }

    async fn upload_voice(&self, sample: &VoiceSample) -> Result<VoiceUpload, ApiError> {
        self.backend.upload_voice(sample).await
    }

    fn set_access_token(&self, token: Option<String>) {
        ProxyClient::set_access_token(self, token)
    }
}
