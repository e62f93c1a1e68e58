use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error};

use super::error::ApiError;
use super::VideoApi;
use crate::models::{HealthStatus, VideoRequest, VideoResponse, VoiceSample, VoiceUpload};

/// Talks to the generation backend directly.
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::transport)?;
        Ok(HttpClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Shared by the direct and proxy clients: POSTs a generation request and
/// decodes the answer.
pub(crate) async fn post_generation(
    request: reqwest::RequestBuilder,
    body: &VideoRequest,
) -> Result<VideoResponse, ApiError> {
    let response = request.json(body).send().await.map_err(|e| {
        error!("API error: {}", e);
        ApiError::transport(e)
    })?;

    if !response.status().is_success() {
        let err = ApiError::from_response(response, "Video generation failed").await;
        error!("API error: {}", err);
        return Err(err);
    }
    response.json().await.map_err(ApiError::transport)
}

#[async_trait]
impl VideoApi for HttpClient {
    async fn generate_video(&self, request: &VideoRequest) -> Result<VideoResponse, ApiError> {
        debug!("POST {}/api/generate-video", self.base_url);
        post_generation(
            self.http
                .post(format!("{}/api/generate-video", self.base_url)),
            request,
        )
        .await
    }

    async fn get_healthcheck(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| {
                error!("Health check error: {}", e);
                ApiError::transport(e)
            })?;

        if !response.status().is_success() {
            return Err(ApiError::new(
                "API server is down",
                response.status().as_u16(),
            ));
        }
        response.json().await.map_err(ApiError::transport)
    }

    async fn upload_voice(&self, sample: &VoiceSample) -> Result<VoiceUpload, ApiError> {
        sample.validate().map_err(|e| ApiError::new(e, 0))?;

        let part = Part::bytes(sample.bytes.clone())
            .file_name(sample.file_name.clone())
            .mime_str(&sample.content_type)
            .map_err(ApiError::transport)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/upload-voice", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to upload voice sample").await);
        }
        response.json().await.map_err(ApiError::transport)
    }
}
