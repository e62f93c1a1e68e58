use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::error::ApiError;
use super::VideoApi;
use crate::models::{HealthStatus, VideoRequest, VideoResponse, VoiceSample, VoiceUpload};

pub const MOCK_VIDEO_URL: &str = "https://example.com/sample-video.mp4";
pub const MOCK_CAPTIONS_URL: &str = "https://example.com/sample-captions.json";
pub const MOCK_VOICE_URL: &str = "https://example.com/voice-sample.mp3";

/// Answers every call locally after a fixed delay. No network involved.
#[derive(Debug, Clone)]
pub struct MockClient {
    delay: Duration,
}

impl MockClient {
    pub fn new(delay: Duration) -> Self {
        MockClient { delay }
    }
}

#[async_trait]
impl VideoApi for MockClient {
    async fn generate_video(&self, request: &VideoRequest) -> Result<VideoResponse, ApiError> {
        debug!(
            "Mock generation for style '{}' with model '{}'",
            request.image_style, request.tts_model
        );
        tokio::time::sleep(self.delay).await;
        Ok(VideoResponse::new(MOCK_VIDEO_URL, MOCK_CAPTIONS_URL))
    }

    async fn get_healthcheck(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus::ok())
    }

    async fn upload_voice(&self, sample: &VoiceSample) -> Result<VoiceUpload, ApiError> {
        sample.validate().map_err(|e| ApiError::new(e, 0))?;
        tokio::time::sleep(self.delay).await;
        Ok(VoiceUpload {
            voice_file_url: MOCK_VOICE_URL.to_string(),
        })
    }
}
