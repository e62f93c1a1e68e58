use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ApiError, VideoApi};
use crate::models::{HealthStatus, VideoRequest, VideoResponse, VoiceSample, VoiceUpload};

/// Client double that counts calls and answers with a fixed outcome.
pub struct CountingApi {
    calls: AtomicUsize,
    failure: Option<ApiError>,
    last_voice_sample: Mutex<Option<VoiceSample>>,
}

impl CountingApi {
    pub fn succeeding() -> Self {
        CountingApi {
            calls: AtomicUsize::new(0),
            failure: None,
            last_voice_sample: Mutex::new(None),
        }
    }

    pub fn failing(message: &str, status: u16) -> Self {
        CountingApi {
            calls: AtomicUsize::new(0),
            failure: Some(ApiError::new(message, status)),
            last_voice_sample: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_voice_sample(&self) -> Option<VoiceSample> {
        self.last_voice_sample.lock().unwrap().clone()
    }

    fn outcome<T>(&self, value: T) -> Result<T, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl VideoApi for CountingApi {
    async fn generate_video(&self, _request: &VideoRequest) -> Result<VideoResponse, ApiError> {
        self.outcome(VideoResponse::new(
            "/videos/test.mp4",
            "/videos/test_captions.json",
        ))
    }

    async fn get_healthcheck(&self) -> Result<HealthStatus, ApiError> {
        self.outcome(HealthStatus::ok())
    }

    async fn upload_voice(&self, sample: &VoiceSample) -> Result<VoiceUpload, ApiError> {
        *self.last_voice_sample.lock().unwrap() = Some(sample.clone());
        let ext = sample.extension().unwrap_or_default();
        self.outcome(VoiceUpload {
            voice_file_url: format!("/uploads/test.{}", ext),
        })
    }
}
