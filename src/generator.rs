//! Video generation backends.
//!
//! The real pipeline (story model, image model, TTS, muxing) lives outside this
//! crate; the bundled generator reserves artifact names and hands out their URLs.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Scene, VideoRequest};

/// Artifacts produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedVideo {
    pub video_id: String,
    pub video_url: String,
    pub captions_url: String,
    pub scenes: Vec<Scene>,
}

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &VideoRequest) -> Result<GeneratedVideo, String>;
}

/// Names artifacts `/videos/{id}.mp4` and `/videos/{id}_captions.json` under
/// the configured directory without rendering them.
pub struct PlaceholderGenerator {
    videos_dir: PathBuf,
    url_prefix: String,
}

impl PlaceholderGenerator {
    pub fn new(videos_dir: impl Into<PathBuf>) -> Self {
        Self {
            videos_dir: videos_dir.into(),
            url_prefix: "/videos".to_string(),
        }
    }
}

#[async_trait]
impl Generator for PlaceholderGenerator {
    async fn generate(&self, request: &VideoRequest) -> Result<GeneratedVideo, String> {
        tokio::fs::create_dir_all(&self.videos_dir)
            .await
            .map_err(|e| format!("Failed to prepare videos directory: {}", e))?;

        let video_id = Uuid::new_v4().to_string();
        debug!(
            video_id = video_id.as_str(),
            image_style = request.image_style.as_str(),
            tts_model = request.tts_model.as_str(),
            "reserved video artifacts"
        );

        Ok(GeneratedVideo {
            video_url: format!("{}/{}.mp4", self.url_prefix, video_id),
            captions_url: format!("{}/{}_captions.json", self.url_prefix, video_id),
            video_id,
            scenes: Vec::new(),
        })
    }
}
