use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::video::{Scene, VideoRequest, VideoRequestBody};

/// A story row, written once per proxied generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoryRecord {
    pub title: String,
    pub user_id: String,
}

impl StoryRecord {
    pub fn for_request(request: &VideoRequest, user_id: &str) -> Self {
        StoryRecord {
            title: request.story.title(),
            user_id: user_id.to_string(),
        }
    }
}

/// A scene row belonging to a stored story.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneRecord {
    pub story_id: String,
    pub image_prompt: String,
    pub image_url: Option<String>,
    pub narration_text: String,
    pub audio_url: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
}

impl SceneRecord {
    pub fn from_scene(story_id: &str, scene: &Scene) -> Self {
        SceneRecord {
            story_id: story_id.to_string(),
            image_prompt: scene.image_prompt.clone(),
            image_url: scene.image_url.clone(),
            narration_text: scene.narration_text.clone(),
            audio_url: scene.audio_url.clone(),
            start_time: scene.start_time,
            end_time: scene.end_time,
        }
    }
}

/// Metadata the generation backend keeps for each produced video.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VideoRecord {
    pub video_id: String,
    pub timestamp: DateTime<Utc>,
    pub request: VideoRequestBody,
    pub video_url: String,
    pub captions_url: String,
}
