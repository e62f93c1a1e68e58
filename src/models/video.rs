use serde::{Deserialize, Serialize};

/// Message returned alongside every successful generation.
pub const GENERATION_SUCCESS_MESSAGE: &str = "Video generated successfully";

/// Where the story for a video comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorySource {
    /// A prompt the backend expands into a story.
    Prompt(String),
    /// Literal story text used as-is.
    Text(String),
}

impl StorySource {
    /// Title stored with the story metadata: the first sentence of literal
    /// text, or the prompt, cut to 50 characters.
    pub fn title(&self) -> String {
        let source = match self {
            StorySource::Text(text) => text.split('.').next().unwrap_or_default(),
            StorySource::Prompt(prompt) => prompt.as_str(),
        };
        source.chars().take(50).collect()
    }
}

/// Why a request body could not become a [`VideoRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Either storyPrompt or storyText must be provided")]
    MissingStory,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// A validated generation request.
///
/// Exactly one story source is held, so the "prompt xor text" rule cannot be
/// broken once a value exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VideoRequestBody", into = "VideoRequestBody")]
pub struct VideoRequest {
    pub story: StorySource,
    pub caption_font: String,
    pub image_style: String,
    pub tts_model: String,
    pub voice_sample_url: Option<String>,
}

/// Wire shape of a generation request, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_sample_url: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<VideoRequestBody> for VideoRequest {
    type Error = RequestError;

    fn try_from(body: VideoRequestBody) -> Result<Self, Self::Error> {
        // Literal text wins when both are sent.
        let story = match (present(body.story_text), present(body.story_prompt)) {
            (Some(text), _) => StorySource::Text(text),
            (None, Some(prompt)) => StorySource::Prompt(prompt),
            (None, None) => return Err(RequestError::MissingStory),
        };

        Ok(VideoRequest {
            story,
            caption_font: present(body.caption_font)
                .ok_or(RequestError::MissingField("captionFont"))?,
            image_style: present(body.image_style)
                .ok_or(RequestError::MissingField("imageStyle"))?,
            tts_model: present(body.tts_model).ok_or(RequestError::MissingField("ttsModel"))?,
            voice_sample_url: present(body.voice_sample_url),
        })
    }
}

impl From<VideoRequest> for VideoRequestBody {
    fn from(request: VideoRequest) -> Self {
        let (story_prompt, story_text) = match request.story {
            StorySource::Prompt(p) => (Some(p), None),
            StorySource::Text(t) => (None, Some(t)),
        };
        VideoRequestBody {
            story_prompt,
            story_text,
            caption_font: Some(request.caption_font),
            image_style: Some(request.image_style),
            tts_model: Some(request.tts_model),
            voice_sample_url: request.voice_sample_url,
        }
    }
}

/// Body the edge proxy sends to the generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyPayload {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub request: VideoRequest,
}

/// One narrated segment of a generated video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub image_prompt: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub narration_text: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
}

/// Result of a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub video_url: String,
    pub captions_url: String,
    #[serde(default = "default_message")]
    pub message: String,
    /// Only present on backend responses that report scene breakdowns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
}

fn default_message() -> String {
    GENERATION_SUCCESS_MESSAGE.to_string()
}

impl VideoResponse {
    pub fn new(video_url: impl Into<String>, captions_url: impl Into<String>) -> Self {
        VideoResponse {
            video_url: video_url.into(),
            captions_url: captions_url.into(),
            message: default_message(),
            scenes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        HealthStatus {
            status: "ok".to_string(),
        }
    }
}

/// Response of the voice-sample upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceUpload {
    pub voice_file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_body_without_story() {
        let body = json!({
            "captionFont": "roboto",
            "imageStyle": "anime",
            "ttsModel": "1"
        });
        let err = serde_json::from_value::<VideoRequest>(body).unwrap_err();
        assert!(err
            .to_string()
            .contains("Either storyPrompt or storyText must be provided"));
    }

    #[test]
    fn blank_prompt_counts_as_missing() {
        let body = VideoRequestBody {
            story_prompt: Some("   ".to_string()),
            caption_font: Some("roboto".to_string()),
            image_style: Some("anime".to_string()),
            tts_model: Some("1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            VideoRequest::try_from(body),
            Err(RequestError::MissingStory)
        );
    }

    #[test]
    fn text_wins_over_prompt() {
        let body = json!({
            "storyPrompt": "a dragon",
            "storyText": "Once upon a time.",
            "captionFont": "roboto",
            "imageStyle": "anime",
            "ttsModel": "2"
        });
        let request: VideoRequest = serde_json::from_value(body).unwrap();
        assert_eq!(
            request.story,
            StorySource::Text("Once upon a time.".to_string())
        );
    }

    #[test]
    fn serializes_only_the_chosen_story_field() {
        let request = VideoRequest {
            story: StorySource::Prompt("a robot learns to paint".to_string()),
            caption_font: "inter".to_string(),
            image_style: "cyberpunk".to_string(),
            tts_model: "1".to_string(),
            voice_sample_url: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["storyPrompt"], "a robot learns to paint");
        assert!(value.get("storyText").is_none());
        assert!(value.get("voiceSampleUrl").is_none());
        assert_eq!(value["captionFont"], "inter");
    }

    #[test]
    fn proxy_payload_flattens_request() {
        let payload = ProxyPayload {
            user_id: "user-1".to_string(),
            request: VideoRequest {
                story: StorySource::Text("Hello.".to_string()),
                caption_font: "roboto".to_string(),
                image_style: "anime".to_string(),
                tts_model: "1".to_string(),
                voice_sample_url: Some("https://example.com/v.mp3".to_string()),
            },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["userId"], "user-1");
        assert_eq!(value["storyText"], "Hello.");
        assert_eq!(value["voiceSampleUrl"], "https://example.com/v.mp3");
    }

    #[test]
    fn title_uses_first_sentence_and_truncates() {
        let text = StorySource::Text("The fox ran. Then it slept.".to_string());
        assert_eq!(text.title(), "The fox ran");

        let prompt = StorySource::Prompt("x".repeat(80));
        assert_eq!(prompt.title().chars().count(), 50);
    }

    #[test]
    fn response_message_defaults_when_absent() {
        let response: VideoResponse = serde_json::from_value(json!({
            "videoUrl": "/videos/a.mp4",
            "captionsUrl": "/videos/a_captions.json"
        }))
        .unwrap();
        assert_eq!(response.message, GENERATION_SUCCESS_MESSAGE);
        assert!(response.scenes.is_empty());
    }
}
