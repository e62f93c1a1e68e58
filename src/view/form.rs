use crate::models::options::{font, image_style, tts_model};
use crate::models::{StorySource, VideoRequest, FONT_OPTIONS, IMAGE_STYLES, TTS_MODELS};

pub const MISSING_STORY_TEXT: &str = "Please enter your custom story text";
pub const MISSING_STORY_PROMPT: &str = "Please enter a prompt for generating a story";

/// Editable state of the create page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub is_custom_story: bool,
    pub story_prompt: String,
    pub story_text: String,
    pub caption_font: String,
    pub image_style: String,
    pub tts_model: String,
    pub voice_sample_url: Option<String>,
}

impl Default for CreateForm {
    fn default() -> Self {
        CreateForm {
            is_custom_story: false,
            story_prompt: String::new(),
            story_text: String::new(),
            caption_font: FONT_OPTIONS[0].id.to_string(),
            image_style: IMAGE_STYLES[0].id.to_string(),
            tts_model: TTS_MODELS[0].id.to_string(),
            voice_sample_url: None,
        }
    }
}

impl CreateForm {
    /// Builds the request for the current mode. Only the field belonging to
    /// the selected mode is sent.
    pub fn to_request(&self) -> Result<VideoRequest, String> {
        let story = if self.is_custom_story {
            if self.story_text.trim().is_empty() {
                return Err(MISSING_STORY_TEXT.to_string());
            }
            StorySource::Text(self.story_text.clone())
        } else {
            if self.story_prompt.trim().is_empty() {
                return Err(MISSING_STORY_PROMPT.to_string());
            }
            StorySource::Prompt(self.story_prompt.clone())
        };

        if font(&self.caption_font).is_none() {
            return Err(format!("Unknown caption font: {}", self.caption_font));
        }
        if image_style(&self.image_style).is_none() {
            return Err(format!("Unknown image style: {}", self.image_style));
        }
        if tts_model(&self.tts_model).is_none() {
            return Err(format!("Unknown voice model: {}", self.tts_model));
        }

        Ok(VideoRequest {
            story,
            caption_font: self.caption_font.clone(),
            image_style: self.image_style.clone(),
            tts_model: self.tts_model.clone(),
            voice_sample_url: self.voice_sample_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_first_options() {
        let form = CreateForm::default();
        assert_eq!(form.caption_font, "roboto");
        assert_eq!(form.image_style, "realistic");
        assert_eq!(form.tts_model, "1");
        assert!(!form.is_custom_story);
    }

    #[test]
    fn empty_story_is_rejected_per_mode() {
        let mut form = CreateForm::default();
        assert_eq!(form.to_request(), Err(MISSING_STORY_PROMPT.to_string()));

        form.is_custom_story = true;
        form.story_prompt = "ignored in custom mode".to_string();
        assert_eq!(form.to_request(), Err(MISSING_STORY_TEXT.to_string()));
    }

    #[test]
    fn only_the_selected_mode_is_sent() {
        let form = CreateForm {
            is_custom_story: true,
            story_prompt: "a prompt".to_string(),
            story_text: "Once upon a time.".to_string(),
            ..CreateForm::default()
        };
        let request = form.to_request().unwrap();
        assert_eq!(
            request.story,
            StorySource::Text("Once upon a time.".to_string())
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let form = CreateForm {
            story_prompt: "robots".to_string(),
            image_style: "vaporwave".to_string(),
            ..CreateForm::default()
        };
        assert_eq!(
            form.to_request(),
            Err("Unknown image style: vaporwave".to_string())
        );
    }
}
