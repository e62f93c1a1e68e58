/// Message shown when a non-audio file is picked as a voice sample.
pub const NOT_AUDIO_MESSAGE: &str = "Please upload an audio file (mp3 or wav)";

const ACCEPTED_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// An audio file picked or recorded as the custom TTS voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSample {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl VoiceSample {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        VoiceSample {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }

    /// Rejects anything whose content type is not audio.
    pub fn validate(&self) -> Result<(), String> {
        if !self.content_type.to_lowercase().contains("audio") {
            return Err(NOT_AUDIO_MESSAGE.to_string());
        }
        Ok(())
    }

    /// Stricter check applied where the file is stored: audio content type
    /// and an mp3 or wav extension.
    pub fn validate_for_storage(&self) -> Result<String, String> {
        self.validate()?;
        match self.extension() {
            Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
            _ => Err(NOT_AUDIO_MESSAGE.to_string()),
        }
    }
}
