use tracing::error;

use super::form::CreateForm;
use super::notification::Notification;
use crate::client::VideoApi;
use crate::models::VoiceSample;

pub const UPLOADED_MESSAGE: &str = "Voice sample uploaded successfully";
pub const RECORDING_STARTED: &str = "Recording started";
pub const RECORDING_STOPPED: &str = "Recording stopped";
pub const EMPTY_RECORDING: &str = "No audio was recorded";
const RECORDING_FILE_NAME: &str = "recording.wav";

/// Upload state of the custom voice picker.
#[derive(Debug, Default)]
pub struct VoiceUploader {
    uploading: bool,
    voice_url: Option<String>,
    /// Chunks captured since recording started; `None` while not recording.
    recording: Option<Vec<Vec<u8>>>,
}

impl VoiceUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn voice_url(&self) -> Option<&str> {
        self.voice_url.as_deref()
    }

    /// Checks the file, uploads it and hands the stored URL to the form.
    /// A non-audio file is refused before any request is made.
    pub async fn upload(
        &mut self,
        api: &dyn VideoApi,
        sample: &VoiceSample,
        form: &mut CreateForm,
    ) -> Notification {
        if let Err(message) = sample.validate() {
            return Notification::error(message);
        }

        self.uploading = true;
        let outcome = api.upload_voice(sample).await;
        self.uploading = false;

        match outcome {
            Ok(upload) => {
                form.voice_sample_url = Some(upload.voice_file_url.clone());
                self.voice_url = Some(upload.voice_file_url);
                Notification::success(UPLOADED_MESSAGE)
            }
            Err(e) => {
                error!("Upload error: {}", e);
                Notification::error(e.message)
            }
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Starts capturing a sample. Already recording is a no-op.
    pub fn start_recording(&mut self) -> Option<Notification> {
        if self.recording.is_some() {
            return None;
        }
        self.recording = Some(Vec::new());
        Some(Notification::info(RECORDING_STARTED))
    }

    /// Empty chunks are dropped, as are chunks arriving while not recording.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        if let Some(chunks) = self.recording.as_mut().filter(|_| !chunk.is_empty()) {
            chunks.push(chunk.to_vec());
        }
    }

    /// Stops capturing and uploads the recording as one wav sample. Returns
    /// nothing when no recording was running.
    pub async fn stop_recording(
        &mut self,
        api: &dyn VideoApi,
        form: &mut CreateForm,
    ) -> Vec<Notification> {
        let Some(chunks) = self.recording.take() else {
            return Vec::new();
        };
        let mut notifications = vec![Notification::info(RECORDING_STOPPED)];
        if chunks.is_empty() {
            notifications.push(Notification::error(EMPTY_RECORDING));
            return notifications;
        }
        let sample = VoiceSample::new(RECORDING_FILE_NAME, "audio/wav", chunks.concat());
        notifications.push(self.upload(api, &sample, form).await);
        notifications
    }

    /// Drops the chosen sample so the default voice is used again.
    pub fn clear(&mut self, form: &mut CreateForm) {
        self.voice_url = None;
        form.voice_sample_url = None;
    }
}
