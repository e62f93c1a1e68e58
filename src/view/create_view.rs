use tracing::error;

use super::form::CreateForm;
use super::notification::Notification;
use crate::client::VideoApi;
use crate::models::VideoResponse;

pub const GENERATED_MESSAGE: &str = "Video generated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Video,
    Captions,
}

/// A file the user asked to save: where it comes from and its suggested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub url: String,
    pub file_name: &'static str,
}

/// State behind the create page: the form, the in-flight flag, the last
/// result and the notifications raised so far.
#[derive(Debug, Default)]
pub struct CreateView {
    pub form: CreateForm,
    loading: bool,
    result: Option<VideoResponse>,
    notifications: Vec<Notification>,
}

impl CreateView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&VideoResponse> {
        self.result.as_ref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Validates the form and runs one generation. Invalid input never reaches
    /// the client.
    pub async fn submit(&mut self, api: &dyn VideoApi) {
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(message) => {
                self.notify(Notification::error(message));
                return;
            }
        };

        self.loading = true;
        self.result = None;

        match api.generate_video(&request).await {
            Ok(response) => {
                self.result = Some(response);
                self.notify(Notification::success(GENERATED_MESSAGE));
            }
            Err(e) => {
                error!("Video generation error: {}", e);
                self.notify(Notification::error(e.message));
            }
        }
        self.loading = false;
    }

    /// Returns nothing until a video has been generated.
    pub fn download(&mut self, kind: DownloadKind) -> Option<Download> {
        let result = self.result.as_ref()?;
        let (download, message) = match kind {
            DownloadKind::Video => (
                Download {
                    url: result.video_url.clone(),
                    file_name: "video.mp4",
                },
                "Video download started",
            ),
            DownloadKind::Captions => (
                Download {
                    url: result.captions_url.clone(),
                    file_name: "captions.json",
                },
                "Captions download started",
            ),
        };
        self.notify(Notification::success(message));
        Some(download)
    }
}
