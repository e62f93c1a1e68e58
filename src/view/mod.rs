//! Client-side page state: the create form, generation results, voice
//! uploads and the notifications they raise.

pub mod create_view;
pub mod form;
pub mod notification;
pub mod voice_upload;

#[cfg(test)]
mod testing;

pub use create_view::{CreateView, Download, DownloadKind};
pub use form::CreateForm;
pub use notification::{Level, Notification};
pub use voice_upload::VoiceUploader;
