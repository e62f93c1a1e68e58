pub mod options;
pub mod records;
pub mod user;
pub mod video;
pub mod voice;

pub use options::{FontOption, ImageStyle, TtsModel, FONT_OPTIONS, IMAGE_STYLES, TTS_MODELS};
pub use records::{SceneRecord, StoryRecord, VideoRecord};
pub use user::User;
pub use video::{
    HealthStatus, ProxyPayload, RequestError, Scene, StorySource, VideoRequest,
    VideoRequestBody, VideoResponse, VoiceUpload, GENERATION_SUCCESS_MESSAGE,
};
pub use voice::VoiceSample;
