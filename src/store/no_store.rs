use super::Store;
use crate::models::{SceneRecord, StoryRecord, VideoRecord};
use async_trait::async_trait;

/// A no-op store that always returns an error if called,
/// indicating the store is disabled.
pub struct NoStore;

impl NoStore {
    pub fn new() -> Self {
        NoStore
    }
}

impl Default for NoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for NoStore {
    async fn insert_story(&self, _story: &StoryRecord) -> Result<String, String> {
        Err("Metadata store is disabled".into())
    }

    async fn insert_scenes(&self, _scenes: &[SceneRecord]) -> Result<(), String> {
        Err("Metadata store is disabled".into())
    }

    async fn insert_video(&self, _video: &VideoRecord) -> Result<(), String> {
        Err("Metadata store is disabled".into())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
