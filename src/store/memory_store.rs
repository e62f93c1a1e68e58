use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::Store;
use crate::models::{SceneRecord, StoryRecord, VideoRecord};

/// Rows kept per collection before the oldest are dropped.
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Keeps metadata in process memory for local runs and tests. Nothing
/// survives a restart, and each collection holds at most `max_rows` entries.
pub struct MemoryStore {
    max_rows: usize,
    stories: Mutex<VecDeque<(String, StoryRecord)>>,
    scenes: Mutex<VecDeque<SceneRecord>>,
    videos: Mutex<VecDeque<VideoRecord>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::with_max_rows(DEFAULT_MAX_ROWS)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rows(max_rows: usize) -> Self {
        MemoryStore {
            max_rows: max_rows.max(1),
            stories: Mutex::new(VecDeque::new()),
            scenes: Mutex::new(VecDeque::new()),
            videos: Mutex::new(VecDeque::new()),
        }
    }

    pub fn stories(&self) -> Vec<(String, StoryRecord)> {
        snapshot(&self.stories)
    }

    pub fn scenes(&self) -> Vec<SceneRecord> {
        snapshot(&self.scenes)
    }

    pub fn videos(&self) -> Vec<VideoRecord> {
        snapshot(&self.videos)
    }

    fn append<T: Clone>(&self, rows: &Mutex<VecDeque<T>>, new: &[T]) -> Result<(), String> {
        let mut rows = rows
            .lock()
            .map_err(|e| format!("Store lock poisoned: {}", e))?;
        rows.extend(new.iter().cloned());
        let excess = rows.len().saturating_sub(self.max_rows);
        rows.drain(..excess);
        Ok(())
    }
}

fn snapshot<T: Clone>(rows: &Mutex<VecDeque<T>>) -> Vec<T> {
    rows.lock()
        .map(|r| r.iter().cloned().collect())
        .unwrap_or_default()
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_story(&self, story: &StoryRecord) -> Result<String, String> {
        let id = Uuid::new_v4().to_string();
        self.append(&self.stories, &[(id.clone(), story.clone())])?;
        Ok(id)
    }

    async fn insert_scenes(&self, scenes: &[SceneRecord]) -> Result<(), String> {
        self.append(&self.scenes, scenes)
    }

    async fn insert_video(&self, video: &VideoRecord) -> Result<(), String> {
        self.append(&self.videos, std::slice::from_ref(video))
    }
}
