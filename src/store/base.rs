use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::{
    memory_store::MemoryStore, mongodb_store::MongoDBStore, no_store::NoStore,
    supabase_store::SupabaseStore,
};
use crate::config::{StoreBackend, StoreConfig};
use crate::models::{SceneRecord, StoryRecord, VideoRecord};

/// The Store trait abstracts metadata persistence for stories, scenes and videos.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a story and returns its id.
    async fn insert_story(&self, story: &StoryRecord) -> Result<String, String>;
    async fn insert_scenes(&self, scenes: &[SceneRecord]) -> Result<(), String>;
    async fn insert_video(&self, video: &VideoRecord) -> Result<(), String>;
    fn is_enabled(&self) -> bool {
        // NoStore returns false so callers can skip persistence quietly
        true
    }
}

/// Creates a concrete store implementation based on the StoreConfig.
/// If `store.enabled = false`, returns NoStore. Otherwise, picks the specified backend.
pub async fn create_store(config: &StoreConfig) -> Arc<dyn Store> {
    if !config.enabled {
        info!("Metadata store is disabled. Using NoStore.");
        return Arc::new(NoStore::new());
    }

    match &config.backend {
        Some(StoreBackend::MongoDB(mongo_config)) => match MongoDBStore::new(mongo_config).await {
            Ok(store) => {
                info!("Successfully created MongoDB store.");
                Arc::new(store)
            }
            Err(e) => {
                error!("Failed to create MongoDB store: {}", e);
                std::process::exit(1);
            }
        },
        Some(StoreBackend::Supabase(supabase_config)) => {
            match SupabaseStore::new(supabase_config) {
                Ok(store) => {
                    info!("Successfully created Supabase store.");
                    Arc::new(store)
                }
                Err(e) => {
                    error!("Failed to create Supabase store: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(StoreBackend::Memory) => {
            info!("Using in-memory metadata store.");
            Arc::new(MemoryStore::new())
        }
        None => {
            error!("Store is enabled, but no backend config is provided!");
            std::process::exit(1);
        }
    }
}
