use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{SceneRecord, StoryRecord, VideoRecord};
use crate::store::Store;

/// The config struct for MongoDB connections.
/// Contains the URI and database name.
#[derive(Deserialize, Serialize, JsonSchema, Debug)]
pub struct MongoDBConfig {
    pub uri: String,
    pub database: String,
}

/// A concrete `Store` implementation that uses MongoDB.
///
/// Stories, scenes and videos live in their own collections; scenes point
/// at their story through `story_id`, the hex form of the story's ObjectId.
pub struct MongoDBStore {
    story_collection: Collection<StoryDocument>,
    scene_collection: Collection<SceneRecord>,
    video_collection: Collection<VideoRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct StoryDocument {
    _id: ObjectId,
    #[serde(flatten)]
    story: StoryRecord,
}

impl MongoDBStore {
    /// Creates a new `MongoDBStore` from the given config.
    /// It initializes client connections, sets up indexes, etc.
    pub async fn new(config: &MongoDBConfig) -> Result<Self, String> {
        info!("Connecting to MongoDB at URI: {}", config.uri);

        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| format!("Failed to parse MongoDB URI: {}", e))?;
        client_options.app_name = Some("shortsgen".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| format!("Failed to create MongoDB client: {}", e))?;

        info!("MongoDB connection established successfully.");

        let database = client.database(&config.database);
        let story_collection = database.collection::<StoryDocument>("stories");
        let scene_collection = database.collection::<SceneRecord>("scenes");
        let video_collection = database.collection::<VideoRecord>("videos");

        // Scenes are always read back per story
        let mut scenes_by_story = IndexModel::default();
        scenes_by_story.keys = doc! { "story_id": 1, "start_time": 1 };
        scene_collection
            .create_index(scenes_by_story, None)
            .await
            .map_err(|e| format!("Failed to create index on scenes.story_id: {}", e))?;

        let mut unique_on_video_id = IndexModel::default();
        unique_on_video_id.keys = doc! { "video_id": 1 };
        unique_on_video_id.options = Some(IndexOptions::builder().unique(true).build());
        video_collection
            .create_index(unique_on_video_id, None)
            .await
            .map_err(|e| format!("Failed to create unique index on video_id: {}", e))?;

        Ok(Self {
            story_collection,
            scene_collection,
            video_collection,
        })
    }

    fn story_to_doc(story: &StoryRecord) -> StoryDocument {
        StoryDocument {
            _id: ObjectId::new(),
            story: story.clone(),
        }
    }
}

#[async_trait]
impl Store for MongoDBStore {
    async fn insert_story(&self, story: &StoryRecord) -> Result<String, String> {
        let story_doc = Self::story_to_doc(story);
        let id = story_doc._id.to_hex();
        self.story_collection
            .insert_one(story_doc, None)
            .await
            .map_err(|e| format!("Failed to insert story: {}", e))?;
        debug!("Inserted story {}", id);
        Ok(id)
    }

    async fn insert_scenes(&self, scenes: &[SceneRecord]) -> Result<(), String> {
        if scenes.is_empty() {
            return Ok(());
        }
        self.scene_collection
            .insert_many(scenes, None)
            .await
            .map_err(|e| format!("Failed to insert scenes: {}", e))?;
        Ok(())
    }

    async fn insert_video(&self, video: &VideoRecord) -> Result<(), String> {
        self.video_collection
            .insert_one(video, None)
            .await
            .map_err(|e| format!("Failed to insert video metadata: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_doc_keeps_fields_flat() {
        let story = StoryRecord {
            title: "The fox".to_string(),
            user_id: "u1".to_string(),
        };
        let document = mongodb::bson::to_document(&MongoDBStore::story_to_doc(&story)).unwrap();
        assert_eq!(document.get_str("title").unwrap(), "The fox");
        assert_eq!(document.get_str("user_id").unwrap(), "u1");
        assert!(document.get_object_id("_id").is_ok());
    }
}
