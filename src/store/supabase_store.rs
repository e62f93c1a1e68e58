use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::{SceneRecord, StoryRecord, VideoRecord};
use crate::store::Store;

/// Connection settings for the Supabase REST (PostgREST) interface.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct SupabaseStoreConfig {
    pub url: String,
    /// Service-role key; bypasses row level security for server-side writes.
    pub service_key: String,
}

/// Writes metadata into the `stories`, `scenes` and `videos` tables.
pub struct SupabaseStore {
    rest_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseStoreConfig) -> Result<Self, String> {
        if config.url.is_empty() {
            return Err("Supabase store needs a url".to_string());
        }
        Ok(Self {
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            service_key: config.service_key.clone(),
            client: reqwest::Client::new(),
        })
    }

    async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        rows: &T,
        return_rows: bool,
    ) -> Result<Value, String> {
        let prefer = if return_rows {
            "return=representation"
        } else {
            "return=minimal"
        };
        let response = self
            .client
            .post(format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", prefer)
            .json(rows)
            .send()
            .await
            .map_err(|e| format!("Failed to reach Supabase: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Insert into '{}' failed ({}): {}", table, status, body));
        }
        if !return_rows {
            return Ok(Value::Null);
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| format!("Failed to parse Supabase response: {}", e))
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn insert_story(&self, story: &StoryRecord) -> Result<String, String> {
        let rows = self.insert("stories", std::slice::from_ref(story), true).await?;
        // PostgREST answers with the inserted rows; ids may be numeric or uuid
        let id = match &rows[0]["id"] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err("Story insert returned no id".to_string()),
        };
        debug!("Inserted story {}", id);
        Ok(id)
    }

    async fn insert_scenes(&self, scenes: &[SceneRecord]) -> Result<(), String> {
        if scenes.is_empty() {
            return Ok(());
        }
        self.insert("scenes", scenes, false).await.map(|_| ())
    }

    async fn insert_video(&self, video: &VideoRecord) -> Result<(), String> {
        self.insert("videos", std::slice::from_ref(video), false)
            .await
            .map(|_| ())
    }
}
