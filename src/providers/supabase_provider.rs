use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::utils::log_throttle::should_emit;
use crate::{models::user::User, providers::Provider};
use cached::Return;
#[allow(unused_imports)]
use cached::proc_macro::cached;

const CACHE_HIT_LOG_WINDOW: Duration = Duration::from_secs(30);

/// The config needed to validate access tokens against a Supabase project.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct SupabaseProviderConfig {
    pub name: String,
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub anon_key: String,
}

/// A provider that asks the Supabase auth service who owns a bearer token.
pub struct SupabaseProvider {
    pub config: SupabaseProviderConfig,
}

impl SupabaseProvider {
    pub fn new(config: &SupabaseProviderConfig) -> Self {
        info!(
            "Creating Supabase provider name='{}' for '{}'",
            config.name, config.url
        );
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for SupabaseProvider {
    fn get_type(&self) -> &str {
        "Bearer"
    }

    async fn authenticate(&self, token: &str) -> Result<User, String> {
        let cached_user = query(
            self.config.url.clone(),
            self.config.anon_key.clone(),
            token.to_string(),
        )
        .await?;
        if cached_user.was_cached {
            if let Some(suppressed_count) =
                should_emit("providers.supabase.cache.hit", CACHE_HIT_LOG_WINDOW)
            {
                debug!(
                    event_name = "providers.supabase.cache.hit",
                    event_domain = "providers",
                    provider_name = self.config.name.as_str(),
                    cache_result = "hit",
                    cache_ttl_seconds = 60,
                    suppressed_count,
                    "provider authentication result served from cache"
                );
            }
        }
        Ok((*cached_user).clone())
    }

    fn get_name(&self) -> &str {
        &self.config.name
    }
}

/// Calls `GET {url}/auth/v1/user` with the caller's token, returning the User on success.
#[cfg_attr(
    not(test),
    cached(
        time = 60,
        result = true,
        with_cached_flag = true,
        sync_writes = true
    )
)]
async fn query(url: String, anon_key: String, token: String) -> Result<Return<User>, String> {
    let client = reqwest::Client::new();
    let endpoint = format!("{}/auth/v1/user", url.trim_end_matches('/'));

    debug!("Sending Supabase user lookup to: {}", endpoint);
    let response = client
        .get(&endpoint)
        .header("apikey", anon_key)
        .bearer_auth(&token)
        .send()
        .await
        .map_err(|e| format!("Error sending request: {}", e))?;

    let status = response.status();
    if status.is_success() {
        let user_info: Value = response
            .json()
            .await
            .map_err(|e| format!("Error parsing JSON: {}", e))?;

        let id = user_info["id"]
            .as_str()
            .filter(|id| !id.is_empty())
            .ok_or("User lookup returned no id")?;
        let email = user_info["email"].as_str().unwrap_or_default();
        Ok(Return::new(User::new(id, email)))
    } else if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
    {
        Err("Invalid access token".to_string())
    } else {
        Err(format!("Unexpected status code: {}", status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_supabase_provider_success() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/v1/user")
            .match_header("apikey", "anon")
            .match_header("authorization", "Bearer good-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "0b5c", "email": "ada@example.com"}"#)
            .create_async()
            .await;

        let provider = SupabaseProvider::new(&SupabaseProviderConfig {
            name: "supabase".to_string(),
            url: server.url(),
            anon_key: "anon".to_string(),
        });
        let user = provider.authenticate("good-token").await.unwrap();
        m.assert_async().await;
        assert_eq!(user, User::new("0b5c", "ada@example.com"));
    }

    #[tokio::test]
    async fn test_supabase_provider_rejected_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/auth/v1/user")
            .match_header("authorization", Matcher::Any)
            .with_status(401)
            .with_body(r#"{"msg": "invalid JWT"}"#)
            .create_async()
            .await;

        let result = query(server.url(), "anon".to_string(), "bad".to_string()).await;
        m.assert_async().await;
        assert_eq!(result.err().as_deref(), Some("Invalid access token"));
    }
}
