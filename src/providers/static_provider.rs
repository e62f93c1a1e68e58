use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::User;
use crate::providers::Provider;

/// A fixed table of bearer tokens, for local development and tests.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct StaticTokenConfig {
    /// A friendly name for logs.
    pub name: String,
    pub tokens: Vec<StaticTokenEntry>,
}

#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct StaticTokenEntry {
    pub token: String,
    pub id: String,
    #[serde(default)]
    pub email: String,
}

pub struct StaticTokenProvider {
    pub config: StaticTokenConfig,
}

impl StaticTokenProvider {
    pub fn new(config: &StaticTokenConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Provider for StaticTokenProvider {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    fn get_type(&self) -> &str {
        "Bearer"
    }

    async fn authenticate(&self, credentials: &str) -> Result<User, String> {
        debug!("Static token lookup in provider '{}'", self.config.name);
        self.config
            .tokens
            .iter()
            .find(|entry| entry.token == credentials)
            .map(|entry| User::new(entry.id.clone(), entry.email.clone()))
            .ok_or_else(|| "Unknown token".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> StaticTokenProvider {
        StaticTokenProvider::new(&StaticTokenConfig {
            name: "dev".to_string(),
            tokens: vec![StaticTokenEntry {
                token: "t-1".to_string(),
                id: "user-1".to_string(),
                email: "one@example.com".to_string(),
            }],
        })
    }

    #[tokio::test]
    async fn test_known_token() {
        let user = provider().authenticate("t-1").await.unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "one@example.com");
    }

    #[tokio::test]
    async fn test_unknown_token() {
        assert!(provider().authenticate("t-2").await.is_err());
    }
}
