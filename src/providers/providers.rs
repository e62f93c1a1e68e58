use super::{
    jwt_provider::{JWTAuthConfig, JWTProvider},
    static_provider::{StaticTokenConfig, StaticTokenProvider},
    supabase_provider::{SupabaseProvider, SupabaseProviderConfig},
};
use crate::models::user::User;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration options for each identity provider.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    #[serde(rename = "supabase")]
    Supabase(SupabaseProviderConfig),
    #[serde(rename = "jwt")]
    Jwt(JWTAuthConfig),
    #[serde(rename = "static")]
    Static(StaticTokenConfig),
}

/// An identity provider must be able to return a User or an error.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_type(&self) -> &str;
    async fn authenticate(&self, credentials: &str) -> Result<User, String>;
}

/// Create an identity provider from a given config.
pub fn create_auth_provider(config: &ProviderConfig) -> Box<dyn Provider> {
    match config {
        ProviderConfig::Supabase(cfg) => Box::new(SupabaseProvider::new(cfg)),
        ProviderConfig::Jwt(cfg) => Box::new(JWTProvider::new(cfg)),
        ProviderConfig::Static(cfg) => Box::new(StaticTokenProvider::new(cfg)),
    }
}
