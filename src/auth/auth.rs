use std::time::Duration;

use futures::future::{select_ok, FutureExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::models::User;
use crate::providers::{create_auth_provider, Provider, ProviderConfig};

/// Holds all identity providers used to authenticate proxy callers.
pub struct Auth {
    pub providers: Vec<Box<dyn Provider>>,
    config: AuthConfig,
}

impl Auth {
    /// Initialize the Auth struct by creating providers from the configurations.
    pub fn new(provider_config: &[ProviderConfig], config: AuthConfig) -> Self {
        info!("Creating identity providers...");
        let providers = provider_config.iter().map(create_auth_provider).collect();
        Auth::with_providers(providers, config)
    }

    pub fn with_providers(providers: Vec<Box<dyn Provider>>, config: AuthConfig) -> Self {
        Auth { providers, config }
    }

    /// Authenticates a caller using the first provider that succeeds. Each provider
    /// call is wrapped in a timeout so a slow identity service won't block the others.
    /// If all fail or time out, returns None.
    pub async fn authenticate(&self, auth_header: &str) -> Option<User> {
        let parts: Vec<&str> = auth_header.split_whitespace().collect();
        if parts.len() != 2 {
            warn!("Authorization header has an invalid format");
            return None;
        }

        let auth_type = parts[0];
        let auth_credentials = parts[1];

        debug!("Authenticating with auth_type='{}'", auth_type);

        let valid_providers: Vec<_> = self
            .providers
            .iter()
            .filter(|p| p.get_type().eq_ignore_ascii_case(auth_type))
            .collect();

        if valid_providers.is_empty() {
            warn!("No providers found for auth type: '{}'", auth_type);
            return None;
        }

        let timeout_duration = Duration::from_millis(self.config.timeout_in_ms);
        let futures = valid_providers
            .iter()
            .map(|provider| {
                let name = provider.get_name().to_owned();
                async move {
                    match timeout(timeout_duration, provider.authenticate(auth_credentials)).await {
                        Ok(Ok(user)) => Ok((name, user)),
                        Ok(Err(e)) => Err(format!("Provider '{}' failed: {}", name, e)),
                        Err(_) => Err(format!("Provider '{}' timed out", name)),
                    }
                }
                .boxed()
            })
            .collect::<Vec<_>>();

        // select_ok returns on the first successful authentication, dropping unused futures.
        let outcome = match select_ok(futures).await {
            Ok(((provider_name, user), _remaining)) => {
                info!(
                    "Provider '{}' authenticated user '{}'",
                    provider_name, user.id
                );
                Some(user)
            }
            Err(e) => {
                warn!("All providers failed; last error: {}", e);
                None
            }
        };
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::static_provider::{StaticTokenConfig, StaticTokenEntry};

    struct SlowProvider;

    #[async_trait::async_trait]
    impl Provider for SlowProvider {
        fn get_name(&self) -> &str {
            "slow"
        }

        fn get_type(&self) -> &str {
            "Bearer"
        }

        async fn authenticate(&self, _credentials: &str) -> Result<User, String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(User::new("slow-user", ""))
        }
    }

    fn static_config() -> ProviderConfig {
        ProviderConfig::Static(StaticTokenConfig {
            name: "dev".to_string(),
            tokens: vec![StaticTokenEntry {
                token: "abc".to_string(),
                id: "user-abc".to_string(),
                email: "abc@example.com".to_string(),
            }],
        })
    }

    #[tokio::test]
    async fn test_bearer_token_authenticates() {
        let auth = Auth::new(&[static_config()], AuthConfig::default());
        let user = auth.authenticate("Bearer abc").await.unwrap();
        assert_eq!(user.id, "user-abc");
    }

    #[tokio::test]
    async fn test_malformed_header_is_rejected() {
        let auth = Auth::new(&[static_config()], AuthConfig::default());
        assert!(auth.authenticate("abc").await.is_none());
        assert!(auth.authenticate("Bearer a b").await.is_none());
    }

    #[tokio::test]
    async fn test_unmatched_scheme_is_rejected() {
        let auth = Auth::new(&[static_config()], AuthConfig::default());
        assert!(auth.authenticate("Basic abc").await.is_none());
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let auth = Auth::with_providers(
            vec![Box::new(SlowProvider)],
            AuthConfig { timeout_in_ms: 50 },
        );
        assert!(auth.authenticate("Bearer anything").await.is_none());
    }
}
