use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::user::User;
use crate::providers::Provider;

/// Validates access tokens locally with the project's shared JWT secret.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct JWTAuthConfig {
    pub name: String,
    pub secret: String,
    /// Expected `aud` claim; Supabase issues `authenticated`.
    pub audience: Option<String>,
}

pub struct JWTProvider {
    pub config: JWTAuthConfig,
}

/// Claims we read from the token.
#[derive(Debug, Serialize, Deserialize, Clone)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

impl JWTProvider {
    pub fn new(config: &JWTAuthConfig) -> Self {
        info!("Creating JWT provider name='{}'", config.name);
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for JWTProvider {
    fn get_type(&self) -> &str {
        "Bearer"
    }

    async fn authenticate(&self, token: &str) -> Result<User, String> {
        debug!("Attempting JWT decode for provider='{}'", self.config.name);

        let header =
            decode_header(token).map_err(|e| format!("Failed to decode JWT header: {}", e))?;
        if !matches!(header.alg, Algorithm::HS256 | Algorithm::HS512) {
            return Err(format!("Unsupported JWT algorithm: {:?}", header.alg));
        }

        let mut validation = Validation::new(header.alg);
        match &self.config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| format!("Failed to decode JWT: {}", e))?;

        let claims = decoded.claims;
        Ok(User::new(claims.sub, claims.email.unwrap_or_default()))
    }

    fn get_name(&self) -> &str {
        &self.config.name
    }
}
