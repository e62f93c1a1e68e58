use std::net::SocketAddr;

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::StatusCode;
use http::request::Parts;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// An authenticated user as reported by the identity service.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Request extractor for User.
///
/// A request without an `Authorization` header is rejected separately from one
/// whose credentials no provider accepts, so callers can tell the two apart.
#[async_trait]
impl FromRequestParts<AppState> for User {
    type Rejection = HTTPError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<User, HTTPError> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .trim()
            .to_string();

        if auth_header.is_empty() {
            return Err(HTTPError::new(
                StatusCode::UNAUTHORIZED,
                "Missing authorization header",
            ));
        }

        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| {
                warn!("Unable to determine client IP address.");
                "unknown".to_string()
            });
        debug!("Authenticating request from IP='{}'", client_ip);

        match state.auth.authenticate(&auth_header).await {
            Some(user) => Ok(user),
            None => Err(HTTPError::new(StatusCode::UNAUTHORIZED, "Unauthorized")),
        }
    }
}
