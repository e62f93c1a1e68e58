use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::error::ApiError;
use crate::models::User;

/// User object as returned by the identity service.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Empty when the e-mail already belongs to an account.
    #[serde(default)]
    pub identities: Option<Vec<Value>>,
}

impl IdentityUser {
    pub fn to_user(&self) -> User {
        User::new(self.id.clone(), self.email.clone().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySession {
    pub access_token: String,
    pub user: IdentityUser,
}

/// What a sign-up call produced.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Account created, e-mail confirmation pending.
    ConfirmationSent(IdentityUser),
    /// Confirmation disabled on the service: the user is signed in right away.
    SignedIn(IdentitySession),
}

/// Minimal GoTrue client for e-mail/password accounts.
#[derive(Clone)]
pub struct IdentityClient {
    url: String,
    anon_key: String,
    http: reqwest::Client,
}

impl IdentityClient {
    pub fn new(
        url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(IdentityClient {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            http: builder.build().map_err(ApiError::transport)?,
        })
    }

    async fn post(&self, path: &str, body: Value, fallback: &str) -> Result<Value, ApiError> {
        let endpoint = format!("{}{}", self.url, path);
        debug!("POST {}", endpoint);
        let response = self
            .http
            .post(endpoint)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Identity service unreachable: {}", e);
                ApiError::transport(e)
            })?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, fallback).await);
        }
        response.json().await.map_err(ApiError::transport)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ApiError> {
        let body = self
            .post(
                "/auth/v1/signup",
                json!({ "email": email, "password": password }),
                "An error occurred during sign up",
            )
            .await?;

        // With confirmations on the user comes back bare, otherwise wrapped in a session.
        if body.get("access_token").is_some() {
            let session = serde_json::from_value(body)
                .map_err(|e| ApiError::new(format!("Unexpected sign-up response: {}", e), 0))?;
            return Ok(SignUpOutcome::SignedIn(session));
        }
        let user = match body.get("user") {
            Some(user) => serde_json::from_value(user.clone()),
            None => serde_json::from_value(body),
        }
        .map_err(|e| ApiError::new(format!("Unexpected sign-up response: {}", e), 0))?;
        Ok(SignUpOutcome::ConfirmationSent(user))
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, ApiError> {
        let body = self
            .post(
                "/auth/v1/token?grant_type=password",
                json!({ "email": email, "password": password }),
                "Login failed",
            )
            .await?;
        serde_json::from_value(body)
            .map_err(|e| ApiError::new(format!("Unexpected sign-in response: {}", e), 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_sign_in_returns_session() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded(
                "grant_type".to_string(),
                "password".to_string(),
            ))
            .match_header("apikey", "anon")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "jwt", "user": {"id": "u1", "email": "a@b.c"}}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url(), "anon", None).unwrap();
        let session = client.sign_in_with_password("a@b.c", "secret1").await.unwrap();
        m.assert_async().await;
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.user.to_user(), User::new("u1", "a@b.c"));
    }

    #[tokio::test]
    async fn test_sign_in_error_message_from_description() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "invalid_grant", "error_description": "Invalid login credentials"}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url(), "anon", None).unwrap();
        let err = client
            .sign_in_with_password("a@b.c", "wrong-pass")
            .await
            .unwrap_err();
        m.assert_async().await;
        assert_eq!(err, ApiError::new("Invalid login credentials", 400));
    }

    #[tokio::test]
    async fn test_sign_up_bare_user() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "u2", "email": "new@b.c", "identities": []}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url(), "anon", None).unwrap();
        let outcome = client.sign_up("new@b.c", "secret1").await.unwrap();
        m.assert_async().await;
        match outcome {
            SignUpOutcome::ConfirmationSent(user) => {
                assert_eq!(user.id, "u2");
                assert_eq!(user.identities.map(|i| i.len()), Some(0));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
