use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Which JSON key carries the message. The edge proxy answers with `error`,
/// the generation backend with `detail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKey {
    Error,
    Detail,
}

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
    key: ErrorKey,
}

impl HTTPError {
    /// Creates a new HTTP error rendered as `{"error": message}`.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
            key: ErrorKey::Error,
        }
    }

    /// Creates a new HTTP error rendered as `{"detail": message}`.
    pub fn detail(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
            key: ErrorKey::Detail,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let body = match self.key {
            ErrorKey::Error => json!({ "error": self.message }),
            ErrorKey::Detail => json!({ "detail": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
