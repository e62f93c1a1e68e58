use serde_json::Value;

/// Failure of a client call: a user-facing message and the HTTP status.
/// Status 0 means the request never got an HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        ApiError {
            message: message.into(),
            status,
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        ApiError {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
        }
    }

    /// Builds an error from a non-success response, taking the message from
    /// the body's `message`, `error`, `msg` or `detail` field when present.
    pub async fn from_response(response: reqwest::Response, fallback: &str) -> Self {
        let status = response.status().as_u16();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| message_from_body(&body))
            .unwrap_or_else(|| fallback.to_string());
        ApiError { message, status }
    }
}

pub(crate) fn message_from_body(body: &Value) -> Option<String> {
    ["message", "error_description", "msg", "error", "detail"]
        .iter()
        .find_map(|key| body[*key].as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
}
