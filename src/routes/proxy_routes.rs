//! Edge proxy: authenticates the caller, forwards the request to the
//! generation backend and records story metadata on the way back.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ProxyConfig;
use crate::metrics::MetricsRecorder;
use crate::models::{
    ProxyPayload, Scene, SceneRecord, StoryRecord, User, VideoRequest, VideoRequestBody,
    VideoResponse,
};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;
use crate::utils::log_throttle::should_emit;

pub const PROXY_PATH: &str = "/functions/v1/generate-video";

const STORE_FAILURE_LOG_WINDOW: Duration = Duration::from_secs(60);

/// Registers the proxy route and its preflight.
pub fn routes() -> Router<AppState> {
    Router::new().route(PROXY_PATH, post(generate_video).options(preflight))
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            ("Access-Control-Allow-Origin", "*"),
            (
                "Access-Control-Allow-Headers",
                "authorization, x-client-info, apikey, content-type",
            ),
        ],
    )
}

async fn generate_video(
    user: User,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VideoResponse>, HTTPError> {
    let started = Instant::now();
    let result = relay(&state, &user, &body).await;
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) if e.status().is_client_error() => "rejected",
        Err(_) => "error",
    };
    state.metrics.record_generation("proxy", outcome);
    state
        .metrics
        .record_generation_duration("proxy", started.elapsed().as_secs_f64());
    result.map(Json)
}

async fn relay(state: &AppState, user: &User, body: &[u8]) -> Result<VideoResponse, HTTPError> {
    let proxy = state.config.proxy.as_ref().ok_or_else(|| {
        HTTPError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Proxy upstream is not configured",
        )
    })?;

    let body: VideoRequestBody = serde_json::from_slice(body).map_err(|e| {
        error!("Edge function error: {}", e);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let request = VideoRequest::try_from(body).map_err(|e| {
        debug!("Rejecting proxy request: {}", e);
        HTTPError::new(StatusCode::BAD_REQUEST, "Missing required parameters")
    })?;

    let payload = ProxyPayload {
        user_id: user.id.clone(),
        request,
    };
    let upstream = forward(state, proxy, &payload).await.map_err(|e| {
        error!("Edge function error: {}", e);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, e)
    })?;
    info!(
        user_id = user.id.as_str(),
        "upstream generated {}", upstream.video_url
    );

    persist_metadata(state, &payload, &upstream).await;

    Ok(VideoResponse::new(upstream.video_url, upstream.captions_url))
}

/// Sends the payload to the generation backend, authenticating with the service key.
async fn forward(
    state: &AppState,
    proxy: &ProxyConfig,
    payload: &ProxyPayload,
) -> Result<VideoResponse, String> {
    let url = format!(
        "{}/api/generate-video",
        proxy.upstream_url.trim_end_matches('/')
    );
    let started = Instant::now();
    let response = state
        .http
        .post(&url)
        .bearer_auth(&proxy.service_key)
        .json(payload)
        .send()
        .await;

    let response = match response {
        Ok(r) => r,
        Err(e) => {
            state
                .metrics
                .record_upstream_call("unreachable", started.elapsed().as_secs_f64());
            return Err(format!("Failed to reach generation backend: {}", e));
        }
    };

    let status = response.status();
    if !status.is_success() {
        state
            .metrics
            .record_upstream_call("error", started.elapsed().as_secs_f64());
        let detail = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| v["detail"].as_str().map(str::to_string));
        return Err(detail.unwrap_or_else(|| format!("Python API error: {}", status.as_u16())));
    }

    let parsed = response
        .json::<UpstreamResponse>()
        .await
        .map(UpstreamResponse::into_video_response)
        .map_err(|e| format!("Invalid response from generation backend: {}", e));
    state
        .metrics
        .record_upstream_call("success", started.elapsed().as_secs_f64());
    parsed
}

/// Backend answer as the proxy reads it: the URLs must be there, scenes are
/// only metadata and unreadable entries are skipped.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamResponse {
    video_url: String,
    captions_url: String,
    #[serde(default)]
    scenes: Option<Vec<Value>>,
}

impl UpstreamResponse {
    fn into_video_response(self) -> VideoResponse {
        let raw_scenes = self.scenes.unwrap_or_default();
        let total = raw_scenes.len();
        let scenes: Vec<Scene> = raw_scenes
            .into_iter()
            .filter_map(|scene| serde_json::from_value(scene).ok())
            .collect();
        if scenes.len() < total {
            warn!(
                "Skipping {} unreadable scene(s) from generation backend",
                total - scenes.len()
            );
        }
        let mut response = VideoResponse::new(self.video_url, self.captions_url);
        response.scenes = scenes;
        response
    }
}

/// Best-effort write of the story and its scenes. Failures are logged only.
async fn persist_metadata(state: &AppState, payload: &ProxyPayload, upstream: &VideoResponse) {
    if !state.store.is_enabled() {
        return;
    }

    let story = StoryRecord::for_request(&payload.request, &payload.user_id);
    let story_id = match state.store.insert_story(&story).await {
        Ok(id) => id,
        Err(e) => {
            log_store_failure("Error creating story", &e);
            return;
        }
    };

    if upstream.scenes.is_empty() {
        return;
    }
    let scenes: Vec<SceneRecord> = upstream
        .scenes
        .iter()
        .map(|scene| SceneRecord::from_scene(&story_id, scene))
        .collect();
    if let Err(e) = state.store.insert_scenes(&scenes).await {
        log_store_failure("Error creating scenes", &e);
    }
}

fn log_store_failure(what: &str, err: &str) {
    if let Some(suppressed_count) = should_emit("proxy.store.failure", STORE_FAILURE_LOG_WINDOW) {
        warn!(
            event_name = "proxy.store.failure",
            event_domain = "store",
            suppressed_count,
            "{}: {}",
            what,
            err
        );
    }
}
