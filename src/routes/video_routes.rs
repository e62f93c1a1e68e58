//! Generation backend endpoints.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::metrics::MetricsRecorder;
use crate::models::{VideoRecord, VideoRequest, VideoRequestBody, VideoResponse};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers the generation route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/generate-video", post(generate_video))
}

/// Validates the story source, reserves artifacts and returns their URLs.
async fn generate_video(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VideoResponse>, HTTPError> {
    let started = Instant::now();
    let result = handle(&state, &body).await;
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) if e.status().is_client_error() => "rejected",
        Err(_) => "error",
    };
    state.metrics.record_generation("backend", outcome);
    state
        .metrics
        .record_generation_duration("backend", started.elapsed().as_secs_f64());
    result.map(Json)
}

async fn handle(state: &AppState, body: &[u8]) -> Result<VideoResponse, HTTPError> {
    let body: VideoRequestBody = serde_json::from_slice(body)
        .map_err(|e| HTTPError::detail(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e)))?;
    let request = VideoRequest::try_from(body)
        .map_err(|e| HTTPError::detail(StatusCode::BAD_REQUEST, e.to_string()))?;

    let video = state.generator.generate(&request).await.map_err(|e| {
        error!("Error generating video: {}", e);
        HTTPError::detail(StatusCode::INTERNAL_SERVER_ERROR, e)
    })?;
    info!(
        video_id = video.video_id.as_str(),
        "generated video {}", video.video_url
    );

    if state.store.is_enabled() {
        let record = VideoRecord {
            video_id: video.video_id.clone(),
            timestamp: Utc::now(),
            request: VideoRequestBody::from(request),
            video_url: video.video_url.clone(),
            captions_url: video.captions_url.clone(),
        };
        if let Err(e) = state.store.insert_video(&record).await {
            warn!("Failed to save video metadata: {}", e);
        }
    }

    let mut response = VideoResponse::new(video.video_url, video.captions_url);
    response.scenes = video.scenes;
    Ok(response)
}
