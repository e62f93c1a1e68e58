//! Voice-sample upload endpoint.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use tracing::{info, warn};
use uuid::Uuid;

use crate::metrics::MetricsRecorder;
use crate::models::{VoiceSample, VoiceUpload};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Public path prefix under which stored samples are served.
pub const UPLOADS_PATH: &str = "/uploads";

/// Registers the upload route with a body limit sized for audio files.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/api/upload-voice",
        post(upload_voice).layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}

/// Accepts a multipart form with a required `file` field holding an mp3 or wav sample.
async fn upload_voice(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VoiceUpload>, HTTPError> {
    let result = store_sample(&state, multipart).await;
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) if e.status().is_client_error() => "rejected",
        Err(_) => "error",
    };
    state.metrics.record_voice_upload(outcome);
    result.map(Json)
}

async fn store_sample(state: &AppState, mut multipart: Multipart) -> Result<VoiceUpload, HTTPError> {
    let mut sample: Option<VoiceSample> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HTTPError::detail(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("voice").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| HTTPError::detail(StatusCode::BAD_REQUEST, e.to_string()))?;
        sample = Some(VoiceSample::new(file_name, content_type, bytes.to_vec()));
    }

    let sample = sample.ok_or_else(|| {
        HTTPError::detail(StatusCode::BAD_REQUEST, "Missing required 'file' field")
    })?;
    let ext = sample.validate_for_storage().map_err(|e| {
        warn!(
            "Rejected voice sample '{}' ({})",
            sample.file_name, sample.content_type
        );
        HTTPError::detail(StatusCode::BAD_REQUEST, e)
    })?;

    let uploads_dir = &state.config.backend.uploads_dir;
    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| HTTPError::detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
    tokio::fs::write(uploads_dir.join(&stored_name), &sample.bytes)
        .await
        .map_err(|e| HTTPError::detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    info!(
        "Stored voice sample '{}' as {} ({} bytes)",
        sample.file_name,
        stored_name,
        sample.bytes.len()
    );

    Ok(VoiceUpload {
        voice_file_url: format!(
            "{}{}/{}",
            state.config.backend.public_url.trim_end_matches('/'),
            UPLOADS_PATH,
            stored_name
        ),
    })
}
