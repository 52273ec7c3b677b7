//! File-upload endpoints
//!
//! Multipart POST handlers for image, video, face-detection, and deepfake
//! screening. Upload bytes live only for the duration of the request; CLI
//! tools see them through a self-deleting scratch file.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::{now_rfc3339, to_json};
use crate::error::ApiError;
use crate::osint;
use crate::osint::media::MediaKind;
use crate::server::state::AppState;
use crate::services::AiProvider;

/// Uploaded file plus any text fields that accompanied it.
struct Upload {
    bytes: Vec<u8>,
    media_type: Option<String>,
}

/// Pull the named file field (and an optional `media_type` text field) out
/// of a multipart body. Missing file field → 400.
async fn read_upload(multipart: &mut Multipart, file_field: &str) -> Result<Upload, ApiError> {
    let mut bytes: Option<Vec<u8>> = None;
    let mut media_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some(name) if name == file_field => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                bytes = Some(data.to_vec());
            }
            Some("media_type") => {
                media_type = field.text().await.ok();
            }
            _ => {}
        }
    }

    let bytes = bytes.ok_or_else(|| {
        ApiError::bad_request(format!(
            "{} file is required",
            capitalize(file_field)
        ))
    })?;

    Ok(Upload { bytes, media_type })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// POST /api/image
pub async fn image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let upload = read_upload(&mut multipart, "image").await?;
    tracing::info!(size_bytes = upload.bytes.len(), "Running image report");

    let report = osint::image::report(&state.runner, &state.settings.tools, &upload.bytes).await;
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            "Analyze this image OSINT data. Provide insights about metadata, faces, and any hidden information.",
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

/// POST /api/video
pub async fn video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let upload = read_upload(&mut multipart, "video").await?;
    tracing::info!(size_bytes = upload.bytes.len(), "Running video report");

    let report = osint::video::report(&state.runner, &state.settings.tools, &upload.bytes).await;
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            "Analyze this video OSINT data. Provide insights about metadata, content, and any hidden information.",
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

/// POST /api/face
pub async fn face(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let upload = read_upload(&mut multipart, "image").await?;
    tracing::info!(size_bytes = upload.bytes.len(), "Running face-detection report");

    let report = osint::media::face_report(&upload.bytes);
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            "Analyze this image for face detection. Provide insights about faces, expressions, and potential identification.",
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

/// POST /api/deepfake
pub async fn deepfake(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let upload = read_upload(&mut multipart, "media").await?;
    let kind = MediaKind::parse(upload.media_type.as_deref().unwrap_or("image"));
    tracing::info!(
        size_bytes = upload.bytes.len(),
        media_type = kind.as_str(),
        "Running deepfake report"
    );

    let report = osint::media::deepfake_report(&upload.bytes, kind);
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            &format!(
                "Analyze this {} for deepfake detection. Provide insights about authenticity and potential manipulation.",
                kind.as_str()
            ),
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "media_type": kind.as_str(),
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}
