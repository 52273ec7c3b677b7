//! Report download endpoint

use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;

/// POST /api/download/:analysis_type
///
/// Echoes the posted report back with attachment headers so the browser
/// saves it as a timestamped JSON file. Nothing is persisted server-side.
pub async fn download(
    Path(analysis_type): Path<String>,
    Json(data): Json<Value>,
) -> Result<Response, ApiError> {
    if is_empty_payload(&data) {
        return Err(ApiError::bad_request("No data provided"));
    }

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("osint_{}_{}.json", analysis_type, timestamp);

    let headers = [(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename={}", filename),
    )];

    Ok((headers, Json(data)).into_response())
}

/// There is nothing to download for `null`, `{}`, `[]`, or `""`.
fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
