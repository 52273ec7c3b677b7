//! Health and status endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::now_rfc3339;
use crate::server::state::AppState;

/// Response for the main health check endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
}

/// Response for the API status endpoint
#[derive(Serialize)]
pub struct StatusResponse {
    pub api_keys: BTreeMap<&'static str, bool>,
    pub tools: ToolStatus,
    pub timestamp: String,
}

/// Configured CLI tool paths (never secrets)
#[derive(Serialize)]
pub struct ToolStatus {
    pub exiftool: String,
    pub ffprobe: String,
    pub sherlock: Option<String>,
    pub command_timeout_seconds: u64,
}

/// Main health check endpoint
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Provider and tool configuration status
///
/// Reports which API keys are configured (booleans only) and which CLI
/// tools the media lookups will invoke.
///
/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let tools = &state.settings.tools;

    Json(StatusResponse {
        api_keys: state.settings.providers.configured(),
        tools: ToolStatus {
            exiftool: tools.exiftool.clone(),
            ffprobe: tools.ffprobe.clone(),
            sherlock: tools.sherlock.clone(),
            command_timeout_seconds: tools.command_timeout_seconds,
        },
        timestamp: now_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use crate::server::routes::create_router;
    use crate::server::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    async fn get(path: &str) -> (StatusCode, serde_json::Value) {
        let router = create_router(AppState::for_tests());
        let response = router
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, value) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "healthy");
        assert!(value.get("version").is_some());
    }

    #[tokio::test]
    async fn test_status_reports_key_flags_without_values() {
        let (status, value) = get("/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["api_keys"]["shodan"], false);
        assert_eq!(value["tools"]["exiftool"], "exiftool");
    }
}
