//! Direct AI analysis endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::now_rfc3339;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::services::AiProvider;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub provider: Option<String>,
    pub prompt: Option<String>,
    pub results: Option<Value>,
}

/// POST /api/ai/analyze
///
/// Lets a client run an ad-hoc prompt (optionally with a previously
/// captured report) through any configured provider. Defaults to OpenAI.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Value>, ApiError> {
    let prompt = req
        .prompt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Prompt is required"))?;

    let provider = match req.provider.as_deref() {
        None => AiProvider::OpenAi,
        Some(name) => name
            .parse::<AiProvider>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
    };

    tracing::info!(provider = %provider, "Running ad-hoc AI analysis");

    let analysis = state
        .ai
        .analyze(provider, &prompt, req.results.as_ref())
        .await;

    Ok(Json(json!({
        "provider": provider.to_string(),
        "analysis": analysis,
        "timestamp": now_rfc3339(),
    })))
}

#[cfg(test)]
mod tests {
    use crate::server::routes::create_router;
    use crate::server::state::AppState;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    async fn post(body: &str) -> (StatusCode, serde_json::Value) {
        let router = create_router(AppState::for_tests());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_prompt_is_400() {
        let (status, _) = post("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_provider_is_400() {
        let (status, value) = post(r#"{"provider": "llama", "prompt": "hi"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(value["error"].as_str().unwrap().contains("Unknown AI provider"));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_graceful_200() {
        let (status, value) = post(r#"{"prompt": "summarize"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["provider"], "openai");
        assert!(value["analysis"]["error"]
            .as_str()
            .unwrap()
            .contains("API key not configured"));
    }
}
