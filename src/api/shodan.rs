//! Direct Shodan search endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{now_rfc3339, to_json};
use crate::error::ApiError;
use crate::osint::ToolReport;
use crate::server::state::AppState;
use crate::services::AiProvider;

/// Search flavor selected by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Host,
    Search,
}

#[derive(Debug, Deserialize)]
pub struct ShodanRequest {
    pub query: Option<String>,
    #[serde(rename = "type", default)]
    pub search_type: SearchType,
}

/// POST /api/shodan
///
/// Unlike the per-category endpoints, a missing Shodan key here is a 400:
/// the whole endpoint is the lookup, so there is nothing best-effort left
/// to return without it.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<ShodanRequest>,
) -> Result<Json<Value>, ApiError> {
    let query = req
        .query
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Search query is required"))?;

    if !state.shodan.is_configured() {
        return Err(ApiError::NotConfigured("Shodan"));
    }

    tracing::info!(query = %query, search_type = ?req.search_type, "Running Shodan search");

    let mut report = ToolReport::new();
    let (section, result) = match req.search_type {
        SearchType::Host => ("Shodan_Host_Search", state.shodan.host(&query).await),
        SearchType::Search => ("Shodan_General_Search", state.shodan.search(&query).await),
    };
    report.insert(section.to_string(), result);

    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            &format!(
                "Analyze this Shodan search data for '{}'. Provide insights about exposed services, potential vulnerabilities, and security recommendations.",
                query
            ),
            Some(&results),
        )
        .await;

    let search_type = match req.search_type {
        SearchType::Host => "host",
        SearchType::Search => "search",
    };

    Ok(Json(json!({
        "query": query,
        "search_type": search_type,
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::routes::create_router;
    use crate::server::state::AppState;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    #[test]
    fn test_search_type_default_is_host() {
        let req: ShodanRequest = serde_json::from_str(r#"{"query": "8.8.8.8"}"#).unwrap();
        assert_eq!(req.search_type, SearchType::Host);

        let req: ShodanRequest =
            serde_json::from_str(r#"{"query": "apache", "type": "search"}"#).unwrap();
        assert_eq!(req.search_type, SearchType::Search);
    }

    #[tokio::test]
    async fn test_unconfigured_key_is_400() {
        let router = create_router(AppState::for_tests());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/shodan")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query": "8.8.8.8"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"], "Shodan API key not configured");
    }
}
