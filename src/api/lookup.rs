//! JSON lookup endpoints
//!
//! One POST handler per identifier category. Each body carries exactly one
//! required field; a missing or blank field is the only way to get a 400.
//! The report itself is always best-effort: failed sub-lookups are recorded
//! inside `results` and the handler still answers 200.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{now_rfc3339, to_json};
use crate::error::ApiError;
use crate::osint;
use crate::server::state::AppState;
use crate::services::AiProvider;

#[derive(Debug, Deserialize)]
pub struct PhoneRequest {
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IpRequest {
    pub ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebsiteRequest {
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SocialRequest {
    pub username: Option<String>,
}

fn require(field: Option<String>, message: &str) -> Result<String, ApiError> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

/// POST /api/phone
pub async fn phone(
    State(state): State<AppState>,
    Json(req): Json<PhoneRequest>,
) -> Result<Json<Value>, ApiError> {
    let number = require(req.phone_number, "Phone number is required")?;
    tracing::info!(phone = %number, "Running phone report");

    let report = osint::phone::report(&state.http, &state.settings.providers, &number).await;
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::Gemini,
            &format!(
                "Analyze this phone number OSINT data for {}. Provide insights, patterns, and recommendations.",
                number
            ),
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "phone_number": number,
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

/// POST /api/email
pub async fn email(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = require(req.email, "Email is required")?;
    tracing::info!(email = %email, "Running email report");

    let report = osint::email::report(&state.http, &state.settings.providers, &email).await;
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            &format!(
                "Analyze this email OSINT data for {}. Provide insights, patterns, and recommendations.",
                email
            ),
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "email": email,
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

/// POST /api/ip
pub async fn ip(
    State(state): State<AppState>,
    Json(req): Json<IpRequest>,
) -> Result<Json<Value>, ApiError> {
    let ip = require(req.ip_address, "IP address is required")?;
    tracing::info!(ip = %ip, "Running IP report");

    let report = osint::ip::report(&state.http, &state.shodan, &ip).await;
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            &format!(
                "Analyze this IP address OSINT data for {}. Provide insights about geolocation, ISP, and potential risks.",
                ip
            ),
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "ip_address": ip,
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

/// POST /api/website
pub async fn website(
    State(state): State<AppState>,
    Json(req): Json<WebsiteRequest>,
) -> Result<Json<Value>, ApiError> {
    let domain = require(req.domain, "Domain is required")?;
    tracing::info!(domain = %domain, "Running domain report");

    let report = osint::domain::report(&state.shodan, &domain).await;
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            &format!(
                "Analyze this website OSINT data for {}. Provide insights about subdomains, technologies, and potential vulnerabilities.",
                domain
            ),
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "domain": domain,
        "results": results,
        "ai_analysis": ai_analysis,
        "timestamp": now_rfc3339(),
    })))
}

/// POST /api/social
pub async fn social(
    State(state): State<AppState>,
    Json(req): Json<SocialRequest>,
) -> Result<Json<Value>, ApiError> {
    let username = require(req.username, "Username is required")?;
    tracing::info!(username = %username, "Running username report");

    let report = osint::username::report(&state.runner, &state.settings.tools, &username).await;
    let results = to_json(&report)?;

    let ai_analysis = state
        .ai
        .analyze(
            AiProvider::OpenAi,
            &format!(
                "Analyze this social media OSINT data for {}. Provide insights about online presence, patterns, and potential risks.",
                username
            ),
            Some(&results),
        )
        .await;

    Ok(Json(json!({
        "username": username,
        "results": results,
        "ai_analysis": ai_analysis,
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

    async fn post_json(path: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let state = AppState::for_tests();
        let router = create_router(state);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_missing_field_is_400() {
        for (path, body) in [
            ("/api/phone", "{}"),
            ("/api/email", "{}"),
            ("/api/ip", "{}"),
            ("/api/website", "{}"),
            ("/api/social", "{}"),
        ] {
            let (status, value) = post_json(path, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {}", path);
            assert!(value["error"].as_str().unwrap().contains("required"));
        }
    }

    #[tokio::test]
    async fn test_blank_field_is_400() {
        let (status, _) = post_json("/api/phone", r#"{"phone_number": "  "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_social_report_has_results_and_ai_analysis() {
        // Username lookups never call external APIs when sherlock is not
        // configured, so this exercises the full envelope offline.
        let (status, value) = post_json("/api/social", r#"{"username": "john_doe"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["username"], "john_doe");
        assert!(value.get("results").is_some());
        assert!(value.get("ai_analysis").is_some());
        assert!(value.get("timestamp").is_some());

        // No AI key configured in tests: graceful error, not a crash
        assert!(value["ai_analysis"]["error"]
            .as_str()
            .unwrap()
            .contains("API key not configured"));

        // A failing sub-lookup (sherlock unconfigured) coexists with
        // successful ones
        assert!(value["results"]["Sherlock"]["success"] == false);
        assert!(value["results"]["Username_Validation"]["success"] == true);
    }
}
