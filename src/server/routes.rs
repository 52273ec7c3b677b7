//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{analyze, download, health, lookup, media, shodan};
use crate::middleware::logging::log_request;
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // JSON lookup endpoints (one required field each)
    let lookup_routes = Router::new()
        .route("/phone", post(lookup::phone))
        .route("/email", post(lookup::email))
        .route("/ip", post(lookup::ip))
        .route("/website", post(lookup::website))
        .route("/social", post(lookup::social))
        .route("/shodan", post(shodan::search));

    // Multipart upload endpoints; the default body limit is far too small
    // for video, so these get their own ceiling from settings.
    let max_upload_bytes = state.settings.max_upload_mb as usize * 1024 * 1024;
    let upload_routes = Router::new()
        .route("/image", post(media::image))
        .route("/video", post(media::video))
        .route("/face", post(media::face))
        .route("/deepfake", post(media::deepfake))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    // Utility endpoints
    let utility_routes = Router::new()
        .route("/status", get(health::status))
        .route("/ai/analyze", post(analyze::analyze))
        .route("/download/:analysis_type", post(download::download));

    let api_routes = lookup_routes.merge(upload_routes).merge(utility_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .fallback(not_found)
        // Apply middleware layers (order matters: first added = outermost = runs first)
        .layer(create_cors_layer())
        // Custom request logging with trace IDs
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// JSON body for unknown routes
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Endpoint not found", "status": 404})),
    )
}

/// Create CORS layer with permissive settings for a browser front end
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            // Expose trace ID headers to clients
            HeaderName::from_static("x-trace-id"),
            HeaderName::from_static("x-request-id"),
        ])
}
