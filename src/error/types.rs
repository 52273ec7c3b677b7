//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can escape a request handler.
///
/// Per-lookup failures never surface here; they are recorded inside the
/// report as `{"success": false, "error": ..}` and the handler still
/// answers 200. This type only covers missing input, bad uploads, and
/// genuinely unexpected internal failures.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} API key not configured")]
    NotConfigured(&'static str),

    #[error("Invalid multipart upload: {0}")]
    Multipart(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", msg)
            }
            ApiError::NotConfigured(provider) => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                format!("{} API key not configured", provider),
            ),
            ApiError::Multipart(msg) => (StatusCode::BAD_REQUEST, "invalid_request_error", msg),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Unhandled internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "api_error", err.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            error_type: error_type.to_string(),
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(rename = "type")]
    error_type: String,
    status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_400() {
        let response = ApiError::bad_request("Phone number is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_configured_is_400() {
        let response = ApiError::NotConfigured("Shodan").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_is_500() {
        let response = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
