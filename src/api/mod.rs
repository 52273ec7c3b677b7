//! API endpoint handlers module
//!
//! Contains all HTTP endpoint handler implementations.

pub mod analyze;
pub mod download;
pub mod health;
pub mod lookup;
pub mod media;
pub mod shodan;

use crate::error::ApiError;
use serde_json::Value;

/// Current UTC time as an RFC 3339 string, used in every response envelope.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Serialize a report for embedding in a response envelope.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(anyhow::Error::new(e)))
}
