//! OSINT lookup modules
//!
//! One submodule per input category. Each category runs a flat sequence of
//! independent lookups (REST calls, subprocess invocations, static link
//! lists) and collects them into a [`ToolReport`]. A failing lookup is
//! recorded and never aborts the rest of the report.

pub mod domain;
pub mod email;
pub mod image;
pub mod ip;
pub mod links;
pub mod media;
pub mod phone;
pub mod username;
pub mod validate;
pub mod video;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Outcome of a single lookup within a report.
///
/// A successful lookup carries `data` and no `error`. A failed lookup
/// always carries `error` and may additionally carry `data` when there
/// is useful context (captured subprocess output, upgrade guidance).
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Successful lookup carrying arbitrary JSON data.
    pub fn ok(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                data: Some(value),
                error: None,
            },
            // Serialization of our own data types should not fail; if it
            // does, record it like any other lookup failure.
            Err(e) => Self::err(format!("Failed to encode result: {}", e)),
        }
    }

    /// Failed lookup with a human-readable reason.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Tool name → result mapping produced by one category handler.
pub type ToolReport = BTreeMap<String, ToolResult>;
