//! Face detection and deepfake screening
//!
//! Neither check runs a local model; both record an advisory result plus
//! whatever can be derived from the bytes themselves, matching the rest of
//! the best-effort report policy.

use crate::osint::{image, ToolReport, ToolResult};
use serde_json::json;

/// Media kind for deepfake screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "video" => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Face detection report for an uploaded image.
pub fn face_report(bytes: &[u8]) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("Image_Analysis".to_string(), image_probe(bytes));
    report.insert(
        "Face_Detection".to_string(),
        ToolResult::ok(json!({
            "message": "Face detection requires an external vision model",
            "faces_detected": "Unknown",
            "confidence": "Unknown",
        })),
    );

    report
}

/// Deepfake screening report for an uploaded image or video.
pub fn deepfake_report(bytes: &[u8], kind: MediaKind) -> ToolReport {
    let mut report = ToolReport::new();

    let size_mb = (bytes.len() as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;

    report.insert(
        "Deepfake_Detection".to_string(),
        ToolResult::ok(json!({
            "message": format!(
                "Deepfake detection for {} requires specialized AI models",
                kind.as_str()
            ),
            "media_type": kind.as_str(),
            "file_size": format!("{} bytes", bytes.len()),
            "analysis_available": false,
        })),
    );
    report.insert(
        "Media_Analysis".to_string(),
        ToolResult::ok(json!({
            "format": kind.as_str(),
            "size_bytes": bytes.len(),
            "size_mb": size_mb,
        })),
    );

    report
}

/// Reuse the in-memory image probe when the upload is an image.
fn image_probe(bytes: &[u8]) -> ToolResult {
    image::analyze(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parsing_defaults_to_image() {
        assert_eq!(MediaKind::parse("video"), MediaKind::Video);
        assert_eq!(MediaKind::parse("image"), MediaKind::Image);
        assert_eq!(MediaKind::parse("whatever"), MediaKind::Image);
    }

    #[test]
    fn test_deepfake_report_shape() {
        let report = deepfake_report(b"bytes", MediaKind::Video);
        assert!(report["Deepfake_Detection"].success);
        assert!(report["Media_Analysis"].success);
        let data = report["Deepfake_Detection"].data.as_ref().unwrap();
        assert_eq!(data["media_type"], json!("video"));
        assert_eq!(data["analysis_available"], json!(false));
    }

    #[test]
    fn test_face_report_on_garbage_still_has_both_sections() {
        let report = face_report(b"not an image");
        assert!(!report["Image_Analysis"].success);
        assert!(report["Face_Detection"].success);
    }
}
