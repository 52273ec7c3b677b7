//! Video lookups

use crate::config::CliTools;
use crate::osint::image::write_scratch;
use crate::osint::{ToolReport, ToolResult};
use crate::services::CommandRunner;
use serde_json::json;

/// Run every video lookup and collect the results.
pub async fn report(runner: &CommandRunner, tools: &CliTools, bytes: &[u8]) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("Video_Analysis".to_string(), analyze(bytes));
    report.insert("FFprobe".to_string(), ffprobe(runner, tools, bytes).await);

    report
}

fn analyze(bytes: &[u8]) -> ToolResult {
    let size_mb = (bytes.len() as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;
    ToolResult::ok(json!({
        "size_bytes": bytes.len(),
        "size_mb": size_mb,
    }))
}

/// Container and stream metadata via ffprobe.
async fn ffprobe(runner: &CommandRunner, tools: &CliTools, bytes: &[u8]) -> ToolResult {
    let path = match write_scratch(bytes, ".mp4") {
        Ok(file) => file,
        Err(e) => return ToolResult::err(format!("Failed to stage upload: {}", e)),
    };

    let path_str = path.path().to_string_lossy().into_owned();
    let result = runner
        .run(
            &tools.ffprobe,
            &[
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                &path_str,
            ],
        )
        .await;

    // If ffprobe emitted valid JSON, surface it structured instead of as a
    // raw stdout string.
    if result.success {
        if let Some(stdout) = result
            .data
            .as_ref()
            .and_then(|d| d["stdout"].as_str())
        {
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(stdout) {
                return ToolResult::ok(parsed);
            }
        }
    }

    result
}
