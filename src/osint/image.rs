//! Image lookups
//!
//! Uploaded bytes are probed in memory for format and dimensions, then
//! written to a scratch file so exiftool can extract the full metadata
//! block. The scratch file is removed when the report is done.

use crate::config::CliTools;
use crate::osint::{ToolReport, ToolResult};
use crate::services::CommandRunner;
use image::ImageReader;
use serde_json::json;
use std::io::{Cursor, Write};

/// Run every image lookup and collect the results.
pub async fn report(runner: &CommandRunner, tools: &CliTools, bytes: &[u8]) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("Image_Analysis".to_string(), analyze(bytes));
    report.insert("ExifTool".to_string(), exiftool(runner, tools, bytes).await);

    report
}

/// Basic in-memory probe: format, dimensions, byte size.
pub(crate) fn analyze(bytes: &[u8]) -> ToolResult {
    let reader = match ImageReader::new(Cursor::new(bytes)).with_guessed_format() {
        Ok(reader) => reader,
        Err(e) => return ToolResult::err(e.to_string()),
    };

    let Some(format) = reader.format() else {
        return ToolResult::err("Unrecognized image format");
    };

    match reader.into_dimensions() {
        Ok((width, height)) => ToolResult::ok(json!({
            "format": format!("{:?}", format).to_uppercase(),
            "width": width,
            "height": height,
            "size_bytes": bytes.len(),
        })),
        Err(e) => ToolResult::err(e.to_string()),
    }
}

/// Full metadata dump via the exiftool binary.
async fn exiftool(runner: &CommandRunner, tools: &CliTools, bytes: &[u8]) -> ToolResult {
    let path = match write_scratch(bytes, ".jpg") {
        Ok(file) => file,
        Err(e) => return ToolResult::err(format!("Failed to stage upload: {}", e)),
    };

    let path_str = path.path().to_string_lossy().into_owned();
    let result = runner.run(&tools.exiftool, &[&path_str]).await;

    // `path` dropped here removes the scratch file
    result
}

/// Write uploaded bytes to a self-deleting scratch file.
pub(crate) fn write_scratch(
    bytes: &[u8],
    suffix: &str,
) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
