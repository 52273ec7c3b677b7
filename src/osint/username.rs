//! Username / social media lookups

use crate::config::CliTools;
use crate::osint::{links, validate, ToolReport, ToolResult};
use crate::services::CommandRunner;
use serde_json::json;

/// Platforms the report points users at for manual verification.
const PLATFORMS: [&str; 5] = ["twitter", "instagram", "facebook", "linkedin", "github"];

/// Run every username lookup and collect the results.
pub async fn report(runner: &CommandRunner, tools: &CliTools, username: &str) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("Username_Validation".to_string(), validation(username));
    report.insert("Investigation_Links".to_string(), links::username_links(username));
    report.insert(
        "Platform_Check".to_string(),
        ToolResult::ok(json!({
            "message": "Manual checking required for each platform",
            "platforms": PLATFORMS,
        })),
    );
    report.insert("Sherlock".to_string(), sherlock(runner, tools, username).await);

    report
}

fn validation(username: &str) -> ToolResult {
    ToolResult::ok(json!({
        "valid": validate::is_valid_username(username),
        "username": username,
    }))
}

/// Sherlock username hunt, when an installation path is configured.
async fn sherlock(runner: &CommandRunner, tools: &CliTools, username: &str) -> ToolResult {
    let Some(path) = tools.sherlock.as_deref() else {
        return ToolResult::err("Sherlock not configured (set SHERLOCK_PATH)");
    };

    runner
        .run("python3", &[path, "--print-found", "--timeout", "10", username])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let result = validation("john_doe");
        assert_eq!(result.data.unwrap()["valid"], json!(true));

        let result = validation("x");
        assert_eq!(result.data.unwrap()["valid"], json!(false));
    }

    #[tokio::test]
    async fn test_report_without_sherlock_configured() {
        let runner = CommandRunner::new(5);
        let tools = CliTools::default();

        let report = report(&runner, &tools, "john_doe").await;

        assert!(report["Username_Validation"].success);
        assert!(report["Platform_Check"].success);
        assert!(!report["Sherlock"].success);
        assert!(report["Sherlock"].error.as_ref().unwrap().contains("not configured"));
    }
}
