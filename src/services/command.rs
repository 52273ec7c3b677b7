//! Subprocess runner for local OSINT CLI tools
//!
//! Invokes tools argv-style (no shell) with a hard timeout, capturing
//! stdout, stderr, and the exit code verbatim. Every failure mode — spawn
//! error, non-UTF-8 output, timeout — degrades into a recorded
//! [`ToolResult`] so a broken tool never fails the surrounding report.

use crate::osint::ToolResult;
use serde::Serialize;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Captured output of a finished subprocess.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Runs local CLI tools with a shared timeout.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Run `program` with `args`, returning the captured output as a
    /// report entry. Success means the process exited with code 0; a
    /// non-zero exit still carries the captured output as data with
    /// `success: false` semantics folded into the record.
    pub async fn run(&self, program: &str, args: &[&str]) -> ToolResult {
        tracing::debug!(program = %program, ?args, "Spawning tool subprocess");

        let mut command = Command::new(program);
        command.args(args).kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::warn!(program = %program, error = %e, "Failed to spawn tool");
                return ToolResult::err(format!("Failed to run {}: {}", program, e));
            }
            Err(_) => {
                tracing::warn!(program = %program, timeout_secs = self.timeout.as_secs(), "Tool timed out");
                return ToolResult::err(format!(
                    "Command timed out after {}s",
                    self.timeout.as_secs()
                ));
            }
        };

        let captured = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if output.status.success() {
            ToolResult::ok(captured)
        } else {
            // Keep the captured output visible even on failure; exit code
            // and stderr are often the interesting part of a recon tool run.
            let mut result = ToolResult::err(format!(
                "{} exited with code {}",
                program, captured.exit_code
            ));
            result.data = serde_json::to_value(&captured).ok();
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command_captures_stdout() {
        let runner = CommandRunner::new(5);
        let result = runner.run("echo", &["hello"]).await;
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["exit_code"], 0);
        assert!(data["stdout"].as_str().unwrap().contains("hello"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_recorded_error() {
        let runner = CommandRunner::new(5);
        let result = runner.run("definitely-not-a-real-binary-xyz", &[]).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Failed to run"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_keeps_output() {
        let runner = CommandRunner::new(5);
        let result = runner.run("sh", &["-c", "echo oops >&2; exit 3"]).await;
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("code 3"));
        let data = result.data.unwrap();
        assert!(data["stderr"].as_str().unwrap().contains("oops"));
    }

    #[tokio::test]
    async fn test_timeout_is_recorded_error() {
        let runner = CommandRunner::new(1);
        let result = runner.run("sleep", &["5"]).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("timed out"));
    }
}
