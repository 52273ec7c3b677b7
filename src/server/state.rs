//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::Settings;
use crate::services::{AiService, CommandRunner, ShodanClient};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state
///
/// Holds the read-only resources every handler needs: settings, the shared
/// outbound HTTP client, and the service clients built on top of it. It is
/// cheaply cloneable and carries no mutable cross-request state.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Shared HTTP client for outbound REST lookups
    pub http: reqwest::Client,

    /// AI summarizer service
    pub ai: AiService,

    /// Shodan API client
    pub shodan: ShodanClient,

    /// Subprocess runner for local CLI tools
    pub runner: CommandRunner,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let settings = Arc::new(settings);
        let start_time = Instant::now();

        tracing::debug!(
            http_timeout = settings.http_timeout_seconds,
            ai_timeout = settings.ai_timeout_seconds,
            "Initializing HTTP clients"
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_seconds))
            .build()?;

        let ai = AiService::new(settings.clone())?;
        let shodan = ShodanClient::new(http.clone(), settings.providers.shodan.clone());
        let runner = CommandRunner::new(settings.tools.command_timeout_seconds);

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            settings,
            http,
            ai,
            shodan,
            runner,
            start_time,
        })
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// State with default settings and no credentials, for handler tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(Settings::default()).expect("test state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_initializes_without_credentials() {
        let state = AppState::for_tests();
        assert!(!state.shodan.is_configured());
        assert_eq!(state.settings.port, 5000);
    }
}
