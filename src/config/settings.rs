//! Application settings and configuration
//!
//! This module provides configuration management for the application,
//! loading settings from environment variables with sensible defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Invalid environment: {}. Expected: development, staging, or production",
                s
            ),
        }
    }
}

/// API credentials for the external providers the lookups call.
///
/// Every key is optional. An unset or empty environment variable means the
/// provider is "not configured" and lookups depending on it record a
/// graceful error instead of calling out.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderKeys {
    #[serde(skip_serializing)]
    pub openai: Option<String>,
    #[serde(skip_serializing)]
    pub gemini: Option<String>,
    #[serde(skip_serializing)]
    pub grok: Option<String>,
    #[serde(skip_serializing)]
    pub numverify: Option<String>,
    #[serde(skip_serializing)]
    pub hunter: Option<String>,
    #[serde(skip_serializing)]
    pub hibp: Option<String>,
    #[serde(skip_serializing)]
    pub emailrep: Option<String>,
    #[serde(skip_serializing)]
    pub shodan: Option<String>,
}

impl ProviderKeys {
    fn from_env() -> Self {
        Self {
            openai: env_opt("OPENAI_API_KEY"),
            gemini: env_opt("GEMINI_API_KEY"),
            grok: env_opt("GROK_API_KEY"),
            numverify: env_opt("NUMVERIFY_API_KEY"),
            hunter: env_opt("HUNTER_API_KEY"),
            hibp: env_opt("HIBP_API_KEY"),
            emailrep: env_opt("EMAILREP_API_KEY"),
            shodan: env_opt("SHODAN_API_KEY"),
        }
    }

    /// Map of provider name to "configured" flag, for the status endpoint.
    /// Key material itself is never exposed.
    pub fn configured(&self) -> BTreeMap<&'static str, bool> {
        BTreeMap::from([
            ("openai", self.openai.is_some()),
            ("gemini", self.gemini.is_some()),
            ("grok", self.grok.is_some()),
            ("numverify", self.numverify.is_some()),
            ("hunter", self.hunter.is_some()),
            ("hibp", self.hibp.is_some()),
            ("emailrep", self.emailrep.is_some()),
            ("shodan", self.shodan.is_some()),
        ])
    }
}

/// Local command-line tools the media and username lookups shell out to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliTools {
    /// Path to the exiftool binary
    pub exiftool: String,
    /// Path to the ffprobe binary
    pub ffprobe: String,
    /// Path to a sherlock entry point, if installed
    pub sherlock: Option<String>,
    /// Hard timeout applied to every subprocess invocation
    pub command_timeout_seconds: u64,
}

impl Default for CliTools {
    fn default() -> Self {
        Self {
            exiftool: "exiftool".to_string(),
            ffprobe: "ffprobe".to_string(),
            sherlock: None,
            command_timeout_seconds: 30,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // External provider credentials
    pub providers: ProviderKeys,

    // Local CLI tools
    pub tools: CliTools,

    // Outbound HTTP timeouts
    pub http_timeout_seconds: u64,
    pub ai_timeout_seconds: u64,

    // Largest accepted media upload
    pub max_upload_mb: u64,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "osint-aggregator"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),

            host: env_or_default("HOST", "0.0.0.0"),
            port: env_or_default("PORT", "5000")
                .parse()
                .context("Invalid PORT value")?,

            providers: ProviderKeys::from_env(),

            tools: CliTools {
                exiftool: env_or_default("EXIFTOOL_PATH", "exiftool"),
                ffprobe: env_or_default("FFPROBE_PATH", "ffprobe"),
                sherlock: env_opt("SHERLOCK_PATH"),
                command_timeout_seconds: env_or_default("COMMAND_TIMEOUT_SECONDS", "30")
                    .parse()
                    .unwrap_or(30),
            },

            http_timeout_seconds: env_or_default("HTTP_TIMEOUT_SECONDS", "15")
                .parse()
                .unwrap_or(15),
            ai_timeout_seconds: env_or_default("AI_TIMEOUT_SECONDS", "60")
                .parse()
                .unwrap_or(60),

            max_upload_mb: env_or_default("MAX_UPLOAD_MB", "100")
                .parse()
                .unwrap_or(100),
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }
        if self.http_timeout_seconds == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECONDS must be > 0");
        }
        if self.ai_timeout_seconds == 0 {
            anyhow::bail!("AI_TIMEOUT_SECONDS must be > 0");
        }
        if self.tools.command_timeout_seconds == 0 {
            anyhow::bail!("COMMAND_TIMEOUT_SECONDS must be > 0");
        }
        if self.max_upload_mb == 0 {
            anyhow::bail!("MAX_UPLOAD_MB must be > 0");
        }

        if self.environment == Environment::Production && self.providers.shodan.is_none() {
            tracing::warn!(
                "Running in production without a Shodan API key; Shodan lookups will be degraded"
            );
        }

        Ok(())
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "osint-aggregator".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::default(),
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            providers: ProviderKeys::default(),
            tools: CliTools::default(),
            http_timeout_seconds: 15,
            ai_timeout_seconds: 60,
            max_upload_mb: 100,
        }
    }
}

/// Get an environment variable or return a default value
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable, treating unset and empty as absent
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "osint-aggregator");
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.tools.exiftool, "exiftool");
        assert_eq!(settings.max_upload_mb, 100);
        assert!(settings.providers.shodan.is_none());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_server_addr() {
        let settings = Settings::default();
        assert_eq!(settings.server_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_configured_map_hides_keys() {
        let keys = ProviderKeys {
            shodan: Some("secret-value".to_string()),
            ..ProviderKeys::default()
        };

        let map = keys.configured();
        assert!(map["shodan"]);
        assert!(!map["openai"]);

        // Serialized form must not leak the key
        let json = serde_json::to_string(&keys).unwrap();
        assert!(!json.contains("secret-value"));
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let settings = Settings {
            http_timeout_seconds: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
