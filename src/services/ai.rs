//! AI summarizer service
//!
//! Sends the aggregated OSINT report to a generative-language API and
//! returns a free-text analysis. Supports OpenAI chat completions and
//! Google Gemini generateContent; Grok is a placeholder until its API is
//! public. A missing key or upstream failure degrades into an error
//! record inside the response, never a failed request.

use crate::config::Settings;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
const GEMINI_MODEL: &str = "gemini-1.5-pro";
const MAX_ANSWER_TOKENS: u32 = 1000;

/// Errors that can occur when calling a summarizer backend
#[derive(Error, Debug)]
pub enum AiServiceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Supported summarizer providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Gemini,
    Grok,
}

impl AiProvider {
    /// Uppercase name used in "not configured" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "OPENAI",
            AiProvider::Gemini => "GEMINI",
            AiProvider::Grok => "GROK",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiProvider::OpenAi => write!(f, "openai"),
            AiProvider::Gemini => write!(f, "gemini"),
            AiProvider::Grok => write!(f, "grok"),
        }
    }
}

impl FromStr for AiProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "chatgpt" => Ok(AiProvider::OpenAi),
            "gemini" => Ok(AiProvider::Gemini),
            "grok" => Ok(AiProvider::Grok),
            _ => anyhow::bail!("Unknown AI provider: {}. Expected: openai, gemini, or grok", s),
        }
    }
}

/// Result of a summarization attempt, embedded verbatim in responses.
#[derive(Debug, Clone, Serialize)]
pub struct AiAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiAnalysis {
    pub fn text(analysis: impl Into<String>) -> Self {
        Self {
            analysis: Some(analysis.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            analysis: None,
            error: Some(error.into()),
        }
    }
}

/// Service for calling generative-language APIs
#[derive(Clone)]
pub struct AiService {
    client: Client,
    settings: Arc<Settings>,
}

impl AiService {
    pub fn new(settings: Arc<Settings>) -> Result<Self, AiServiceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.ai_timeout_seconds))
            .build()?;

        Ok(Self { client, settings })
    }

    /// Summarize `results` according to `prompt` with the given provider.
    pub async fn analyze(
        &self,
        provider: AiProvider,
        prompt: &str,
        results: Option<&Value>,
    ) -> AiAnalysis {
        let key = match provider {
            AiProvider::OpenAi => self.settings.providers.openai.as_deref(),
            AiProvider::Gemini => self.settings.providers.gemini.as_deref(),
            AiProvider::Grok => self.settings.providers.grok.as_deref(),
        };

        let Some(key) = key else {
            return AiAnalysis::failure(format!(
                "{} API key not configured",
                provider.display_name()
            ));
        };

        let content = build_content(prompt, results);

        let outcome = match provider {
            AiProvider::OpenAi => self.call_openai(key, &content).await,
            AiProvider::Gemini => self.call_gemini(key, &content).await,
            AiProvider::Grok => {
                // No public API yet; keep the slot so clients can select it.
                return AiAnalysis::text("Grok analysis placeholder - API not publicly available");
            }
        };

        match outcome {
            Ok(analysis) => AiAnalysis::text(analysis),
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "AI analysis failed");
                AiAnalysis::failure(format!("AI API error: {}", e))
            }
        }
    }

    async fn call_openai(&self, key: &str, content: &str) -> Result<String, AiServiceError> {
        let body = json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": content}],
            "max_tokens": MAX_ANSWER_TOKENS,
        });

        tracing::debug!(url = OPENAI_CHAT_URL, "Calling OpenAI chat completions");

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| AiServiceError::ParseError(e.to_string()))?;

        if !status.is_success() {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            return Err(AiServiceError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(payload["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("No response")
            .to_string())
    }

    async fn call_gemini(&self, key: &str, content: &str) -> Result<String, AiServiceError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, GEMINI_MODEL, key
        );

        let body = json!({
            "contents": [{"parts": [{"text": content}]}],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": MAX_ANSWER_TOKENS,
            },
        });

        tracing::debug!(model = GEMINI_MODEL, "Calling Gemini generateContent");

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| AiServiceError::ParseError(e.to_string()))?;

        if !status.is_success() {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            return Err(AiServiceError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        // Prefer the first candidate's text; fall back to the stringified
        // body so an unexpected shape still yields something readable.
        if let Some(text) = payload["candidates"][0]["content"]["parts"][0]["text"].as_str() {
            Ok(text.to_string())
        } else {
            Ok(format!("Gemini Response: {}", payload))
        }
    }
}

/// Prompt plus the pretty-printed report the model is asked to analyze.
fn build_content(prompt: &str, results: Option<&Value>) -> String {
    let rendered = match results {
        Some(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        None => "No results available".to_string(),
    };
    format!("{}\n\nOSINT Results:\n{}", prompt, rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("openai".parse::<AiProvider>().unwrap(), AiProvider::OpenAi);
        assert_eq!("Gemini".parse::<AiProvider>().unwrap(), AiProvider::Gemini);
        assert_eq!("grok".parse::<AiProvider>().unwrap(), AiProvider::Grok);
        assert!("llama".parse::<AiProvider>().is_err());
    }

    #[test]
    fn test_build_content_with_results() {
        let results = json!({"EmailRep": {"success": true}});
        let content = build_content("Analyze this", Some(&results));
        assert!(content.starts_with("Analyze this"));
        assert!(content.contains("OSINT Results:"));
        assert!(content.contains("EmailRep"));
    }

    #[test]
    fn test_build_content_without_results() {
        let content = build_content("Analyze this", None);
        assert!(content.contains("No results available"));
    }

    #[tokio::test]
    async fn test_missing_key_is_graceful() {
        let service = AiService::new(Arc::new(Settings::default())).unwrap();
        let analysis = service.analyze(AiProvider::OpenAi, "prompt", None).await;
        assert!(analysis.analysis.is_none());
        assert_eq!(analysis.error.unwrap(), "OPENAI API key not configured");
    }

    #[tokio::test]
    async fn test_grok_placeholder_does_not_call_out() {
        let settings = Settings {
            providers: crate::config::ProviderKeys {
                grok: Some("key".to_string()),
                ..Default::default()
            },
            ..Settings::default()
        };
        let service = AiService::new(Arc::new(settings)).unwrap();
        let analysis = service.analyze(AiProvider::Grok, "prompt", None).await;
        assert!(analysis.analysis.unwrap().contains("placeholder"));
    }
}
