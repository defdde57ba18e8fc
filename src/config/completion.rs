//! Completion backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const INFERENCE_API_DEFAULT_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.1";
const CHAT_COMPLETIONS_DEFAULT_URL: &str = "https://api.openai.com/v1";
const CHAT_COMPLETIONS_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Completion backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// Which backend answers open-ended turns
    #[serde(default)]
    pub backend: CompletionBackend,

    /// Endpoint override; each backend has its own default
    pub base_url: Option<String>,

    /// API credential for the backend
    pub api_key: Option<Secret<String>>,

    /// Model name (chat completions only)
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Completion backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompletionBackend {
    /// Template replies only
    #[default]
    Disabled,
    /// Hugging Face style text-generation endpoint
    InferenceApi,
    /// OpenAI-compatible chat completions endpoint
    ChatCompletions,
}

impl CompletionConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a backend is selected
    pub fn is_enabled(&self) -> bool {
        self.backend != CompletionBackend::Disabled
    }

    /// Check if a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Endpoint for the selected backend
    pub fn resolved_base_url(&self) -> String {
        match (&self.base_url, self.backend) {
            (Some(url), _) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            (_, CompletionBackend::ChatCompletions) => CHAT_COMPLETIONS_DEFAULT_URL.to_string(),
            _ => INFERENCE_API_DEFAULT_URL.to_string(),
        }
    }

    /// Model for the selected backend
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| CHAT_COMPLETIONS_DEFAULT_MODEL.to_string())
    }

    /// Validate completion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidCompletionTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 || self.max_tokens > 1024 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if !self.is_enabled() {
            return Ok(());
        }
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired(
                "PRACTICE_PARTNER__COMPLETION__API_KEY",
            ));
        }
        let url = self.resolved_base_url();
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ValidationError::InvalidCompletionUrl(url));
        }
        Ok(())
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            backend: CompletionBackend::default(),
            base_url: None,
            api_key: None,
            model: None,
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_timeout() -> u64 {
    12
}

fn default_max_tokens() -> u32 {
    80
}

fn default_temperature() -> f32 {
    0.7
}
