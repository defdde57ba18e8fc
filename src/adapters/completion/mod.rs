//! Completion Client Adapters.
//!
//! Implementations of the CompletionClient port.
//!
//! ## Available Adapters
//!
//! - `InferenceApiClient` - Hugging Face style text-generation endpoint
//! - `ChatCompletionsClient` - OpenAI-compatible chat completions endpoint
//! - `MockCompletionClient` - Configurable mock for testing

mod chat_completions;
mod inference_api;
mod mock_client;

pub use chat_completions::{ChatCompletionsClient, ChatCompletionsConfig};
pub use inference_api::{InferenceApiClient, InferenceApiConfig};
pub use mock_client::MockCompletionClient;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{CompletionBackend, CompletionConfig};
use crate::ports::{CompletionClient, CompletionError};

/// Builds the client selected by configuration.
///
/// Returns `Ok(None)` when completions are disabled or no key is set.
pub fn build_completion_client(
    config: &CompletionConfig,
) -> Result<Option<Arc<dyn CompletionClient>>, CompletionError> {
    let api_key = match config.api_key.as_ref() {
        Some(key) if !key.expose_secret().trim().is_empty() => key.clone(),
        _ => return Ok(None),
    };

    let client: Arc<dyn CompletionClient> = match config.backend {
        CompletionBackend::Disabled => return Ok(None),
        CompletionBackend::InferenceApi => Arc::new(InferenceApiClient::new(
            InferenceApiConfig::new(api_key, config.resolved_base_url())
                .with_timeout(config.timeout()),
        )?),
        CompletionBackend::ChatCompletions => Arc::new(ChatCompletionsClient::new(
            ChatCompletionsConfig::new(api_key)
                .with_base_url(config.resolved_base_url())
                .with_model(config.resolved_model())
                .with_timeout(config.timeout()),
        )?),
    };
    Ok(Some(client))
}

/// Builds the shared reqwest client for an adapter.
fn http_client(timeout: Duration) -> Result<reqwest::Client, CompletionError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CompletionError::transport(format!("Failed to create HTTP client: {e}")))
}

fn bearer(api_key: &Secret<String>) -> String {
    format!("Bearer {}", api_key.expose_secret())
}

/// Maps a failed send to a completion error.
fn classify_send_error(err: &reqwest::Error, timeout: Duration) -> CompletionError {
    if err.is_timeout() {
        CompletionError::timeout(timeout.as_secs())
    } else if err.is_connect() {
        CompletionError::transport(format!("Connection failed: {err}"))
    } else {
        CompletionError::transport(err.to_string())
    }
}

/// Maps a non-success status to a completion error.
fn classify_status(status: StatusCode, body: &str) -> CompletionError {
    match status.as_u16() {
        401 | 403 => CompletionError::Unauthenticated,
        503 => CompletionError::unavailable(summarize(body)),
        500..=599 => CompletionError::unavailable(format!("Server error {status}: {}", summarize(body))),
        _ => CompletionError::transport(format!("Unexpected status {status}: {}", summarize(body))),
    }
}

fn summarize(body: &str) -> String {
    const MAX_BODY: usize = 200;
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
