//! Inference API Client - text generation over a Hugging Face style endpoint.
//!
//! The endpoint takes the whole prompt as `inputs` and answers with a list
//! of generations. Only the continuation is requested, so the first
//! `generated_text` is the reply.
//!
//! # Configuration
//!
//! ```ignore
//! let config = InferenceApiConfig::new(api_key, "https://api-inference.huggingface.co/models/...")
//!     .with_timeout(Duration::from_secs(12));
//!
//! let client = InferenceApiClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{bearer, classify_send_error, classify_status, http_client};
use crate::ports::{clean_completion, CompletionClient, CompletionError, CompletionRequest};

/// Configuration for the inference API client.
#[derive(Debug, Clone)]
pub struct InferenceApiConfig {
    /// API token for authentication.
    api_key: Secret<String>,
    /// Full model endpoint URL.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl InferenceApiConfig {
    /// Creates a new configuration for the given endpoint.
    pub fn new(api_key: Secret<String>, url: impl Into<String>) -> Self {
        Self {
            api_key,
            url: url.into(),
            timeout: Duration::from_secs(12),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Text-generation inference API client.
pub struct InferenceApiClient {
    config: InferenceApiConfig,
    client: Client,
}

impl InferenceApiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: InferenceApiConfig) -> Result<Self, CompletionError> {
        let client = http_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn to_inference_request(request: &CompletionRequest) -> InferenceRequest<'_> {
        InferenceRequest {
            inputs: &request.prompt,
            parameters: InferenceParameters {
                max_new_tokens: request.max_tokens,
                temperature: request.temperature,
                return_full_text: false,
            },
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        self.client
            .post(&self.config.url)
            .header("Authorization", bearer(&self.config.api_key))
            .json(&Self::to_inference_request(request))
            .send()
            .await
            .map_err(|e| classify_send_error(&e, self.config.timeout))
    }

    async fn parse_response(&self, response: Response) -> Result<String, CompletionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_send_error(&e, self.config.timeout))?;
        parse_generations(&body)
    }
}

/// Extracts the first generation from a reply body.
fn parse_generations(body: &str) -> Result<String, CompletionError> {
    let generations: Vec<Generation> = serde_json::from_str(body)
        .map_err(|e| CompletionError::transport(format!("Failed to parse response: {e}")))?;
    let first = generations
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::transport("No generations in response"))?;
    clean_completion(&first.generated_text)
}

#[async_trait]
impl CompletionClient for InferenceApiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn backend_name(&self) -> &'static str {
        "inference_api"
    }
}

// ----- Inference API Types -----

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}
