//! Chat Completions Client - OpenAI-compatible `/chat/completions` endpoint.
//!
//! The prompt is sent as a single user message and the first choice's
//! content is the reply. One attempt per call; the caller falls back to
//! templates on any error.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{bearer, classify_send_error, classify_status, http_client};
use crate::ports::{clean_completion, CompletionClient, CompletionError, CompletionRequest};

/// Configuration for the chat completions client.
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ChatCompletionsConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(12),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI-compatible chat completions client.
pub struct ChatCompletionsClient {
    config: ChatCompletionsConfig,
    client: Client,
}

impl ChatCompletionsClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, CompletionError> {
        let client = http_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_chat_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", bearer(&self.config.api_key))
            .json(&self.to_chat_request(request))
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
        parse_choices(&body)
    }
}

fn parse_choices(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::transport(format!("Failed to parse response: {e}")))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::transport("No choices in response"))?;
    clean_completion(choice.message.content.as_deref().unwrap_or_default())
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn backend_name(&self) -> &'static str {
        "chat_completions"
    }
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
