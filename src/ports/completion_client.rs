//! Completion Client Port - Interface for remote text-generation backends.
//!
//! The response generator asks a backend for a single short continuation of
//! a prompt. Backends are stateless, and every failure comes back as a
//! [`CompletionError`] so the caller can fall back to templates.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoClient;
//!
//! #[async_trait]
//! impl CompletionClient for EchoClient {
//!     async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
//!         Ok(request.prompt)
//!     }
//!
//!     fn backend_name(&self) -> &'static str {
//!         "echo"
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens requested when none are configured.
pub const DEFAULT_MAX_TOKENS: u32 = 80;
/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Port for remote text completion.
///
/// Implementations make exactly one attempt per call. Retrying is never
/// done inside a turn.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generates a continuation for `request.prompt`.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Request for a text completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Full prompt text.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Creates a request with default generation parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Completion backend errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompletionError {
    /// Credential missing or rejected.
    #[error("authentication failed")]
    Unauthenticated,

    /// Backend is loading the model or otherwise unavailable.
    #[error("completion service unavailable: {message}")]
    ServiceUnavailable {
        /// Error details.
        message: String,
    },

    /// No reply within the configured timeout.
    #[error("completion timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Network failure, unexpected status or unreadable reply.
    #[error("completion transport error: {0}")]
    Transport(String),
}

impl CompletionError {
    /// Creates a service unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// The failure category, for logs.
    pub fn kind(&self) -> CompletionFailureKind {
        match self {
            Self::Unauthenticated => CompletionFailureKind::Unauthenticated,
            Self::ServiceUnavailable { .. } => CompletionFailureKind::ServiceUnavailable,
            Self::Timeout { .. } => CompletionFailureKind::Timeout,
            Self::Transport(_) => CompletionFailureKind::Transport,
        }
    }
}

/// Category of a [`CompletionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionFailureKind {
    Unauthenticated,
    ServiceUnavailable,
    Timeout,
    Transport,
}

impl CompletionFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
        }
    }
}

impl fmt::Display for CompletionFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trims a raw completion and strips surrounding quotes.
///
/// Returns a transport error when nothing is left.
pub fn clean_completion(raw: &str) -> Result<String, CompletionError> {
    let cleaned = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim();
    if cleaned.is_empty() {
        return Err(CompletionError::transport("empty completion"));
    }
    Ok(cleaned.to_string())
}
