//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid completion timeout: must be between 1 and 60 seconds")]
    InvalidCompletionTimeout,

    #[error("Invalid completion temperature: must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Invalid completion max_tokens: must be between 1 and 1024")]
    InvalidMaxTokens,

    #[error("Invalid completion URL: {0}")]
    InvalidCompletionUrl(String),

    #[error("Invalid correction rate: must be between 0.0 and 1.0")]
    InvalidCorrectionRate,

    #[error("Request timeout ({request}s) must exceed the completion timeout ({completion}s)")]
    RequestTimeoutTooShort { request: u64, completion: u64 },
}
