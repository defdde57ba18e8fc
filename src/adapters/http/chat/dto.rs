//! Request and response DTOs for the chat endpoints.

use serde::{Deserialize, Serialize};

/// Query for `GET /api/start`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartQuery {
    /// Key to (re)start. A fresh key is generated when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Reply to both chat endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Present on start so the client can reuse the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub response: String,
    pub correction: Option<String>,
}

impl ChatResponse {
    pub fn started(session_id: impl Into<String>, response: String) -> Self {
        Self {
            session_id: Some(session_id.into()),
            response,
            correction: None,
        }
    }

    pub fn turn(response: String, correction: Option<String>) -> Self {
        Self {
            session_id: None,
            response,
            correction,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Whether a completion backend is configured.
    pub completion_backend: bool,
}

/// Standard error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
