//! HTTP handlers for the chat endpoints.
//!
//! These handlers translate JSON requests into dialogue engine calls.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{DialogueEngine, DialogueError};
use crate::domain::foundation::SessionKey;

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, StartQuery};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the chat endpoints.
#[derive(Clone)]
pub struct ChatAppState {
    pub engine: Arc<DialogueEngine>,
}

impl ChatAppState {
    pub fn new(engine: Arc<DialogueEngine>) -> Self {
        Self { engine }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/start - Start or restart a conversation
pub async fn start_session(
    State(state): State<ChatAppState>,
    Query(query): Query<StartQuery>,
) -> Result<impl IntoResponse, ChatApiError> {
    // `?session_id=` counts as no key at all.
    let key = match query.session_id.as_deref().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => parse_key(raw)?,
        None => SessionKey::generate(),
    };

    let start = state.engine.start_session(&key).await?;

    Ok(Json(ChatResponse::started(key.as_str(), start.reply)))
}

/// POST /api/chat - Handle one learner message
pub async fn chat(
    State(state): State<ChatAppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let raw = request
        .session_id
        .as_deref()
        .ok_or_else(|| ChatApiError::BadRequest("session_id is required".to_string()))?;
    let key = parse_key(raw)?;

    let turn = state.engine.handle_turn(&key, &request.message).await?;

    Ok(Json(ChatResponse::turn(turn.reply, turn.correction)))
}

/// GET /health - Liveness check
pub async fn health(State(state): State<ChatAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        completion_backend: state.engine.has_completion_backend(),
    })
}

fn parse_key(raw: &str) -> Result<SessionKey, ChatApiError> {
    SessionKey::new(raw).map_err(|e| ChatApiError::BadRequest(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(String),
    Internal(String),
}

impl From<DialogueError> for ChatApiError {
    fn from(err: DialogueError) -> Self {
        match err {
            DialogueError::Store(e) => ChatApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ChatApiError::Internal(msg) => {
                tracing::error!(error = %msg, "chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
