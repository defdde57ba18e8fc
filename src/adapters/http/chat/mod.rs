//! HTTP adapter for the chat endpoints.
//!
//! - `GET /api/start?session_id=...` - Start or restart a conversation
//! - `POST /api/chat` - Send one learner message
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ChatApiError, ChatAppState};
pub use routes::{build_app, chat_router, chat_routes};
