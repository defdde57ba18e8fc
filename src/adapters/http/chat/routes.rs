//! Axum router configuration for the chat endpoints.

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::handlers::{chat, health, start_session, ChatAppState};

/// Create the chat API router.
///
/// # Routes
/// - `GET /start` - Start or restart a conversation
/// - `POST /chat` - Send one learner message
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/start", get(start_session))
        .route("/chat", post(chat))
}

/// Create the complete chat router, mounted under `/api` plus `/health`.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new()
        .nest("/api", chat_routes())
        .route("/health", get(health))
}

/// Builds the served application: routes, state and the tower-http layers.
pub fn build_app(state: ChatAppState, server: &ServerConfig) -> Router {
    chat_router()
        .with_state(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins_list()))
}

/// Any origin when none are configured, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
