//! HTTP adapters - REST API implementations.

pub mod chat;

pub use chat::{build_app, chat_router, ChatAppState};
