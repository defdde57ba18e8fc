//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionClient` - Remote text generation used for open-ended replies
//! - `SessionStore` - Per-key session persistence with turn serialization

mod completion_client;
mod session_store;

pub use completion_client::{
    clean_completion, CompletionClient, CompletionError, CompletionFailureKind, CompletionRequest,
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use session_store::{SessionStore, SessionStoreError, TurnGuard};
