//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue engine to external systems:
//! - `completion` - Remote text-generation backends (and a mock)
//! - `session` - Session store implementations
//! - `http` - REST endpoints over the dialogue engine

pub mod completion;
pub mod http;
pub mod session;

pub use completion::{build_completion_client, MockCompletionClient};
pub use session::InMemorySessionStore;
