//! Session Store Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Keeps sessions in process memory for the
//!   lifetime of the server

mod in_memory_store;

pub use in_memory_store::InMemorySessionStore;
