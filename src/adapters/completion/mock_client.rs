//! Mock Completion Client for testing.
//!
//! Provides a configurable mock implementation of the CompletionClient port,
//! allowing tests to run without calling a real backend.
//!
//! # Features
//!
//! - Pre-configured replies and errors, consumed in order
//! - Simulated delays for timeout testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let client = MockCompletionClient::new()
//!     .with_response("What did you enjoy most?")
//!     .with_error(CompletionError::Unauthenticated);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{clean_completion, CompletionClient, CompletionError, CompletionRequest};

const DEFAULT_REPLY: &str = "Mock completion";

/// Mock completion client for testing.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionClient {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionClient {
    /// Creates a new mock client that answers every call with a stock reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful reply to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.outcomes).push_back(Ok(content.into()));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: CompletionError) -> Self {
        lock(&self.outcomes).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_outcome(&self) -> Result<String, CompletionError> {
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_outcome().and_then(|raw| clean_completion(&raw))
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
