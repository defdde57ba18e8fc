//! Session Store Port - Interface for keeping dialogue sessions.
//!
//! A turn reads a session, changes it, and writes it back. The store hands
//! out a [`TurnGuard`] per key so two turns for the same key never
//! interleave, while turns for different keys proceed independently.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::dialogue::Session;
use crate::domain::foundation::SessionKey;

/// Errors that can occur during session store operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Exclusive right to run a turn for one session key.
///
/// Dropping the guard releases the key.
#[derive(Debug)]
pub struct TurnGuard {
    key: SessionKey,
    _guard: OwnedMutexGuard<()>,
}

impl TurnGuard {
    pub fn new(key: SessionKey, guard: OwnedMutexGuard<()>) -> Self {
        Self { key, _guard: guard }
    }

    /// The key this guard serializes.
    pub fn key(&self) -> &SessionKey {
        &self.key
    }
}

/// Port for loading and saving sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Waits until no other turn holds `key`, then claims it.
    async fn lock_turn(&self, key: &SessionKey) -> Result<TurnGuard, SessionStoreError>;

    /// Loads the session for `key`, creating a fresh one if none exists.
    async fn get_or_create(&self, key: &SessionKey) -> Result<Session, SessionStoreError>;

    /// Stores `session` under its own key, replacing what was there.
    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Replaces the session for `key` with a fresh one and returns it.
    async fn reset(&self, key: &SessionKey) -> Result<Session, SessionStoreError>;

    /// Reads the session for `key` without creating it.
    async fn get(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError>;
}
