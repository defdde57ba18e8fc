//! In-Memory Session Store Adapter
//!
//! Stores dialogue sessions in memory. Sessions live as long as the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::dialogue::Session;
use crate::domain::foundation::SessionKey;
use crate::ports::{SessionStore, SessionStoreError, TurnGuard};

/// In-memory storage for dialogue sessions
///
/// The session map and the per-key turn locks are separate: the map lock is
/// only held while a lookup or insert runs, the turn lock for a key is held
/// by the caller for as long as its turn lasts.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, Session>>>,
    turn_locks: Arc<RwLock<HashMap<SessionKey, Arc<Mutex<()>>>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored sessions and their turn locks (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
        self.turn_locks.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Get the number of turn locks currently tracked
    pub async fn turn_lock_count(&self) -> usize {
        self.turn_locks.read().await.len()
    }

    async fn turn_lock(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        if let Some(lock) = self.turn_locks.read().await.get(key) {
            return Arc::clone(lock);
        }
        let mut locks = self.turn_locks.write().await;
        // A lock only the map refers to is neither held nor awaited.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(key.clone()).or_default())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lock_turn(&self, key: &SessionKey) -> Result<TurnGuard, SessionStoreError> {
        let lock = self.turn_lock(key).await;
        Ok(TurnGuard::new(key.clone(), lock.lock_owned().await))
    }

    async fn get_or_create(&self, key: &SessionKey) -> Result<Session, SessionStoreError> {
        if let Some(session) = self.sessions.read().await.get(key) {
            return Ok(session.clone());
        }
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(key.clone())
            .or_insert_with(|| Session::new(key.clone()));
        Ok(session.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.key().clone(), session.clone());
        Ok(())
    }

    async fn reset(&self, key: &SessionKey) -> Result<Session, SessionStoreError> {
        let session = Session::new(key.clone());
        let mut sessions = self.sessions.write().await;
        sessions.insert(key.clone(), session.clone());
        Ok(session)
    }

    async fn get(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(key).cloned())
    }
}
