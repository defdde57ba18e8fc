//! Dialogue engine - entry point for starting sessions and handling turns.
//!
//! A turn holds the session's turn lock from load to save, so concurrent
//! turns for one key are applied one after another and never lose updates.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::dialogue::{extract_features, templates, CorrectionAdvisor, Session};
use crate::domain::foundation::SessionKey;
use crate::ports::{SessionStore, SessionStoreError};

use super::response_generator::ResponseGenerator;
use super::shared_rng::SharedRng;

/// Errors surfaced by the engine.
///
/// Completion failures never appear here: they are recovered inside the turn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DialogueError {
    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Reply to a session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReply {
    pub reply: String,
}

/// Reply to one learner turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub reply: String,
    /// Correction note, when one was found and surfaced.
    pub correction: Option<String>,
}

/// Orchestrates the store, the response generator and the correction advisor.
pub struct DialogueEngine {
    store: Arc<dyn SessionStore>,
    generator: ResponseGenerator,
    advisor: CorrectionAdvisor,
    rng: SharedRng,
}

impl DialogueEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        generator: ResponseGenerator,
        advisor: CorrectionAdvisor,
    ) -> Self {
        Self {
            store,
            generator,
            advisor,
            rng: SharedRng::from_entropy(),
        }
    }

    /// Replaces the random source with a seeded one.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = SharedRng::seeded(seed);
        self
    }

    /// Starts (or restarts) the session for `key` and returns the greeting.
    pub async fn start_session(&self, key: &SessionKey) -> Result<StartReply, DialogueError> {
        let _turn = self.store.lock_turn(key).await?;

        let mut session = self.store.reset(key).await?;
        let reply = self.generator.greet(&mut session, &self.rng);
        self.store.save(&session).await?;

        tracing::info!(session = %key, "session started");
        Ok(StartReply {
            reply: reply.into_text(),
        })
    }

    /// Handles one learner utterance.
    ///
    /// A blank utterance gets a fixed reply and leaves the session untouched.
    pub async fn handle_turn(
        &self,
        key: &SessionKey,
        utterance: &str,
    ) -> Result<TurnReply, DialogueError> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            tracing::debug!(session = %key, "empty utterance");
            return Ok(TurnReply {
                reply: templates::EMPTY_INPUT_REPLY.to_string(),
                correction: None,
            });
        }

        let _turn = self.store.lock_turn(key).await?;
        let mut session = self.store.get_or_create(key).await?;

        let features = extract_features(utterance);
        let reply = self
            .generator
            .respond(&mut session, utterance, &features, &self.rng)
            .await;
        let correction = self
            .rng
            .with(|r| self.advisor.review(utterance, r))
            .map(|suggestion| {
                tracing::debug!(session = %key, rule = %suggestion.rule, "correction surfaced");
                suggestion.note()
            });

        session.record_exchange(utterance, reply.text());
        self.store.save(&session).await?;

        Ok(TurnReply {
            reply: reply.into_text(),
            correction,
        })
    }

    /// Current state of the session for `key`, if it exists.
    pub async fn session_snapshot(&self, key: &SessionKey) -> Result<Option<Session>, DialogueError> {
        Ok(self.store.get(key).await?)
    }

    pub fn has_completion_backend(&self) -> bool {
        self.generator.has_completion_backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::InMemorySessionStore;
    use crate::domain::dialogue::{CorrectionGate, Stage};

    fn engine(gate: CorrectionGate) -> DialogueEngine {
        DialogueEngine::new(
            Arc::new(InMemorySessionStore::new()),
            ResponseGenerator::templates_only(),
            CorrectionAdvisor::new(gate),
        )
        .with_rng_seed(42)
    }

    fn key(raw: &str) -> SessionKey {
        SessionKey::new(raw).unwrap()
    }

    #[tokio::test]
    async fn start_session_greets_from_introduction_pool() {
        let engine = engine(CorrectionGate::Never);
        let start = engine.start_session(&key("s1")).await.unwrap();

        assert!(templates::INTRODUCTION.contains(&start.reply));
        let session = engine.session_snapshot(&key("s1")).await.unwrap().unwrap();
        assert_eq!(session.stage(), Stage::Introduction);
        assert!(session.history().is_empty());
        assert_eq!(session.recent_responses().len(), 1);
    }

    #[tokio::test]
    async fn name_turn_moves_to_warmup() {
        let engine = engine(CorrectionGate::Never);
        engine.start_session(&key("s1")).await.unwrap();

        let turn = engine.handle_turn(&key("s1"), "My name is Alex").await.unwrap();

        assert!(turn.reply.contains("Alex"));
        assert!(turn.correction.is_none());
        let session = engine.session_snapshot(&key("s1")).await.unwrap().unwrap();
        assert_eq!(session.user_name(), "Alex");
        assert_eq!(session.stage(), Stage::Warmup);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn open_gate_surfaces_correction() {
        let engine = engine(CorrectionGate::Always);
        engine.start_session(&key("s1")).await.unwrap();

        let turn = engine.handle_turn(&key("s1"), "I is happy today").await.unwrap();

        assert_eq!(
            turn.correction.as_deref(),
            Some("Note: we usually say 'I am happy today'")
        );
    }

    #[tokio::test]
    async fn blank_turn_changes_nothing() {
        let engine = engine(CorrectionGate::Always);
        engine.start_session(&key("s1")).await.unwrap();
        let before = engine.session_snapshot(&key("s1")).await.unwrap();

        let turn = engine.handle_turn(&key("s1"), "   ").await.unwrap();

        assert_eq!(turn.reply, templates::EMPTY_INPUT_REPLY);
        assert!(turn.correction.is_none());
        assert_eq!(engine.session_snapshot(&key("s1")).await.unwrap(), before);
    }

    #[tokio::test]
    async fn blank_turn_does_not_create_session() {
        let engine = engine(CorrectionGate::Never);
        engine.handle_turn(&key("fresh"), "").await.unwrap();
        assert!(engine.session_snapshot(&key("fresh")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_turn_without_start_creates_session() {
        let engine = engine(CorrectionGate::Never);
        let turn = engine.handle_turn(&key("s2"), "I'm Sam").await.unwrap();

        assert!(turn.reply.contains("Sam"));
        let session = engine.session_snapshot(&key("s2")).await.unwrap().unwrap();
        assert_eq!(session.stage(), Stage::Warmup);
    }

    #[tokio::test]
    async fn restart_resets_progress() {
        let engine = engine(CorrectionGate::Never);
        engine.handle_turn(&key("s1"), "I'm Sam").await.unwrap();
        engine.handle_turn(&key("s1"), "I like football").await.unwrap();

        engine.start_session(&key("s1")).await.unwrap();

        let session = engine.session_snapshot(&key("s1")).await.unwrap().unwrap();
        assert_eq!(session.stage(), Stage::Introduction);
        assert!(session.topics().is_empty());
        assert_eq!(session.user_name(), "Friend");
    }

    #[test]
    fn template_only_engine_reports_no_backend() {
        assert!(!engine(CorrectionGate::Never).has_completion_backend());
    }
}
