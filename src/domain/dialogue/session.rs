//! Per-conversation session state.
//!
//! A `Session` is the only mutable record the engine keeps. Its caps are
//! enforced by the collection types, and its stage can only move along the
//! edges declared by [`Stage`].

use serde::{Deserialize, Serialize};

use super::bounded::{BoundedLog, BoundedSet};
use super::stage::Stage;
use crate::domain::foundation::{SessionKey, Timestamp};

/// Exchanges kept per session.
pub const HISTORY_CAPACITY: usize = 5;
/// Emitted replies remembered for repeat avoidance.
pub const RECENT_RESPONSES_CAPACITY: usize = 5;
/// Topics remembered per session.
pub const TOPIC_CAPACITY: usize = 3;
/// Name used until the learner tells us theirs.
pub const DEFAULT_USER_NAME: &str = "Friend";

/// One user utterance and the reply it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user_text: String,
    pub bot_text: String,
    pub timestamp: Timestamp,
}

impl Exchange {
    pub fn new(user_text: impl Into<String>, bot_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            bot_text: bot_text.into(),
            timestamp: Timestamp::now(),
        }
    }
}

/// State of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    key: SessionKey,
    stage: Stage,
    user_name: String,
    topics: BoundedSet,
    history: BoundedLog<Exchange>,
    recent_responses: BoundedLog<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a fresh session at the introduction stage.
    pub fn new(key: SessionKey) -> Self {
        let now = Timestamp::now();
        Self {
            key,
            stage: Stage::Introduction,
            user_name: DEFAULT_USER_NAME.to_string(),
            topics: BoundedSet::new(TOPIC_CAPACITY),
            history: BoundedLog::new(HISTORY_CAPACITY),
            recent_responses: BoundedLog::new(RECENT_RESPONSES_CAPACITY),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn topics(&self) -> &BoundedSet {
        &self.topics
    }

    pub fn history(&self) -> &BoundedLog<Exchange> {
        &self.history
    }

    pub fn recent_responses(&self) -> &BoundedLog<String> {
        &self.recent_responses
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Moves the session one step along its progression.
    pub fn advance(&mut self) {
        self.stage = self.stage.next();
        self.touch();
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = name.into();
        self.touch();
    }

    /// Replaces the topic set with the given words.
    pub fn replace_topics<I, S>(&mut self, topics: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics.replace(topics);
        self.touch();
    }

    /// Appends topics, evicting the oldest beyond capacity.
    pub fn remember_topics<I, S>(&mut self, topics: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics.extend(topics);
        self.touch();
    }

    /// Remembers an emitted reply (or the template it came from).
    pub fn record_response(&mut self, response: impl Into<String>) {
        self.recent_responses.push(response.into());
        self.touch();
    }

    /// The last `n` remembered replies, oldest first.
    pub fn last_responses(&self, n: usize) -> Vec<&str> {
        self.recent_responses.last_n(n).map(String::as_str).collect()
    }

    pub fn record_exchange(&mut self, user_text: impl Into<String>, bot_text: impl Into<String>) {
        self.history.push(Exchange::new(user_text, bot_text));
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
