//! Prompt construction for the completion backend.
//!
//! The prompt carries the partner's role instructions, a short window of
//! recent exchanges, the topics and actions noticed in the current
//! utterance, and the utterance itself.

use super::features::ExtractedFeatures;
use super::session::{Exchange, Session};

/// Exchanges of history included in a prompt.
pub const PROMPT_HISTORY_WINDOW: usize = 3;

const ROLE_INSTRUCTIONS: &str = "You're a friendly English conversation partner helping a \
student practice. Respond naturally while:
1. Continuing the conversation flow
2. Showing genuine interest
3. Keeping the response to at most 2 sentences
4. Referencing the student's topics when relevant
5. Gently correcting only major errors";

/// Everything a prompt is built from.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    /// Learner's name.
    pub user_name: &'a str,
    /// Most recent exchanges, oldest first.
    pub history: Vec<&'a Exchange>,
    /// Nouns from the current utterance.
    pub topics: &'a [String],
    /// Verbs from the current utterance.
    pub actions: &'a [String],
    /// The current utterance.
    pub utterance: &'a str,
}

impl<'a> PromptContext<'a> {
    /// Collects the context for a main-stage turn.
    pub fn for_turn(session: &'a Session, features: &'a ExtractedFeatures, utterance: &'a str) -> Self {
        Self {
            user_name: session.user_name(),
            history: session.history().last_n(PROMPT_HISTORY_WINDOW).collect(),
            topics: &features.nouns,
            actions: &features.verbs,
            utterance,
        }
    }

    /// Renders the prompt text.
    pub fn render(&self) -> String {
        let mut prompt = String::with_capacity(512);
        prompt.push_str(ROLE_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if !self.history.is_empty() {
            prompt.push_str("Recent conversation:\n");
            for exchange in &self.history {
                prompt.push_str(&format!("{}: {}\n", self.user_name, exchange.user_text));
                prompt.push_str(&format!("You: {}\n", exchange.bot_text));
            }
            prompt.push('\n');
        }

        if !self.topics.is_empty() {
            prompt.push_str(&format!("Topics: {}\n", self.topics.join(", ")));
        }
        if !self.actions.is_empty() {
            prompt.push_str(&format!("Actions: {}\n", self.actions.join(", ")));
        }

        prompt.push_str(&format!(
            "The student ({}) said:\n\"{}\"\n\nResponse:",
            self.user_name, self.utterance
        ));
        prompt
    }
}

/// Builds the completion prompt for a main-stage turn.
pub fn build_prompt(session: &Session, features: &ExtractedFeatures, utterance: &str) -> String {
    PromptContext::for_turn(session, features, utterance).render()
}
