//! Response generation for one turn.
//!
//! Runs the stage step for the session's current stage. On neutral main
//! stage turns the completion backend gets one bounded attempt; any failure
//! is logged and the turn falls back to a template.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::dialogue::{
    build_prompt, greeting, introduction_step, main_step, main_template_reply, warmup_step,
    ExtractedFeatures, Reply, Session, Stage,
};
use crate::ports::{
    clean_completion, CompletionClient, CompletionError, CompletionRequest, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};

use super::shared_rng::SharedRng;

/// Generation parameters for completion requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on one completion attempt.
    pub completion_timeout: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            completion_timeout: Duration::from_secs(12),
        }
    }
}

/// Picks the reply for each turn and records it on the session.
pub struct ResponseGenerator {
    client: Option<Arc<dyn CompletionClient>>,
    settings: GeneratorSettings,
}

impl ResponseGenerator {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, settings: GeneratorSettings) -> Self {
        Self { client, settings }
    }

    /// Template-only generator.
    pub fn templates_only() -> Self {
        Self::new(None, GeneratorSettings::default())
    }

    pub fn has_completion_backend(&self) -> bool {
        self.client.is_some()
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Opening line for a fresh session.
    pub fn greet(&self, session: &mut Session, rng: &SharedRng) -> Reply {
        let reply = rng.with(|r| greeting(r));
        session.record_response(reply.memo());
        reply
    }

    /// Produces the reply for `utterance`, advancing the session as its
    /// stage requires.
    pub async fn respond(
        &self,
        session: &mut Session,
        utterance: &str,
        features: &ExtractedFeatures,
        rng: &SharedRng,
    ) -> Reply {
        let from = session.stage();
        let reply = match from {
            Stage::Introduction => rng.with(|r| introduction_step(session, utterance, r)),
            Stage::Warmup => rng.with(|r| warmup_step(session, features, r)),
            Stage::Main => self.main_reply(session, utterance, features, rng).await,
        };

        if session.stage() != from {
            tracing::debug!(
                session = %session.key(),
                from = from.label(),
                to = session.stage().label(),
                "stage advanced"
            );
        }
        tracing::debug!(
            session = %session.key(),
            source = ?reply.source(),
            template = reply.memo(),
            "reply selected"
        );

        session.record_response(reply.memo());
        reply
    }

    async fn main_reply(
        &self,
        session: &mut Session,
        utterance: &str,
        features: &ExtractedFeatures,
        rng: &SharedRng,
    ) -> Reply {
        let next = main_step(session, features);
        if let Some(reply) = next.fixed_reply() {
            return reply;
        }

        if let Some(client) = &self.client {
            let prompt = build_prompt(session, features, utterance);
            match self.complete(client.as_ref(), prompt).await {
                Ok(text) => return Reply::completion(text),
                Err(err) => tracing::warn!(
                    kind = %err.kind(),
                    backend = client.backend_name(),
                    error = %err,
                    "completion failed, falling back to template"
                ),
            }
        }

        rng.with(|r| main_template_reply(session, r))
    }

    async fn complete(
        &self,
        client: &dyn CompletionClient,
        prompt: String,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest::new(prompt)
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        match tokio::time::timeout(self.settings.completion_timeout, client.complete(request)).await {
            Ok(result) => result.and_then(|raw| clean_completion(&raw)),
            Err(_) => Err(CompletionError::timeout(
                self.settings.completion_timeout.as_secs(),
            )),
        }
    }
}
