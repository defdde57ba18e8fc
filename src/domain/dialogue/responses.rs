//! Stage steps of the response generator.
//!
//! Each step mutates the session the way its stage requires and returns the
//! reply to emit. The completion backend is not reachable from here: the
//! main stage reports [`MainMove::Open`] and the caller decides whether to
//! ask the backend before falling back to [`main_template_reply`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::features::ExtractedFeatures;
use super::name::extract_name;
use super::session::Session;
use super::templates::{self, TemplatePool, DEDUP_WINDOW};

/// Sentiment above which the partner answers enthusiastically.
pub const POSITIVE_THRESHOLD: f32 = 0.3;
/// Sentiment below which the partner answers empathetically.
pub const NEGATIVE_THRESHOLD: f32 = -0.3;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Template,
    Fixed,
    Completion,
}

/// A reply ready to be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    text: String,
    memo: String,
    source: ReplySource,
}

impl Reply {
    /// A reply rendered from `template`. The raw template is what repeat
    /// avoidance remembers.
    pub fn template(template: &'static str, text: String) -> Self {
        Self {
            text,
            memo: template.to_string(),
            source: ReplySource::Template,
        }
    }

    pub fn fixed(text: &'static str) -> Self {
        Self {
            text: text.to_string(),
            memo: text.to_string(),
            source: ReplySource::Fixed,
        }
    }

    pub fn completion(text: String) -> Self {
        Self {
            memo: text.clone(),
            text,
            source: ReplySource::Completion,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// What goes into the session's recent responses.
    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn source(&self) -> ReplySource {
        self.source
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// How a main-stage turn is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMove {
    Enthusiastic,
    Empathetic,
    /// Neutral turn: completion backend if available, else a template.
    Open,
}

impl MainMove {
    pub fn for_sentiment(sentiment: f32) -> Self {
        if sentiment > POSITIVE_THRESHOLD {
            Self::Enthusiastic
        } else if sentiment < NEGATIVE_THRESHOLD {
            Self::Empathetic
        } else {
            Self::Open
        }
    }

    /// The fixed reply for this move, if it has one.
    pub fn fixed_reply(&self) -> Option<Reply> {
        match self {
            Self::Enthusiastic => Some(Reply::fixed(templates::ENTHUSIASTIC_REPLY)),
            Self::Empathetic => Some(Reply::fixed(templates::EMPATHETIC_REPLY)),
            Self::Open => None,
        }
    }
}

/// The introduction reply for a fresh session.
pub fn greeting<R: Rng + ?Sized>(rng: &mut R) -> Reply {
    let template = templates::INTRODUCTION.pick(rng);
    Reply::template(template, template.to_string())
}

/// Introduction turn: learn the name and move to warmup.
pub fn introduction_step<R: Rng + ?Sized>(
    session: &mut Session,
    utterance: &str,
    rng: &mut R,
) -> Reply {
    session.set_user_name(extract_name(utterance));
    session.advance();
    let template = templates::WARMUP.pick(rng);
    let text = templates::render(template, session.user_name(), "");
    Reply::template(template, text)
}

/// Warmup turn: take the first topics and move to main.
pub fn warmup_step<R: Rng + ?Sized>(
    session: &mut Session,
    features: &ExtractedFeatures,
    rng: &mut R,
) -> Reply {
    session.replace_topics(features.nouns.iter().cloned());
    session.advance();
    pick_main(session, templates::WARMUP_TOPIC_FALLBACK, rng)
}

/// Main turn: remember the new topics and decide how to answer.
pub fn main_step(session: &mut Session, features: &ExtractedFeatures) -> MainMove {
    session.remember_topics(features.nouns.iter().cloned());
    MainMove::for_sentiment(features.sentiment)
}

/// Main-stage template reply that avoids the last replies.
pub fn main_template_reply<R: Rng + ?Sized>(session: &Session, rng: &mut R) -> Reply {
    pick_main(session, templates::MAIN_TOPIC_FALLBACK, rng)
}

fn pick_main<R: Rng + ?Sized>(session: &Session, fallback_topic: &str, rng: &mut R) -> Reply {
    let pool: &TemplatePool = &templates::MAIN;
    let recent = session.last_responses(DEDUP_WINDOW);
    let template = templates::select_template(pool, &recent, rng);
    let topic = session
        .topics()
        .choose(rng)
        .unwrap_or(fallback_topic)
        .to_string();
    Reply::template(template, templates::render(template, session.user_name(), &topic))
}
