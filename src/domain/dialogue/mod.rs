//! Dialogue module - the conversation itself.
//!
//! Session state with its stage machine and caps, the feature extractor,
//! the correction advisor, reply templates and the per-stage steps that
//! turn an utterance into a reply.

mod bounded;
mod correction;
mod features;
mod name;
mod prompt;
mod responses;
mod session;
mod stage;
pub mod templates;

pub use bounded::{BoundedLog, BoundedSet};
pub use correction::{
    CorrectionAdvisor, CorrectionGate, CorrectionRule, CorrectionSuggestion,
    DEFAULT_CORRECTION_RATE,
};
pub use features::{extract_features, tag, ExtractedFeatures, WordClass, MAX_NOUNS, MAX_VERBS};
pub use name::{extract_name, find_name};
pub use prompt::{build_prompt, PromptContext, PROMPT_HISTORY_WINDOW};
pub use responses::{
    greeting, introduction_step, main_step, main_template_reply, warmup_step, MainMove, Reply,
    ReplySource, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD,
};
pub use session::{
    Exchange, Session, DEFAULT_USER_NAME, HISTORY_CAPACITY, RECENT_RESPONSES_CAPACITY,
    TOPIC_CAPACITY,
};
pub use stage::Stage;
