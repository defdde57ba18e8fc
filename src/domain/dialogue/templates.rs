//! Immutable reply pools and template selection.

use rand::seq::SliceRandom;
use rand::Rng;

/// How many of the most recent replies a main-stage pick avoids.
pub const DEDUP_WINDOW: usize = 2;

/// Placeholder for the learner's name.
pub const NAME_SLOT: &str = "{name}";
/// Placeholder for a remembered topic.
pub const TOPIC_SLOT: &str = "{topic}";

/// Topic used in warmup replies when no noun was found.
pub const WARMUP_TOPIC_FALLBACK: &str = "that";
/// Topic used in main replies when no topic is known.
pub const MAIN_TOPIC_FALLBACK: &str = "this";

pub const ENTHUSIASTIC_REPLY: &str = "That sounds great! Tell me more...";
pub const EMPATHETIC_REPLY: &str = "I see. Would you like to talk more about that?";
pub const EMPTY_INPUT_REPLY: &str = "I didn't quite catch that. Could you say that again?";

/// A fixed, non-empty set of reply templates.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePool {
    name: &'static str,
    templates: &'static [&'static str],
}

impl TemplatePool {
    pub const fn new(name: &'static str, templates: &'static [&'static str]) -> Self {
        assert!(!templates.is_empty(), "template pool must not be empty");
        Self { name, templates }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn templates(&self) -> &'static [&'static str] {
        self.templates
    }

    pub fn contains(&self, template: &str) -> bool {
        self.templates.contains(&template)
    }

    /// Picks any template uniformly.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        select_template(self, &[], rng)
    }
}

/// Picks a template from `pool` that is not in `exclude`.
///
/// Falls back to the whole pool when every template is excluded.
pub fn select_template<R: Rng + ?Sized>(
    pool: &TemplatePool,
    exclude: &[&str],
    rng: &mut R,
) -> &'static str {
    let candidates: Vec<&'static str> = pool
        .templates
        .iter()
        .copied()
        .filter(|template| !exclude.contains(template))
        .collect();
    let source: &[&'static str] = if candidates.is_empty() {
        pool.templates
    } else {
        &candidates
    };
    // Pools are non-empty by construction.
    source.choose(rng).copied().unwrap_or(pool.templates[0])
}

/// Substitutes the name and topic slots.
pub fn render(template: &str, name: &str, topic: &str) -> String {
    template.replace(NAME_SLOT, name).replace(TOPIC_SLOT, topic)
}

pub const INTRODUCTION: TemplatePool = TemplatePool::new(
    "introduction",
    &[
        "Hi there! I'm your English practice buddy. What's your name?",
        "Hello! I'm excited to chat with you. How should I call you?",
        "Hey! I'm an AI English coach. What's your name?",
    ],
);

pub const WARMUP: TemplatePool = TemplatePool::new(
    "warmup",
    &[
        "Nice to meet you, {name}! How's your day going so far?",
        "Great to meet you, {name}! What's something interesting that happened today?",
        "Hello {name}! What brings you to practice English today?",
    ],
);

pub const MAIN: TemplatePool = TemplatePool::new(
    "main",
    &[
        "Tell me more about that...",
        "What do you think about {topic}?",
        "How did that make you feel?",
        "Could you describe that in more detail?",
        "What was that experience like for you?",
        "That's interesting! What do you like about {topic}?",
        "That's fascinating! What else have you been up to?",
    ],
);
