//! Grammar correction advisor.
//!
//! An ordered table of common learner mistakes. The first rule that matches
//! rewrites the whole utterance; a gate decides whether the rewrite is
//! surfaced on this turn.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::features::{tag, WordClass};

/// Correction rate used when none is configured.
pub const DEFAULT_CORRECTION_RATE: f64 = 0.3;

/// Words that make a bare verb after he/she/it correct ("does he like").
const AUXILIARIES: &[&str] = &[
    "does", "did", "do", "can", "could", "will", "would", "should", "may", "might", "must", "to",
    "let", "make", "made", "help", "watch",
];

/// Words that can join a pronoun into a plural subject ("he and she like").
const CONJUNCTIONS: &[&str] = &["and", "or", "nor"];

// Be and have forms the tagger files as function words.
const BE_AND_HAVE: &[&str] = &["am", "is", "are", "was", "were", "has", "have", "had"];

/// Identifies which rule produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionRule {
    /// "I is" -> "I am"
    FirstPersonBe,
    /// "he are" -> "he is"
    SingularSubjectBe,
    /// "they is" -> "they are"
    PluralSubjectBe,
    /// "yesterday I go" -> "yesterday I went"
    PastTenseAfterYesterday,
    /// "doesn't has" -> "doesn't have"
    NegatedHave,
    /// "she like" -> "she likes"
    ThirdPersonVerb,
}

impl CorrectionRule {
    /// Rules in the order they are tried.
    pub const ORDERED: [CorrectionRule; 6] = [
        CorrectionRule::FirstPersonBe,
        CorrectionRule::SingularSubjectBe,
        CorrectionRule::PluralSubjectBe,
        CorrectionRule::PastTenseAfterYesterday,
        CorrectionRule::NegatedHave,
        CorrectionRule::ThirdPersonVerb,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::FirstPersonBe => "first_person_be",
            Self::SingularSubjectBe => "singular_subject_be",
            Self::PluralSubjectBe => "plural_subject_be",
            Self::PastTenseAfterYesterday => "past_tense_after_yesterday",
            Self::NegatedHave => "negated_have",
            Self::ThirdPersonVerb => "third_person_verb",
        }
    }

    /// Rewrites every occurrence of this rule's mistake, or `None` if the
    /// text has none.
    pub fn apply(&self, text: &str) -> Option<String> {
        match self {
            Self::FirstPersonBe => rewrite(&FIRST_PERSON_BE, text, |caps| {
                Some(format!("{}I am", &caps[1]))
            }),
            Self::SingularSubjectBe => rewrite(&SINGULAR_SUBJECT_BE, text, |caps| {
                let whole = caps.get(0)?;
                if joins_compound_subject(&text[..whole.start()]) {
                    return None;
                }
                Some(format!("{} is", &caps[1]))
            }),
            Self::PluralSubjectBe => rewrite(&PLURAL_SUBJECT_BE, text, |caps| {
                Some(format!("{} are", &caps[1]))
            }),
            Self::PastTenseAfterYesterday => rewrite(&YESTERDAY_BASE_VERB, text, |caps| {
                let past = past_tense(&caps[2].to_ascii_lowercase())?;
                Some(format!("{}I {}", &caps[1], past))
            }),
            Self::NegatedHave => rewrite(&NEGATED_HAS, text, |caps| {
                Some(format!("{} have", &caps[1]))
            }),
            Self::ThirdPersonVerb => rewrite(&THIRD_PERSON_BARE, text, |caps| {
                let whole = caps.get(0)?;
                let before = &text[..whole.start()];
                if previous_word_in(before, AUXILIARIES) || joins_compound_subject(before) {
                    return None;
                }
                let verb = third_person(&caps[2].to_ascii_lowercase());
                Some(format!("{} {}", &caps[1], verb))
            }),
        }
    }
}

impl fmt::Display for CorrectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("invalid correction regex")
}

// No look-behind in `regex`: the leading group keeps "Hawai'i is" intact.
static FIRST_PERSON_BE: Lazy<Regex> =
    Lazy::new(|| case_insensitive(r"(^|[^\w'’])i is\b"));
static SINGULAR_SUBJECT_BE: Lazy<Regex> = Lazy::new(|| case_insensitive(r"\b(he|she|it) are\b"));
static PLURAL_SUBJECT_BE: Lazy<Regex> = Lazy::new(|| case_insensitive(r"\b(we|they|you) is\b"));
static YESTERDAY_BASE_VERB: Lazy<Regex> = Lazy::new(|| {
    case_insensitive(
        r"\b(yesterday,?\s+)i\s+(go|eat|see|buy|come|drink|have|do|make|take|write|meet|swim)\b",
    )
});
static NEGATED_HAS: Lazy<Regex> =
    Lazy::new(|| case_insensitive(r"\b(don't|doesn't|didn't|do not|does not|did not) has\b"));
static THIRD_PERSON_BARE: Lazy<Regex> = Lazy::new(|| {
    case_insensitive(
        r"\b(he|she|it) (like|love|want|need|go|have|do|play|work|live|eat|watch|study|know|think|make|take|read|write|speak|try|enjoy|come|get|say|teach)\b",
    )
});

/// Replaces each match for which `replace` yields text, leaving the rest of
/// the utterance untouched.
fn rewrite<F>(regex: &Regex, text: &str, mut replace: F) -> Option<String>
where
    F: FnMut(&Captures<'_>) -> Option<String>,
{
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    let mut changed = false;
    for caps in regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(replacement) = replace(&caps) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&replacement);
        last = whole.end();
        changed = true;
    }
    if !changed {
        return None;
    }
    out.push_str(&text[last..]);
    Some(out)
}

/// Whether the last word of `before` is one of `words`.
fn previous_word_in(before: &str, words: &[&str]) -> bool {
    before
        .split_whitespace()
        .next_back()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_ascii_lowercase())
        .is_some_and(|word| words.contains(&word.as_str()))
}

/// Whether a pronoun following `before` completes a compound subject
/// ("my brother and he"), as opposed to opening a new clause after a
/// conjunction ("he is tall and she").
fn joins_compound_subject(before: &str) -> bool {
    if !previous_word_in(before, CONJUNCTIONS) {
        return false;
    }
    let before = before.trim_end();
    let head = before.rfind(char::is_whitespace).map_or("", |at| &before[..at]);
    let clause = head
        .rsplit(|c: char| matches!(c, '.' | '!' | '?' | ';' | ',' | ':'))
        .next()
        .unwrap_or_default();

    let words = tag(clause);
    !words.is_empty()
        && words.iter().all(|(word, class)| {
            *class != WordClass::Verb && !BE_AND_HAVE.contains(&word.to_lowercase().as_str())
        })
}

fn past_tense(verb: &str) -> Option<&'static str> {
    let past = match verb {
        "go" => "went",
        "eat" => "ate",
        "see" => "saw",
        "buy" => "bought",
        "come" => "came",
        "drink" => "drank",
        "have" => "had",
        "do" => "did",
        "make" => "made",
        "take" => "took",
        "write" => "wrote",
        "meet" => "met",
        "swim" => "swam",
        _ => return None,
    };
    Some(past)
}

/// Inflects a base verb for he/she/it.
fn third_person(verb: &str) -> String {
    match verb {
        "have" => return "has".to_string(),
        "go" => return "goes".to_string(),
        "do" => return "does".to_string(),
        _ => {}
    }
    if ["s", "sh", "ch", "x", "z", "o"]
        .iter()
        .any(|suffix| verb.ends_with(suffix))
    {
        return format!("{verb}es");
    }
    if let Some(stem) = verb.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }
    format!("{verb}s")
}

/// A proposed rewrite of a learner utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionSuggestion {
    pub rule: CorrectionRule,
    pub corrected_text: String,
}

impl CorrectionSuggestion {
    /// The note shown to the learner.
    pub fn note(&self) -> String {
        format!("Note: we usually say '{}'", self.corrected_text)
    }
}

/// Decides whether a found correction is surfaced on this turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrectionGate {
    /// Surfaces with the given probability.
    Probabilistic(f64),
    Always,
    Never,
}

impl Default for CorrectionGate {
    fn default() -> Self {
        Self::Probabilistic(DEFAULT_CORRECTION_RATE)
    }
}

impl CorrectionGate {
    pub fn passes<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        match *self {
            Self::Always => true,
            Self::Never => false,
            Self::Probabilistic(rate) if rate.is_nan() || rate <= 0.0 => false,
            Self::Probabilistic(rate) if rate >= 1.0 => true,
            Self::Probabilistic(rate) => rng.gen_bool(rate),
        }
    }
}

/// Applies the rule table behind a gate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorrectionAdvisor {
    gate: CorrectionGate,
}

impl CorrectionAdvisor {
    pub fn new(gate: CorrectionGate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> CorrectionGate {
        self.gate
    }

    /// Runs the rules without the gate.
    pub fn suggest(&self, text: &str) -> Option<CorrectionSuggestion> {
        CorrectionRule::ORDERED.iter().find_map(|rule| {
            rule.apply(text).map(|corrected_text| CorrectionSuggestion {
                rule: *rule,
                corrected_text,
            })
        })
    }

    /// Runs the rules, then suppresses the result unless the gate passes.
    pub fn review<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Option<CorrectionSuggestion> {
        let suggestion = self.suggest(text)?;
        self.gate.passes(rng).then_some(suggestion)
    }
}
