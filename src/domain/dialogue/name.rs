//! Learner name extraction from an introduction.

use super::session::DEFAULT_USER_NAME;

/// Phrases that introduce a name, tried in order.
const NAME_MARKERS: &[&str] = &["my name is", "i'm", "name is"];

/// Words that end a name ("I'm Sam and I live...").
const NAME_STOPS: &[&str] = &[
    "and", "but", "so", "or", "i", "im", "i'm", "from", "nice", "thanks", "thank", "here",
];

const MAX_NAME_WORDS: usize = 2;

/// Returns the name the learner introduced, or `None` when nothing usable
/// was said.
pub fn find_name(utterance: &str) -> Option<String> {
    let normalized = utterance.replace(['\u{2019}', '\u{2018}'], "'");
    let lowered = normalized.to_lowercase();

    let words: Vec<String> = match NAME_MARKERS
        .iter()
        .find_map(|marker| lowered.find(marker).map(|at| at + marker.len()))
    {
        Some(end) => name_words(lowered.get(end..).unwrap_or_default()),
        None => lowered
            .split_whitespace()
            .map(clean_token)
            .filter(|word| !word.is_empty())
            .take(MAX_NAME_WORDS)
            .collect(),
    };

    let name = words
        .iter()
        .map(|word| title_case(word))
        .collect::<Vec<_>>()
        .join(" ");
    (name.chars().count() > 1).then_some(name)
}

/// Same as [`find_name`] with the default name as fallback.
pub fn extract_name(utterance: &str) -> String {
    find_name(utterance).unwrap_or_else(|| DEFAULT_USER_NAME.to_string())
}

fn name_words(tail: &str) -> Vec<String> {
    let mut words = Vec::with_capacity(MAX_NAME_WORDS);
    for raw in tail.split_whitespace() {
        let word = clean_token(raw);
        if word.is_empty() || NAME_STOPS.contains(&word.as_str()) {
            break;
        }
        words.push(word);
        let ends_clause = raw.ends_with(|c: char| !c.is_alphanumeric());
        if words.len() == MAX_NAME_WORDS || ends_clause {
            break;
        }
    }
    words
}

fn clean_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
