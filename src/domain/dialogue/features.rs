//! Lightweight linguistic feature extraction.
//!
//! Splits an utterance into words, sorts them into coarse part-of-speech
//! classes with positional and suffix heuristics, and scores sentiment
//! against a small cue lexicon. Nothing here calls out of process and
//! nothing here can fail: unknown input yields empty lists and a neutral
//! score.

use serde::{Deserialize, Serialize};

/// Nouns kept per utterance.
pub const MAX_NOUNS: usize = 3;
/// Verbs kept per utterance.
pub const MAX_VERBS: usize = 2;

/// Features derived from a single utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFeatures {
    /// Noun-like words in order of appearance, at most [`MAX_NOUNS`].
    pub nouns: Vec<String>,
    /// Verb-like words in order of appearance, at most [`MAX_VERBS`].
    pub verbs: Vec<String>,
    /// Polarity in [-1, 1].
    pub sentiment: f32,
}

/// Coarse word class assigned by the heuristic tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Function,
}

#[derive(Debug, Clone)]
struct Token {
    surface: String,
    lower: String,
    sentence_start: bool,
}

// Words that set up a noun in the next slot.
const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "every", "each", "another", "no",
];

// Words that set up a verb in the next slot.
const VERB_TRIGGERS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "to", "will", "would", "can", "could", "should",
    "shall", "may", "might", "must", "do", "does", "did", "don't", "doesn't", "didn't", "can't",
    "won't", "wouldn't", "couldn't", "shouldn't", "i'll", "we'll", "you'll", "they'll", "let's",
];

// Function words that keep whatever expectation the previous word set.
const PASS_THROUGH: &[&str] = &[
    "really", "just", "also", "always", "never", "often", "usually", "sometimes", "still", "even",
    "not", "very", "so", "quite", "too", "already", "finally", "actually",
];

const OTHER_FUNCTION_WORDS: &[&str] = &[
    "me", "him", "us", "them", "myself", "yourself", "himself", "herself", "ourselves",
    "themselves", "mine", "yours", "hers", "ours", "theirs", "in", "on", "at", "for", "from",
    "with", "about", "of", "by", "as", "into", "over", "under", "after", "before", "during",
    "through", "between", "without", "around", "up", "down", "out", "off", "near", "than",
    "and", "or", "but", "because", "if", "when", "while", "then", "though", "although", "am",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "i'm",
    "you're", "he's", "she's", "it's", "we're", "they're", "i've", "you've", "we've", "i'd",
    "that's", "there's", "what's", "isn't", "aren't", "wasn't", "weren't", "haven't", "hasn't",
    "what", "who", "whom", "which", "where", "why", "how", "yes", "yeah", "ok", "okay", "please",
    "hi", "hello", "hey", "there", "here", "now", "today", "yesterday", "tomorrow", "tonight",
    "all", "both", "much", "many", "more", "most", "other", "such", "own", "same", "few",
    "something", "nothing", "anything", "everything", "someone", "anyone", "everyone",
    "thing", "things", "lot", "lots", "bit", "kind", "sort", "way", "well", "um", "uh",
];

const COMMON_VERBS: &[&str] = &[
    "go", "goes", "went", "gone", "eat", "eats", "ate", "eaten", "see", "sees", "saw", "seen",
    "love", "loves", "want", "wants", "need", "needs", "think", "thinks", "thought", "know",
    "knows", "knew", "make", "makes", "made", "take", "takes", "took", "come", "comes", "came",
    "get", "gets", "got", "give", "gives", "gave", "play", "plays", "work", "works", "watch",
    "watches", "read", "reads", "write", "writes", "wrote", "study", "studies", "learn", "learns",
    "visit", "visits", "travel", "travels", "cook", "cooks", "enjoy", "enjoys", "feel", "feels",
    "felt", "hate", "hates", "say", "says", "said", "tell", "tells", "told", "find", "finds",
    "found", "buy", "buys", "bought", "meet", "meets", "met", "run", "runs", "ran", "swim",
    "swims", "swam", "sing", "sings", "sang", "speak", "speaks", "spoke", "listen", "listens",
    "live", "lives", "walk", "walks", "talk", "talks", "try", "tries", "start", "starts", "finish",
    "sleep", "sleeps", "slept", "drink", "drinks", "drank", "drive", "drives", "drove", "fly",
    "flies", "flew", "bring", "brought", "teach", "taught", "move", "moves", "help", "helps",
    "miss", "misses", "hope", "hopes", "plan", "plans", "prefer", "prefers", "dance", "dances",
    "like", "likes", "liked",
];

const COMMON_ADJECTIVES: &[&str] = &[
    "new", "old", "big", "small", "little", "good", "bad", "great", "happy", "sad", "nice",
    "beautiful", "interesting", "boring", "favorite", "favourite", "busy", "tired", "hard",
    "easy", "long", "short", "young", "fun", "hot", "cold", "warm", "cool", "best", "better",
    "worse", "worst", "amazing", "awesome", "terrible", "awful", "horrible", "excited",
    "exciting", "lovely", "fine", "perfect", "glad", "angry", "sick", "upset", "lonely",
    "stressed", "difficult", "delicious", "wonderful", "excellent", "fantastic", "first", "last",
    "next", "high", "low", "late", "early", "free", "full", "real", "sure", "funny", "quiet",
    "loud", "different", "important", "large", "strange", "poor", "rich", "unhappy", "worried",
    "scared", "annoying", "disappointed",
];

// Words the suffix rules would otherwise misfile.
const NOUN_EXCEPTIONS: &[&str] = &[
    "family", "italy", "july", "morning", "evening", "building", "meeting", "painting",
    "wedding", "ceiling", "clothing", "spring", "feeling", "bed", "hundred", "sled",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less"];

// Polarity cue lexicon.
const SENTIMENT_CUES: &[(&str, f32)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("love", 0.5),
    ("loved", 0.7),
    ("loves", 0.5),
    ("wonderful", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("nice", 0.6),
    ("fun", 0.3),
    ("enjoy", 0.4),
    ("enjoyed", 0.5),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("perfect", 1.0),
    ("glad", 0.5),
    ("excited", 0.4),
    ("exciting", 0.3),
    ("interesting", 0.5),
    ("delicious", 1.0),
    ("lovely", 0.5),
    ("cool", 0.35),
    ("fine", 0.4),
    ("better", 0.5),
    ("favorite", 0.5),
    ("favourite", 0.5),
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("sad", -0.5),
    ("angry", -0.5),
    ("hate", -0.8),
    ("hated", -0.9),
    ("boring", -1.0),
    ("bored", -0.5),
    ("tired", -0.4),
    ("sick", -0.7),
    ("worst", -1.0),
    ("worse", -0.4),
    ("upset", -0.5),
    ("lonely", -0.5),
    ("stressed", -0.5),
    ("difficult", -0.5),
    ("hard", -0.3),
    ("annoying", -0.8),
    ("disappointed", -0.75),
    ("worried", -0.5),
    ("scared", -0.5),
    ("poor", -0.4),
    ("unhappy", -0.6),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
    "can't", "won't", "hardly",
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("extremely", 1.5),
    ("super", 1.3),
    ("quite", 1.1),
    ("too", 1.1),
];

// Multiplier applied to a cue preceded by a negator.
const NEGATION_FACTOR: f32 = -0.5;

/// Extracts nouns, verbs and sentiment from an utterance.
pub fn extract_features(text: &str) -> ExtractedFeatures {
    let tokens = tokenize(text);
    let classes = classify(&tokens);

    let mut nouns = Vec::new();
    let mut verbs = Vec::new();
    for (token, class) in tokens.iter().zip(classes.iter()) {
        match class {
            WordClass::Noun if nouns.len() < MAX_NOUNS => nouns.push(topic_form(token)),
            WordClass::Verb if verbs.len() < MAX_VERBS => verbs.push(token.lower.clone()),
            _ => {}
        }
    }

    ExtractedFeatures {
        nouns,
        verbs,
        sentiment: sentiment(&tokens),
    }
}

/// Word classes for every word in `text`, in order.
pub fn tag(text: &str) -> Vec<(String, WordClass)> {
    let tokens = tokenize(text);
    let classes = classify(&tokens);
    tokens
        .into_iter()
        .zip(classes)
        .map(|(token, class)| (token.surface, class))
        .collect()
}

fn tokenize(text: &str) -> Vec<Token> {
    let normalized = text.replace(|c: char| c == '\u{2019}' || c == '\u{2018}', "'");
    let mut tokens = Vec::new();
    let mut sentence_start = true;
    let mut current = String::new();

    for ch in normalized.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            current.push(ch);
        } else {
            flush_word(&mut current, &mut sentence_start, &mut tokens);
            if matches!(ch, '.' | '!' | '?') {
                sentence_start = true;
            }
        }
    }
    flush_word(&mut current, &mut sentence_start, &mut tokens);
    tokens
}

fn flush_word(current: &mut String, sentence_start: &mut bool, tokens: &mut Vec<Token>) {
    let word = current.trim_matches('\'');
    if !word.is_empty() {
        tokens.push(Token {
            surface: word.to_string(),
            lower: word.to_lowercase(),
            sentence_start: *sentence_start,
        });
        *sentence_start = false;
    }
    current.clear();
}

fn classify(tokens: &[Token]) -> Vec<WordClass> {
    let mut classes = Vec::with_capacity(tokens.len());
    let mut expect_noun = false;
    let mut expect_verb = false;

    for token in tokens {
        let word = token.lower.as_str();

        if word.chars().all(|c| c.is_ascii_digit()) {
            classes.push(WordClass::Function);
            expect_noun = false;
            expect_verb = false;
            continue;
        }

        if PASS_THROUGH.contains(&word) {
            classes.push(WordClass::Function);
            continue;
        }

        if is_function_word(word) {
            classes.push(WordClass::Function);
            expect_noun = DETERMINERS.contains(&word);
            expect_verb = VERB_TRIGGERS.contains(&word);
            continue;
        }

        let class = if expect_noun {
            if is_adjective(word) || is_adverb(word) {
                WordClass::Adjective
            } else {
                WordClass::Noun
            }
        } else if is_proper_noun(token) {
            WordClass::Noun
        } else if expect_verb && !is_adjective(word) && !is_adverb(word) {
            WordClass::Verb
        } else if COMMON_VERBS.contains(&word) || is_verb_form(word) {
            WordClass::Verb
        } else if is_adverb(word) {
            WordClass::Adverb
        } else if is_adjective(word) {
            WordClass::Adjective
        } else if word.chars().count() >= 3 {
            WordClass::Noun
        } else {
            WordClass::Function
        };

        // "my new job": the determiner context survives adjectives.
        expect_noun = expect_noun && class == WordClass::Adjective;
        expect_verb = false;
        classes.push(class);
    }

    classes
}

fn is_function_word(word: &str) -> bool {
    DETERMINERS.contains(&word)
        || VERB_TRIGGERS.contains(&word)
        || OTHER_FUNCTION_WORDS.contains(&word)
        || NEGATORS.contains(&word)
}

fn is_proper_noun(token: &Token) -> bool {
    !token.sentence_start
        && token.lower != "i"
        && token
            .surface
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase())
}

fn is_verb_form(word: &str) -> bool {
    if NOUN_EXCEPTIONS.contains(&word) {
        return false;
    }
    let len = word.chars().count();
    (word.ends_with("ing") && len > 5) || (word.ends_with("ed") && len > 4)
}

fn is_adverb(word: &str) -> bool {
    !NOUN_EXCEPTIONS.contains(&word)
        && !COMMON_ADJECTIVES.contains(&word)
        && word.ends_with("ly")
        && word.chars().count() > 4
}

fn is_adjective(word: &str) -> bool {
    COMMON_ADJECTIVES.contains(&word)
        || ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| word.ends_with(suffix) && word.len() > suffix.len() + 2)
}

fn topic_form(token: &Token) -> String {
    if is_proper_noun(token) {
        token.surface.clone()
    } else {
        token.lower.clone()
    }
}

fn sentiment(tokens: &[Token]) -> f32 {
    let mut total = 0.0_f32;
    let mut cues = 0_u32;
    let mut negated = false;
    let mut intensity = 1.0_f32;

    for token in tokens {
        let word = token.lower.as_str();

        if NEGATORS.contains(&word) {
            negated = true;
            continue;
        }
        if let Some((_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == word) {
            intensity *= factor;
            continue;
        }
        if let Some((_, weight)) = SENTIMENT_CUES.iter().find(|(w, _)| *w == word) {
            let mut score = (weight * intensity).clamp(-1.0, 1.0);
            if negated {
                score *= NEGATION_FACTOR;
            }
            total += score;
            cues += 1;
        }
        // Modifiers only reach the next content word.
        negated = false;
        intensity = 1.0;
    }

    if cues == 0 {
        return 0.0;
    }
    (total / cues as f32).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes_of(text: &str) -> Vec<WordClass> {
        tag(text).into_iter().map(|(_, class)| class).collect()
    }

    mod tokenization {
        use super::*;

        #[test]
        fn empty_input_yields_empty_features() {
            let features = extract_features("");
            assert!(features.nouns.is_empty());
            assert!(features.verbs.is_empty());
            assert_eq!(features.sentiment, 0.0);
        }

        #[test]
        fn punctuation_only_yields_empty_features() {
            let features = extract_features("?!... --");
            assert_eq!(features, ExtractedFeatures::default());
        }

        #[test]
        fn apostrophes_stay_inside_words() {
            let words: Vec<String> = tag("I don't know").into_iter().map(|(w, _)| w).collect();
            assert_eq!(words, vec!["I", "don't", "know"]);
        }

        #[test]
        fn curly_apostrophes_are_normalized() {
            let words: Vec<String> = tag("I\u{2019}m fine").into_iter().map(|(w, _)| w).collect();
            assert_eq!(words, vec!["I'm", "fine"]);
        }
    }

    mod part_of_speech {
        use super::*;

        #[test]
        fn determiner_sets_up_noun() {
            let features = extract_features("We went to the park and played football");
            assert_eq!(features.nouns, vec!["park", "football"]);
            assert_eq!(features.verbs, vec!["went", "played"]);
        }

        #[test]
        fn adjective_keeps_determiner_context() {
            assert_eq!(
                classes_of("my new job"),
                vec![WordClass::Function, WordClass::Adjective, WordClass::Noun]
            );
        }

        #[test]
        fn pronoun_sets_up_verb() {
            let features = extract_features("They cook dinner");
            assert_eq!(features.verbs, vec!["cook"]);
            assert_eq!(features.nouns, vec!["dinner"]);
        }

        #[test]
        fn lexicon_verb_after_determiner_is_a_noun() {
            let features = extract_features("I finished my work");
            assert_eq!(features.nouns, vec!["work"]);
        }

        #[test]
        fn copula_does_not_turn_names_into_verbs() {
            let features = extract_features("My name is Alex");
            assert_eq!(features.nouns, vec!["name", "Alex"]);
            assert!(features.verbs.is_empty());
        }

        #[test]
        fn mid_sentence_capital_is_a_proper_noun() {
            let features = extract_features("Last summer we visited Paris");
            assert!(features.nouns.contains(&"Paris".to_string()));
        }

        #[test]
        fn nouns_and_verbs_are_truncated() {
            let features = extract_features(
                "The cat chased the dog, the bird watched the fish and the mouse ran",
            );
            assert_eq!(features.nouns.len(), MAX_NOUNS);
            assert_eq!(features.nouns, vec!["cat", "dog", "bird"]);
            assert!(features.verbs.len() <= MAX_VERBS);
        }

        #[test]
        fn suffix_exceptions_stay_nouns() {
            assert_eq!(classes_of("family"), vec![WordClass::Noun]);
            assert_eq!(classes_of("morning"), vec![WordClass::Noun]);
        }
    }

    mod sentiment_scoring {
        use super::*;

        #[test]
        fn positive_cues_score_above_threshold() {
            assert!(extract_features("I had a great day").sentiment > 0.3);
        }

        #[test]
        fn negative_cues_score_below_threshold() {
            assert!(extract_features("It was a terrible week").sentiment < -0.3);
        }

        #[test]
        fn neutral_text_scores_zero() {
            assert_eq!(extract_features("I went to the store").sentiment, 0.0);
        }

        #[test]
        fn negation_flips_and_dampens() {
            let score = extract_features("The movie was not good").sentiment;
            assert!(score < 0.0);
            assert!(score > -0.5);
        }

        #[test]
        fn intensifier_strengthens_cue() {
            let plain = extract_features("It was nice").sentiment;
            let strong = extract_features("It was very nice").sentiment;
            assert!(strong > plain);
        }

        #[test]
        fn score_is_always_bounded() {
            let features = extract_features("extremely extremely extremely wonderful perfect best");
            assert!(features.sentiment <= 1.0);
            let features = extract_features("extremely extremely awful");
            assert!(features.sentiment >= -1.0);
        }

        #[test]
        fn mixed_cues_average_out() {
            let score = extract_features("The food was good but the service was bad").sentiment;
            assert!(score.abs() < 0.3);
        }
    }
}
