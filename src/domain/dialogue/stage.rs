//! Dialogue stage state machine.
//!
//! Defines where a session sits in the fixed conversational progression
//! and which moves between stages are allowed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The position of a session in the conversational progression.
///
/// Sessions move forward only:
/// - `Introduction`: greeting sent, waiting for the learner's name
/// - `Warmup`: name known, collecting first topics
/// - `Main`: open conversation, loops on itself
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Session created, the partner has asked for a name.
    #[default]
    Introduction,

    /// Name captured, the partner asks an opening question.
    Warmup,

    /// Free conversation. Terminal and self-looping.
    Main,
}

impl Stage {
    /// Returns a label suitable for logs and API payloads.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Warmup => "warmup",
            Self::Main => "main",
        }
    }

    /// Returns the stage a turn in this stage moves to.
    pub fn next(&self) -> Self {
        match self {
            Self::Introduction => Self::Warmup,
            Self::Warmup | Self::Main => Self::Main,
        }
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Introduction, Warmup) | (Warmup, Main) | (Main, Main)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            Introduction => vec![Warmup],
            Warmup => vec![Main],
            Main => vec![Main],
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Stage::Main)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod stage_definition {
        use super::*;

        #[test]
        fn default_stage_is_introduction() {
            assert_eq!(Stage::default(), Stage::Introduction);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&Stage::Warmup).unwrap();
            assert_eq!(json, "\"warmup\"");
        }

        #[test]
        fn stages_are_ordered_by_progression() {
            assert!(Stage::Introduction < Stage::Warmup);
            assert!(Stage::Warmup < Stage::Main);
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn next_walks_forward_and_loops_in_main() {
            assert_eq!(Stage::Introduction.next(), Stage::Warmup);
            assert_eq!(Stage::Warmup.next(), Stage::Main);
            assert_eq!(Stage::Main.next(), Stage::Main);
        }

        #[test]
        fn next_is_always_a_valid_transition() {
            for stage in [Stage::Introduction, Stage::Warmup, Stage::Main] {
                assert!(stage.can_transition_to(&stage.next()));
            }
        }

        #[test]
        fn regression_is_rejected() {
            assert!(Stage::Main.transition_to(Stage::Warmup).is_err());
            assert!(Stage::Warmup.transition_to(Stage::Introduction).is_err());
        }

        #[test]
        fn skipping_warmup_is_rejected() {
            assert!(Stage::Introduction.transition_to(Stage::Main).is_err());
        }

        #[test]
        fn only_main_is_terminal() {
            assert!(Stage::Main.is_terminal());
            assert!(!Stage::Warmup.is_terminal());
            assert!(!Stage::Introduction.is_terminal());
        }
    }
}
