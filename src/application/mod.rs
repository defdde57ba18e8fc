//! Application layer - orchestration of dialogue turns.
//!
//! This layer coordinates the dialogue domain with the session store and
//! completion client ports.
//!
//! - `DialogueEngine` - Starts sessions and handles learner turns
//! - `ResponseGenerator` - Stage-dependent replies with completion fallback
//! - `SharedRng` - Random source shared by template picks and the correction gate

mod dialogue_engine;
mod response_generator;
mod shared_rng;

pub use dialogue_engine::{DialogueEngine, DialogueError, StartReply, TurnReply};
pub use response_generator::{GeneratorSettings, ResponseGenerator};
pub use shared_rng::SharedRng;
