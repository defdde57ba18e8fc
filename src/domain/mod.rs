//! Domain layer containing dialogue logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors, state machines)
//! - `dialogue` - Sessions, stages, feature extraction, corrections and reply selection

pub mod dialogue;
pub mod foundation;
