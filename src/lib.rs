//! Practice Partner - Conversational English practice service
//!
//! This crate runs a staged practice conversation per session key: a short
//! introduction, a warmup on the learner's topics, then open conversation
//! with optional remote text generation and gentle grammar corrections.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
