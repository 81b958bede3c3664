//! Questforge - gamified task tracking
//!
//! Real-world tasks become quests. Completing them earns XP and gold for
//! a persistent character: levels, six RPG stats, a daily completion
//! streak, achievements, and adaptive time estimates that learn how long
//! your tasks really take.
//!
//! The engine is a plain state machine: every operation takes the current
//! time as a parameter and returns the [`engine::GameEvent`]s it caused,
//! so callers decide how to surface them.

pub mod commands;
pub mod config;
pub mod domain;
pub mod engine;
pub mod store;

pub use domain::*;
