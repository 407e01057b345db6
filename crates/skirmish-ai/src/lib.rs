//! Decision engine for SKIRMISH units.
//!
//! Couples anti-gravity movement with per-opponent guess-factor targeting.
//! Everything here operates on plain data; the host drives the engine one
//! event at a time through [`DecisionEngine::decide`].

pub mod engine;
pub mod histogram;
pub mod history;
pub mod ledger;
pub mod movement;
pub mod targeting;
pub mod tracker;

pub use engine::DecisionEngine;
pub use skirmish_core as core;
