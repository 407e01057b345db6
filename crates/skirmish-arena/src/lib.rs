//! Headless duel arena for SKIRMISH.
//!
//! Owns a hecs world holding the engine-driven pilot, scripted opponents and
//! bullets in flight. Each tick it runs the systems in a fixed order, feeds
//! the resulting events to a `DecisionEngine` and applies its decisions under
//! the host's limits. Runs are deterministic for a given seed.

pub mod components;
pub mod config;
pub mod engine;
pub mod report;
pub mod systems;
pub mod world_setup;

pub use config::{ArenaConfig, MotionScript, OpponentSetup};
pub use engine::Arena;
pub use report::ArenaReport;
pub use skirmish_ai as ai;

#[cfg(test)]
mod tests;
