//! Core types and definitions for SKIRMISH.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, self telemetry, sensor events, advisory commands,
//! tuning constants and engine configuration.
//! It holds no decision logic and no dependency on any host runtime.

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod geometry;
pub mod types;

#[cfg(test)]
mod tests;
