//! ECS components for hecs entities.
//!
//! Components are plain data. Behavior lives in the systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::types::OpponentId;

use crate::config::MotionScript;

/// Marks the unit driven by the decision engine.
#[derive(Debug, Clone, Copy)]
pub struct Pilot;

/// Position and motion of any unit on the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    /// Radians, 0 = North.
    pub heading: f64,
    /// Signed speed along `heading`.
    pub velocity: f64,
}

/// Turret state of the pilot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gun {
    pub heading: f64,
    pub heat: f64,
    /// Turn still owed from the last gun command.
    pub turn_remaining: f64,
}

/// Movement still owed from the last move command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orders {
    pub turn_remaining: f64,
    pub distance_remaining: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Energy(pub f64);

/// A scripted opponent.
#[derive(Debug, Clone)]
pub struct Opponent {
    pub id: OpponentId,
    pub script: MotionScript,
    /// Ticks until an oscillating script next reverses.
    pub ticks_until_reverse: u64,
    /// Tick at which the opponent is destroyed, if ever.
    pub dies_at: Option<u64>,
}

/// A bullet in flight.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub shot_id: u64,
    pub target: OpponentId,
    pub origin: DVec2,
    pub angle: f64,
    pub speed: f64,
    /// Distance covered since firing.
    pub travelled: f64,
    pub fired_tick: u64,
}
