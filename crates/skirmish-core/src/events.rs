//! Events delivered by the host to a unit's decision engine.
//!
//! Exactly one event is dispatched at a time; the host waits for the
//! resulting decision before dispatching the next.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::OpponentId;

/// All events a unit can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleEvent {
    /// An opponent was seen by the radar.
    Scanned(ScanEvent),
    /// The result of an earlier shot became known.
    BulletOutcome(BulletOutcome),
    /// Own unit ran into a wall.
    HitWall {
        /// Bearing of the wall relative to the body heading (radians).
        bearing: f64,
    },
    /// Own unit was hit by an opponent's bullet.
    HitByBullet {
        /// Bearing of the incoming bullet relative to the body heading (radians).
        bearing: f64,
        power: f64,
    },
    /// An opponent was destroyed.
    OpponentDeath { opponent: OpponentId },
    /// A new battle begins; all learned state is discarded.
    BattleStarted,
}

/// A single radar observation of one opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub opponent: OpponentId,
    /// Bearing relative to own body heading (radians, `(−π, π]`).
    pub bearing: f64,
    pub distance: f64,
    /// Opponent body heading (radians, 0 = North).
    pub heading: f64,
    /// Opponent signed speed along its heading.
    pub velocity: f64,
    pub energy: f64,
    pub tick: u64,
}

/// How a fired shot ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    /// The bullet struck its target.
    Hit,
    /// The bullet passed the target or left the field.
    Miss,
    /// The bullet collided with another bullet.
    Intercepted,
}

/// Outcome of a shot, correlated back to the fire order by `shot_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletOutcome {
    pub shot_id: u64,
    pub opponent: OpponentId,
    pub result: ShotResult,
    /// Where the opponent actually was when the shot resolved, if known.
    pub opponent_position: Option<DVec2>,
    pub tick: u64,
}
