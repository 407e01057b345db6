//! Advisory commands returned to the host.
//!
//! The host may clamp them to its physical turn and acceleration limits.
//! A missing command leaves the previous one in effect.

use serde::{Deserialize, Serialize};

/// Body movement: turn then drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Signed body turn (radians, positive = clockwise).
    pub turn: f64,
    /// Signed travel distance (negative = backwards).
    pub distance: f64,
}

/// Gun rotation with an optional shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GunCommand {
    /// Signed gun turn (radians, positive = clockwise).
    pub turn: f64,
    pub fire: Option<FireOrder>,
}

/// Request to fire once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireOrder {
    /// Power in `[MIN_FIRE_POWER, MAX_FIRE_POWER]`.
    pub power: f64,
    /// Identifier the host echoes back in the matching `BulletOutcome`.
    pub shot_id: u64,
}

/// Everything a unit wants done before the next event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub movement: Option<MoveCommand>,
    pub gun: Option<GunCommand>,
}

impl Decision {
    /// A decision that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.movement.is_none() && self.gun.is_none()
    }

    /// The fire order, if this decision releases a shot.
    pub fn fire_order(&self) -> Option<FireOrder> {
        self.gun.and_then(|g| g.fire)
    }
}
