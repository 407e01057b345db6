//! Fundamental battle types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::vector_angle;

/// Stable identity of an opponent (its name as reported by the sensor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpponentId(pub String);

impl OpponentId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for OpponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OpponentId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Rectangular battlefield with its origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Battlefield {
    pub width: f64,
    pub height: f64,
}

impl Default for Battlefield {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_BATTLEFIELD_WIDTH,
            height: crate::constants::DEFAULT_BATTLEFIELD_HEIGHT,
        }
    }
}

impl Battlefield {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Distances to the left, right, bottom and top walls, clamped at zero.
    pub fn wall_distances(&self, p: DVec2) -> [f64; 4] {
        [
            p.x.max(0.0),
            (self.width - p.x).max(0.0),
            p.y.max(0.0),
            (self.height - p.y).max(0.0),
        ]
    }

    /// Whether `p` lies within `margin` of any wall.
    pub fn is_near_wall(&self, p: DVec2, margin: f64) -> bool {
        self.wall_distances(p).iter().any(|&d| d < margin)
    }

    /// Clamp `p` into the field shrunk by `inset` on every side.
    pub fn clamp(&self, p: DVec2, inset: f64) -> DVec2 {
        DVec2::new(
            p.x.clamp(inset, self.width - inset),
            p.y.clamp(inset, self.height - inset),
        )
    }
}

/// Own-unit telemetry supplied by the host with every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfTelemetry {
    pub position: DVec2,
    /// Body heading (radians, 0 = North).
    pub heading: f64,
    /// Gun heading (radians, 0 = North).
    pub gun_heading: f64,
    /// Signed speed along the body heading.
    pub velocity: f64,
    pub energy: f64,
    /// Remaining gun heat; the gun can fire only at zero.
    pub gun_heat: f64,
    pub battlefield: Battlefield,
    pub tick: u64,
}

impl Default for SelfTelemetry {
    fn default() -> Self {
        let battlefield = Battlefield::default();
        Self {
            position: battlefield.center(),
            heading: 0.0,
            gun_heading: 0.0,
            velocity: 0.0,
            energy: crate::constants::INITIAL_ENERGY,
            gun_heat: 0.0,
            battlefield,
            tick: 0,
        }
    }
}

impl SelfTelemetry {
    /// Whether the gun has fully cooled down.
    pub fn gun_ready(&self) -> bool {
        self.gun_heat <= 0.0
    }

    /// Absolute angle from own position to the battlefield center.
    pub fn angle_to_center(&self) -> f64 {
        vector_angle(self.battlefield.center() - self.position)
    }
}

/// Sense of the lateral strafe around the primary opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LateralDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl LateralDirection {
    /// `+1.0` for clockwise, `-1.0` for counter-clockwise.
    pub fn sign(self) -> f64 {
        match self {
            LateralDirection::Clockwise => 1.0,
            LateralDirection::CounterClockwise => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            LateralDirection::Clockwise => LateralDirection::CounterClockwise,
            LateralDirection::CounterClockwise => LateralDirection::Clockwise,
        }
    }
}
