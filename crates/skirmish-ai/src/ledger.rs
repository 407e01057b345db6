//! Pending shot ledger.
//!
//! Holds the fire-time geometry of every shot whose outcome has not arrived
//! yet. Outcomes are attributed against this snapshot, never against the
//! opponent's current position. Capacity is fixed; the oldest snapshot is
//! dropped when a new shot would exceed it.

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::geometry::{absolute_angle_between, normal_relative_angle};
use skirmish_core::types::OpponentId;

/// Geometry captured when a fire order is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireSnapshot {
    pub shot_id: u64,
    pub opponent: OpponentId,
    /// Own position when firing.
    pub origin: DVec2,
    /// Absolute bearing to the opponent when firing.
    pub bearing: f64,
    /// Absolute angle the shot was aimed along.
    pub aim_angle: f64,
    pub bullet_speed: f64,
    pub max_escape_angle: f64,
    /// Sign of the opponent's velocity when firing; `1.0` for a stationary target.
    pub direction: f64,
    pub power: f64,
    pub fired_tick: u64,
}

impl FireSnapshot {
    /// Guess factor of an absolute angle seen from the fire origin.
    pub fn guess_factor_of_angle(&self, angle: f64) -> f64 {
        if self.max_escape_angle <= f64::EPSILON {
            return 0.0;
        }
        let offset = normal_relative_angle(angle - self.bearing);
        (offset / self.max_escape_angle * self.direction).clamp(-1.0, 1.0)
    }

    /// Guess factor at which the opponent was actually found.
    pub fn guess_factor_at(&self, position: DVec2) -> f64 {
        if position.distance_squared(self.origin) <= f64::EPSILON {
            return 0.0;
        }
        self.guess_factor_of_angle(absolute_angle_between(self.origin, position))
    }

    /// Guess factor the shot was aimed at.
    pub fn aimed_guess_factor(&self) -> f64 {
        self.guess_factor_of_angle(self.aim_angle)
    }
}

#[derive(Debug, Clone)]
pub struct PendingShots {
    shots: VecDeque<FireSnapshot>,
    capacity: usize,
}

impl PendingShots {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            shots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, snapshot: FireSnapshot) {
        if self.shots.len() == self.capacity {
            if let Some(dropped) = self.shots.pop_front() {
                log::debug!(
                    "pending shot ledger full, dropping shot {} at {}",
                    dropped.shot_id,
                    dropped.opponent
                );
            }
        }
        self.shots.push_back(snapshot);
    }

    /// Remove and return the snapshot for `shot_id`.
    pub fn take(&mut self, shot_id: u64) -> Option<FireSnapshot> {
        let index = self.shots.iter().position(|s| s.shot_id == shot_id)?;
        self.shots.remove(index)
    }

    pub fn get(&self, shot_id: u64) -> Option<&FireSnapshot> {
        self.shots.iter().find(|s| s.shot_id == shot_id)
    }

    /// Drop every snapshot aimed at `opponent`; returns how many were dropped.
    pub fn discard_for(&mut self, opponent: &OpponentId) -> usize {
        let before = self.shots.len();
        self.shots.retain(|s| &s.opponent != opponent);
        before - self.shots.len()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }
}
