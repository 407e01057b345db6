//! Serializable summary of a duel.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::types::{LateralDirection, OpponentId};

/// Running tallies kept by the arena.
#[derive(Debug, Clone, Default)]
pub struct DuelStats {
    pub shots_fired: u32,
    pub hits: u32,
    pub misses: u32,
    pub wall_hits: u32,
    pub hits_taken: BTreeMap<OpponentId, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotView {
    pub position: DVec2,
    pub heading: f64,
    pub gun_heading: f64,
    pub direction: LateralDirection,
    pub enraged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentView {
    pub id: OpponentId,
    pub alive: bool,
    /// Last known position; `None` once destroyed.
    pub position: Option<DVec2>,
    pub hits_taken: u32,
    /// Learned guess-factor histogram counts.
    pub histogram: Vec<u32>,
    /// Bin the engine would aim at next.
    pub mode_bin: usize,
}

/// Complete duel summary, stable under serialization for a given seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaReport {
    pub seed: u64,
    pub ticks: u64,
    pub shots_fired: u32,
    pub hits: u32,
    pub misses: u32,
    pub wall_hits: u32,
    pub pilot: PilotView,
    /// Ordered by identity.
    pub opponents: Vec<OpponentView>,
}

impl ArenaReport {
    /// Fraction of resolved shots that hit.
    pub fn hit_rate(&self) -> f64 {
        let resolved = self.hits + self.misses;
        if resolved == 0 {
            0.0
        } else {
            self.hits as f64 / resolved as f64
        }
    }

    pub fn opponent(&self, id: &OpponentId) -> Option<&OpponentView> {
        self.opponents.iter().find(|o| &o.id == id)
    }
}
