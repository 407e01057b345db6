//! Opponent state tracker.
//!
//! Keeps one record per opponent identity, inserted on first sighting and
//! overwritten by every later observation. Each record owns the opponent's
//! guess-factor histogram. Every observed position is also pushed into the
//! shared [`PositionHistory`] that feeds the movement field.

use std::collections::HashMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::events::ScanEvent;
use skirmish_core::geometry::{normal_absolute_angle, project};
use skirmish_core::types::{OpponentId, SelfTelemetry};

use crate::histogram::GuessFactorHistogram;
use crate::history::PositionHistory;

/// Latest known state of one opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentState {
    pub position: DVec2,
    pub heading: f64,
    /// Signed speed along `heading`.
    pub velocity: f64,
    pub distance: f64,
    /// Bearing relative to own heading at observation time.
    pub bearing: f64,
    /// Own heading + `bearing`, normalized.
    pub absolute_bearing: f64,
    pub energy: f64,
    pub last_seen_tick: u64,
    pub alive: bool,
}

/// Everything the engine knows about one opponent.
#[derive(Debug, Clone)]
pub struct OpponentRecord {
    pub state: OpponentState,
    pub histogram: GuessFactorHistogram,
}

/// Raw observation inputs.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub self_position: DVec2,
    pub self_heading: f64,
    pub distance: f64,
    pub bearing: f64,
    pub heading: f64,
    pub velocity: f64,
    pub energy: f64,
    pub tick: u64,
}

impl Observation {
    pub fn from_scan(telemetry: &SelfTelemetry, scan: &ScanEvent) -> Self {
        Self {
            self_position: telemetry.position,
            self_heading: telemetry.heading,
            distance: scan.distance,
            bearing: scan.bearing,
            heading: scan.heading,
            velocity: scan.velocity,
            energy: scan.energy,
            tick: scan.tick,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpponentTracker {
    records: HashMap<OpponentId, OpponentRecord>,
    history: PositionHistory,
    bins: usize,
}

impl OpponentTracker {
    /// `bins` is the histogram size for every new opponent.
    pub fn new(history_capacity: usize, bins: usize) -> Self {
        Self {
            records: HashMap::new(),
            history: PositionHistory::new(history_capacity),
            bins,
        }
    }

    /// Record an observation, creating the opponent on first sight.
    pub fn observe(&mut self, id: &OpponentId, obs: Observation) -> &OpponentState {
        let absolute_bearing = normal_absolute_angle(obs.self_heading + obs.bearing);
        let state = OpponentState {
            position: project(obs.self_position, absolute_bearing, obs.distance),
            heading: obs.heading,
            velocity: obs.velocity,
            distance: obs.distance,
            bearing: obs.bearing,
            absolute_bearing,
            energy: obs.energy,
            last_seen_tick: obs.tick,
            alive: true,
        };
        if state.position.is_finite() {
            self.history.push(state.position);
        } else {
            log::warn!("non-finite position for {id}, not remembered");
        }

        let bins = self.bins;
        let record = self.records.entry(id.clone()).or_insert_with(|| {
            log::debug!("tracking new opponent {id}");
            OpponentRecord {
                state: state.clone(),
                histogram: GuessFactorHistogram::new(bins),
            }
        });
        record.state = state;
        &record.state
    }

    /// Flag an opponent as destroyed. Its history and histogram are kept.
    pub fn mark_dead(&mut self, id: &OpponentId) {
        if let Some(record) = self.records.get_mut(id) {
            record.state.alive = false;
        }
    }

    pub fn get(&self, id: &OpponentId) -> Option<&OpponentRecord> {
        self.records.get(id)
    }

    pub fn state(&self, id: &OpponentId) -> Option<&OpponentState> {
        self.records.get(id).map(|r| &r.state)
    }

    pub fn histogram(&self, id: &OpponentId) -> Option<&GuessFactorHistogram> {
        self.records.get(id).map(|r| &r.histogram)
    }

    pub fn histogram_mut(&mut self, id: &OpponentId) -> Option<&mut GuessFactorHistogram> {
        self.records.get_mut(id).map(|r| &mut r.histogram)
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Number of opponents ever observed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of opponents not reported dead.
    pub fn alive_count(&self) -> usize {
        self.records.values().filter(|r| r.state.alive).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OpponentId, &OpponentRecord)> + '_ {
        self.records.iter()
    }

    /// Forget every opponent and the position ring.
    pub fn clear(&mut self) {
        self.records.clear();
        self.history.clear();
    }
}
