//! Decision engine configuration.
//!
//! Every field has a default taken from `constants`, so a JSON document only
//! needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub movement: MovementConfig,
    pub targeting: TargetingConfig,
    /// Being hit while own energy is below this switches to enraged fire.
    pub rage_energy_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            targeting: TargetingConfig::default(),
            rage_energy_threshold: RAGE_ENERGY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        self.targeting.validate()?;
        non_negative("rage_energy_threshold", self.rage_energy_threshold)
    }
}

/// Potential-field movement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Capacity of the shared ring of recent opponent positions.
    pub history_capacity: usize,
    pub opponent_repulsion: f64,
    pub wall_margin: f64,
    pub wall_repulsion: f64,
    /// Weight of the field angle; the lateral angle gets `1 - field_weight`.
    pub field_weight: f64,
    pub move_distance: f64,
    /// Drive backwards instead of turning more than a quarter circle.
    pub reverse_when_behind: bool,
    pub follow: FollowConfig,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            history_capacity: POSITION_HISTORY_CAPACITY,
            opponent_repulsion: OPPONENT_REPULSION,
            wall_margin: WALL_MARGIN,
            wall_repulsion: WALL_REPULSION,
            field_weight: FIELD_WEIGHT,
            move_distance: MOVE_DISTANCE,
            reverse_when_behind: false,
            follow: FollowConfig::default(),
        }
    }
}

impl MovementConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                name: "movement.history_capacity",
            });
        }
        non_negative("movement.opponent_repulsion", self.opponent_repulsion)?;
        non_negative("movement.wall_margin", self.wall_margin)?;
        non_negative("movement.wall_repulsion", self.wall_repulsion)?;
        non_negative("movement.move_distance", self.move_distance)?;
        unit_weight("movement.field_weight", self.field_weight)?;
        self.follow.validate()
    }
}

/// "Shadow the enemy" mode against wall-hugging opponents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    pub enabled: bool,
    /// An opponent this close to a wall counts as wall-hugging.
    pub wall_margin: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// How far behind the opponent to trail.
    pub trail_distance: f64,
    /// Fraction of the way the trailing point is pulled toward the center.
    pub inward_factor: f64,
    pub move_distance: f64,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wall_margin: FOLLOW_WALL_MARGIN,
            min_distance: FOLLOW_MIN_DISTANCE,
            max_distance: FOLLOW_MAX_DISTANCE,
            trail_distance: FOLLOW_TRAIL_DISTANCE,
            inward_factor: FOLLOW_INWARD_FACTOR,
            move_distance: FOLLOW_MOVE_DISTANCE,
        }
    }
}

impl FollowConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("movement.follow.wall_margin", self.wall_margin)?;
        non_negative("movement.follow.min_distance", self.min_distance)?;
        non_negative("movement.follow.max_distance", self.max_distance)?;
        non_negative("movement.follow.trail_distance", self.trail_distance)?;
        non_negative("movement.follow.move_distance", self.move_distance)?;
        unit_weight("movement.follow.inward_factor", self.inward_factor)
    }
}

/// One step of a distance-to-power table: below `max_distance`, fire `power`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerTier {
    pub max_distance: f64,
    pub power: f64,
}

/// Monotonic step function from distance to fire power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerTable {
    /// Ordered by increasing `max_distance`.
    pub tiers: Vec<PowerTier>,
    /// Power at or beyond the last tier.
    pub beyond: f64,
}

impl PowerTable {
    pub fn new(tiers: &[(f64, f64)], beyond: f64) -> Self {
        Self {
            tiers: tiers
                .iter()
                .map(|&(max_distance, power)| PowerTier {
                    max_distance,
                    power,
                })
                .collect(),
            beyond,
        }
    }

    /// Power for a target at `distance`.
    pub fn power_for(&self, distance: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| distance < tier.max_distance)
            .map_or(self.beyond, |tier| tier.power)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let sorted = self
            .tiers
            .windows(2)
            .all(|w| w[0].max_distance < w[1].max_distance);
        if !sorted {
            return Err(ConfigError::UnsortedPowerTiers { name });
        }
        for tier in &self.tiers {
            non_negative(name, tier.max_distance)?;
            non_negative(name, tier.power)?;
        }
        non_negative(name, self.beyond)
    }
}

/// Guess-factor targeting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Number of histogram bins; must be odd.
    pub bins: usize,
    /// Bins on each side of the observed bin reinforced by an outcome.
    pub smoothing_window: usize,
    /// Weight of the histogram offset; the linear offset gets the rest.
    pub guess_factor_weight: f64,
    /// Largest remaining gun turn at which a shot is still released.
    pub aim_tolerance: f64,
    pub power: PowerTable,
    pub enraged_power: PowerTable,
    /// Below this distance a followed opponent gets a full-power shot.
    pub follow_close_range: f64,
    /// Power against a followed opponent beyond `follow_close_range`.
    pub follow_far_power: f64,
    pub low_energy_threshold: f64,
    pub low_energy_power: f64,
    pub min_power: f64,
    pub max_power: f64,
    /// Fire snapshots kept while waiting for their outcome.
    pub pending_shot_capacity: usize,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            bins: GUESS_FACTOR_BINS,
            smoothing_window: SMOOTHING_WINDOW,
            guess_factor_weight: GUESS_FACTOR_WEIGHT,
            aim_tolerance: AIM_TOLERANCE,
            power: PowerTable::new(&[(100.0, 3.0), (200.0, 2.5), (400.0, 2.0)], 1.5),
            enraged_power: PowerTable::new(&[(150.0, 3.0), (300.0, 2.5)], 2.0),
            follow_close_range: FOLLOW_CLOSE_RANGE,
            follow_far_power: FOLLOW_FAR_POWER,
            low_energy_threshold: LOW_ENERGY_THRESHOLD,
            low_energy_power: LOW_ENERGY_POWER,
            min_power: MIN_FIRE_POWER,
            max_power: MAX_FIRE_POWER,
            pending_shot_capacity: PENDING_SHOT_CAPACITY,
        }
    }
}

impl TargetingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.bins % 2 == 0 {
            return Err(ConfigError::EvenBinCount { bins: self.bins });
        }
        if self.bins < 3 {
            return Err(ConfigError::TooFewBins { bins: self.bins });
        }
        if self.pending_shot_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                name: "targeting.pending_shot_capacity",
            });
        }
        let power_ok = self.min_power.is_finite()
            && self.max_power.is_finite()
            && self.min_power > 0.0
            && self.min_power <= self.max_power;
        if !power_ok {
            return Err(ConfigError::InvalidPowerRange {
                min: self.min_power,
                max: self.max_power,
            });
        }
        unit_weight("targeting.guess_factor_weight", self.guess_factor_weight)?;
        non_negative("targeting.aim_tolerance", self.aim_tolerance)?;
        non_negative("targeting.follow_close_range", self.follow_close_range)?;
        non_negative("targeting.follow_far_power", self.follow_far_power)?;
        non_negative("targeting.low_energy_threshold", self.low_energy_threshold)?;
        non_negative("targeting.low_energy_power", self.low_energy_power)?;
        self.power.validate("targeting.power")?;
        self.enraged_power.validate("targeting.enraged_power")
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { name, value })
    }
}

fn unit_weight(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::WeightOutOfRange { name, value })
    }
}
