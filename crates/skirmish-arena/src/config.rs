//! Arena setup: battlefield, the pilot's start and the scripted opponents.

use std::collections::HashSet;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::config::EngineConfig;
use skirmish_core::constants::{INITIAL_ENERGY, MAX_VELOCITY, UNIT_HALF_SIZE};
use skirmish_core::error::ConfigError;
use skirmish_core::types::{Battlefield, OpponentId};

/// How a scripted opponent moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MotionScript {
    /// Never moves.
    Stationary,
    /// Straight ahead at constant speed, reflecting off walls.
    Linear { speed: f64 },
    /// Back and forth along its heading, reversing roughly every `period` ticks.
    Oscillating { speed: f64, period: u64 },
    /// Runs along the walls clockwise, turning at the corners.
    WallHugger { speed: f64 },
}

impl MotionScript {
    pub fn speed(&self) -> f64 {
        match self {
            MotionScript::Stationary => 0.0,
            MotionScript::Linear { speed }
            | MotionScript::Oscillating { speed, .. }
            | MotionScript::WallHugger { speed } => speed.clamp(-MAX_VELOCITY, MAX_VELOCITY),
        }
    }
}

/// One scripted opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentSetup {
    pub id: OpponentId,
    pub start: DVec2,
    pub heading: f64,
    pub script: MotionScript,
    #[serde(default)]
    pub dies_at: Option<u64>,
}

/// Configuration for a headless duel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed = same duel.
    pub seed: u64,
    pub battlefield: Battlefield,
    pub pilot_start: DVec2,
    pub pilot_heading: f64,
    pub pilot_energy: f64,
    pub opponents: Vec<OpponentSetup>,
    pub engine: EngineConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let battlefield = Battlefield::default();
        Self {
            seed: 42,
            battlefield,
            pilot_start: DVec2::new(battlefield.width / 2.0, 100.0),
            pilot_heading: 0.0,
            pilot_energy: INITIAL_ENERGY,
            opponents: vec![OpponentSetup {
                id: OpponentId::new("Oscillator"),
                start: DVec2::new(battlefield.width / 2.0, 400.0),
                heading: std::f64::consts::FRAC_PI_2,
                script: MotionScript::Oscillating {
                    speed: MAX_VELOCITY,
                    period: 20,
                },
                dies_at: None,
            }],
            engine: EngineConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON arena description.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        let Battlefield { width, height } = self.battlefield;
        let fits = width.is_finite()
            && height.is_finite()
            && width > 2.0 * UNIT_HALF_SIZE
            && height > 2.0 * UNIT_HALF_SIZE;
        if !fits {
            return Err(ConfigError::InvalidBattlefield { width, height });
        }
        if self.opponents.is_empty() {
            return Err(ConfigError::NoOpponents);
        }
        let mut seen = HashSet::new();
        for opponent in &self.opponents {
            if !seen.insert(&opponent.id) {
                return Err(ConfigError::DuplicateOpponent {
                    id: opponent.id.to_string(),
                });
            }
            if let MotionScript::Oscillating { period: 0, .. } = opponent.script {
                return Err(ConfigError::ZeroCapacity {
                    name: "opponents.script.period",
                });
            }
        }
        if !(self.pilot_energy.is_finite() && self.pilot_energy >= 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "pilot_energy",
                value: self.pilot_energy,
            });
        }
        Ok(())
    }
}
