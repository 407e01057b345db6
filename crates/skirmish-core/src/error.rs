use thiserror::Error;

/// Rejected engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("guess-factor bin count must be odd, got {bins}")]
    EvenBinCount { bins: usize },

    #[error("guess-factor bin count must be at least 3, got {bins}")]
    TooFewBins { bins: usize },

    #[error("{name} must be greater than zero")]
    ZeroCapacity { name: &'static str },

    #[error("invalid fire power range [{min}, {max}]")]
    InvalidPowerRange { min: f64, max: f64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    WeightOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("power tiers in {name} must have strictly increasing distances")]
    UnsortedPowerTiers { name: &'static str },

    #[error("battlefield {width}x{height} cannot hold a unit")]
    InvalidBattlefield { width: f64, height: f64 },

    #[error("arena needs at least one opponent")]
    NoOpponents,

    #[error("opponent {id} is configured twice")]
    DuplicateOpponent { id: String },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
