//! Host rules and tuning parameters.

use std::f64::consts::PI;

// --- Host rules ---

/// Default battlefield width.
pub const DEFAULT_BATTLEFIELD_WIDTH: f64 = 800.0;

/// Default battlefield height.
pub const DEFAULT_BATTLEFIELD_HEIGHT: f64 = 600.0;

/// Starting energy of a unit.
pub const INITIAL_ENERGY: f64 = 100.0;

/// Maximum unit speed (distance units per tick). Also the largest lateral
/// speed an opponent can reach, which bounds the escape angle.
pub const MAX_VELOCITY: f64 = 8.0;

/// Smallest fire power the host accepts.
pub const MIN_FIRE_POWER: f64 = 0.1;

/// Largest fire power the host accepts.
pub const MAX_FIRE_POWER: f64 = 3.0;

/// Bullet speed at zero power: `speed = BULLET_SPEED_BASE - BULLET_SPEED_PER_POWER * power`.
pub const BULLET_SPEED_BASE: f64 = 20.0;

/// Bullet speed lost per unit of power.
pub const BULLET_SPEED_PER_POWER: f64 = 3.0;

/// Maximum body turn per tick.
pub const MAX_BODY_TURN_RATE: f64 = 10.0 * PI / 180.0;

/// Maximum gun turn per tick.
pub const MAX_GUN_TURN_RATE: f64 = 20.0 * PI / 180.0;

/// Gun heat added by any shot: `heat = GUN_HEAT_BASE + power / GUN_HEAT_POWER_DIVISOR`.
pub const GUN_HEAT_BASE: f64 = 1.0;

pub const GUN_HEAT_POWER_DIVISOR: f64 = 5.0;

/// Gun heat dissipated per tick.
pub const GUN_COOLING_RATE: f64 = 0.1;

/// Half the side of a unit's square hull.
pub const UNIT_HALF_SIZE: f64 = 18.0;

// --- Opponent tracking ---

/// Capacity of the shared ring of recent opponent positions.
pub const POSITION_HISTORY_CAPACITY: usize = 15;

// --- Movement field ---

/// Scale of the inverse-square repulsion from a remembered opponent position.
pub const OPPONENT_REPULSION: f64 = 1.0;

/// Distance from a wall below which wall repulsion applies.
pub const WALL_MARGIN: f64 = 80.0;

/// Scale of the inverse-square wall repulsion.
pub const WALL_REPULSION: f64 = 20_000.0;

/// Weight of the field angle when blended with the lateral angle.
pub const FIELD_WEIGHT: f64 = 0.7;

/// Throttle issued with every movement command.
pub const MOVE_DISTANCE: f64 = 180.0;

/// Force magnitudes at or below this are treated as zero.
pub const FORCE_EPSILON: f64 = 1e-9;

// --- Follow ("shadow the enemy") mode ---

/// An opponent this close to a wall counts as wall-hugging.
pub const FOLLOW_WALL_MARGIN: f64 = 60.0;

/// Follow mode applies only beyond this distance.
pub const FOLLOW_MIN_DISTANCE: f64 = 120.0;

/// Follow mode applies only below this distance.
pub const FOLLOW_MAX_DISTANCE: f64 = 450.0;

/// How far behind the opponent to trail.
pub const FOLLOW_TRAIL_DISTANCE: f64 = 60.0;

/// Fraction of the way the trailing point is pulled toward the center.
pub const FOLLOW_INWARD_FACTOR: f64 = 0.15;

/// Throttle issued while following.
pub const FOLLOW_MOVE_DISTANCE: f64 = 200.0;

/// Below this distance a followed opponent gets a full-power shot.
pub const FOLLOW_CLOSE_RANGE: f64 = 100.0;

/// Power used against a followed opponent beyond close range.
pub const FOLLOW_FAR_POWER: f64 = 0.1;

// --- Targeting ---

/// Number of guess-factor bins (odd, so a center bin exists).
pub const GUESS_FACTOR_BINS: usize = 31;

/// Bins on each side of the observed bin reinforced by an outcome.
pub const SMOOTHING_WINDOW: usize = 4;

/// Weight of the histogram offset in the final aim; linear gets the rest.
pub const GUESS_FACTOR_WEIGHT: f64 = 0.6;

/// Largest remaining gun turn at which a shot is still released.
pub const AIM_TOLERANCE: f64 = 5.0 * PI / 180.0;

/// Own energy below which fire power is capped.
pub const LOW_ENERGY_THRESHOLD: f64 = 20.0;

/// Power cap applied below `LOW_ENERGY_THRESHOLD`.
pub const LOW_ENERGY_POWER: f64 = 0.5;

/// Being hit while own energy is below this switches to enraged fire.
pub const RAGE_ENERGY_THRESHOLD: f64 = 50.0;

/// Fire snapshots kept while waiting for their outcome.
pub const PENDING_SHOT_CAPACITY: usize = 64;
