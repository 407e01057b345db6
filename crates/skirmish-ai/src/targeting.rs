//! Guess-factor targeting.
//!
//! The histogram's mode is turned into an angular offset scaled by the
//! maximum escape angle, then blended with a linear lead. Outcomes of earlier
//! shots reinforce the histogram around the guess factor at which the
//! opponent was actually found, measured from the fire-time snapshot.

use serde::{Deserialize, Serialize};

use skirmish_core::config::TargetingConfig;
use skirmish_core::constants::{BULLET_SPEED_BASE, BULLET_SPEED_PER_POWER, MAX_VELOCITY};
use skirmish_core::events::{BulletOutcome, ShotResult};
use skirmish_core::geometry::{finite_or, normal_absolute_angle, normal_relative_angle, sign};
use skirmish_core::types::SelfTelemetry;

use crate::histogram::GuessFactorHistogram;
use crate::ledger::FireSnapshot;
use crate::tracker::OpponentState;

/// Which power table applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireStance {
    #[default]
    Normal,
    /// Hit while low on energy: heavier shots at longer range.
    Enraged,
    /// Trailing a wall-hugger: full power up close, probing shots otherwise.
    Follow,
}

/// Input to the aiming step for a single observation.
pub struct AimContext<'a> {
    pub telemetry: &'a SelfTelemetry,
    pub opponent: &'a OpponentState,
    pub histogram: &'a GuessFactorHistogram,
    pub stance: FireStance,
}

/// Everything computed on the way to an aim angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    pub power: f64,
    pub bullet_speed: f64,
    pub max_escape_angle: f64,
    /// Histogram mode.
    pub bin: usize,
    /// Guess factor of `bin`.
    pub guess_factor: f64,
    /// Sign of the opponent's velocity (`0.0` when stationary).
    pub direction: f64,
    /// Offset from the histogram.
    pub bin_offset: f64,
    /// Offset from linear lead.
    pub linear_offset: f64,
    /// Absolute bearing to the opponent.
    pub bearing: f64,
    /// Blended absolute aim angle.
    pub aim_angle: f64,
}

/// Output of the aiming step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub solution: FiringSolution,
    /// Signed gun turn onto `solution.aim_angle`.
    pub gun_turn: f64,
    /// Whether a shot should be released this observation.
    pub fire: bool,
}

/// Compute the aim for this observation.
pub fn aim(ctx: &AimContext, config: &TargetingConfig) -> Aim {
    let solution = solve(ctx, config);
    let gun_turn = normal_relative_angle(solution.aim_angle - ctx.telemetry.gun_heading);
    let fire = ctx.telemetry.gun_ready()
        && gun_turn.abs() <= config.aim_tolerance
        && ctx.telemetry.energy >= solution.power;
    Aim {
        solution,
        gun_turn,
        fire,
    }
}

/// Build the firing solution for this observation.
pub fn solve(ctx: &AimContext, config: &TargetingConfig) -> FiringSolution {
    let opponent = ctx.opponent;
    let power = select_power(opponent.distance, ctx.telemetry.energy, ctx.stance, config);
    let bullet_speed = bullet_speed(power);
    let max_escape_angle = max_escape_angle(bullet_speed);

    let bin = ctx.histogram.mode_index();
    let guess_factor = ctx.histogram.guess_factor(bin);
    let direction = sign(opponent.velocity);
    let bin_offset = guess_factor * max_escape_angle * direction;
    let linear_offset = linear_offset(opponent, bullet_speed);

    let w = config.guess_factor_weight;
    let blended = finite_or(w * bin_offset + (1.0 - w) * linear_offset, 0.0);
    let aim_angle = normal_absolute_angle(opponent.absolute_bearing + blended);

    log::trace!(
        "aim power {power:.2} mea {max_escape_angle:.3} bin {bin} gf {guess_factor:.2} \
         offsets {bin_offset:.4}/{linear_offset:.4}"
    );

    FiringSolution {
        power,
        bullet_speed,
        max_escape_angle,
        bin,
        guess_factor,
        direction,
        bin_offset,
        linear_offset,
        bearing: opponent.absolute_bearing,
        aim_angle,
    }
}

/// Fire power from range, stance and own energy.
///
/// Low own energy caps the power, it never exceeds own energy, and the
/// result is clamped into the host's accepted range.
pub fn select_power(distance: f64, energy: f64, stance: FireStance, config: &TargetingConfig) -> f64 {
    let mut power = match stance {
        FireStance::Normal => config.power.power_for(distance),
        FireStance::Enraged => config.enraged_power.power_for(distance),
        FireStance::Follow => {
            if distance < config.follow_close_range {
                config.max_power
            } else {
                config.follow_far_power
            }
        }
    };
    if energy < config.low_energy_threshold {
        power = power.min(config.low_energy_power);
    }
    finite_or(power.min(energy), config.min_power).clamp(config.min_power, config.max_power)
}

/// Bullet speed for a given power.
pub fn bullet_speed(power: f64) -> f64 {
    BULLET_SPEED_BASE - BULLET_SPEED_PER_POWER * power
}

/// Largest angle an opponent at full lateral speed can cover during the flight.
pub fn max_escape_angle(bullet_speed: f64) -> f64 {
    if bullet_speed <= f64::EPSILON {
        return std::f64::consts::FRAC_PI_2;
    }
    (MAX_VELOCITY / bullet_speed).clamp(-1.0, 1.0).asin()
}

/// Angular lead assuming the opponent keeps its current velocity for the
/// bullet's flight time.
pub fn linear_offset(opponent: &OpponentState, bullet_speed: f64) -> f64 {
    if opponent.distance <= f64::EPSILON || bullet_speed <= f64::EPSILON {
        return 0.0;
    }
    let time_to_impact = opponent.distance / bullet_speed;
    let lateral_velocity = opponent.velocity * (opponent.heading - opponent.absolute_bearing).sin();
    finite_or(
        (lateral_velocity * time_to_impact).atan2(opponent.distance),
        0.0,
    )
}

/// Guess factor to learn from an outcome, if it carries any information.
///
/// A reported opponent position is measured against the fire-time snapshot.
/// A hit without a position means the opponent stood where the shot was aimed.
pub fn observed_guess_factor(snapshot: &FireSnapshot, outcome: &BulletOutcome) -> Option<f64> {
    match (outcome.opponent_position, outcome.result) {
        (Some(position), _) => Some(snapshot.guess_factor_at(position)),
        (None, ShotResult::Hit) => Some(snapshot.aimed_guess_factor()),
        (None, _) => None,
    }
}

/// Apply an outcome to the histogram. Returns the reinforced bin.
pub fn reconcile(
    snapshot: &FireSnapshot,
    outcome: &BulletOutcome,
    histogram: &mut GuessFactorHistogram,
    config: &TargetingConfig,
) -> Option<usize> {
    let guess_factor = observed_guess_factor(snapshot, outcome)?;
    Some(histogram.reinforce(guess_factor, config.smoothing_window))
}
