//! Anti-gravity movement.
//!
//! Every remembered opponent position and every nearby wall pushes the unit
//! away with an inverse-square force. The resulting direction is blended with
//! a lateral strafe around the current opponent, unless a wall is too close
//! (head for the center) or the opponent is hugging a wall (trail it).

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::commands::MoveCommand;
use skirmish_core::config::{FollowConfig, MovementConfig};
use skirmish_core::constants::FORCE_EPSILON;
use skirmish_core::geometry::{
    absolute_angle_between, blend_angles, normal_relative_angle, unit_vector, vector_angle,
};
use skirmish_core::types::{Battlefield, LateralDirection};

use crate::history::PositionHistory;
use crate::tracker::OpponentState;

/// Input to the movement planner for a single observation.
pub struct MovementContext<'a> {
    pub position: DVec2,
    pub heading: f64,
    pub battlefield: Battlefield,
    /// The opponent just observed.
    pub opponent: &'a OpponentState,
    pub direction: LateralDirection,
}

/// Which rule produced the target angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Too close to a wall: straight for the center.
    WallRecovery,
    /// Trailing a wall-hugging opponent.
    Follow,
    /// Field direction blended with the lateral strafe.
    Field,
}

/// Output of the movement planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementPlan {
    pub mode: MovementMode,
    /// Absolute angle the unit should travel along.
    pub target_angle: f64,
    pub force: DVec2,
    pub command: MoveCommand,
}

/// Plan this observation's movement. `None` when the net force is zero,
/// leaving the previous movement in effect.
pub fn plan(
    ctx: &MovementContext,
    history: &PositionHistory,
    config: &MovementConfig,
) -> Option<MovementPlan> {
    let force = field_force(ctx.position, history, ctx.battlefield, config);
    if !force.is_finite() || force.length_squared() <= FORCE_EPSILON * FORCE_EPSILON {
        return None;
    }

    let near_wall = ctx.battlefield.is_near_wall(ctx.position, config.wall_margin);
    let follow_point = follow_target(ctx.opponent, ctx.battlefield, &config.follow)
        .filter(|p| p.distance_squared(ctx.position) > FORCE_EPSILON);

    let (mode, target_angle, distance) = match follow_point {
        Some(point) => (
            MovementMode::Follow,
            absolute_angle_between(ctx.position, point),
            config.follow.move_distance,
        ),
        None if near_wall => (
            MovementMode::WallRecovery,
            absolute_angle_between(ctx.position, ctx.battlefield.center()),
            config.move_distance,
        ),
        None => {
            let field_angle = vector_angle(force);
            let lateral_angle = ctx.opponent.absolute_bearing + ctx.direction.sign() * FRAC_PI_2;
            (
                MovementMode::Field,
                blend_angles(field_angle, lateral_angle, 1.0 - config.field_weight),
                config.move_distance,
            )
        }
    };

    let command = steer(ctx.heading, target_angle, distance, config.reverse_when_behind);
    log::trace!(
        "movement {mode:?}: force ({:.4}, {:.4}) target {target_angle:.3} turn {:.3}",
        force.x,
        force.y,
        command.turn
    );
    Some(MovementPlan {
        mode,
        target_angle,
        force,
        command,
    })
}

/// Sum of opponent and wall repulsion at `position`.
pub fn field_force(
    position: DVec2,
    history: &PositionHistory,
    battlefield: Battlefield,
    config: &MovementConfig,
) -> DVec2 {
    opponent_force(position, history, config.opponent_repulsion)
        + wall_force(position, battlefield, config.wall_margin, config.wall_repulsion)
}

/// Inverse-square push away from every remembered position.
/// Positions coinciding with `position` have no direction and are skipped,
/// as are non-finite ones.
pub fn opponent_force(position: DVec2, history: &PositionHistory, strength: f64) -> DVec2 {
    history.iter().fold(DVec2::ZERO, |acc, &p| {
        let away = position - p;
        let d = away.length();
        if !away.is_finite() || d <= FORCE_EPSILON {
            return acc;
        }
        acc + away / d * (strength / (d * d))
    })
}

/// Inverse-square push away from each wall closer than `margin`.
/// The `+ 1` keeps the force finite when touching a wall.
pub fn wall_force(position: DVec2, battlefield: Battlefield, margin: f64, strength: f64) -> DVec2 {
    let [left, right, bottom, top] = battlefield.wall_distances(position);
    let push = |d: f64| {
        if d < margin {
            strength / ((d + 1.0) * (d + 1.0))
        } else {
            0.0
        }
    };
    DVec2::new(push(left) - push(right), push(bottom) - push(top))
}

/// Whether `opponent` qualifies for follow mode.
pub fn follow_applies(opponent: &OpponentState, battlefield: Battlefield, config: &FollowConfig) -> bool {
    config.enabled
        && opponent.distance > config.min_distance
        && opponent.distance < config.max_distance
        && battlefield.is_near_wall(opponent.position, config.wall_margin)
}

/// Point behind a wall-hugging opponent, pulled slightly toward the center.
pub fn follow_target(
    opponent: &OpponentState,
    battlefield: Battlefield,
    config: &FollowConfig,
) -> Option<DVec2> {
    if !follow_applies(opponent, battlefield, config) {
        return None;
    }
    let behind = opponent.position - unit_vector(opponent.heading) * config.trail_distance;
    Some(behind + (battlefield.center() - behind) * config.inward_factor)
}

/// Minimal turn from `heading` to `target_angle`, driving `distance`.
/// With `reverse_when_behind`, targets more than a quarter turn away are
/// reached by turning the short way and driving backwards.
pub fn steer(heading: f64, target_angle: f64, distance: f64, reverse_when_behind: bool) -> MoveCommand {
    let turn = normal_relative_angle(target_angle - heading);
    if reverse_when_behind && turn.abs() > FRAC_PI_2 {
        MoveCommand {
            turn: normal_relative_angle(turn + PI),
            distance: -distance,
        }
    } else {
        MoveCommand { turn, distance }
    }
}
