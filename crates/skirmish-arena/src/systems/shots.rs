//! Virtual shot resolution.
//!
//! A bullet is resolved once it has covered the distance from its origin to
//! its target's current position. The shot hits when the target lies within
//! a hull half-size of the bullet's line at that range. A bullet leaving the
//! field first is a miss that never reached the target's range, so it
//! reports no position.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};

use skirmish_core::constants::UNIT_HALF_SIZE;
use skirmish_core::events::{BulletOutcome, ShotResult};
use skirmish_core::geometry::project;
use skirmish_core::types::{Battlefield, OpponentId};

use crate::components::{Body, Bullet, Opponent};

/// Advance every bullet and resolve those that reached their target range
/// or left the field.
pub fn run(
    world: &mut World,
    battlefield: Battlefield,
    current_tick: u64,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<BulletOutcome> {
    let targets: HashMap<OpponentId, DVec2> = world
        .query::<(&Opponent, &Body)>()
        .iter()
        .map(|(_, (opponent, body))| (opponent.id.clone(), body.position))
        .collect();

    let mut outcomes = Vec::new();
    for (entity, bullet) in world.query_mut::<&mut Bullet>() {
        bullet.travelled += bullet.speed;

        let Some(&target) = targets.get(&bullet.target) else {
            // Target destroyed while the bullet was in flight.
            outcomes.push(outcome(bullet, ShotResult::Miss, None, current_tick));
            despawn_buffer.push(entity);
            continue;
        };

        let range = bullet.origin.distance(target);
        let position = project(bullet.origin, bullet.angle, bullet.travelled);
        let off_field = battlefield.clamp(position, 0.0) != position;

        if bullet.travelled >= range {
            let at_range = project(bullet.origin, bullet.angle, range);
            let result = if at_range.distance(target) <= UNIT_HALF_SIZE {
                ShotResult::Hit
            } else {
                ShotResult::Miss
            };
            outcomes.push(outcome(bullet, result, Some(target), current_tick));
            despawn_buffer.push(entity);
        } else if off_field {
            outcomes.push(outcome(bullet, ShotResult::Miss, None, current_tick));
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    outcomes
}

fn outcome(
    bullet: &Bullet,
    result: ShotResult,
    opponent_position: Option<DVec2>,
    tick: u64,
) -> BulletOutcome {
    log::trace!(
        "shot {} at {} resolved {result:?} after {} ticks",
        bullet.shot_id,
        bullet.target,
        tick.saturating_sub(bullet.fired_tick)
    );
    BulletOutcome {
        shot_id: bullet.shot_id,
        opponent: bullet.target.clone(),
        result,
        opponent_position,
        tick,
    }
}
