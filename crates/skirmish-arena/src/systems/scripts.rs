//! Scripted opponent behavior, evaluated before movement each tick.

use std::f64::consts::{FRAC_PI_2, PI};

use hecs::World;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::UNIT_HALF_SIZE;
use skirmish_core::geometry::{normal_absolute_angle, project};
use skirmish_core::types::Battlefield;

use crate::components::{Body, Opponent};
use crate::config::MotionScript;
use crate::world_setup::jittered_period;

/// Update heading and velocity of every scripted opponent for this tick.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, battlefield: Battlefield) {
    for (_entity, (opponent, body)) in world.query_mut::<(&mut Opponent, &mut Body)>() {
        match opponent.script {
            MotionScript::Stationary => body.velocity = 0.0,
            MotionScript::Linear { .. } => reflect_off_walls(body, battlefield),
            MotionScript::Oscillating { period, .. } => {
                opponent.ticks_until_reverse = opponent.ticks_until_reverse.saturating_sub(1);
                if opponent.ticks_until_reverse == 0 {
                    body.velocity = -body.velocity;
                    opponent.ticks_until_reverse = jittered_period(rng, period);
                }
            }
            MotionScript::WallHugger { .. } => {
                if leaves_field(body, battlefield) {
                    body.heading = normal_absolute_angle(body.heading + FRAC_PI_2);
                }
            }
        }
    }
}

/// Whether moving one tick along the current heading would cross the
/// unit's allowed area.
fn leaves_field(body: &Body, battlefield: Battlefield) -> bool {
    let next = project(body.position, body.heading, body.velocity);
    battlefield.clamp(next, UNIT_HALF_SIZE) != next
}

/// Mirror the heading on whichever axis the next step would cross.
fn reflect_off_walls(body: &mut Body, battlefield: Battlefield) {
    let next = project(body.position, body.heading, body.velocity);
    let clamped = battlefield.clamp(next, UNIT_HALF_SIZE);
    if clamped.x != next.x {
        body.heading = normal_absolute_angle(-body.heading);
    }
    if clamped.y != next.y {
        body.heading = normal_absolute_angle(PI - body.heading);
    }
}
