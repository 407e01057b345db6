//! Kinematic integration under host limits.
//!
//! The pilot works off its outstanding orders at no more than the host's
//! turn and speed limits. Everything is clamped onto the field.

use hecs::World;

use skirmish_core::constants::{
    GUN_COOLING_RATE, MAX_BODY_TURN_RATE, MAX_GUN_TURN_RATE, MAX_VELOCITY, UNIT_HALF_SIZE,
};
use skirmish_core::geometry::{
    absolute_angle_between, normal_absolute_angle, normal_relative_angle, project,
};
use skirmish_core::types::Battlefield;

use crate::components::{Body, Gun, Opponent, Orders, Pilot};

/// Advance the pilot one tick. Returns the wall bearing, relative to the
/// body heading, when the pilot was stopped by a wall.
pub fn run_pilot(world: &mut World, battlefield: Battlefield) -> Option<f64> {
    let mut wall_bearing = None;
    for (_entity, (_pilot, body, orders)) in world.query_mut::<(&Pilot, &mut Body, &mut Orders)>()
    {
        let turn = orders
            .turn_remaining
            .clamp(-MAX_BODY_TURN_RATE, MAX_BODY_TURN_RATE);
        body.heading = normal_absolute_angle(body.heading + turn);
        orders.turn_remaining -= turn;

        body.velocity = orders
            .distance_remaining
            .clamp(-MAX_VELOCITY, MAX_VELOCITY);
        orders.distance_remaining -= body.velocity;

        let next = project(body.position, body.heading, body.velocity);
        let clamped = battlefield.clamp(next, UNIT_HALF_SIZE);
        if clamped != next {
            let wall = absolute_angle_between(clamped, next);
            wall_bearing = Some(normal_relative_angle(wall - body.heading));
            body.velocity = 0.0;
            orders.distance_remaining = 0.0;
        }
        body.position = clamped;
    }
    wall_bearing
}

/// Advance every scripted opponent one tick along its heading.
pub fn run_opponents(world: &mut World, battlefield: Battlefield) {
    for (_entity, (_opponent, body)) in world.query_mut::<(&Opponent, &mut Body)>() {
        let next = project(body.position, body.heading, body.velocity);
        body.position = battlefield.clamp(next, UNIT_HALF_SIZE);
    }
}

/// Turn the gun toward its outstanding turn and let it cool.
pub fn run_gun(world: &mut World) {
    for (_entity, gun) in world.query_mut::<&mut Gun>() {
        let turn = gun
            .turn_remaining
            .clamp(-MAX_GUN_TURN_RATE, MAX_GUN_TURN_RATE);
        gun.heading = normal_absolute_angle(gun.heading + turn);
        gun.turn_remaining -= turn;
        gun.heat = (gun.heat - GUN_COOLING_RATE).max(0.0);
    }
}
