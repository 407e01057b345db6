//! Radar: every live opponent is seen every tick.
//!
//! Scripted opponents carry no energy model and always report full energy.

use hecs::World;

use skirmish_core::constants::INITIAL_ENERGY;
use skirmish_core::events::ScanEvent;
use skirmish_core::geometry::{absolute_angle_between, normal_relative_angle};

use crate::components::{Body, Opponent, Pilot};

/// Build one scan event per opponent, as seen from the pilot. Read-only.
pub fn run(world: &World, current_tick: u64) -> Vec<ScanEvent> {
    let Some(pilot) = world
        .query::<(&Pilot, &Body)>()
        .iter()
        .next()
        .map(|(_, (_, body))| *body)
    else {
        return Vec::new();
    };

    let mut query = world.query::<(&Opponent, &Body)>();
    let scans = query
        .iter()
        .map(|(_, (opponent, body))| ScanEvent {
            opponent: opponent.id.clone(),
            bearing: normal_relative_angle(
                absolute_angle_between(pilot.position, body.position) - pilot.heading,
            ),
            distance: pilot.position.distance(body.position),
            heading: body.heading,
            velocity: body.velocity,
            energy: INITIAL_ENERGY,
            tick: current_tick,
        })
        .collect();
    scans
}
