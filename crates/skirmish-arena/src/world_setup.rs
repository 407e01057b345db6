//! Entity spawn factories for the arena world.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::UNIT_HALF_SIZE;
use skirmish_core::geometry::normal_absolute_angle;

use crate::components::{Body, Energy, Gun, Opponent, Orders, Pilot};
use crate::config::{ArenaConfig, MotionScript, OpponentSetup};

/// Spawn the pilot and every configured opponent.
pub fn setup_duel(world: &mut World, rng: &mut ChaCha8Rng, config: &ArenaConfig) -> Entity {
    let pilot = spawn_pilot(world, config);
    for setup in &config.opponents {
        spawn_opponent(world, rng, config, setup);
    }
    pilot
}

/// Spawn the engine-driven unit, clamped onto the field.
pub fn spawn_pilot(world: &mut World, config: &ArenaConfig) -> Entity {
    let position = config.battlefield.clamp(config.pilot_start, UNIT_HALF_SIZE);
    let heading = normal_absolute_angle(config.pilot_heading);
    world.spawn((
        Pilot,
        Body {
            position,
            heading,
            velocity: 0.0,
        },
        Gun {
            heading,
            ..Default::default()
        },
        Orders::default(),
        Energy(config.pilot_energy),
    ))
}

/// Spawn a scripted opponent. Oscillating scripts get a jittered first period.
pub fn spawn_opponent(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &ArenaConfig,
    setup: &OpponentSetup,
) -> Entity {
    let ticks_until_reverse = match setup.script {
        MotionScript::Oscillating { period, .. } => jittered_period(rng, period),
        _ => u64::MAX,
    };
    world.spawn((
        Opponent {
            id: setup.id.clone(),
            script: setup.script.clone(),
            ticks_until_reverse,
            dies_at: setup.dies_at,
        },
        Body {
            position: config.battlefield.clamp(setup.start, UNIT_HALF_SIZE),
            heading: normal_absolute_angle(setup.heading),
            velocity: setup.script.speed(),
        },
    ))
}

/// `period` varied by up to a quarter either way, never below one tick.
pub fn jittered_period(rng: &mut ChaCha8Rng, period: u64) -> u64 {
    let spread = period / 4;
    if spread == 0 {
        return period.max(1);
    }
    rng.gen_range(period - spread..=period + spread).max(1)
}
