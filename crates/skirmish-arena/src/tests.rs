//! Tests for the arena systems, host limits and full duels.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;
use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use test_log::test;

use skirmish_core::constants::{MAX_BODY_TURN_RATE, MAX_GUN_TURN_RATE};
use skirmish_core::events::{BattleEvent, ShotResult};
use skirmish_core::types::OpponentId;

use crate::components::{Body, Bullet, Gun, Opponent, Orders};
use crate::config::{ArenaConfig, MotionScript, OpponentSetup};
use crate::engine::Arena;
use crate::systems;
use crate::world_setup;

fn sitter_config() -> ArenaConfig {
    ArenaConfig {
        pilot_start: DVec2::new(400.0, 150.0),
        opponents: vec![OpponentSetup {
            id: OpponentId::new("Sitter"),
            start: DVec2::new(400.0, 450.0),
            heading: 0.0,
            script: MotionScript::Stationary,
            dies_at: None,
        }],
        ..Default::default()
    }
}

fn world_with_opponent(script: MotionScript, start: DVec2, heading: f64) -> (World, hecs::Entity) {
    let mut config = ArenaConfig::default();
    config.opponents[0] = OpponentSetup {
        id: OpponentId::new("Scripted"),
        start,
        heading,
        script,
        dies_at: None,
    };
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let entity = world_setup::spawn_opponent(&mut world, &mut rng, &config, &config.opponents[0]);
    (world, entity)
}

fn body_of(world: &World, entity: hecs::Entity) -> Body {
    *world.get::<&Body>(entity).unwrap()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut arena_a = Arena::new(ArenaConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();
    let mut arena_b = Arena::new(ArenaConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();

    for _ in 0..300 {
        let events_a = serde_json::to_string(&arena_a.step()).unwrap();
        let events_b = serde_json::to_string(&arena_b.step()).unwrap();
        assert_eq!(events_a, events_b, "Events diverged with same seed");
    }

    let report_a = serde_json::to_string(&arena_a.report()).unwrap();
    let report_b = serde_json::to_string(&arena_b.report()).unwrap();
    assert_eq!(report_a, report_b);
}

// ---- Host limits ----

#[test]
fn test_body_turn_and_speed_are_limited() {
    let config = ArenaConfig::default();
    let mut world = World::new();
    let pilot = world_setup::spawn_pilot(&mut world, &config);
    {
        let mut orders = world.get::<&mut Orders>(pilot).unwrap();
        orders.turn_remaining = PI;
        orders.distance_remaining = 100.0;
    }

    let wall = systems::movement::run_pilot(&mut world, config.battlefield);
    assert!(wall.is_none());

    let body = body_of(&world, pilot);
    assert_abs_diff_eq!(body.heading, MAX_BODY_TURN_RATE, epsilon = 1e-12);
    assert_eq!(body.velocity, 8.0);
    assert_abs_diff_eq!(body.position.x, 400.0 + 8.0 * MAX_BODY_TURN_RATE.sin(), epsilon = 1e-9);
    assert_abs_diff_eq!(body.position.y, 100.0 + 8.0 * MAX_BODY_TURN_RATE.cos(), epsilon = 1e-9);

    let orders = *world.get::<&Orders>(pilot).unwrap();
    assert_abs_diff_eq!(orders.turn_remaining, PI - MAX_BODY_TURN_RATE, epsilon = 1e-12);
    assert_eq!(orders.distance_remaining, 92.0);
}

#[test]
fn test_pilot_stopped_by_wall_reports_bearing() {
    let config = ArenaConfig {
        pilot_start: DVec2::new(20.0, 300.0),
        pilot_heading: 3.0 * FRAC_PI_2,
        ..Default::default()
    };
    let mut world = World::new();
    let pilot = world_setup::spawn_pilot(&mut world, &config);
    world.get::<&mut Orders>(pilot).unwrap().distance_remaining = 50.0;

    let bearing = systems::movement::run_pilot(&mut world, config.battlefield).unwrap();
    assert_abs_diff_eq!(bearing, 0.0, epsilon = 1e-9);

    let body = body_of(&world, pilot);
    assert_eq!(body.position.x, 18.0);
    assert_eq!(body.velocity, 0.0);
    assert_eq!(world.get::<&Orders>(pilot).unwrap().distance_remaining, 0.0);
}

#[test]
fn test_gun_turn_limited_and_cools() {
    let config = ArenaConfig::default();
    let mut world = World::new();
    let pilot = world_setup::spawn_pilot(&mut world, &config);
    {
        let mut gun = world.get::<&mut Gun>(pilot).unwrap();
        gun.turn_remaining = 1.0;
        gun.heat = 1.4;
    }

    systems::movement::run_gun(&mut world);
    let gun = *world.get::<&Gun>(pilot).unwrap();
    assert_abs_diff_eq!(gun.heading, MAX_GUN_TURN_RATE, epsilon = 1e-12);
    assert_abs_diff_eq!(gun.heat, 1.3, epsilon = 1e-12);

    for _ in 0..20 {
        systems::movement::run_gun(&mut world);
    }
    assert_eq!(world.get::<&Gun>(pilot).unwrap().heat, 0.0);
}

#[test]
fn test_firing_heats_gun() {
    let mut arena = Arena::new(sitter_config()).unwrap();
    let events = arena.step();
    assert!(events.iter().any(|e| matches!(e, BattleEvent::Scanned(_))));

    let report = arena.report();
    assert_eq!(report.shots_fired, 1);
    // Power 2.0 at medium range: heat 1 + 2 / 5.
    assert_abs_diff_eq!(arena.telemetry().gun_heat, 1.4, epsilon = 1e-12);
    assert_eq!(arena.engine().pending_shots().len(), 1);
}

// ---- Scripts ----

#[test]
fn test_oscillating_reverses_on_schedule() {
    let (mut world, entity) = world_with_opponent(
        MotionScript::Oscillating {
            speed: 8.0,
            period: 4,
        },
        DVec2::new(400.0, 300.0),
        FRAC_PI_2,
    );
    world.get::<&mut Opponent>(entity).unwrap().ticks_until_reverse = 1;

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    systems::scripts::run(&mut world, &mut rng, ArenaConfig::default().battlefield);

    assert_eq!(body_of(&world, entity).velocity, -8.0);
    let next = world.get::<&Opponent>(entity).unwrap().ticks_until_reverse;
    assert!((3..=5).contains(&next), "jittered period {next} out of range");
}

#[test]
fn test_wall_hugger_turns_clockwise_at_wall() {
    let (mut world, entity) = world_with_opponent(
        MotionScript::WallHugger { speed: 8.0 },
        DVec2::new(782.0, 300.0),
        FRAC_PI_2,
    );
    let battlefield = ArenaConfig::default().battlefield;
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    systems::scripts::run(&mut world, &mut rng, battlefield);
    assert_abs_diff_eq!(body_of(&world, entity).heading, PI, epsilon = 1e-12);

    systems::movement::run_opponents(&mut world, battlefield);
    let body = body_of(&world, entity);
    assert_abs_diff_eq!(body.position.x, 782.0, epsilon = 1e-9);
    assert_abs_diff_eq!(body.position.y, 292.0, epsilon = 1e-9);
}

#[test]
fn test_linear_reflects_off_walls() {
    let (mut world, entity) = world_with_opponent(
        MotionScript::Linear { speed: 8.0 },
        DVec2::new(780.0, 300.0),
        FRAC_PI_2,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    systems::scripts::run(&mut world, &mut rng, ArenaConfig::default().battlefield);
    assert_abs_diff_eq!(body_of(&world, entity).heading, 3.0 * FRAC_PI_2, epsilon = 1e-12);
}

// ---- Shot resolution ----

fn spawn_bullet(world: &mut World, angle: f64) {
    world.spawn((Bullet {
        shot_id: 7,
        target: OpponentId::new("Scripted"),
        origin: DVec2::new(400.0, 150.0),
        angle,
        speed: 14.0,
        travelled: 0.0,
        fired_tick: 0,
    },));
}

#[test]
fn test_bullet_on_line_hits() {
    let (mut world, _) = world_with_opponent(MotionScript::Stationary, DVec2::new(400.0, 450.0), 0.0);
    spawn_bullet(&mut world, 0.0);

    let battlefield = ArenaConfig::default().battlefield;
    let mut buffer = Vec::new();
    let mut outcomes = Vec::new();
    for tick in 0..30 {
        outcomes = systems::shots::run(&mut world, battlefield, tick, &mut buffer);
        if !outcomes.is_empty() {
            assert_eq!(tick, 21, "300 units at 14 per tick resolve on the 22nd advance");
            break;
        }
    }
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].result, ShotResult::Hit);
    assert_eq!(outcomes[0].shot_id, 7);
    assert_eq!(outcomes[0].opponent_position, Some(DVec2::new(400.0, 450.0)));
    assert_eq!(world.query::<&Bullet>().iter().count(), 0);
}

#[test]
fn test_bullet_off_line_misses_with_position() {
    let (mut world, _) = world_with_opponent(MotionScript::Stationary, DVec2::new(400.0, 450.0), 0.0);
    spawn_bullet(&mut world, 0.2);

    let battlefield = ArenaConfig::default().battlefield;
    let mut buffer = Vec::new();
    let outcome = (0..30)
        .flat_map(|tick| systems::shots::run(&mut world, battlefield, tick, &mut buffer))
        .next()
        .unwrap();
    assert_eq!(outcome.result, ShotResult::Miss);
    assert_eq!(outcome.opponent_position, Some(DVec2::new(400.0, 450.0)));
}

#[test]
fn test_bullet_leaving_field_early_reports_no_position() {
    let (mut world, _) = world_with_opponent(MotionScript::Stationary, DVec2::new(400.0, 450.0), 0.0);
    // Fired due South, away from a target 300 units North.
    spawn_bullet(&mut world, PI);

    let battlefield = ArenaConfig::default().battlefield;
    let mut buffer = Vec::new();
    let (tick, outcome) = (0..30)
        .find_map(|tick| {
            systems::shots::run(&mut world, battlefield, tick, &mut buffer)
                .pop()
                .map(|outcome| (tick, outcome))
        })
        .unwrap();
    assert_eq!(tick, 10, "150 units at 14 per tick leave the field on the 11th advance");
    assert_eq!(outcome.result, ShotResult::Miss);
    assert_eq!(outcome.opponent_position, None);
}

// ---- Full duels ----

#[test]
fn test_stationary_target_is_hit_at_center_bin() {
    let mut arena = Arena::new(sitter_config()).unwrap();
    let report = arena.run(300);

    assert!(report.shots_fired > 1);
    assert!(report.hits > 0);
    assert!(report.hit_rate() > 0.0);

    let sitter = report.opponent(&"Sitter".into()).unwrap();
    assert!(sitter.alive);
    assert_eq!(sitter.mode_bin, 15);
    assert!(sitter.hits_taken > 0);
    assert!(sitter.histogram.iter().sum::<u32>() > 0);
}

#[test]
fn test_engine_learns_against_oscillator() {
    let mut arena = Arena::new(ArenaConfig::default()).unwrap();
    let report = arena.run(500);

    assert!(report.shots_fired > 0);
    assert!(report.hits + report.misses > 0);
    let oscillator = report.opponent(&"Oscillator".into()).unwrap();
    assert!(oscillator.histogram.iter().sum::<u32>() > 0);
    assert_eq!(oscillator.histogram.len(), 31);
}

#[test]
fn test_scripted_death_reaches_engine() {
    let mut config = sitter_config();
    config.opponents[0].dies_at = Some(30);
    let mut arena = Arena::new(config).unwrap();

    let mut saw_death = false;
    for _ in 0..40 {
        let events = arena.step();
        saw_death |= events
            .iter()
            .any(|e| matches!(e, BattleEvent::OpponentDeath { .. }));
    }
    assert!(saw_death);

    let last = arena.step();
    assert!(!last.iter().any(|e| matches!(e, BattleEvent::Scanned(_))));

    let id = OpponentId::new("Sitter");
    assert!(!arena.engine().tracker().state(&id).unwrap().alive);
    assert!(arena.engine().pending_shots().is_empty());

    let report = arena.report();
    let sitter = report.opponent(&id).unwrap();
    assert!(!sitter.alive);
    assert!(sitter.position.is_none());
}

#[test]
fn test_report_serializes() {
    let mut arena = Arena::new(sitter_config()).unwrap();
    let report = arena.run(50);
    let json = serde_json::to_string(&report).unwrap();
    let back: crate::ArenaReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.ticks, 50);
    assert_eq!(back.shots_fired, report.shots_fired);
    assert_eq!(back.opponents.len(), 1);
    assert_eq!(back.opponents[0].histogram, report.opponents[0].histogram);
    assert_eq!(back.pilot.direction, report.pilot.direction);
}

// ---- Config ----

#[test]
fn test_arena_config_validation() {
    assert!(ArenaConfig::default().validate().is_ok());

    let mut empty = ArenaConfig::default();
    empty.opponents.clear();
    assert!(empty.validate().is_err());

    let mut twice = sitter_config();
    twice.opponents.push(twice.opponents[0].clone());
    assert!(twice.validate().is_err());

    let mut bad_engine = ArenaConfig::default();
    bad_engine.engine.targeting.bins = 30;
    assert!(Arena::new(bad_engine).is_err());
}

#[test]
fn test_arena_config_from_json() {
    let json = r#"{
        "seed": 7,
        "opponents": [
            {"id": "Hugger", "start": [780.0, 300.0], "heading": 3.14159,
             "script": {"kind": "WallHugger", "speed": 8.0}}
        ]
    }"#;
    let config = ArenaConfig::from_json(json).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.opponents.len(), 1);
    assert_eq!(config.opponents[0].dies_at, None);
    assert_eq!(config.battlefield, ArenaConfig::default().battlefield);

    assert!(ArenaConfig::from_json(r#"{"opponents": []}"#).is_err());
    assert!(ArenaConfig::from_json("{ not json").is_err());
}
