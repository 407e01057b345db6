//! Arena engine: drives one decision engine against scripted opponents.
//!
//! `Arena` owns the hecs world, the seeded RNG and the `DecisionEngine`.
//! Completely headless, enabling deterministic testing.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_ai::DecisionEngine;
use skirmish_core::commands::{Decision, FireOrder};
use skirmish_core::constants::{GUN_HEAT_BASE, GUN_HEAT_POWER_DIVISOR};
use skirmish_core::error::ConfigError;
use skirmish_core::events::{BattleEvent, ShotResult};
use skirmish_core::types::SelfTelemetry;

use crate::components::{Body, Bullet, Energy, Gun, Orders};
use crate::config::ArenaConfig;
use crate::report::{ArenaReport, DuelStats};
use crate::systems;
use crate::world_setup;

pub struct Arena {
    world: World,
    rng: ChaCha8Rng,
    config: ArenaConfig,
    engine: DecisionEngine,
    pilot: Entity,
    tick: u64,
    stats: DuelStats,
    despawn_buffer: Vec<Entity>,
}

impl Arena {
    /// Validate `config`, populate the world and announce the battle to the engine.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = DecisionEngine::new(config.engine.clone())?;
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let pilot = world_setup::setup_duel(&mut world, &mut rng, &config);

        let mut arena = Self {
            world,
            rng,
            config,
            engine,
            pilot,
            tick: 0,
            stats: DuelStats::default(),
            despawn_buffer: Vec::new(),
        };
        arena.dispatch(BattleEvent::BattleStarted);
        Ok(arena)
    }

    /// Advance one tick. Returns the events dispatched to the engine, in order.
    pub fn step(&mut self) -> Vec<BattleEvent> {
        let battlefield = self.config.battlefield;

        // 1. Scripted opponent behavior
        systems::scripts::run(&mut self.world, &mut self.rng, battlefield);
        // 2. Kinematics under host limits
        let wall = systems::movement::run_pilot(&mut self.world, battlefield);
        systems::movement::run_opponents(&mut self.world, battlefield);
        systems::movement::run_gun(&mut self.world);
        // 3. Bullets
        let outcomes =
            systems::shots::run(&mut self.world, battlefield, self.tick, &mut self.despawn_buffer);
        // 4. Scripted deaths
        let destroyed = systems::cleanup::run(&mut self.world, self.tick, &mut self.despawn_buffer);
        // 5. Radar
        let scans = systems::sensors::run(&self.world, self.tick);

        let mut events = Vec::with_capacity(scans.len() + outcomes.len() + 1);
        if let Some(bearing) = wall {
            self.stats.wall_hits += 1;
            events.push(BattleEvent::HitWall { bearing });
        }
        for outcome in outcomes {
            match outcome.result {
                ShotResult::Hit => {
                    self.stats.hits += 1;
                    *self
                        .stats
                        .hits_taken
                        .entry(outcome.opponent.clone())
                        .or_default() += 1;
                }
                ShotResult::Miss | ShotResult::Intercepted => self.stats.misses += 1,
            }
            events.push(BattleEvent::BulletOutcome(outcome));
        }
        events.extend(
            destroyed
                .into_iter()
                .map(|opponent| BattleEvent::OpponentDeath { opponent }),
        );
        events.extend(scans.into_iter().map(BattleEvent::Scanned));

        for event in &events {
            self.dispatch(event.clone());
        }
        self.tick += 1;
        events
    }

    /// Run `ticks` ticks and summarize.
    pub fn run(&mut self, ticks: u64) -> ArenaReport {
        for _ in 0..ticks {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> ArenaReport {
        systems::report::build_report(&self.world, &self.engine, &self.config, &self.stats, self.tick)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Own-unit telemetry as the engine sees it.
    pub fn telemetry(&self) -> SelfTelemetry {
        let mut telemetry = SelfTelemetry {
            battlefield: self.config.battlefield,
            tick: self.tick,
            ..Default::default()
        };
        if let Ok(body) = self.world.get::<&Body>(self.pilot) {
            telemetry.position = body.position;
            telemetry.heading = body.heading;
            telemetry.velocity = body.velocity;
        }
        if let Ok(gun) = self.world.get::<&Gun>(self.pilot) {
            telemetry.gun_heading = gun.heading;
            telemetry.gun_heat = gun.heat;
        }
        if let Ok(energy) = self.world.get::<&Energy>(self.pilot) {
            telemetry.energy = energy.0;
        }
        telemetry
    }

    fn dispatch(&mut self, event: BattleEvent) {
        let telemetry = self.telemetry();
        let decision = self.engine.decide(&telemetry, &event);
        self.apply(&telemetry, decision);
    }

    /// Apply a decision. Movement and gun commands replace whatever was still
    /// outstanding; a fire order is honored only by a cool gun.
    fn apply(&mut self, telemetry: &SelfTelemetry, decision: Decision) {
        if let Some(command) = decision.movement {
            if let Ok(mut orders) = self.world.get::<&mut Orders>(self.pilot) {
                orders.turn_remaining = command.turn;
                orders.distance_remaining = command.distance;
            }
        }
        let Some(gun) = decision.gun else {
            return;
        };
        if let Ok(mut state) = self.world.get::<&mut Gun>(self.pilot) {
            state.turn_remaining = gun.turn;
        }
        if let Some(order) = gun.fire {
            self.fire(telemetry, order);
        }
    }

    fn fire(&mut self, telemetry: &SelfTelemetry, order: FireOrder) {
        let Some(target) = self
            .engine
            .pending_shot(order.shot_id)
            .map(|snapshot| snapshot.opponent.clone())
        else {
            return;
        };
        {
            let Ok(mut gun) = self.world.get::<&mut Gun>(self.pilot) else {
                return;
            };
            if gun.heat > 0.0 {
                log::debug!("gun still hot ({:.2}), shot {} dropped", gun.heat, order.shot_id);
                return;
            }
            gun.heat = GUN_HEAT_BASE + order.power / GUN_HEAT_POWER_DIVISOR;
        }

        self.world.spawn((Bullet {
            shot_id: order.shot_id,
            target,
            origin: telemetry.position,
            angle: telemetry.gun_heading,
            speed: skirmish_ai::targeting::bullet_speed(order.power),
            travelled: 0.0,
            fired_tick: self.tick,
        },));
        self.stats.shots_fired += 1;
    }
}
