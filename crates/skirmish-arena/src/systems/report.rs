//! Report system: reads the world and the engine and builds an `ArenaReport`.
//!
//! This system is read-only.

use std::collections::BTreeMap;

use glam::DVec2;
use hecs::World;

use skirmish_ai::histogram::GuessFactorHistogram;
use skirmish_ai::DecisionEngine;
use skirmish_core::types::OpponentId;

use crate::components::{Body, Gun, Opponent, Pilot};
use crate::config::ArenaConfig;
use crate::report::{ArenaReport, DuelStats, OpponentView, PilotView};

pub fn build_report(
    world: &World,
    engine: &DecisionEngine,
    config: &ArenaConfig,
    stats: &DuelStats,
    ticks: u64,
) -> ArenaReport {
    ArenaReport {
        seed: config.seed,
        ticks,
        shots_fired: stats.shots_fired,
        hits: stats.hits,
        misses: stats.misses,
        wall_hits: stats.wall_hits,
        pilot: build_pilot(world, engine),
        opponents: build_opponents(world, engine, config, stats),
    }
}

fn build_pilot(world: &World, engine: &DecisionEngine) -> PilotView {
    let (position, heading, gun_heading) = world
        .query::<(&Pilot, &Body, &Gun)>()
        .iter()
        .next()
        .map(|(_, (_, body, gun))| (body.position, body.heading, gun.heading))
        .unwrap_or_default();
    PilotView {
        position,
        heading,
        gun_heading,
        direction: engine.direction(),
        enraged: engine.is_enraged(),
    }
}

fn build_opponents(
    world: &World,
    engine: &DecisionEngine,
    config: &ArenaConfig,
    stats: &DuelStats,
) -> Vec<OpponentView> {
    let live: BTreeMap<OpponentId, DVec2> = world
        .query::<(&Opponent, &Body)>()
        .iter()
        .map(|(_, (opponent, body))| (opponent.id.clone(), body.position))
        .collect();

    let mut views: Vec<OpponentView> = config
        .opponents
        .iter()
        .map(|setup| {
            let histogram = engine
                .tracker()
                .histogram(&setup.id)
                .cloned()
                .unwrap_or_else(|| GuessFactorHistogram::new(config.engine.targeting.bins));
            OpponentView {
                id: setup.id.clone(),
                alive: live.contains_key(&setup.id),
                position: live.get(&setup.id).copied(),
                hits_taken: stats.hits_taken.get(&setup.id).copied().unwrap_or(0),
                mode_bin: histogram.mode_index(),
                histogram: histogram.counts().to_vec(),
            }
        })
        .collect();
    views.sort_by(|a, b| a.id.cmp(&b.id));
    views
}
