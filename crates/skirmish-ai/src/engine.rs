//! Decision engine: one unit's brain.
//!
//! `DecisionEngine` owns the opponent tracker, histograms, position ring and
//! pending-shot ledger. The host hands it one event at a time together with
//! fresh self telemetry and receives a `Decision` back. No state outside the
//! engine is read or written.

use skirmish_core::commands::{Decision, FireOrder, GunCommand};
use skirmish_core::config::EngineConfig;
use skirmish_core::error::ConfigError;
use skirmish_core::events::{BattleEvent, BulletOutcome, ScanEvent};
use skirmish_core::types::{LateralDirection, OpponentId, SelfTelemetry};

use crate::ledger::{FireSnapshot, PendingShots};
use crate::movement::{self, MovementContext};
use crate::targeting::{self, AimContext, FireStance};
use crate::tracker::{Observation, OpponentTracker};

pub struct DecisionEngine {
    config: EngineConfig,
    tracker: OpponentTracker,
    pending: PendingShots,
    direction: LateralDirection,
    enraged: bool,
    next_shot_id: u64,
}

impl DecisionEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tracker: OpponentTracker::new(
                config.movement.history_capacity,
                config.targeting.bins,
            ),
            pending: PendingShots::new(config.targeting.pending_shot_capacity),
            direction: LateralDirection::default(),
            enraged: false,
            next_shot_id: 0,
            config,
        })
    }

    /// Handle one event and return what the unit should do next.
    pub fn decide(&mut self, telemetry: &SelfTelemetry, event: &BattleEvent) -> Decision {
        match event {
            BattleEvent::Scanned(scan) => self.on_scanned(telemetry, scan),
            BattleEvent::BulletOutcome(outcome) => {
                self.on_bullet_outcome(outcome);
                Decision::none()
            }
            BattleEvent::HitWall { .. } => {
                self.reverse_direction();
                Decision::none()
            }
            BattleEvent::HitByBullet { .. } => {
                self.reverse_direction();
                if !self.enraged && telemetry.energy < self.config.rage_energy_threshold {
                    log::debug!("energy {:.1}, switching to enraged fire", telemetry.energy);
                    self.enraged = true;
                }
                Decision::none()
            }
            BattleEvent::OpponentDeath { opponent } => {
                self.tracker.mark_dead(opponent);
                let dropped = self.pending.discard_for(opponent);
                log::debug!("{opponent} destroyed, {dropped} pending shots discarded");
                Decision::none()
            }
            BattleEvent::BattleStarted => {
                self.reset();
                Decision::none()
            }
        }
    }

    /// Discard everything learned: opponents, histograms, position ring,
    /// pending shots and the direction and rage flags.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.pending.clear();
        self.direction = LateralDirection::default();
        self.enraged = false;
        self.next_shot_id = 0;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tracker(&self) -> &OpponentTracker {
        &self.tracker
    }

    pub fn pending_shots(&self) -> &PendingShots {
        &self.pending
    }

    pub fn direction(&self) -> LateralDirection {
        self.direction
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    fn reverse_direction(&mut self) {
        self.direction = self.direction.reversed();
    }

    fn on_scanned(&mut self, telemetry: &SelfTelemetry, scan: &ScanEvent) -> Decision {
        let opponent = self
            .tracker
            .observe(&scan.opponent, Observation::from_scan(telemetry, scan))
            .clone();

        let movement = movement::plan(
            &MovementContext {
                position: telemetry.position,
                heading: telemetry.heading,
                battlefield: telemetry.battlefield,
                opponent: &opponent,
                direction: self.direction,
            },
            self.tracker.history(),
            &self.config.movement,
        );

        let stance = if movement::follow_applies(
            &opponent,
            telemetry.battlefield,
            &self.config.movement.follow,
        ) {
            FireStance::Follow
        } else if self.enraged {
            FireStance::Enraged
        } else {
            FireStance::Normal
        };

        let Some(histogram) = self.tracker.histogram(&scan.opponent) else {
            return Decision {
                movement: movement.map(|p| p.command),
                gun: None,
            };
        };
        let aim = targeting::aim(
            &AimContext {
                telemetry,
                opponent: &opponent,
                histogram,
                stance,
            },
            &self.config.targeting,
        );

        let fire = aim.fire.then(|| {
            let shot_id = self.next_shot_id;
            self.next_shot_id += 1;
            let solution = aim.solution;
            self.pending.record(FireSnapshot {
                shot_id,
                opponent: scan.opponent.clone(),
                origin: telemetry.position,
                bearing: solution.bearing,
                aim_angle: solution.aim_angle,
                bullet_speed: solution.bullet_speed,
                max_escape_angle: solution.max_escape_angle,
                direction: if solution.direction == 0.0 { 1.0 } else { solution.direction },
                power: solution.power,
                fired_tick: telemetry.tick,
            });
            FireOrder {
                power: solution.power,
                shot_id,
            }
        });

        Decision {
            movement: movement.map(|p| p.command),
            gun: Some(GunCommand {
                turn: aim.gun_turn,
                fire,
            }),
        }
    }

    fn on_bullet_outcome(&mut self, outcome: &BulletOutcome) {
        let Some(snapshot) = self.pending.take(outcome.shot_id) else {
            log::debug!("outcome for unknown shot {} ignored", outcome.shot_id);
            return;
        };
        if snapshot.opponent != outcome.opponent {
            log::warn!(
                "shot {} was fired at {} but reported against {}",
                outcome.shot_id,
                snapshot.opponent,
                outcome.opponent
            );
        }
        let Some(histogram) = self.tracker.histogram_mut(&snapshot.opponent) else {
            log::debug!("no histogram for {}, outcome ignored", snapshot.opponent);
            return;
        };
        match targeting::reconcile(&snapshot, outcome, histogram, &self.config.targeting) {
            Some(bin) => log::debug!(
                "shot {} {:?} against {}: reinforced bin {bin} ({} samples)",
                outcome.shot_id,
                outcome.result,
                snapshot.opponent,
                histogram.total()
            ),
            None => log::trace!("shot {} carried no position", outcome.shot_id),
        }
    }

    /// Snapshot of the shot `shot_id` if it is still awaiting its outcome.
    pub fn pending_shot(&self, shot_id: u64) -> Option<&FireSnapshot> {
        self.pending.get(shot_id)
    }

    /// Identities of every opponent seen so far.
    pub fn known_opponents(&self) -> impl Iterator<Item = &OpponentId> + '_ {
        self.tracker.iter().map(|(id, _)| id)
    }
}
