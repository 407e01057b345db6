//! Cleanup system: removes opponents whose scripted lifetime has ended.

use hecs::{Entity, World};

use skirmish_core::types::OpponentId;

use crate::components::Opponent;

/// Despawn every opponent due to die at or before `current_tick`.
/// Returns the identities removed, in world iteration order.
pub fn run(world: &mut World, current_tick: u64, despawn_buffer: &mut Vec<Entity>) -> Vec<OpponentId> {
    despawn_buffer.clear();

    let mut removed = Vec::new();
    for (entity, opponent) in world.query_mut::<&Opponent>() {
        if opponent.dies_at.is_some_and(|tick| tick <= current_tick) {
            removed.push(opponent.id.clone());
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
