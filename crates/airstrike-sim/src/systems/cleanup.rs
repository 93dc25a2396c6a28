//! Cleanup system: takes bombers that fly off the map out of the world.

use hecs::{Entity, World};
use log::info;

use airstrike_attack::AttackBomber;
use airstrike_core::components::{Bomber, InWorld};
use airstrike_core::events::SimEvent;
use airstrike_core::types::Position;

use crate::world_setup::actor_id;

/// Remove in-world bombers beyond `world_radius` of the origin.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    world_radius: f64,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let radius_sq = world_radius * world_radius;
    for (entity, (pos, _bomber, _in_world)) in world.query_mut::<(&Position, &Bomber, &InWorld)>() {
        let range_sq = pos.x * pos.x + pos.y * pos.y;
        if range_sq > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_by_key(|e| e.id());
    for entity in despawn_buffer.drain(..) {
        remove_from_world(world, entity, events);
    }
}

/// Take an actor out of the simulation for good: raise its removal
/// notification, then despawn it. Returns whether a notification fired.
pub fn remove_from_world(world: &mut World, entity: Entity, events: &mut Vec<SimEvent>) -> bool {
    let actor = actor_id(entity);
    let _ = world.remove_one::<InWorld>(entity);

    let notified = match world.get::<&mut AttackBomber>(entity) {
        Ok(mut attack) => attack.notify_removed_from_world(actor),
        Err(_) => false,
    };
    if notified {
        info!("{actor:?} removed from world");
        events.push(SimEvent::RemovedFromWorld { actor });
    }

    let _ = world.despawn(entity);
    notified
}
