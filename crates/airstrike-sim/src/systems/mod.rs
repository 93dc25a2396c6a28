//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only). They do not own state: all state lives in components,
//! the terrain, or the engine.

pub mod bomber_attack;
pub mod cleanup;
pub mod movement;
pub mod munitions;
pub mod schedule;
pub mod snapshot;
pub mod sync;

use hecs::{Entity, World};

/// Entities matching `Q`, sorted by entity index.
///
/// hecs iterates archetype by archetype; systems whose effects depend on
/// processing order go through this to stay identical across replicas.
pub(crate) fn sorted_entities<Q: hecs::Query>(world: &World) -> Vec<Entity> {
    let mut entities: Vec<Entity> = world.query::<Q>().iter().map(|(e, _)| e).collect();
    entities.sort_by_key(|e| e.id());
    entities
}
