//! Entity spawn factories and actor id mapping.

use hecs::{Entity, World};
use log::info;

use airstrike_attack::{AttackBomber, AttackBomberInfo};
use airstrike_core::commands::BomberSpawn;
use airstrike_core::components::{Bomber, Facing, InWorld};
use airstrike_core::types::{ActorId, Velocity};

use crate::armament::Armaments;

/// Stable actor id for a hecs entity.
pub fn actor_id(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

/// The hecs entity behind an actor id, if the bits form a valid handle.
pub fn entity_of(actor: ActorId) -> Option<Entity> {
    Entity::from_bits(actor.0)
}

/// Spawn a scripted bomber with its attack capability and weapons.
pub fn spawn_bomber(world: &mut World, spawn: &BomberSpawn) -> Entity {
    let mut attack = AttackBomber::new(AttackBomberInfo::with_facing_tolerance(
        spawn.facing_tolerance,
    ));
    if let Some(target) = spawn.target {
        attack.set_target(target);
    }

    let entity = world.spawn((
        Bomber,
        spawn.position,
        Velocity::from_heading(spawn.speed, spawn.heading),
        Facing(spawn.heading),
        attack,
        Armaments::from_specs(&spawn.weapons),
    ));

    if spawn.in_world {
        // Freshly spawned: the entity is guaranteed to exist.
        let _ = world.insert_one(entity, InWorld);
    }

    info!(
        "Spawned bomber {:?} at ({:.0}, {:.0}, {:.0}) with {} weapon(s)",
        actor_id(entity),
        spawn.position.x,
        spawn.position.y,
        spawn.position.z,
        spawn.weapons.len()
    );
    entity
}
