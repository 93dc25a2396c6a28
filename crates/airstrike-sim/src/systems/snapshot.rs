//! Snapshot system: queries the ECS world and builds a SimSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use airstrike_attack::AttackBomber;
use airstrike_core::components::{Facing, InWorld, Munition};
use airstrike_core::events::SimEvent;
use airstrike_core::state::{BomberView, MunitionView, SimSnapshot};
use airstrike_core::types::{Position, SimTime, Velocity};

use crate::armament::Armaments;
use crate::systems::sync::world_hash;
use crate::world_setup::actor_id;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(world: &World, time: &SimTime, events: Vec<SimEvent>) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        bombers: build_bombers(world),
        munitions: build_munitions(world),
        events,
        sync_hash: world_hash(world, time.tick),
    }
}

/// Build BomberView list, sorted by actor id.
fn build_bombers(world: &World) -> Vec<BomberView> {
    let mut bombers: Vec<BomberView> = world
        .query::<(
            &AttackBomber,
            &Position,
            &Velocity,
            &Facing,
            &Armaments,
            Option<&InWorld>,
        )>()
        .iter()
        .map(|(entity, (attack, pos, vel, facing, armaments, in_world))| BomberView {
            actor: actor_id(entity),
            position: *pos,
            facing: facing.0,
            speed: vel.speed(),
            in_world: in_world.is_some(),
            target: attack.target().center_position(),
            in_attack_range: attack.in_attack_range(),
            facing_target: attack.facing_target(),
            ammo: armaments.0.iter().map(|a| a.ammo()).collect(),
        })
        .collect();

    bombers.sort_by_key(|b| b.actor);
    bombers
}

/// Build MunitionView list, sorted by owner then position in flight.
fn build_munitions(world: &World) -> Vec<MunitionView> {
    let mut munitions: Vec<(u32, MunitionView)> = world
        .query::<(&Munition, &Position)>()
        .iter()
        .map(|(entity, (munition, pos))| {
            (
                entity.id(),
                MunitionView {
                    owner: munition.owner,
                    weapon: munition.weapon.clone(),
                    position: *pos,
                },
            )
        })
        .collect();

    munitions.sort_by_key(|(id, _)| *id);
    munitions.into_iter().map(|(_, view)| view).collect()
}
