//! Munition system: spawns released bombs, drops them under gravity,
//! and detonates them on the ground.

use hecs::{Entity, World};
use log::debug;

use airstrike_core::components::Munition;
use airstrike_core::constants::DT;
use airstrike_core::events::SimEvent;
use airstrike_core::terrain::TerrainHeight;
use airstrike_core::types::{Position, Velocity};
use airstrike_terrain::HeightMap;

use crate::armament::Release;
use crate::world_setup::entity_of;

/// Turn pending releases into munition entities. A bomb leaves the bay
/// with its carrier's velocity.
pub fn spawn(world: &mut World, releases: &mut Vec<Release>, events: &mut Vec<SimEvent>) {
    for release in releases.drain(..) {
        let velocity = entity_of(release.owner)
            .and_then(|carrier| world.get::<&Velocity>(carrier).ok().map(|v| *v))
            .unwrap_or_default();

        events.push(SimEvent::WeaponFired {
            actor: release.owner,
            weapon: release.weapon.clone(),
        });

        world.spawn((
            Munition {
                owner: release.owner,
                weapon: release.weapon,
                aim: release.aim,
                crater_depth: release.crater_depth,
                crater_radius: release.crater_radius,
            },
            release.origin,
            velocity,
        ));
    }
}

/// Integrate falling munitions and resolve ground impacts.
/// Impacts crater the terrain in entity order.
pub fn run(
    world: &mut World,
    terrain: &mut HeightMap,
    gravity: f64,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut impacts: Vec<(Entity, Munition, Position)> = Vec::new();
    for (entity, (munition, pos, vel)) in
        world.query_mut::<(&Munition, &mut Position, &mut Velocity)>()
    {
        vel.z -= gravity * DT;
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
        pos.z += vel.z * DT;

        let ground = terrain.height_at(pos.x, pos.y);
        if pos.z <= ground {
            pos.z = ground;
            impacts.push((entity, munition.clone(), *pos));
        }
    }

    impacts.sort_by_key(|(entity, _, _)| entity.id());
    for (entity, munition, pos) in impacts {
        debug!(
            "{} from {:?} impacted at ({:.0}, {:.0}), {:.0} m from aim",
            munition.weapon,
            munition.owner,
            pos.x,
            pos.y,
            pos.horizontal_range_to(&munition.aim)
        );
        if munition.crater_depth > 0.0 {
            terrain.raise_area(pos.x, pos.y, munition.crater_radius, -munition.crater_depth);
        }
        events.push(SimEvent::Impact {
            owner: munition.owner,
            position: pos,
        });
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
