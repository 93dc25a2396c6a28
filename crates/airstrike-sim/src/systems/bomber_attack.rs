//! Bomber attack system: ticks every bomber's attack state once per step.
//!
//! Calls the attack state machine from airstrike-attack, then turns its
//! range transitions into events and its shots into pending releases.

use hecs::World;
use log::warn;

use airstrike_attack::{AttackBomber, Shooter};
use airstrike_core::components::{Facing, InWorld};
use airstrike_core::enums::RangeTransition;
use airstrike_core::events::SimEvent;
use airstrike_core::terrain::TerrainHeight;
use airstrike_core::types::Position;

use crate::armament::{Armaments, Release};
use crate::systems::sorted_entities;
use crate::world_setup::actor_id;

/// Run the attack state machine for every bomber, in entity order.
pub fn run<T: TerrainHeight + ?Sized>(
    world: &mut World,
    terrain: &T,
    releases: &mut Vec<Release>,
    events: &mut Vec<SimEvent>,
) {
    for entity in sorted_entities::<&AttackBomber>(world) {
        let Ok((attack, pos, facing, in_world, armaments)) = world.query_one_mut::<(
            &mut AttackBomber,
            &Position,
            &Facing,
            Option<&InWorld>,
            &mut Armaments,
        )>(entity) else {
            continue;
        };

        let shooter = Shooter {
            id: actor_id(entity),
            position: *pos,
            facing: facing.0,
            in_world: in_world.is_some(),
        };

        if shooter.in_world {
            if !attack.has_target() {
                warn!("{:?} is in the world without a target", shooter.id);
            }
            for armament in armaments.0.iter_mut() {
                armament.tick_reload();
            }
        }

        let update = attack.tick(&shooter, terrain, &mut armaments.0);

        match update.transition {
            Some(RangeTransition::Entered) => {
                events.push(SimEvent::EnteredAttackRange { actor: shooter.id })
            }
            Some(RangeTransition::Exited) => {
                events.push(SimEvent::ExitedAttackRange { actor: shooter.id })
            }
            None => {}
        }

        releases.extend(update.shots);
    }
}
