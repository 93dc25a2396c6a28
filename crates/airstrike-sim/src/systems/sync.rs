//! Sync hash system: folds every synced field in the world into one
//! value per tick, for replica comparison.

use hecs::World;

use airstrike_attack::AttackBomber;
use airstrike_core::sync::SyncHasher;

use crate::systems::sorted_entities;

/// Hash of the tick number and every bomber's synced fields,
/// visited in entity order.
pub fn world_hash(world: &World, tick: u64) -> u64 {
    let mut hasher = SyncHasher::new();
    hasher.write_u64(tick);

    for entity in sorted_entities::<&AttackBomber>(world) {
        if let Ok(attack) = world.get::<&AttackBomber>(entity) {
            hasher.write_u64(entity.to_bits().get());
            hasher.write_state(&*attack);
        }
    }

    hasher.finish()
}
