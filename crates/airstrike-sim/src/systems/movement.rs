//! Kinematic integration system.
//!
//! Flies every in-world bomber straight along its velocity and keeps the
//! body heading aligned with the flight path.

use hecs::World;

use airstrike_core::components::{Bomber, Facing, InWorld};
use airstrike_core::constants::DT;
use airstrike_core::types::{Position, Velocity};

/// Integrate position += velocity * dt for in-world bombers.
pub fn run(world: &mut World) {
    for (_entity, (_bomber, _in_world, pos, vel, facing)) in
        world.query_mut::<(&Bomber, &InWorld, &mut Position, &Velocity, &mut Facing)>()
    {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
        pos.z += vel.z * DT;

        if vel.horizontal_speed() > 0.0 {
            facing.0 = vel.heading();
        }
    }
}
