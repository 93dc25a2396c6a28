//! Weapon seam consumed by the attack state machine.

use airstrike_core::types::Target;

use crate::bomber::Shooter;

/// A weapon mounted on the attacker.
///
/// Range, reload and ammunition are the implementor's business; the
/// attack logic only asks how far it reaches and whether it fires now.
pub trait Armament {
    /// What a successful fire-check produces (a projectile to spawn, a
    /// burst record, ...).
    type Shot;

    /// Maximum horizontal reach (meters).
    fn max_range(&self) -> f64;

    /// Fire at `target` if the weapon is ready. `forced` is set for
    /// manual force-fire orders and is always false for scripted runs.
    fn check_fire(
        &mut self,
        shooter: &Shooter,
        facing: f64,
        target: &Target,
        forced: bool,
    ) -> Option<Self::Shot>;
}
