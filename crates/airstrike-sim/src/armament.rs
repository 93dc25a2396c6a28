//! Bomb bays: the weapons strike bombers carry.

use log::trace;

use airstrike_attack::{Armament, Shooter};
use airstrike_core::components::WeaponSpec;
use airstrike_core::types::{ActorId, Position, Target};

/// A released bomb, waiting to be spawned as a munition entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub owner: ActorId,
    pub weapon: String,
    /// Release point (the carrier's position).
    pub origin: Position,
    pub aim: Position,
    pub crater_depth: f64,
    pub crater_radius: f64,
}

/// One weapon instance with its reload countdown and magazine.
#[derive(Debug, Clone, PartialEq)]
pub struct Bombload {
    spec: WeaponSpec,
    reload_remaining: u32,
    ammo: Option<u32>,
}

impl Bombload {
    pub fn new(spec: WeaponSpec) -> Self {
        let ammo = spec.ammo;
        Self {
            spec,
            reload_remaining: 0,
            ammo,
        }
    }

    pub fn spec(&self) -> &WeaponSpec {
        &self.spec
    }

    /// Rounds left (`None` = unlimited).
    pub fn ammo(&self) -> Option<u32> {
        self.ammo
    }

    /// Count down the reload timer by one tick.
    pub fn tick_reload(&mut self) {
        self.reload_remaining = self.reload_remaining.saturating_sub(1);
    }

    pub fn is_ready(&self) -> bool {
        self.reload_remaining == 0 && self.ammo != Some(0)
    }
}

impl Armament for Bombload {
    type Shot = Release;

    fn max_range(&self) -> f64 {
        self.spec.max_range
    }

    fn check_fire(
        &mut self,
        shooter: &Shooter,
        _facing: f64,
        target: &Target,
        forced: bool,
    ) -> Option<Release> {
        if !self.is_ready() {
            return None;
        }

        if let Some(ammo) = self.ammo.as_mut() {
            *ammo -= 1;
        }
        self.reload_remaining = self.spec.reload_ticks;
        trace!(
            "{:?} releases {} (forced: {forced}, {:?} left)",
            shooter.id,
            self.spec.name,
            self.ammo
        );

        Some(Release {
            owner: shooter.id,
            weapon: self.spec.name.clone(),
            origin: shooter.position,
            aim: target.center_position(),
            crater_depth: self.spec.crater_depth,
            crater_radius: self.spec.crater_radius,
        })
    }
}

/// Every weapon mounted on an actor. Empty for fly-over actors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Armaments(pub Vec<Bombload>);

impl Armaments {
    pub fn from_specs(specs: &[WeaponSpec]) -> Self {
        Self(specs.iter().cloned().map(Bombload::new).collect())
    }
}
