//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{ActorId, Position};

/// Marks an entity as a scripted strike bomber.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bomber;

/// Marks an entity as part of the active simulation.
/// Entities without it exist but are queued, leaving, or not yet spawned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InWorld;

/// Body heading in radians (0 = North, clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Facing(pub f64);

/// Static definition of a bomber-carried weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    /// Horizontal reach from the carrier to the target (meters).
    pub max_range: f64,
    /// Ticks between consecutive releases.
    pub reload_ticks: u32,
    /// Rounds carried. `None` means unlimited.
    #[serde(default)]
    pub ammo: Option<u32>,
    /// Depth of the crater left on impact (meters). Zero leaves terrain intact.
    #[serde(default)]
    pub crater_depth: f64,
    #[serde(default)]
    pub crater_radius: f64,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            name: "bomb".to_string(),
            max_range: BOMB_RELEASE_RANGE,
            reload_ticks: BOMB_RELOAD_TICKS,
            ammo: Some(BOMB_AMMO),
            crater_depth: BOMB_CRATER_DEPTH,
            crater_radius: BOMB_CRATER_RADIUS,
        }
    }
}

/// A released free-fall munition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Munition {
    /// Actor that released it.
    pub owner: ActorId,
    pub weapon: String,
    /// Aim point at release.
    pub aim: Position,
    pub crater_depth: f64,
    pub crater_radius: f64,
}
