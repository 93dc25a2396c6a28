//! Script commands sent to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::components::WeaponSpec;
use crate::enums::AttackSource;
use crate::types::{ActorId, Position};

/// Parameters for spawning a single bomber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomberSpawn {
    pub position: Position,
    /// Heading (radians, 0 = North, clockwise).
    pub heading: f64,
    pub speed: f64,
    /// Half-width of the firing arc (radians).
    pub facing_tolerance: f64,
    #[serde(default)]
    pub weapons: Vec<WeaponSpec>,
    /// Initial aim point, if known at spawn time.
    #[serde(default)]
    pub target: Option<Position>,
    /// Whether to join the world immediately.
    #[serde(default = "default_true")]
    pub in_world: bool,
}

fn default_true() -> bool {
    true
}

/// A generic "attack this" order, as issued to ordinary combat units.
///
/// Scripted bombers refuse it: their aim point only ever comes from
/// [`ScriptCommand::SetTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackOrder {
    #[serde(default)]
    pub source: AttackSource,
    pub target: Position,
    /// Whether the unit may move to bring the target into range.
    #[serde(default)]
    pub allow_move: bool,
    /// Attack even if the target is friendly or neutral.
    #[serde(default)]
    pub force_attack: bool,
}

impl AttackOrder {
    pub fn new(target: Position) -> Self {
        Self {
            source: AttackSource::Default,
            target,
            allow_move: false,
            force_attack: false,
        }
    }
}

/// All scripted actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScriptCommand {
    /// Spawn a bomber.
    SpawnBomber(BomberSpawn),
    /// Re-aim a bomber at a new world point.
    SetTarget { actor: ActorId, position: Position },
    /// Bring an existing bomber into the active world.
    AddToWorld { actor: ActorId },
    /// Take a bomber out of the active world.
    RemoveFromWorld { actor: ActorId },
    /// Raise (positive) or lower (negative) terrain inside a disc.
    Deform {
        x: f64,
        y: f64,
        radius: f64,
        delta: f64,
    },
}
