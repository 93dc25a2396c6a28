//! Simulation state snapshot produced after each tick.

use serde::{Deserialize, Serialize};

use crate::events::SimEvent;
use crate::types::{ActorId, Position, SimTime};

/// Complete visible state after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub bombers: Vec<BomberView>,
    pub munitions: Vec<MunitionView>,
    /// Events raised during this tick.
    pub events: Vec<SimEvent>,
    /// Hash over every synced field; equal across agreeing replicas.
    pub sync_hash: u64,
}

/// A bomber as seen by scripts and the replay log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomberView {
    pub actor: ActorId,
    pub position: Position,
    /// Heading (radians, 0 = North).
    pub facing: f64,
    pub speed: f64,
    pub in_world: bool,
    pub target: Position,
    pub in_attack_range: bool,
    pub facing_target: bool,
    /// Remaining rounds per weapon (`None` = unlimited).
    pub ammo: Vec<Option<u32>>,
}

/// A munition in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MunitionView {
    pub owner: ActorId,
    pub weapon: String,
    pub position: Position,
}
