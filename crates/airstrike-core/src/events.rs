//! Events emitted by the simulation for scripting and replay logs.

use serde::{Deserialize, Serialize};

use crate::types::{ActorId, Position};

/// Notifications raised during a tick, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A bomber's weapons (or its fly-over pulse) reached the target.
    EnteredAttackRange { actor: ActorId },
    /// A bomber left attack range.
    ExitedAttackRange { actor: ActorId },
    /// A bomber left the simulation.
    RemovedFromWorld { actor: ActorId },
    /// A weapon released a munition.
    WeaponFired { actor: ActorId, weapon: String },
    /// A munition reached the ground.
    Impact { owner: ActorId, position: Position },
}
