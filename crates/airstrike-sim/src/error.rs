//! Errors surfaced by the simulation host.

use thiserror::Error;

use airstrike_core::types::ActorId;
use airstrike_terrain::TerrainError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("actor {0:?} does not exist")]
    UnknownActor(ActorId),

    #[error("actor {0:?} is not a bomber")]
    NotABomber(ActorId),

    /// A general attack order reached a bomber. Bombers take their target
    /// from a script; routing orders to them is a wiring bug.
    #[error("actor {0:?} requires a scripted target and cannot accept attack orders")]
    ScriptedTargetOnly(ActorId),

    #[error("actor {0:?} has no attack capability")]
    NoAttackCapability(ActorId),

    #[error("invalid scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error(transparent)]
    Terrain(#[from] TerrainError),
}
