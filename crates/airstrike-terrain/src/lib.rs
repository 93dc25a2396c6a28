//! Terrain for AIRSTRIKE.
//!
//! A deformable sim-space heightmap answering the ground-height queries
//! the attack logic makes each tick.

pub use airstrike_core as core;

pub mod error;
pub mod grid;
pub mod synthetic;

// Re-export key types for convenience.
pub use error::TerrainError;
pub use grid::{HeightMap, HeightMapHeader};
pub use synthetic::synthetic_ridge;
