//! Simulation engine for AIRSTRIKE.
//!
//! Owns the hecs ECS world, the terrain, and the per-tick schedule that
//! drives scripted bombers, their bombs, and the lockstep sync hash.

pub mod armament;
pub mod engine;
pub mod error;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use airstrike_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;

#[cfg(test)]
mod tests;
