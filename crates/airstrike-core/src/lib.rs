//! Core types and definitions for the AIRSTRIKE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, the sync contract and the
//! terrain query seam. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod sync;
pub mod terrain;
pub mod types;

#[cfg(test)]
mod tests;
