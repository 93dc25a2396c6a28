//! Scripted bomber attack logic for AIRSTRIKE.
//!
//! Implements the per-tick targeting and range-detection state machine of
//! an attacker flying over a fixed world point, the firing-arc geometry it
//! relies on, and the listener registry scripts hook into.
//! No ECS dependency; operates on plain data.

pub mod arc;
pub mod armament;
pub mod bomber;
pub mod info;
pub mod listeners;

pub use airstrike_core as core;
pub use armament::Armament;
pub use bomber::{AttackBomber, AttackUpdate, Shooter};
pub use info::AttackBomberInfo;
pub use listeners::{AttackListeners, ListenerId, ListenerList};
