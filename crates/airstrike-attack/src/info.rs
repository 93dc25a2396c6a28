//! Definition-time configuration of the bomber attack capability.

use serde::{Deserialize, Serialize};

use airstrike_core::constants::DEFAULT_FACING_TOLERANCE;

/// Static parameters, fixed when the capability is defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackBomberInfo {
    /// Half-width of the firing arc around the body heading (radians).
    /// Values of π or more accept every bearing.
    #[serde(default = "default_facing_tolerance")]
    pub facing_tolerance: f64,
}

fn default_facing_tolerance() -> f64 {
    DEFAULT_FACING_TOLERANCE
}

impl Default for AttackBomberInfo {
    fn default() -> Self {
        Self {
            facing_tolerance: DEFAULT_FACING_TOLERANCE,
        }
    }
}

impl AttackBomberInfo {
    pub fn with_facing_tolerance(facing_tolerance: f64) -> Self {
        Self { facing_tolerance }
    }
}
