//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Edge of the attack-range flag observed during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeTransition {
    /// The attacker moved into attack range this tick.
    Entered,
    /// The attacker left attack range this tick.
    Exited,
}

/// Where a generic attack order came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackSource {
    /// Issued directly by a player or script.
    #[default]
    Default,
    /// Picked by an actor's own target scanner.
    AutoTarget,
    /// Part of an attack-move order.
    AttackMove,
}
