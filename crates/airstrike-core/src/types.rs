//! Fundamental geometric and simulation types.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// 3D position in simulation space (meters, Cartesian).
/// x = East, y = North, z = Up (altitude above the zero datum).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in simulation space (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Stable identifier of an actor, handed to listeners and views.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ActorId(pub u64);

/// A fixed aim point in world space.
///
/// Not an entity reference: the target never moves by itself and is
/// never re-acquired. Only its height is adjusted by the attacker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    position: Position,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Range to another position in meters (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    /// Horizontal range (ignoring altitude).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        self.horizontal().distance(other.horizontal())
    }

    /// Bearing to another position in radians (0 = North, clockwise).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).rem_euclid(std::f64::consts::TAU)
    }

    /// Same horizontal location at a different height.
    pub fn with_z(&self, z: f64) -> Self {
        Self { z, ..*self }
    }

    pub fn horizontal(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Level flight at `speed` along `heading` (radians, 0 = North, clockwise).
    pub fn from_heading(speed: f64, heading: f64) -> Self {
        Self::new(speed * heading.sin(), speed * heading.cos(), 0.0)
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        self.to_dvec3().length()
    }

    /// Horizontal speed (ignoring vertical component).
    pub fn horizontal_speed(&self) -> f64 {
        DVec2::new(self.x, self.y).length()
    }

    /// Heading in radians (0 = North, clockwise).
    pub fn heading(&self) -> f64 {
        self.x.atan2(self.y).rem_euclid(std::f64::consts::TAU)
    }

    pub fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl Target {
    pub fn from_pos(position: Position) -> Self {
        Self { position }
    }

    pub fn center_position(&self) -> Position {
        self.position
    }

    /// Whether the target lies within `range` of `origin`.
    ///
    /// Range is measured horizontally: an attacker flying over the target
    /// at altitude counts as on top of it.
    pub fn is_in_range(&self, origin: &Position, range: f64) -> bool {
        let delta = self.position.horizontal() - origin.horizontal();
        delta.length_squared() <= range * range
    }
}
