//! Terrain height query seam.
//!
//! The attack logic only ever asks "how high is the ground here?"; the
//! heightmap that answers lives in `airstrike-terrain`.

/// Ground elevation lookup at a horizontal sim-space location.
pub trait TerrainHeight {
    /// Terrain elevation in meters at (x, y). Never fails; locations off
    /// the map report the datum height.
    fn height_at(&self, x: f64, y: f64) -> f64;
}

/// Uniform terrain at a fixed elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain(pub f64);

impl TerrainHeight for FlatTerrain {
    fn height_at(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

impl<T: TerrainHeight + ?Sized> TerrainHeight for &T {
    fn height_at(&self, x: f64, y: f64) -> f64 {
        (**self).height_at(x, y)
    }
}
