//! Terrain construction errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    #[error("heightmap has {actual} samples, header expects {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("heightmap must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f64),
}
