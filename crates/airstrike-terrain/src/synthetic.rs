//! Deterministic synthetic terrain for demos and tests.

use crate::error::TerrainError;
use crate::grid::{HeightMap, HeightMapHeader};

/// Generate a square map centered on the origin with an east–west ridge
/// running through `ridge_y`.
///
/// Elevation falls off as a Gaussian of the north–south distance from
/// the ridge line, on top of a gentle west-to-east slope.
pub fn synthetic_ridge(
    size: u32,
    cell_size: f64,
    ridge_y: f64,
    peak: f64,
) -> Result<HeightMap, TerrainError> {
    let header = HeightMapHeader::centered(cell_size, size, size);
    let half_width = (size as f64 * cell_size / 8.0).max(cell_size);

    let mut samples = Vec::with_capacity(header.sample_count());
    for row in 0..size {
        let y = header.origin_y + row as f64 * cell_size;
        for col in 0..size {
            let x = header.origin_x + col as f64 * cell_size;
            let d = (y - ridge_y) / half_width;
            let ridge = peak * (-d * d).exp();
            let slope = (x - header.origin_x) * 0.002;
            samples.push((ridge + slope) as f32);
        }
    }

    HeightMap::new(header, samples)
}
