//! HeightMap: regular elevation grid with height queries and deformation.

use serde::{Deserialize, Serialize};

use airstrike_core::terrain::TerrainHeight;

use crate::error::TerrainError;

/// Heightmap header metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightMapHeader {
    /// Sim-space x of the southwest corner (meters).
    pub origin_x: f64,
    /// Sim-space y of the southwest corner (meters).
    pub origin_y: f64,
    /// Edge length of one grid cell (meters).
    pub cell_size: f64,
    /// Number of columns (west to east).
    pub width: u32,
    /// Number of rows (south to north).
    pub height: u32,
}

impl HeightMapHeader {
    /// Header for a grid centered on the sim origin.
    pub fn centered(cell_size: f64, width: u32, height: u32) -> Self {
        Self {
            origin_x: -(width as f64 - 1.0) * cell_size / 2.0,
            origin_y: -(height as f64 - 1.0) * cell_size / 2.0,
            cell_size,
            width,
            height,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Loaded heightmap grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightMap {
    pub header: HeightMapHeader,
    /// Elevation samples in meters, row-major (south-to-north, west-to-east).
    elevations: Vec<f32>,
}

impl HeightMap {
    /// Create a HeightMap from pre-loaded samples.
    pub fn new(header: HeightMapHeader, elevations: Vec<f32>) -> Result<Self, TerrainError> {
        if header.width == 0 || header.height == 0 {
            return Err(TerrainError::Empty {
                width: header.width,
                height: header.height,
            });
        }
        if header.cell_size.is_nan() || header.cell_size <= 0.0 {
            return Err(TerrainError::InvalidCellSize(header.cell_size));
        }
        if elevations.len() != header.sample_count() {
            return Err(TerrainError::SizeMismatch {
                expected: header.sample_count(),
                actual: elevations.len(),
            });
        }
        Ok(Self { header, elevations })
    }

    /// Uniform terrain at `elevation`.
    pub fn flat(header: HeightMapHeader, elevation: f32) -> Result<Self, TerrainError> {
        let samples = vec![elevation; header.sample_count()];
        Self::new(header, samples)
    }

    /// Convert a sim-space location to fractional (row, col).
    /// Returns None if outside grid bounds.
    fn sim_to_grid(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let h = &self.header;
        let col = (x - h.origin_x) / h.cell_size;
        let row = (y - h.origin_y) / h.cell_size;

        let max_col = (h.width - 1) as f64;
        let max_row = (h.height - 1) as f64;
        if !(0.0..=max_col).contains(&col) || !(0.0..=max_row).contains(&row) {
            return None;
        }

        Some((row, col))
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.header.width as usize + col
    }

    /// Get raw elevation at integer grid coordinates.
    fn raw_elevation(&self, row: usize, col: usize) -> f32 {
        let h = &self.header;
        if row >= h.height as usize || col >= h.width as usize {
            return 0.0;
        }
        self.elevations[self.index(row, col)]
    }

    /// Elevation at a sim-space location with bilinear interpolation.
    /// Returns None if the location is outside the grid.
    pub fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        let (row, col) = self.sim_to_grid(x, y)?;
        Some(self.bilinear(row, col))
    }

    /// Bilinear interpolation at fractional row/col.
    fn bilinear(&self, row: f64, col: f64) -> f64 {
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.header.height as usize - 1);
        let c1 = (c0 + 1).min(self.header.width as usize - 1);

        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let e00 = self.raw_elevation(r0, c0) as f64;
        let e01 = self.raw_elevation(r0, c1) as f64;
        let e10 = self.raw_elevation(r1, c0) as f64;
        let e11 = self.raw_elevation(r1, c1) as f64;

        let south = e00 * (1.0 - fc) + e01 * fc;
        let north = e10 * (1.0 - fc) + e11 * fc;
        south * (1.0 - fr) + north * fr
    }

    /// Overwrite one sample. Out-of-range coordinates are ignored.
    pub fn set_elevation(&mut self, col: u32, row: u32, elevation: f32) {
        if col < self.header.width && row < self.header.height {
            let idx = self.index(row as usize, col as usize);
            self.elevations[idx] = elevation;
        }
    }

    /// Shift every sample inside a disc by `delta`, tapering linearly to
    /// zero at the rim. Returns the number of samples touched.
    pub fn raise_area(&mut self, center_x: f64, center_y: f64, radius: f64, delta: f64) -> usize {
        if radius <= 0.0 || delta == 0.0 {
            return 0;
        }

        let h = self.header;
        let col_min = ((center_x - radius - h.origin_x) / h.cell_size).floor().max(0.0) as u32;
        let row_min = ((center_y - radius - h.origin_y) / h.cell_size).floor().max(0.0) as u32;
        let col_max = ((center_x + radius - h.origin_x) / h.cell_size).ceil().max(0.0) as u32;
        let row_max = ((center_y + radius - h.origin_y) / h.cell_size).ceil().max(0.0) as u32;

        let mut touched = 0;
        for row in row_min..=row_max.min(h.height - 1) {
            for col in col_min..=col_max.min(h.width - 1) {
                let sx = h.origin_x + col as f64 * h.cell_size;
                let sy = h.origin_y + row as f64 * h.cell_size;
                let dist = ((sx - center_x).powi(2) + (sy - center_y).powi(2)).sqrt();
                if dist > radius {
                    continue;
                }
                let falloff = 1.0 - dist / radius;
                let idx = self.index(row as usize, col as usize);
                self.elevations[idx] += (delta * falloff) as f32;
                touched += 1;
            }
        }
        touched
    }

    /// Lowest and highest sample.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.elevations
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &e| (lo.min(e), hi.max(e)))
    }

    pub fn samples(&self) -> &[f32] {
        &self.elevations
    }
}

impl TerrainHeight for HeightMap {
    /// Off-map locations sit at the zero datum.
    fn height_at(&self, x: f64, y: f64) -> f64 {
        self.elevation_at(x, y).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5×5 grid, 10 m cells, southwest corner at the origin.
    fn make_test_grid() -> HeightMap {
        let header = HeightMapHeader {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size: 10.0,
            width: 5,
            height: 5,
        };

        // Elevation: center cell is 100m, edges are 0
        #[rustfmt::skip]
        let elevations: Vec<f32> = vec![
            0.0,   0.0,   0.0,   0.0,  0.0,
            0.0,  50.0,  50.0,  50.0,  0.0,
            0.0,  50.0, 100.0,  50.0,  0.0,
            0.0,  50.0,  50.0,  50.0,  0.0,
            0.0,   0.0,   0.0,   0.0,  0.0,
        ];

        HeightMap::new(header, elevations).unwrap()
    }

    #[test]
    fn test_elevation_query_center() {
        let grid = make_test_grid();
        let e = grid.elevation_at(20.0, 20.0).unwrap();
        assert!((e - 100.0).abs() < 1e-6, "Peak elevation should be 100m, got {e}");
    }

    #[test]
    fn test_elevation_query_outside() {
        let grid = make_test_grid();
        assert!(grid.elevation_at(-1.0, 20.0).is_none());
        assert!(grid.elevation_at(20.0, 40.1).is_none());
        assert_eq!(grid.height_at(1000.0, 1000.0), 0.0);
    }

    #[test]
    fn test_elevation_bilinear_interpolation() {
        let grid = make_test_grid();
        // Halfway between row 1 (50m) and row 2 (100m) in the center column.
        let e = grid.elevation_at(20.0, 15.0).unwrap();
        assert!((e - 75.0).abs() < 1e-6, "Interpolated elevation should be 75m, got {e}");
    }

    #[test]
    fn test_far_corner_is_inside() {
        let grid = make_test_grid();
        assert_eq!(grid.elevation_at(40.0, 40.0), Some(0.0));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let header = HeightMapHeader::centered(10.0, 3, 3);
        let err = HeightMap::new(header, vec![0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            TerrainError::SizeMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn test_empty_and_bad_cell_rejected() {
        let header = HeightMapHeader::centered(10.0, 0, 3);
        assert!(matches!(
            HeightMap::new(header, vec![]),
            Err(TerrainError::Empty { .. })
        ));
        let header = HeightMapHeader::centered(0.0, 2, 2);
        assert!(matches!(
            HeightMap::flat(header, 0.0),
            Err(TerrainError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn test_centered_header() {
        let header = HeightMapHeader::centered(10.0, 5, 5);
        let grid = HeightMap::flat(header, 7.0).unwrap();
        assert_eq!(grid.elevation_at(0.0, 0.0), Some(7.0));
        assert_eq!(grid.elevation_at(20.0, -20.0), Some(7.0));
        assert!(grid.elevation_at(20.1, 0.0).is_none());
    }

    #[test]
    fn test_set_elevation() {
        let mut grid = make_test_grid();
        grid.set_elevation(0, 0, 12.0);
        assert_eq!(grid.elevation_at(0.0, 0.0), Some(12.0));
        // Out of range is ignored.
        grid.set_elevation(99, 0, 12.0);
    }

    #[test]
    fn test_raise_area_tapers() {
        let header = HeightMapHeader::centered(10.0, 11, 11);
        let mut grid = HeightMap::flat(header, 0.0).unwrap();
        let touched = grid.raise_area(0.0, 0.0, 20.0, -4.0);
        assert!(touched > 0);
        assert!((grid.height_at(0.0, 0.0) + 4.0).abs() < 1e-6);
        assert!((grid.height_at(10.0, 0.0) + 2.0).abs() < 1e-6);
        assert_eq!(grid.height_at(30.0, 0.0), 0.0);
    }

    #[test]
    fn test_elevation_range() {
        let grid = make_test_grid();
        assert_eq!(grid.elevation_range(), (0.0, 100.0));
    }
}
