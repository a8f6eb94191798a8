use crate::errors::{TrailheadError, TrailheadResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod constants;
pub mod coordinates;
pub mod noise_field;

pub use coordinates::{GridCell, PointOfInterest};
pub use noise_field::NoiseField;

use constants::FALLBACK_TERRAIN_HEIGHT;

/// Normalized elevation grid. Every stored value lies in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Heightmap {
    #[validate(range(min = 1, max = 2048))]
    width: u32,
    #[validate(range(min = 1, max = 2048))]
    height: u32,
    heights: Vec<f32>, // Flattened 2D array (row-major)
}

impl Heightmap {
    /// Create a heightmap from row-major values, clamping each into [0, 1]
    pub fn new(width: u32, height: u32, heights: Vec<f32>) -> TrailheadResult<Self> {
        let expected_size = width as usize * height as usize;
        if heights.len() != expected_size {
            return Err(TrailheadError::InvalidWorldData {
                reason: format!(
                    "Heights array size {} does not match grid dimensions {}x{} (expected {})",
                    heights.len(),
                    width,
                    height,
                    expected_size
                ),
            });
        }

        let heightmap = Self {
            width,
            height,
            heights: heights.into_iter().map(clamp_height).collect(),
        };

        heightmap
            .validate()
            .map_err(|_| TrailheadError::InvalidWorldData {
                reason: "Heightmap validation failed".to_string(),
            })?;

        Ok(heightmap)
    }

    /// Create flat terrain for testing
    pub fn flat(width: u32, height: u32, base_height: f32) -> TrailheadResult<Self> {
        Self::new(width, height, vec![base_height; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.is_within(self.width, self.height)
    }

    /// Get height at an exact grid cell
    pub fn get(&self, cell: GridCell) -> Option<f32> {
        if !self.contains(cell) {
            return None;
        }
        self.heights.get(cell.index(self.width)).copied()
    }

    /// Like [`Heightmap::get`] but reports out-of-bounds cells as an error
    pub fn require(&self, cell: GridCell) -> TrailheadResult<f32> {
        self.get(cell).ok_or(TrailheadError::CellOutOfBounds {
            x: cell.x,
            y: cell.y,
            width: self.width,
            height: self.height,
        })
    }

    /// Height at fractional coordinates; the cell is found by flooring, outside reads 0
    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        if x < 0.0 || y < 0.0 {
            return FALLBACK_TERRAIN_HEIGHT;
        }
        self.get(GridCell::new(x.floor() as u32, y.floor() as u32))
            .unwrap_or(FALLBACK_TERRAIN_HEIGHT)
    }

    /// Central difference along x, zero on the left and right borders
    pub fn gradient_x(&self, x: f32, y: f32) -> f32 {
        let tx = x.floor();
        if tx <= 0.0 || tx >= (self.width - 1) as f32 {
            return 0.0;
        }
        self.height_at(tx + 1.0, y) - self.height_at(tx - 1.0, y)
    }

    /// Central difference along y, zero on the top and bottom borders
    pub fn gradient_y(&self, x: f32, y: f32) -> f32 {
        let ty = y.floor();
        if ty <= 0.0 || ty >= (self.height - 1) as f32 {
            return 0.0;
        }
        self.height_at(x, ty + 1.0) - self.height_at(x, ty - 1.0)
    }

    /// Lowest and highest value in the grid
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((1.0f32, 0.0f32), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    /// Overwrite a cell, clamping into [0, 1]. Out-of-bounds writes are ignored.
    pub fn set(&mut self, cell: GridCell, value: f32) {
        if self.contains(cell) {
            let index = cell.index(self.width);
            self.heights[index] = clamp_height(value);
        }
    }

    /// Lower a cell by `amount`, never below zero
    pub fn lower(&mut self, cell: GridCell, amount: f32) {
        if let Some(current) = self.get(cell) {
            self.set(cell, current - amount.max(0.0));
        }
    }

    /// All cells in row-major order with their heights
    pub fn cells(&self) -> impl Iterator<Item = (GridCell, f32)> + '_ {
        let width = self.width as usize;
        self.heights.iter().enumerate().map(move |(i, &h)| {
            (GridCell::new((i % width) as u32, (i / width) as u32), h)
        })
    }

    /// Check dimensions and the [0, 1] invariant, e.g. after deserializing
    pub fn check_integrity(&self) -> TrailheadResult<()> {
        self.validate()
            .map_err(|errors| TrailheadError::WorldValidationFailed {
                reason: errors.to_string(),
            })?;
        if self.heights.len() != self.width as usize * self.height as usize {
            return Err(TrailheadError::WorldValidationFailed {
                reason: format!(
                    "heightmap holds {} values for a {}x{} grid",
                    self.heights.len(),
                    self.width,
                    self.height
                ),
            });
        }
        if let Some((cell, h)) = self.cells().find(|(_, h)| !(0.0..=1.0).contains(h)) {
            return Err(TrailheadError::WorldValidationFailed {
                reason: format!("height {h} at ({}, {}) is outside [0, 1]", cell.x, cell.y),
            });
        }
        Ok(())
    }
}

fn clamp_height(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heightmap_creation() {
        let map = Heightmap::new(2, 2, vec![0.0, 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        assert_eq!(map.heights().len(), 4);
    }

    #[test]
    fn test_heightmap_invalid_size() {
        assert!(Heightmap::new(2, 2, vec![0.0, 1.0, 0.5]).is_err());
        assert!(Heightmap::new(0, 0, vec![]).is_err());
        assert!(Heightmap::flat(4096, 1, 0.0).is_err());
    }

    #[test]
    fn test_values_are_clamped_on_write() {
        let mut map = Heightmap::new(2, 1, vec![-0.5, 3.0]).unwrap();
        assert_eq!(map.heights(), &[0.0, 1.0]);

        map.set(GridCell::new(0, 0), 1.7);
        assert_eq!(map.get(GridCell::new(0, 0)), Some(1.0));

        map.lower(GridCell::new(1, 0), 5.0);
        assert_eq!(map.get(GridCell::new(1, 0)), Some(0.0));
    }

    #[test]
    fn test_height_lookups() {
        // Row-major: [y=0: 0.0, 0.1, 0.2][y=1: 0.3, 0.4, 0.5]
        let map = Heightmap::new(3, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();

        assert_eq!(map.get(GridCell::new(2, 0)), Some(0.2));
        assert_eq!(map.get(GridCell::new(0, 1)), Some(0.3));
        assert_eq!(map.get(GridCell::new(3, 0)), None);

        assert_eq!(map.height_at(1.9, 1.2), 0.4);
        assert_eq!(map.height_at(-0.5, 0.0), 0.0);
        assert_eq!(map.height_at(10.0, 0.0), 0.0);
        assert!(map.require(GridCell::new(5, 5)).is_err());
    }

    #[test]
    fn test_gradients() {
        let heights: Vec<f32> = (0..25).map(|i| (i % 5) as f32 * 0.1).collect();
        let map = Heightmap::new(5, 5, heights).unwrap();

        // Heights increase by 0.1 per column
        assert!((map.gradient_x(2.0, 2.0) - 0.2).abs() < 1e-6);
        assert_eq!(map.gradient_y(2.0, 2.0), 0.0);

        // Borders report no slope
        assert_eq!(map.gradient_x(0.0, 2.0), 0.0);
        assert_eq!(map.gradient_x(4.0, 2.0), 0.0);
        assert_eq!(map.gradient_y(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_min_max_and_cells() {
        let map = Heightmap::new(2, 2, vec![0.6, 0.2, 0.9, 0.4]).unwrap();
        assert_eq!(map.min_max(), (0.2, 0.9));

        let cells: Vec<_> = map.cells().collect();
        assert_eq!(cells[1], (GridCell::new(1, 0), 0.2));
        assert_eq!(cells[2], (GridCell::new(0, 1), 0.9));
    }

    #[test]
    fn test_integrity_check_catches_bad_data() {
        let mut map = Heightmap::flat(3, 3, 0.5).unwrap();
        assert!(map.check_integrity().is_ok());

        map.heights[4] = 1.5;
        assert!(map.check_integrity().is_err());
    }
}
