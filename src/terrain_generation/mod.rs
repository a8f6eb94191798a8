use crate::config::range_types::{Falloff, Sharpness};
use crate::errors::TrailheadResult;
use crate::terrain::Heightmap;
use crate::terrain::constants::{DEFAULT_GRID_SIZE, DEFAULT_OCTAVES};
use noise::NoiseFn;
use serde::{Deserialize, Serialize};

/// One layer of noise added on top of the radial base shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub width: u32,
    pub height: u32,
    pub falloff: Falloff,
    pub sharpness: Sharpness,
    pub octaves: Vec<Octave>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            falloff: Falloff::default(),
            sharpness: Sharpness::default(),
            octaves: DEFAULT_OCTAVES
                .iter()
                .map(|&(frequency, amplitude)| Octave {
                    frequency,
                    amplitude,
                })
                .collect(),
        }
    }
}

/// Builds a single central massif: radial falloff shaped by an exponent, then
/// roughened by the configured noise octaves.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    pub config: TerrainConfig,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    /// Height of the noiseless mountain shape at a cell
    pub fn base_height(&self, x: u32, y: u32) -> f32 {
        let half_w = self.config.width as f32 / 2.0;
        let half_h = self.config.height as f32 / 2.0;
        let distance = ((x as f32 - half_w).powi(2) + (y as f32 - half_h).powi(2)).sqrt();
        let max_distance = (half_w.powi(2) + half_h.powi(2)).sqrt();
        let normalized = distance / max_distance;

        (1.0 - normalized * self.config.falloff.get())
            .clamp(0.0, 1.0)
            .powf(self.config.sharpness.get())
    }

    /// Generate the heightmap. Fails only for dimensions outside 1..=2048.
    pub fn generate<N: NoiseFn<f64, 2>>(&self, noise: &N) -> TrailheadResult<Heightmap> {
        let (width, height) = (self.config.width, self.config.height);
        let mut heights = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                let mut value = self.base_height(x, y) as f64;
                for octave in &self.config.octaves {
                    value += noise.get([x as f64 * octave.frequency, y as f64 * octave.frequency])
                        * octave.amplitude;
                }
                heights.push(value.clamp(0.0, 1.0) as f32);
            }
        }

        Heightmap::new(width, height, heights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{GridCell, NoiseField};
    use noise::Constant;

    fn small_config(size: u32) -> TerrainConfig {
        TerrainConfig {
            width: size,
            height: size,
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_noise_gives_radial_mountain() {
        let generator = TerrainGenerator::new(small_config(21));
        let terrain = generator
            .generate(&Constant::new(0.0))
            .expect("Terrain generation should succeed with valid parameters");

        assert_eq!(terrain.width(), 21);
        assert_eq!(terrain.heights().len(), 441);

        let (_, max) = terrain.min_max();
        let center = terrain.get(GridCell::new(10, 10)).unwrap();
        assert_eq!(center, max, "Center should be the highest point");
        assert_eq!(terrain.get(GridCell::new(0, 0)), Some(0.0));
    }

    #[test]
    fn test_perlin_terrain_in_unit_range() {
        let generator = TerrainGenerator::new(TerrainConfig::default());
        let terrain = generator.generate(&NoiseField::from_seed(12345)).unwrap();

        assert_eq!(terrain.heights().len(), 200 * 200);
        assert!(terrain.heights().iter().all(|h| (0.0..=1.0).contains(h)));

        // Heights should vary (not all the same)
        let first_height = terrain.heights()[0];
        let has_variation = terrain
            .heights()
            .iter()
            .any(|&h| (h - first_height).abs() > 0.1);
        assert!(has_variation, "Noise should create height variation");
    }

    #[test]
    fn test_large_noise_is_clamped() {
        let generator = TerrainGenerator::new(small_config(8));
        let high = generator.generate(&Constant::new(50.0)).unwrap();
        assert!(high.heights().iter().all(|&h| h == 1.0));

        let low = generator.generate(&Constant::new(-50.0)).unwrap();
        assert!(low.heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let generator = TerrainGenerator::new(small_config(64));
        let a = generator.generate(&NoiseField::from_seed(77)).unwrap();
        let b = generator.generate(&NoiseField::from_seed(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_dimensions() {
        let generator = TerrainGenerator::new(small_config(0));
        assert!(generator.generate(&Constant::new(0.0)).is_err());
    }
}
