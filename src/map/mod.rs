use crate::config::WorldConfig;
use crate::errors::{TrailheadError, TrailheadResult};
use crate::features::{
    HydrologyPlanner, Lake, NamePool, OrographyAnalyzer, Peak, Settlement, SettlementPlanner,
    lake_at,
};
use crate::pathfinding::{PathOutcome, PathPlanner};
use crate::terrain::{GridCell, Heightmap, NoiseField};
use crate::terrain_generation::TerrainGenerator;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Offsets mixed into the world seed so each generation stage draws from its own stream
const HYDROLOGY_STREAM: u64 = 0x1337;
const OROGRAPHY_STREAM: u64 = 0x2b1d;
const SETTLEMENT_STREAM: u64 = 0x5e77;

/// A fully generated world: carved terrain plus every named feature on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldMap {
    pub seed: u64,
    pub heightmap: Heightmap,
    pub lakes: Vec<Lake>,
    pub peaks: Vec<Peak>,
    pub settlements: Vec<Settlement>,
}

impl WorldMap {
    pub fn width(&self) -> u32 {
        self.heightmap.width()
    }

    pub fn height(&self) -> u32 {
        self.heightmap.height()
    }

    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        self.heightmap.height_at(x, y)
    }

    pub fn gradient_x(&self, x: f32, y: f32) -> f32 {
        self.heightmap.gradient_x(x, y)
    }

    pub fn gradient_y(&self, x: f32, y: f32) -> f32 {
        self.heightmap.gradient_y(x, y)
    }

    /// Trail search with the default pathfinding settings
    pub fn find_path(&self, start: GridCell, goal: GridCell) -> TrailheadResult<PathOutcome> {
        self.find_path_with(&PathPlanner::default(), start, goal)
    }

    pub fn find_path_with(
        &self,
        planner: &PathPlanner,
        start: GridCell,
        goal: GridCell,
    ) -> TrailheadResult<PathOutcome> {
        planner.find_path(&self.heightmap, start, goal)
    }

    pub fn lake_at(&self, cell: GridCell) -> Option<&Lake> {
        lake_at(&self.lakes, cell)
    }

    /// Heightmap integrity plus every feature sitting on the grid
    pub fn validate(&self) -> TrailheadResult<()> {
        self.heightmap.check_integrity()?;

        let (width, height) = (self.width(), self.height());
        let features = self
            .lakes
            .iter()
            .map(|lake| (lake.cell, lake.name.as_str()))
            .chain(self.peaks.iter().map(|peak| (peak.cell, peak.name.as_str())))
            .chain(
                self.settlements
                    .iter()
                    .map(|settlement| (settlement.cell, settlement.name.as_str())),
            );

        for (cell, name) in features {
            if !cell.is_within(width, height) {
                return Err(TrailheadError::WorldValidationFailed {
                    reason: format!(
                        "{name} at ({}, {}) lies outside the {width}x{height} grid",
                        cell.x, cell.y
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TrailheadResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TrailheadError::WorldFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let data = std::fs::read(path)?;
        let (world, _): (WorldMap, usize) =
            bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(|e| {
                TrailheadError::CorruptedWorldFile {
                    reason: format!("Failed to deserialize world data: {e}"),
                }
            })?;

        world.validate()?;
        debug!("Loaded world {} from {}", world.seed, path.display());
        Ok(world)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TrailheadResult<()> {
        self.validate().map_err(|e| TrailheadError::InvalidWorldData {
            reason: format!("Refusing to save invalid world: {e}"),
        })?;

        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let data =
            bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
                TrailheadError::InvalidWorldData {
                    reason: format!("Failed to serialize world: {e}"),
                }
            })?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

/// Runs terrain, hydrology, orography and settlement passes in order.
#[derive(Debug, Clone, Default)]
pub struct WorldGenerator {
    pub config: WorldConfig,
}

impl WorldGenerator {
    pub fn new(config: WorldConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, seed: u64) -> TrailheadResult<WorldMap> {
        let theme = self.config.theme;
        info!(
            "Generating {}x{} world from seed {seed} ({theme} names)",
            self.config.terrain.width, self.config.terrain.height
        );

        let noise = NoiseField::from_seed(seed);
        let mut heightmap = TerrainGenerator::new(self.config.terrain.clone()).generate(&noise)?;

        let mut rng = Pcg64::seed_from_u64(seed.wrapping_add(HYDROLOGY_STREAM));
        let lakes = HydrologyPlanner::new(self.config.hydrology.clone()).place(
            &mut heightmap,
            &mut NamePool::lakes(theme),
            &mut rng,
        );

        let mut rng = Pcg64::seed_from_u64(seed.wrapping_add(OROGRAPHY_STREAM));
        let peaks = OrographyAnalyzer::new(self.config.orography.clone()).find_peaks(
            &heightmap,
            &mut NamePool::peaks(theme),
            &mut rng,
        );
        info!("Found {} peaks", peaks.len());

        let mut rng = Pcg64::seed_from_u64(seed.wrapping_add(SETTLEMENT_STREAM));
        let settlements = SettlementPlanner::new(self.config.settlements.clone()).place(
            &heightmap,
            &mut NamePool::settlements(theme),
            &mut rng,
        );
        info!("Placed {} settlements", settlements.len());

        Ok(WorldMap {
            seed,
            heightmap,
            lakes,
            peaks,
            settlements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain_generation::TerrainConfig;

    fn small_config() -> WorldConfig {
        WorldConfig {
            terrain: TerrainConfig {
                width: 80,
                height: 80,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn temp_world_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join("trailhead-tests")
            .join(format!("{name}-{}.world", std::process::id()))
    }

    #[test]
    fn test_same_seed_same_world() {
        let generator = WorldGenerator::new(small_config());
        let a = generator.generate(99).unwrap();
        let b = generator.generate(99).unwrap();
        assert_eq!(a, b);

        let c = generator.generate(100).unwrap();
        assert_ne!(a.heightmap, c.heightmap);
    }

    #[test]
    fn test_generated_world_is_valid() {
        let world = WorldGenerator::default().generate(7).unwrap();

        assert_eq!((world.width(), world.height()), (200, 200));
        assert!(world.heightmap.heights().iter().all(|h| (0.0..=1.0).contains(h)));
        assert!(world.lakes.len() <= 4);
        assert!(world.peaks.len() <= 5);
        assert!((6..=8).contains(&world.settlements.len()));
        world.validate().unwrap();

        for lake in &world.lakes {
            assert_eq!(world.lake_at(lake.cell).map(|l| &l.name), Some(&lake.name));
        }
    }

    #[test]
    fn test_world_queries_match_heightmap() {
        let world = WorldGenerator::new(small_config()).generate(3).unwrap();
        assert_eq!(world.height_at(12.7, 30.2), world.heightmap.height_at(12.7, 30.2));
        assert_eq!(world.height_at(-1.0, 5.0), 0.0);
        assert_eq!(world.gradient_x(0.0, 40.0), 0.0);

        let outcome = world
            .find_path(GridCell::new(5, 5), GridCell::new(5, 5))
            .unwrap();
        assert_eq!(outcome.cells(), &[GridCell::new(5, 5)]);
    }

    #[test]
    fn test_world_file_round_trip() {
        let world = WorldGenerator::new(small_config()).generate(11).unwrap();
        let path = temp_world_path("round-trip");

        world.save_to_file(&path).unwrap();
        let loaded = WorldMap::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, world);
    }

    #[test]
    fn test_missing_world_file() {
        let result = WorldMap::load_from_file(temp_world_path("does-not-exist"));
        assert!(matches!(
            result,
            Err(TrailheadError::WorldFileNotFound { .. })
        ));
    }

    #[test]
    fn test_garbage_world_file_is_corrupted() {
        let path = temp_world_path("garbage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, [0xffu8; 7]).unwrap();

        let result = WorldMap::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            result,
            Err(TrailheadError::CorruptedWorldFile { .. })
        ));
    }

    #[test]
    fn test_feature_off_grid_fails_validation() {
        let mut world = WorldGenerator::new(small_config()).generate(5).unwrap();
        world.settlements[0].cell = GridCell::new(500, 1);
        assert!(world.validate().is_err());
        assert!(world.save_to_file(temp_world_path("invalid")).is_err());
    }
}
