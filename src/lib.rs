pub mod config;
pub mod errors;
pub mod features;
pub mod map;
pub mod pathfinding;
pub mod routes;
pub mod terrain;
pub mod terrain_generation;

// Selective re-exports for external consumers

// Errors and configuration
pub use config::WorldConfig;
pub use errors::{TrailheadError, TrailheadResult};

// World generation and queries
pub use features::{Lake, NameTheme, Peak, Settlement};
pub use map::{WorldGenerator, WorldMap};
pub use pathfinding::{Path, PathOutcome, PathPlanner, PathfindingConfig, UnreachableReason};
pub use terrain::{GridCell, Heightmap, NoiseField, PointOfInterest};
pub use terrain_generation::{TerrainConfig, TerrainGenerator};

// Route helpers used by the worldgen binary
pub use routes::{DayHike, Difficulty, RouteEstimate, recommend_day_hikes};
