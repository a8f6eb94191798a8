/// Constants for terrain and feature generation
/// Default grid dimensions
pub const DEFAULT_GRID_SIZE: u32 = 200;
pub const MAX_GRID_SIZE: u32 = 2048;

/// Default octaves as (frequency, amplitude), coarse roughness down to fine detail
pub const DEFAULT_OCTAVES: [(f64, f64); 3] = [(0.05, 0.15), (0.02, 0.10), (0.01, 0.05)];

/// Lake placement defaults
pub const DEFAULT_MIN_LAKES: u32 = 2;
pub const DEFAULT_MAX_LAKES: u32 = 4;
pub const MIN_LAKE_BASE_SIZE: u32 = 2;
pub const MAX_LAKE_BASE_SIZE: u32 = 5;
pub const MAX_CARVE_RADIUS_EXTRA: u32 = 2;
pub const OVAL_STRETCH_MIN: f32 = 0.7;
pub const OVAL_STRETCH_MAX: f32 = 1.3;
pub const IRREGULAR_JITTER_MIN: f32 = 0.8;
pub const IRREGULAR_JITTER_MAX: f32 = 1.2;
pub const IRREGULAR_LOBES: usize = 8;

/// Peak detection defaults
pub const PEAK_NEIGHBORHOOD_RADIUS: u32 = 2;
pub const DEFAULT_MAX_PEAKS: u32 = 5;

/// Settlement placement defaults
pub const DEFAULT_MIN_SETTLEMENTS: u32 = 6;
pub const DEFAULT_MAX_SETTLEMENTS: u32 = 8;
pub const DEFAULT_SETTLEMENT_MARGIN: u32 = 10;

/// Display elevation, feet = height * scale + base
pub const ELEVATION_FEET_SCALE: f32 = 8000.0;
pub const ELEVATION_FEET_BASE: f32 = 2000.0;

/// Pathfinding constants
pub const DEFAULT_SLOPE_WEIGHT: f32 = 30.0;
pub const DEFAULT_STEEP_THRESHOLD: f32 = 0.15;
pub const DEFAULT_STEEP_PENALTY: f32 = 100.0;
/// Fixed-point scale for A* costs
pub const ASTAR_COST_SCALE: f32 = 1000.0;

/// Terrain sampling fallback value outside the grid
pub const FALLBACK_TERRAIN_HEIGHT: f32 = 0.0;
