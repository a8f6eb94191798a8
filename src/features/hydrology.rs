use crate::config::range_types::{BasinDepth, HeightFraction, Separation, SiteAttempts};
use crate::features::names::NamePool;
use crate::terrain::constants::*;
use crate::terrain::{GridCell, Heightmap, PointOfInterest};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrologyConfig {
    pub min_lakes: u32,
    pub max_lakes: u32,
    /// Sites must sit below `min + lowland_fraction * (max - min)`
    pub lowland_fraction: HeightFraction,
    pub min_separation: Separation,
    pub max_attempts: SiteAttempts,
    pub basin_depth: BasinDepth,
}

impl Default for HydrologyConfig {
    fn default() -> Self {
        Self {
            min_lakes: DEFAULT_MIN_LAKES,
            max_lakes: DEFAULT_MAX_LAKES,
            lowland_fraction: HeightFraction::default(),
            min_separation: Separation::default(),
            max_attempts: SiteAttempts::default(),
            basin_depth: BasinDepth::default(),
        }
    }
}

/// Outline of a lake. Parameters are drawn once when the lake is created so
/// carving and later membership tests agree on which cells are water.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LakeShape {
    /// Ellipse stretched by `stretch` along an axis rotated by `angle` radians
    Oval { stretch: f32, angle: f32 },
    /// Circle whose radius wobbles by direction, interpolated between lobes
    Irregular { lobes: [f32; IRREGULAR_LOBES] },
}

impl LakeShape {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            LakeShape::Oval {
                stretch: rng.gen_range(OVAL_STRETCH_MIN..OVAL_STRETCH_MAX),
                angle: rng.gen_range(0.0..TAU),
            }
        } else {
            let mut lobes = [1.0; IRREGULAR_LOBES];
            for lobe in &mut lobes {
                *lobe = rng.gen_range(IRREGULAR_JITTER_MIN..IRREGULAR_JITTER_MAX);
            }
            LakeShape::Irregular { lobes }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LakeShape::Oval { .. } => "oval",
            LakeShape::Irregular { .. } => "irregular",
        }
    }

    /// Shape-adjusted distance of an offset from the lake center
    pub fn distance(&self, dx: f32, dy: f32) -> f32 {
        match self {
            LakeShape::Oval { stretch, angle } => {
                let (sin, cos) = angle.sin_cos();
                let along = dx * cos + dy * sin;
                let across = -dx * sin + dy * cos;
                ((along / stretch).powi(2) + (across * stretch).powi(2)).sqrt()
            }
            LakeShape::Irregular { lobes } => {
                let base = (dx * dx + dy * dy).sqrt();
                if base == 0.0 {
                    return 0.0;
                }
                let t = (dy.atan2(dx) + PI) / TAU * IRREGULAR_LOBES as f32;
                let i = (t.floor() as usize) % IRREGULAR_LOBES;
                let j = (i + 1) % IRREGULAR_LOBES;
                let frac = t - t.floor();
                base * (lobes[i] + (lobes[j] - lobes[i]) * frac)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lake {
    pub cell: GridCell,
    pub base_size: u32,
    /// Half-width of the square scanned while carving the basin
    pub carve_radius: u32,
    pub shape: LakeShape,
    pub name: String,
}

impl Lake {
    /// Whether `cell` lies on the water surface of this lake
    pub fn contains(&self, cell: GridCell) -> bool {
        let dx = cell.x as f32 - self.cell.x as f32;
        let dy = cell.y as f32 - self.cell.y as f32;
        self.shape.distance(dx, dy) <= self.base_size as f32
    }
}

impl PointOfInterest for Lake {
    fn position(&self) -> (f32, f32) {
        self.cell.position()
    }

    fn cell(&self) -> GridCell {
        self.cell
    }
}

/// The first lake whose surface covers `cell`
pub fn lake_at(lakes: &[Lake], cell: GridCell) -> Option<&Lake> {
    lakes.iter().find(|lake| lake.contains(cell))
}

pub struct HydrologyPlanner {
    config: HydrologyConfig,
}

impl HydrologyPlanner {
    pub fn new(config: HydrologyConfig) -> Self {
        Self { config }
    }

    /// Place lakes on low ground and carve a basin under each one.
    ///
    /// Lakes whose site search exhausts the attempt cap are skipped, so the
    /// result may hold fewer lakes than the drawn target.
    pub fn place<R: Rng + ?Sized>(
        &self,
        heightmap: &mut Heightmap,
        names: &mut NamePool,
        rng: &mut R,
    ) -> Vec<Lake> {
        let min_lakes = self.config.min_lakes.min(self.config.max_lakes);
        let target = rng.gen_range(min_lakes..=self.config.max_lakes);

        let (min_height, max_height) = heightmap.min_max();
        let threshold =
            min_height + (max_height - min_height) * self.config.lowland_fraction.get();
        info!(
            "Placing {target} lakes, height range {min_height:.3}..{max_height:.3}, threshold {threshold:.3}"
        );

        let mut lakes: Vec<Lake> = Vec::with_capacity(target as usize);
        for i in 0..target {
            let Some(cell) = self.find_site(heightmap, &lakes, threshold, rng) else {
                warn!(
                    "Failed to find suitable location for lake {} after {} attempts",
                    i + 1,
                    self.config.max_attempts
                );
                continue;
            };

            let base_size = rng.gen_range(MIN_LAKE_BASE_SIZE..=MAX_LAKE_BASE_SIZE);
            let lake = Lake {
                cell,
                base_size,
                carve_radius: base_size + rng.gen_range(0..=MAX_CARVE_RADIUS_EXTRA),
                shape: LakeShape::random(rng),
                name: names.draw(rng),
            };

            debug!(
                "Created lake {} at ({}, {}) with base size {}, shape {}",
                lake.name,
                cell.x,
                cell.y,
                base_size,
                lake.shape.label()
            );
            self.carve_basin(heightmap, &lake);
            lakes.push(lake);
        }

        info!("Generated {} lakes", lakes.len());
        lakes
    }

    fn find_site<R: Rng + ?Sized>(
        &self,
        heightmap: &Heightmap,
        lakes: &[Lake],
        threshold: f32,
        rng: &mut R,
    ) -> Option<GridCell> {
        let separation = self.config.min_separation.get();
        (0..self.config.max_attempts.get()).find_map(|_| {
            let cell = GridCell::new(
                rng.gen_range(0..heightmap.width()),
                rng.gen_range(0..heightmap.height()),
            );
            let low_enough = heightmap.get(cell).is_some_and(|h| h < threshold);
            let far_enough = lakes
                .iter()
                .all(|lake| lake.distance_to(&cell) >= separation);
            (low_enough && far_enough).then_some(cell)
        })
    }

    /// Lower every cell on the lake surface, deepest at the center.
    pub fn carve_basin(&self, heightmap: &mut Heightmap, lake: &Lake) {
        let radius = lake.carve_radius as i64;
        let base = lake.base_size as f32;
        let depth = self.config.basin_depth.get();

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let (nx, ny) = (lake.cell.x as i64 + dx, lake.cell.y as i64 + dy);
                if nx < 0 || ny < 0 {
                    continue;
                }
                let cell = GridCell::new(nx as u32, ny as u32);
                if !heightmap.contains(cell) {
                    continue;
                }

                let distance = lake.shape.distance(dx as f32, dy as f32);
                if distance <= base {
                    heightmap.lower(cell, ((base - distance) / base * depth).max(0.0));
                }
            }
        }
    }
}
