use crate::config::range_types::PeakThreshold;
use crate::features::names::NamePool;
use crate::terrain::constants::{
    DEFAULT_MAX_PEAKS, ELEVATION_FEET_BASE, ELEVATION_FEET_SCALE, PEAK_NEIGHBORHOOD_RADIUS,
};
use crate::terrain::{GridCell, Heightmap, PointOfInterest};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrographyConfig {
    pub threshold: PeakThreshold,
    pub max_peaks: u32,
}

impl Default for OrographyConfig {
    fn default() -> Self {
        Self {
            threshold: PeakThreshold::default(),
            max_peaks: DEFAULT_MAX_PEAKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub cell: GridCell,
    pub height: f32,
    pub name: String,
}

impl Peak {
    pub fn elevation_feet(&self) -> u32 {
        (self.height * ELEVATION_FEET_SCALE + ELEVATION_FEET_BASE).round() as u32
    }
}

impl PointOfInterest for Peak {
    fn position(&self) -> (f32, f32) {
        self.cell.position()
    }

    fn cell(&self) -> GridCell {
        self.cell
    }
}

pub struct OrographyAnalyzer {
    config: OrographyConfig,
}

impl OrographyAnalyzer {
    pub fn new(config: OrographyConfig) -> Self {
        Self { config }
    }

    /// Strict local maxima over the 5x5 window that clear the height threshold.
    /// Cells closer than the window radius to a border are never candidates.
    pub fn candidates(&self, heightmap: &Heightmap) -> Vec<(GridCell, f32)> {
        let r = PEAK_NEIGHBORHOOD_RADIUS;
        let threshold = self.config.threshold.get();
        if heightmap.width() <= 2 * r || heightmap.height() <= 2 * r {
            return Vec::new();
        }

        let mut found = Vec::new();
        for y in r..heightmap.height() - r {
            for x in r..heightmap.width() - r {
                let cell = GridCell::new(x, y);
                let Some(height) = heightmap.get(cell) else {
                    continue;
                };
                if height > threshold && is_strict_maximum(heightmap, cell, height) {
                    found.push((cell, height));
                }
            }
        }
        found
    }

    /// Rank candidates by height, keep the top `max_peaks`, and name only those.
    pub fn find_peaks<R: Rng + ?Sized>(
        &self,
        heightmap: &Heightmap,
        names: &mut NamePool,
        rng: &mut R,
    ) -> Vec<Peak> {
        let mut candidates = self.candidates(heightmap);
        debug!("Found {} peak candidates", candidates.len());

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.truncate(self.config.max_peaks as usize);

        candidates
            .into_iter()
            .map(|(cell, height)| Peak {
                cell,
                height,
                name: names.draw(rng),
            })
            .collect()
    }
}

fn is_strict_maximum(heightmap: &Heightmap, cell: GridCell, height: f32) -> bool {
    let r = PEAK_NEIGHBORHOOD_RADIUS;
    for ny in cell.y - r..=cell.y + r {
        for nx in cell.x - r..=cell.x + r {
            if (nx, ny) == (cell.x, cell.y) {
                continue;
            }
            if heightmap
                .get(GridCell::new(nx, ny))
                .is_some_and(|neighbor| neighbor >= height)
            {
                return false;
            }
        }
    }
    true
}
