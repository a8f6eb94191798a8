use crate::config::range_types::{Separation, SiteAttempts};
use crate::features::names::NamePool;
use crate::terrain::constants::{
    DEFAULT_MAX_SETTLEMENTS, DEFAULT_MIN_SETTLEMENTS, DEFAULT_SETTLEMENT_MARGIN,
    ELEVATION_FEET_BASE, ELEVATION_FEET_SCALE,
};
use crate::terrain::{GridCell, Heightmap, PointOfInterest};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub min_count: u32,
    pub max_count: u32,
    /// Cells kept clear along every border
    pub border_margin: u32,
    pub min_separation: Separation,
    pub max_attempts: SiteAttempts,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_SETTLEMENTS,
            max_count: DEFAULT_MAX_SETTLEMENTS,
            border_margin: DEFAULT_SETTLEMENT_MARGIN,
            min_separation: Separation::default(),
            max_attempts: SiteAttempts::default(),
        }
    }
}

/// A campsite or base village that trails start from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub cell: GridCell,
    pub name: String,
    pub elevation_feet: u32,
}

impl PointOfInterest for Settlement {
    fn position(&self) -> (f32, f32) {
        self.cell.position()
    }

    fn cell(&self) -> GridCell {
        self.cell
    }
}

pub struct SettlementPlanner {
    config: SettlementConfig,
}

impl SettlementPlanner {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Scatter settlements over the map. When no well-separated cell turns up
    /// within the attempt cap the last candidate is used anyway, so the drawn
    /// count is always met.
    pub fn place<R: Rng + ?Sized>(
        &self,
        heightmap: &Heightmap,
        names: &mut NamePool,
        rng: &mut R,
    ) -> Vec<Settlement> {
        let min_count = self.config.min_count.min(self.config.max_count);
        let count = rng.gen_range(min_count..=self.config.max_count);
        let (x_range, y_range) = self.placement_bounds(heightmap);

        let mut settlements: Vec<Settlement> = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut cell = GridCell::new(x_range.0, y_range.0);
            for _ in 0..self.config.max_attempts.get() {
                cell = GridCell::new(
                    rng.gen_range(x_range.0..x_range.1),
                    rng.gen_range(y_range.0..y_range.1),
                );
                if !self.too_close(&settlements, cell) {
                    break;
                }
            }

            let height = heightmap.get(cell).unwrap_or_default();
            let settlement = Settlement {
                cell,
                name: names.draw(rng),
                elevation_feet: (height * ELEVATION_FEET_SCALE + ELEVATION_FEET_BASE).round()
                    as u32,
            };
            debug!(
                "Placed settlement {} at ({}, {})",
                settlement.name, cell.x, cell.y
            );
            settlements.push(settlement);
        }
        settlements
    }

    fn too_close(&self, settlements: &[Settlement], cell: GridCell) -> bool {
        let separation = self.config.min_separation.get();
        settlements
            .iter()
            .any(|existing| existing.distance_to(&cell) < separation)
    }

    /// Half-open coordinate ranges inside the margin; collapses to the whole
    /// axis when the map is too small for the margin
    fn placement_bounds(&self, heightmap: &Heightmap) -> ((u32, u32), (u32, u32)) {
        let margin = self.config.border_margin;
        let axis = |len: u32| {
            if len > margin * 2 {
                (margin, len - margin)
            } else {
                (0, len)
            }
        };
        (axis(heightmap.width()), axis(heightmap.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::names::NameTheme;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_settlements_within_margin_and_spaced() {
        let map = Heightmap::flat(200, 200, 0.5).unwrap();
        let mut rng = Pcg64::seed_from_u64(12);
        let mut names = NamePool::settlements(NameTheme::Earth);

        let settlements =
            SettlementPlanner::new(SettlementConfig::default()).place(&map, &mut names, &mut rng);

        assert!((6..=8).contains(&settlements.len()));
        for (i, a) in settlements.iter().enumerate() {
            assert!((10..190).contains(&a.cell.x));
            assert!((10..190).contains(&a.cell.y));
            assert_eq!(a.elevation_feet, 6000);
            for b in &settlements[i + 1..] {
                assert!(a.distance_to(b) >= 15.0);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_tiny_map_ignores_margin() {
        let map = Heightmap::flat(5, 5, 0.0).unwrap();
        let mut rng = Pcg64::seed_from_u64(2);
        let mut names = NamePool::settlements(NameTheme::Futuristic);
        let config = SettlementConfig {
            min_count: 3,
            max_count: 3,
            ..Default::default()
        };

        let settlements = SettlementPlanner::new(config).place(&map, &mut names, &mut rng);
        assert_eq!(settlements.len(), 3);
        assert!(settlements.iter().all(|s| map.contains(s.cell)));
    }
}
