use crate::errors::{TrailheadError, TrailheadResult};
use crate::features::{Lake, Peak, Settlement};
use crate::map::WorldMap;
use crate::pathfinding::PathOutcome;
use crate::terrain::coordinates::nearest;
use crate::terrain::{GridCell, PointOfInterest};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Trail miles per grid unit; the diagonal of a 200-cell map is about 16 trail miles
pub const MILES_PER_UNIT: f32 = 0.019 * 3.0;
pub const MIN_ROUTE_MILES: f32 = 1.5;
pub const MAX_ROUTE_MILES: f32 = 36.0;
pub const MAX_DAY_HIKE_MILES: f32 = 10.0;
/// A lake still wins when it is at most this much farther than the nearest peak
pub const LAKE_PREFERENCE: f32 = 1.2;

#[derive(
    Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[display("easy")]
    Easy,
    #[default]
    #[display("moderate")]
    Moderate,
    #[display("difficult")]
    Difficult,
    #[display("expert")]
    Expert,
}

impl Difficulty {
    /// How much longer than the map distance a trail of this grade winds
    pub fn multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 1.2,
            Difficulty::Moderate => 1.4,
            Difficulty::Difficult => 1.8,
            Difficulty::Expert => 2.2,
        }
    }
}

impl FromStr for Difficulty {
    type Err = TrailheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "moderate" => Ok(Difficulty::Moderate),
            "difficult" => Ok(Difficulty::Difficult),
            "expert" => Ok(Difficulty::Expert),
            other => Err(TrailheadError::InvalidArgument {
                reason: format!("Unknown difficulty '{other}'"),
            }),
        }
    }
}

/// Convert a distance in grid units to trail miles, rounded to a tenth and
/// clamped to the range a single route may cover.
pub fn route_distance_miles(raw_units: f32, difficulty: Difficulty) -> f32 {
    let miles = raw_units * MILES_PER_UNIT * difficulty.multiplier();
    ((miles * 10.0).round() / 10.0).clamp(MIN_ROUTE_MILES, MAX_ROUTE_MILES)
}

/// Trail length estimate between two cells of a generated world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub from: GridCell,
    pub to: GridCell,
    pub difficulty: Difficulty,
    /// Geometric length of the trail in grid units
    pub raw_units: f32,
    pub miles: f32,
    /// Set when no passable trail exists and the estimate uses the straight line
    pub direct: bool,
    pub cells: Vec<GridCell>,
}

impl RouteEstimate {
    pub fn plan(
        world: &WorldMap,
        from: GridCell,
        to: GridCell,
        difficulty: Difficulty,
    ) -> TrailheadResult<Self> {
        let outcome = world.find_path(from, to)?;
        let (raw_units, direct, cells) = match outcome {
            PathOutcome::Arrived(path) | PathOutcome::Found(path) => {
                (path.length(), false, path.into_cells())
            }
            PathOutcome::Unreachable(reason) => {
                debug!(
                    "Using straight line from ({}, {}) to ({}, {}): {reason:?}",
                    from.x, from.y, to.x, to.y
                );
                (from.distance_to(&to), true, vec![from, to])
            }
        };

        Ok(Self {
            from,
            to,
            difficulty,
            raw_units,
            miles: route_distance_miles(raw_units, difficulty),
            direct,
            cells,
        })
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HikeDestination {
    #[display("lake")]
    Lake,
    #[display("peak")]
    Peak,
}

/// Out-and-back outing from a settlement to a nearby lake or summit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHike {
    pub from: String,
    pub to: String,
    pub destination: HikeDestination,
    /// Straight-line distance in grid units
    pub distance: f32,
}

impl DayHike {
    fn new(settlement: &Settlement, to: &str, destination: HikeDestination, distance: f32) -> Self {
        Self {
            from: settlement.name.clone(),
            to: to.to_string(),
            destination,
            distance,
        }
    }

    pub fn name(&self) -> String {
        format!("{} to {}", self.from, self.to)
    }

    pub fn miles(&self) -> f32 {
        self.distance * MILES_PER_UNIT
    }
}

/// At most one day hike per settlement: its nearest lake or nearest peak,
/// whichever qualifies, favouring the lake unless the peak is clearly closer.
pub fn recommend_day_hikes(
    settlements: &[Settlement],
    lakes: &[Lake],
    peaks: &[Peak],
) -> Vec<DayHike> {
    let within_range = |distance: f32| distance * MILES_PER_UNIT <= MAX_DAY_HIKE_MILES;

    settlements
        .iter()
        .filter_map(|settlement| {
            let lake = nearest(settlement, lakes).filter(|&(_, d)| within_range(d));
            let peak = nearest(settlement, peaks).filter(|&(_, d)| within_range(d));

            let lake_hike = |(lake, d): (&Lake, f32)| {
                DayHike::new(settlement, &lake.name, HikeDestination::Lake, d)
            };
            let peak_hike = |(peak, d): (&Peak, f32)| {
                DayHike::new(settlement, &peak.name, HikeDestination::Peak, d)
            };

            match (lake, peak) {
                (Some(lake), Some(peak)) if lake.1 <= peak.1 * LAKE_PREFERENCE => {
                    Some(lake_hike(lake))
                }
                (Some(_), Some(peak)) => Some(peak_hike(peak)),
                (Some(lake), None) => Some(lake_hike(lake)),
                (None, Some(peak)) => Some(peak_hike(peak)),
                (None, None) => {
                    debug!("No day hike within range of {}", settlement.name);
                    None
                }
            }
        })
        .collect()
}
