use crate::config::range_types::{SearchBudget, StepCostLimit};
use crate::errors::TrailheadResult;
use crate::terrain::constants::*;
use crate::terrain::{GridCell, Heightmap, PointOfInterest};
use pathfinding::prelude::astar;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for the steepness-penalized trail search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfindingConfig {
    /// Cost added per unit of height change
    pub slope_weight: f32,
    /// Height change above which `steep_penalty` applies
    pub steep_threshold: f32,
    pub steep_penalty: f32,
    /// Steps costing more than this are impassable
    pub max_step_cost: StepCostLimit,
    /// Node expansions allowed before giving up
    pub budget: SearchBudget,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            slope_weight: DEFAULT_SLOPE_WEIGHT,
            steep_threshold: DEFAULT_STEEP_THRESHOLD,
            steep_penalty: DEFAULT_STEEP_PENALTY,
            max_step_cost: StepCostLimit::default(),
            budget: SearchBudget::default(),
        }
    }
}

/// An ordered run of 8-adjacent cells from a start cell to a goal cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<GridCell>,
    cost: f32,
}

impl Path {
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<GridCell> {
        self.cells
    }

    /// Sum of the step costs along the path
    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<GridCell> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<GridCell> {
        self.cells.last().copied()
    }

    /// Geometric length in grid units, ignoring elevation penalties
    pub fn length(&self) -> f32 {
        self.cells
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// Every reachable cell was explored without meeting the goal
    Exhausted,
    /// The expansion budget ran out first
    BudgetExceeded,
}

/// Result of a path query. Callers draw a direct connector for `Unreachable`.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    /// Start and goal are the same cell; the path holds just that cell
    Arrived(Path),
    Found(Path),
    Unreachable(UnreachableReason),
}

impl PathOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathOutcome::Arrived(path) | PathOutcome::Found(path) => Some(path),
            PathOutcome::Unreachable(_) => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            PathOutcome::Arrived(path) | PathOutcome::Found(path) => Some(path),
            PathOutcome::Unreachable(_) => None,
        }
    }

    /// The path cells, empty when no passable route exists
    pub fn cells(&self) -> &[GridCell] {
        self.path().map(Path::cells).unwrap_or(&[])
    }

    pub fn is_reachable(&self) -> bool {
        !matches!(self, PathOutcome::Unreachable(_))
    }
}

/// A* over the 8-connected grid with an elevation-aware step cost.
///
/// Costs are handed to `astar` in fixed point: step costs rounded up and the
/// Euclidean heuristic rounded down, so the heuristic stays admissible.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    pub config: PathfindingConfig,
}

impl PathPlanner {
    pub fn new(config: PathfindingConfig) -> Self {
        Self { config }
    }

    /// Cost of one step for a given geometric length and height change
    pub fn raw_step_cost(&self, length: f32, height_delta: f32) -> f32 {
        let delta = height_delta.abs();
        let penalty = if delta > self.config.steep_threshold {
            self.config.steep_penalty
        } else {
            0.0
        };
        length + delta * self.config.slope_weight + penalty
    }

    /// Cost of stepping between two adjacent cells, `None` when the step is
    /// impassable or the cells are not neighbours
    pub fn step_cost(&self, heightmap: &Heightmap, from: GridCell, to: GridCell) -> Option<f32> {
        if !from.is_adjacent(&to) {
            return None;
        }
        let length = from.distance_to(&to);
        let cost = self.raw_step_cost(length, heightmap.get(to)? - heightmap.get(from)?);
        (cost <= self.config.max_step_cost.get()).then_some(cost)
    }

    fn successors(&self, heightmap: &Heightmap, cell: GridCell) -> Vec<(GridCell, u64)> {
        let Some(here) = heightmap.get(cell) else {
            return Vec::new();
        };
        let limit = self.config.max_step_cost.get();

        cell.neighbors(heightmap.width(), heightmap.height())
            .filter_map(|(next, length)| {
                let there = heightmap.get(next)?;
                let cost = self.raw_step_cost(length, there - here);
                (cost <= limit).then(|| (next, (cost * ASTAR_COST_SCALE).ceil() as u64))
            })
            .collect()
    }

    /// Find the cheapest trail from `start` to `goal`.
    ///
    /// Out-of-bounds endpoints are an error; an impassable or over-budget
    /// search is the ordinary `Unreachable` outcome.
    pub fn find_path(
        &self,
        heightmap: &Heightmap,
        start: GridCell,
        goal: GridCell,
    ) -> TrailheadResult<PathOutcome> {
        heightmap.require(start)?;
        heightmap.require(goal)?;

        if start == goal {
            return Ok(PathOutcome::Arrived(Path {
                cells: vec![start],
                cost: 0.0,
            }));
        }

        let budget = self.config.budget.get();
        let mut expansions = 0u32;
        let mut budget_exceeded = false;

        let result = astar(
            &start,
            |&cell| {
                if expansions >= budget {
                    budget_exceeded = true;
                    return Vec::new();
                }
                expansions += 1;
                self.successors(heightmap, cell)
            },
            |cell| (cell.distance_to(&goal) * ASTAR_COST_SCALE).floor() as u64,
            |&cell| cell == goal,
        );

        let Some((cells, _)) = result else {
            let reason = if budget_exceeded {
                UnreachableReason::BudgetExceeded
            } else {
                UnreachableReason::Exhausted
            };
            warn!(
                "No passable route from ({}, {}) to ({}, {}): {:?} after {} expansions",
                start.x, start.y, goal.x, goal.y, reason, expansions
            );
            return Ok(PathOutcome::Unreachable(reason));
        };

        let cost = cells
            .windows(2)
            .filter_map(|pair| self.step_cost(heightmap, pair[0], pair[1]))
            .sum();
        debug!(
            "Pathfinding success: {} cells, cost {:.2}, {} expansions",
            cells.len(),
            cost,
            expansions
        );

        Ok(PathOutcome::Found(Path { cells, cost }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::NoiseField;
    use crate::terrain_generation::{TerrainConfig, TerrainGenerator};

    fn planner() -> PathPlanner {
        PathPlanner::default()
    }

    fn assert_well_formed(heightmap: &Heightmap, path: &Path, start: GridCell, goal: GridCell) {
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.goal(), Some(goal));
        for pair in path.cells().windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]), "{pair:?} are not adjacent");
            let cost = planner()
                .step_cost(heightmap, pair[0], pair[1])
                .expect("Every step on a found path must be passable");
            assert!(cost <= 50.0);
        }
    }

    #[test]
    fn test_flat_path_is_optimal() {
        let map = Heightmap::flat(40, 40, 0.3).unwrap();
        let cases = [
            (GridCell::new(0, 0), GridCell::new(39, 39)),
            (GridCell::new(5, 3), GridCell::new(30, 12)),
            (GridCell::new(20, 35), GridCell::new(20, 2)),
            (GridCell::new(1, 17), GridCell::new(38, 20)),
        ];

        for (start, goal) in cases {
            let outcome = planner().find_path(&map, start, goal).unwrap();
            let PathOutcome::Found(path) = outcome else {
                panic!("Flat terrain should always be traversable, got {outcome:?}");
            };
            assert_well_formed(&map, &path, start, goal);
            let expected = start.octile_distance(&goal);
            assert!(
                (path.cost() - expected).abs() < 1e-3,
                "cost {} differs from octile distance {}",
                path.cost(),
                expected
            );
        }
    }

    #[test]
    fn test_same_cell_is_a_single_cell_path() {
        let map = Heightmap::flat(10, 10, 0.0).unwrap();
        let p = GridCell::new(4, 4);
        let outcome = planner().find_path(&map, p, p).unwrap();

        assert!(matches!(outcome, PathOutcome::Arrived(_)));
        assert_eq!(outcome.cells(), &[p]);
        assert_eq!(outcome.path().unwrap().cost(), 0.0);
    }

    #[test]
    fn test_path_squeezes_through_gap_in_cliff() {
        let mut map = Heightmap::flat(20, 20, 0.0).unwrap();
        for y in 0..20 {
            if y != 15 {
                map.set(GridCell::new(10, y), 0.5);
            }
        }

        let (start, goal) = (GridCell::new(2, 2), GridCell::new(18, 2));
        let outcome = planner().find_path(&map, start, goal).unwrap();
        let path = outcome.path().expect("The gap should be found");

        assert_well_formed(&map, path, start, goal);
        let crossings: Vec<_> = path.cells().iter().filter(|c| c.x == 10).collect();
        assert_eq!(crossings, vec![&GridCell::new(10, 15)]);
    }

    #[test]
    fn test_closed_cliff_is_unreachable() {
        let mut map = Heightmap::flat(20, 20, 0.0).unwrap();
        for y in 0..20 {
            map.set(GridCell::new(10, y), 0.5);
        }

        let outcome = planner()
            .find_path(&map, GridCell::new(2, 2), GridCell::new(18, 2))
            .unwrap();

        assert_eq!(
            outcome,
            PathOutcome::Unreachable(UnreachableReason::Exhausted)
        );
        assert!(outcome.cells().is_empty());
        assert!(!outcome.is_reachable());
    }

    #[test]
    fn test_budget_overrun_is_unreachable() {
        let map = Heightmap::flat(100, 100, 0.0).unwrap();
        let planner = PathPlanner::new(PathfindingConfig {
            budget: SearchBudget::new(5),
            ..Default::default()
        });

        let outcome = planner
            .find_path(&map, GridCell::new(0, 0), GridCell::new(99, 99))
            .unwrap();
        assert_eq!(
            outcome,
            PathOutcome::Unreachable(UnreachableReason::BudgetExceeded)
        );
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let map = Heightmap::flat(10, 10, 0.0).unwrap();
        assert!(
            planner()
                .find_path(&map, GridCell::new(0, 0), GridCell::new(10, 3))
                .is_err()
        );
    }

    #[test]
    fn test_low_ridge_is_climbed_not_skirted() {
        // Skirting the ridge end is far longer than paying the climb
        let mut map = Heightmap::flat(30, 30, 0.0).unwrap();
        for y in 0..25 {
            map.set(GridCell::new(15, y), 0.1);
        }

        let outcome = planner()
            .find_path(&map, GridCell::new(5, 5), GridCell::new(25, 5))
            .unwrap();
        let path = outcome.path().unwrap();
        let direct = GridCell::new(5, 5).octile_distance(&GridCell::new(25, 5)) + 2.0 * 0.1 * 30.0;
        assert!(path.cost() <= direct + 1e-3);
    }

    #[test]
    fn test_generated_terrain_corner_to_corner() {
        let map = TerrainGenerator::new(TerrainConfig::default())
            .generate(&NoiseField::from_seed(2025))
            .unwrap();
        let (start, goal) = (GridCell::new(10, 10), GridCell::new(190, 190));

        let outcome = planner().find_path(&map, start, goal).unwrap();
        let path = outcome.path().expect("Generated terrain should be crossable");

        assert!(!path.is_empty());
        assert_well_formed(&map, path, start, goal);
        assert!(path.length() >= start.distance_to(&goal));
    }

    #[test]
    fn test_raw_step_cost_formula() {
        let planner = planner();
        assert_eq!(planner.raw_step_cost(1.0, 0.0), 1.0);
        assert!((planner.raw_step_cost(1.0, -0.1) - 4.0).abs() < 1e-5);
        assert!(planner.raw_step_cost(1.0, 0.2) > 100.0);
    }
}
