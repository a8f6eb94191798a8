use serde::{Deserialize, Serialize};
use std::f32::consts::SQRT_2;

/// Grid coordinates (unsigned integers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

impl GridCell {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Check if these coordinates fall inside a `width` x `height` grid
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }

    /// Row-major index into a grid of the given width
    pub fn index(&self, width: u32) -> usize {
        self.y as usize * width as usize + self.x as usize
    }

    /// The up-to-8 adjacent cells inside the grid, paired with the step length.
    pub fn neighbors(&self, width: u32, height: u32) -> impl Iterator<Item = (GridCell, f32)> {
        const DIRECTIONS: [(i64, i64); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];

        let (x, y) = (self.x as i64, self.y as i64);
        DIRECTIONS.into_iter().filter_map(move |(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                return None;
            }
            let length = if dx != 0 && dy != 0 { SQRT_2 } else { 1.0 };
            Some((GridCell::new(nx as u32, ny as u32), length))
        })
    }

    /// True when `other` is one of the 8 neighbours of this cell
    pub fn is_adjacent(&self, other: &GridCell) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }

    /// Shortest 8-connected distance when diagonal steps cost sqrt(2)
    pub fn octile_distance(&self, other: &GridCell) -> f32 {
        let dx = self.x.abs_diff(other.x) as f32;
        let dy = self.y.abs_diff(other.y) as f32;
        let (short, long) = if dx < dy { (dx, dy) } else { (dy, dx) };
        (long - short) + short * SQRT_2
    }
}

/// Anything with a position on the map: settlements, lakes, peaks or bare cells.
pub trait PointOfInterest {
    fn position(&self) -> (f32, f32);

    /// The grid cell containing this point
    fn cell(&self) -> GridCell {
        let (x, y) = self.position();
        GridCell::new(x.max(0.0).floor() as u32, y.max(0.0).floor() as u32)
    }

    fn distance_to<P: PointOfInterest + ?Sized>(&self, other: &P) -> f32 {
        let (ax, ay) = self.position();
        let (bx, by) = other.position();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }
}

impl PointOfInterest for GridCell {
    fn position(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    fn cell(&self) -> GridCell {
        *self
    }
}

/// Find the point in `candidates` closest to `origin`
pub fn nearest<'a, O, P>(origin: &O, candidates: &'a [P]) -> Option<(&'a P, f32)>
where
    O: PointOfInterest + ?Sized,
    P: PointOfInterest,
{
    candidates
        .iter()
        .map(|candidate| (candidate, origin.distance_to(candidate)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_in_corner() {
        let corner = GridCell::new(0, 0);
        let neighbors: Vec<_> = corner.neighbors(10, 10).collect();
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&(GridCell::new(1, 1), SQRT_2)));
        assert!(neighbors.contains(&(GridCell::new(1, 0), 1.0)));
    }

    #[test]
    fn test_neighbors_in_interior() {
        let cell = GridCell::new(5, 5);
        assert_eq!(cell.neighbors(10, 10).count(), 8);
        assert!(cell.neighbors(10, 10).all(|(n, _)| cell.is_adjacent(&n)));
    }

    #[test]
    fn test_octile_distance() {
        let a = GridCell::new(0, 0);
        assert_eq!(a.octile_distance(&GridCell::new(5, 0)), 5.0);
        let d = a.octile_distance(&GridCell::new(3, 5));
        assert!((d - (2.0 + 3.0 * SQRT_2)).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_point() {
        let origin = GridCell::new(0, 0);
        let candidates = vec![GridCell::new(10, 10), GridCell::new(3, 4), GridCell::new(0, 9)];
        let (closest, distance) = nearest(&origin, &candidates).unwrap();
        assert_eq!(*closest, GridCell::new(3, 4));
        assert_eq!(distance, 5.0);

        let empty: Vec<GridCell> = Vec::new();
        assert!(nearest(&origin, &empty).is_none());
    }
}
