//! Sparse hash grid for radius queries over unit positions.

use std::collections::HashMap;

use crate::types::Point2;

/// Buckets tags into square cells. Queries return tags sorted ascending
/// so callers iterate in a reproducible order.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<(u64, Point2)>>,
    len: usize,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cells: HashMap::new(),
            len: 0,
        }
    }

    #[inline]
    fn cell_coord(&self, pos: Point2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, tag: u64, pos: Point2) {
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push((tag, pos));
        self.len += 1;
    }

    pub fn remove(&mut self, tag: u64, pos: Point2) {
        let coord = self.cell_coord(pos);
        if let Some(cell) = self.cells.get_mut(&coord) {
            let before = cell.len();
            cell.retain(|&(t, _)| t != tag);
            self.len -= before - cell.len();
        }
    }

    /// Tags within `radius` of `center` (inclusive), sorted by tag.
    ///
    /// Walks the cells covering the radius, or every occupied cell when
    /// that is fewer.
    pub fn query_radius(&self, center: Point2, radius: f32) -> Vec<u64> {
        if !(radius >= 0.0) || !center.is_finite() {
            return Vec::new();
        }
        let (min_x, min_y) = self.cell_coord(center - Point2::splat(radius));
        let (max_x, max_y) = self.cell_coord(center + Point2::splat(radius));
        let radius_sq = radius * radius;
        let within = |&&(_, pos): &&(u64, Point2)| pos.distance_squared(center) <= radius_sq;

        let span = (i64::from(max_x) - i64::from(min_x) + 1)
            .saturating_mul(i64::from(max_y) - i64::from(min_y) + 1);
        let mut found: Vec<u64> = if span > self.cells.len() as i64 {
            self.cells
                .values()
                .flat_map(|cell| cell.iter())
                .filter(within)
                .map(|&(tag, _)| tag)
                .collect()
        } else {
            let mut found = Vec::new();
            for cx in min_x..=max_x {
                for cy in min_y..=max_y {
                    if let Some(cell) = self.cells.get(&(cx, cy)) {
                        found.extend(cell.iter().filter(within).map(|&(tag, _)| tag));
                    }
                }
            }
            found
        };
        found.sort_unstable();
        found
    }

    /// Rebuild the grid from scratch.
    pub fn rebuild(&mut self, entries: impl IntoIterator<Item = (u64, Point2)>) {
        self.clear();
        for (tag, pos) in entries {
            self.insert(tag, pos);
        }
    }
}
