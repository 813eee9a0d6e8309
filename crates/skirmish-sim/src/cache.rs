//! Per-tick unit cache: owns the snapshots, a tag index and a spatial grid.

use std::collections::HashMap;

use skirmish_core::constants::GRID_CELL_SIZE;
use skirmish_core::enums::Side;
use skirmish_core::services::UnitIndex;
use skirmish_core::spatial::SpatialGrid;
use skirmish_core::types::Point2;
use skirmish_core::unit::CombatUnit;

#[derive(Debug, Clone)]
pub struct UnitCache {
    /// Sorted by tag.
    units: Vec<CombatUnit>,
    by_tag: HashMap<u64, usize>,
    grid: SpatialGrid,
}

impl Default for UnitCache {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitCache {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            by_tag: HashMap::new(),
            grid: SpatialGrid::new(GRID_CELL_SIZE),
        }
    }

    /// Build a cache holding exactly `units`.
    pub fn from_units(units: impl IntoIterator<Item = CombatUnit>) -> Self {
        let mut cache = Self::new();
        cache.refresh(units);
        cache
    }

    /// Replace the cached snapshot. Later duplicates of a tag are dropped.
    pub fn refresh(&mut self, units: impl IntoIterator<Item = CombatUnit>) {
        self.units.clear();
        self.units.extend(units);
        self.units.sort_by_key(|u| u.tag);
        self.units.dedup_by_key(|u| u.tag);

        self.by_tag.clear();
        self.by_tag
            .extend(self.units.iter().enumerate().map(|(i, u)| (u.tag, i)));
        self.grid
            .rebuild(self.units.iter().map(|u| (u.tag, u.position)));
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All cached units in tag order.
    pub fn iter(&self) -> impl Iterator<Item = &CombatUnit> {
        self.units.iter()
    }

    pub fn of_side(&self, side: Side) -> impl Iterator<Item = &CombatUnit> {
        self.units.iter().filter(move |u| u.side == side)
    }
}

impl UnitIndex for UnitCache {
    fn units_in_range(&self, position: Point2, radius: f32, side: Side) -> Vec<&CombatUnit> {
        self.grid
            .query_radius(position, radius)
            .into_iter()
            .filter_map(|tag| self.by_tag.get(&tag).map(|&i| &self.units[i]))
            .filter(|u| u.side == side)
            .collect()
    }

    fn by_tag(&self, tag: u64) -> Option<&CombatUnit> {
        self.by_tag.get(&tag).map(|&i| &self.units[i])
    }
}
