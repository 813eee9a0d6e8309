//! Spatial grouping: flood fill over a proximity graph.
//!
//! Groups are rebuilt from scratch every tick and borrow the unit
//! snapshots of that tick only.

use std::collections::{HashMap, HashSet, VecDeque};
use std::f32::consts::PI;

use skirmish_core::constants::GRID_CELL_SIZE;
use skirmish_core::power::{value, PowerValue};
use skirmish_core::spatial::SpatialGrid;
use skirmish_core::types::{centroid, Point2};
use skirmish_core::unit::CombatUnit;

/// One connected cluster of units for the current tick.
#[derive(Debug, Clone)]
pub struct CombatGroup<'a> {
    /// Members, sorted by tag.
    pub units: Vec<&'a CombatUnit>,
    /// Snapped to the ground member closest to the mean when the group
    /// has ground units, otherwise the plain mean.
    pub center: Point2,
    pub power: PowerValue,
    pub too_spread: bool,
}

impl<'a> CombatGroup<'a> {
    fn new(mut units: Vec<&'a CombatUnit>, spread_factor: f32) -> Self {
        units.sort_by_key(|u| u.tag);
        let center = group_center(&units);
        let power = value(units.iter().copied());
        let too_spread = is_too_spread(&units, center, spread_factor);
        Self {
            units,
            center,
            power,
            too_spread,
        }
    }

    pub fn tags(&self) -> Vec<u64> {
        self.units.iter().map(|u| u.tag).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(&self, tag: u64) -> bool {
        self.units.binary_search_by_key(&tag, |u| u.tag).is_ok()
    }

    /// Distance from the center to the farthest member.
    pub fn extent(&self) -> f32 {
        self.units
            .iter()
            .map(|u| u.distance_to_point(self.center))
            .fold(0.0, f32::max)
    }
}

fn group_center(units: &[&CombatUnit]) -> Point2 {
    let ground: Vec<&CombatUnit> = units.iter().copied().filter(|u| !u.is_flying).collect();
    if ground.is_empty() {
        return centroid(units.iter().map(|u| u.position)).unwrap_or_default();
    }
    let mean = centroid(ground.iter().map(|u| u.position)).unwrap_or_default();
    // Members are in tag order, so the first of equally close units wins.
    let mut snapped = ground[0];
    for &unit in &ground[1..] {
        if unit.distance_to_point(mean) < snapped.distance_to_point(mean) {
            snapped = unit;
        }
    }
    snapped.position
}

/// Mean distance to center, squared, against the summed unit footprints.
fn is_too_spread(units: &[&CombatUnit], center: Point2, spread_factor: f32) -> bool {
    if units.len() < 2 {
        return false;
    }
    let total: f32 = units.iter().map(|u| u.distance_to_point(center)).sum();
    let spread = total / units.len() as f32;
    let footprint: f32 = units.iter().map(|u| PI * u.radius * u.radius).sum();
    spread * spread > footprint * spread_factor
}

/// Partition `units` into disjoint connected clusters.
///
/// Two units are linked when their centers are within `distance`. Seeds
/// and neighbor expansion both run in ascending tag order, so the same
/// input always yields the same partition in the same order.
pub fn group_units<'a>(
    units: &[&'a CombatUnit],
    distance: f32,
    spread_factor: f32,
) -> Vec<CombatGroup<'a>> {
    let mut ordered: Vec<&'a CombatUnit> = units.to_vec();
    ordered.sort_by_key(|u| u.tag);
    ordered.dedup_by_key(|u| u.tag);

    let by_tag: HashMap<u64, &'a CombatUnit> = ordered.iter().map(|u| (u.tag, *u)).collect();
    let mut grid = SpatialGrid::new(GRID_CELL_SIZE.max(distance));
    grid.rebuild(ordered.iter().map(|u| (u.tag, u.position)));

    let mut assigned: HashSet<u64> = HashSet::with_capacity(ordered.len());
    let mut groups = Vec::new();
    let mut frontier: VecDeque<&'a CombatUnit> = VecDeque::new();

    for &seed in &ordered {
        if !assigned.insert(seed.tag) {
            continue;
        }
        let mut members = vec![seed];
        frontier.push_back(seed);

        while let Some(current) = frontier.pop_front() {
            for tag in grid.query_radius(current.position, distance) {
                if assigned.contains(&tag) {
                    continue;
                }
                if let Some(&neighbor) = by_tag.get(&tag) {
                    assigned.insert(tag);
                    members.push(neighbor);
                    frontier.push_back(neighbor);
                }
            }
        }
        groups.push(CombatGroup::new(members, spread_factor));
    }
    groups
}
