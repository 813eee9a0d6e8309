//! Scored target selection and small geometric queries over unit lists.
//!
//! Every selection iterates candidates in tag order and breaks equal
//! scores toward the lowest tag, so results do not depend on input order.

use std::collections::HashMap;

use skirmish_core::config::MicroConfig;
use skirmish_core::enums::Intent;
use skirmish_core::types::Point2;
use skirmish_core::unit::CombatUnit;
use skirmish_core::unit_data::Attributes;

use crate::profiles::get_profile;

/// Structures that cannot shoot back are barely worth attacking.
const HARMLESS_STRUCTURE_FACTOR: f32 = 0.05;

/// Worker value multiplier while raiding.
const HARASS_WORKER_FACTOR: f32 = 3.0;

/// Score `target` from the point of view of `attacker`.
pub fn score_target(
    cfg: &MicroConfig,
    attacker: &CombatUnit,
    target: &CombatUnit,
    intent: Intent,
    locked: bool,
) -> f32 {
    let profile = get_profile(attacker.unit_type);
    let stats = target.stats();
    let mut value = stats.weight;

    if target.is_structure && !stats.can_attack() {
        value *= HARMLESS_STRUCTURE_FACTOR;
    }
    if target.is_worker() {
        value *= profile.worker;
        if intent == Intent::Harass {
            value *= HARASS_WORKER_FACTOR;
        }
    }
    if stats.attributes.contains(Attributes::ARMORED) {
        value *= profile.armored;
    }
    if stats.attributes.contains(Attributes::LIGHT) {
        value *= profile.light;
    }
    if stats.attributes.contains(Attributes::BIOLOGICAL) {
        value *= profile.biological;
    }
    if stats.attributes.contains(Attributes::MASSIVE) {
        value *= profile.massive;
    }
    if target.is_flying {
        value *= profile.air;
    }

    value *= cfg.low_health_base - target.health_fraction();
    if attacker.in_real_range(target) {
        value *= cfg.in_range_bonus;
    }
    if locked {
        value *= cfg.continue_bonus;
    }
    value - attacker.distance_to(target) * cfg.distance_penalty
}

/// Highest scoring enemy within real range plus `reach_extra`.
pub fn best_target<'e>(
    cfg: &MicroConfig,
    attacker: &CombatUnit,
    enemies: &[&'e CombatUnit],
    intent: Intent,
    locked: Option<u64>,
    reach_extra: f32,
) -> Option<&'e CombatUnit> {
    let mut best: Option<(&'e CombatUnit, f32)> = None;
    for &enemy in enemies {
        if !attacker.can_attack(enemy) {
            continue;
        }
        if attacker.distance_to(enemy) > attacker.real_range_vs(enemy) + reach_extra {
            continue;
        }
        let score = score_target(cfg, attacker, enemy, intent, locked == Some(enemy.tag));
        let better = match best {
            None => true,
            Some((current, s)) => score > s || (score == s && enemy.tag < current.tag),
        };
        if better {
            best = Some((enemy, score));
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// Focus fire with memory of each attacker's previous target.
///
/// Entries are keyed by attacker tag and never evicted; dead attackers
/// simply stop being looked up.
#[derive(Debug, Default)]
pub struct FocusFire {
    locked: HashMap<u64, u64>,
}

impl FocusFire {
    pub fn select<'e>(
        &mut self,
        cfg: &MicroConfig,
        attacker: &CombatUnit,
        enemies: &[&'e CombatUnit],
        intent: Intent,
        reach_extra: f32,
    ) -> Option<&'e CombatUnit> {
        let last = self.locked.get(&attacker.tag).copied();
        let best = best_target(cfg, attacker, enemies, intent, last, reach_extra);
        if let Some(target) = best {
            self.locked.insert(attacker.tag, target.tag);
        }
        best
    }

    pub fn locked_target(&self, attacker: u64) -> Option<u64> {
        self.locked.get(&attacker).copied()
    }
}

/// Closest unit to `from` passing `filter`, lowest tag on ties.
pub fn nearest<'e>(
    from: Point2,
    units: &[&'e CombatUnit],
    filter: impl Fn(&CombatUnit) -> bool,
) -> Option<&'e CombatUnit> {
    let mut best: Option<(&'e CombatUnit, f32)> = None;
    for &u in units {
        if !filter(u) {
            continue;
        }
        let d = u.position.distance_squared(from);
        let better = match best {
            None => true,
            Some((current, bd)) => d < bd || (d == bd && u.tag < current.tag),
        };
        if better {
            best = Some((u, d));
        }
    }
    best.map(|(u, _)| u)
}

/// Closest enemy able to shoot `unit`.
pub fn nearest_threat<'e>(unit: &CombatUnit, enemies: &[&'e CombatUnit]) -> Option<&'e CombatUnit> {
    nearest(unit.position, enemies, |e| e.can_attack(unit))
}

/// Units within `radius` of `point`.
pub fn within<'e, 's>(
    units: &'s [&'e CombatUnit],
    point: Point2,
    radius: f32,
) -> impl Iterator<Item = &'e CombatUnit> + 's {
    let radius_sq = radius * radius;
    units
        .iter()
        .copied()
        .filter(move |u| u.position.distance_squared(point) <= radius_sq)
}

/// Summed `value` of units within `radius` of `point`.
pub fn cluster_value(
    units: &[&CombatUnit],
    point: Point2,
    radius: f32,
    value: impl Fn(&CombatUnit) -> f32,
) -> f32 {
    within(units, point, radius).map(value).sum()
}

/// Best area-of-effect center among candidate positions.
///
/// Candidates are the positions of `units` within `cast_range` of
/// `origin`. Returns the point and its cluster value.
pub fn best_cluster(
    units: &[&CombatUnit],
    origin: Point2,
    cast_range: f32,
    radius: f32,
    value: impl Fn(&CombatUnit) -> f32,
) -> Option<(Point2, f32)> {
    let mut best: Option<(Point2, f32, u64)> = None;
    for &candidate in units {
        if candidate.position.distance(origin) > cast_range {
            continue;
        }
        let score = cluster_value(units, candidate.position, radius, &value);
        let better = match best {
            None => true,
            Some((_, s, tag)) => score > s || (score == s && candidate.tag < tag),
        };
        if better {
            best = Some((candidate.position, score, candidate.tag));
        }
    }
    best.map(|(p, s, _)| (p, s))
}
