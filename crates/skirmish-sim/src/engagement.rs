//! Group-level engagement decisions.
//!
//! For every friendly group the evaluator picks the nearest hostile group
//! and walks a fixed decision procedure. The first matching branch wins.

use tracing::debug;

use skirmish_core::config::EngagementConfig;
use skirmish_core::enums::Intent;
use skirmish_core::power::{value, PowerValue};
use skirmish_core::types::Point2;

use crate::grouping::CombatGroup;

/// The resolved posture of one friendly group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupDecision {
    pub intent: Intent,
    pub target: Point2,
    pub in_combat: bool,
    /// Index of the nearest hostile group, if any was found.
    pub hostile: Option<usize>,
    /// Which branch produced the decision.
    pub reason: &'static str,
}

/// Side-wide inputs shared by every group's decision.
#[derive(Debug, Clone, Copy)]
pub struct Battlefield<'g, 'a> {
    pub own_groups: &'g [CombatGroup<'a>],
    pub hostile_groups: &'g [CombatGroup<'a>],
    /// Sum over all friendly groups.
    pub own_total: PowerValue,
    /// Sum over all known hostile groups.
    pub hostile_total: PowerValue,
    /// Where the caller wants the army to go.
    pub target: Point2,
    pub default_intent: Intent,
}

/// Nearest hostile group by center distance, lowest index on ties.
pub fn nearest_group(groups: &[CombatGroup<'_>], from: Point2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, group) in groups.iter().enumerate() {
        let d = group.center.distance(from);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Whether `own` and `hostile` are already trading blows.
///
/// True when the centers are close, when any hostile has a friendly unit
/// inside its real range, or, at medium range, when enough of our power
/// already has a target inside its own real range.
pub fn is_in_combat(cfg: &EngagementConfig, own: &CombatGroup<'_>, hostile: &CombatGroup<'_>) -> bool {
    let distance = own.center.distance(hostile.center);
    if distance < cfg.in_combat_center_distance {
        return true;
    }

    let under_fire = hostile
        .units
        .iter()
        .any(|e| own.units.iter().any(|u| e.can_attack(u) && e.in_real_range(u)));
    if under_fire {
        return true;
    }

    if distance < cfg.engaged_check_distance {
        let engaged = value(
            own.units
                .iter()
                .copied()
                .filter(|u| hostile.units.iter().any(|e| u.can_attack(e) && u.in_real_range(e))),
        );
        if engaged.power > own.power.power * cfg.engaged_power_fraction {
            return true;
        }
    }
    false
}

/// Attack-class posture to use when a branch decides to advance.
fn advance_intent(default: Intent) -> Intent {
    if default.is_attack_class() {
        default
    } else {
        Intent::Attack
    }
}

/// Resolve the posture of the friendly group at `index`.
pub fn decide(cfg: &EngagementConfig, field: &Battlefield<'_, '_>, index: usize) -> GroupDecision {
    let own = &field.own_groups[index];
    let default = field.default_intent;

    let Some(hostile_index) = nearest_group(field.hostile_groups, own.center) else {
        let intent = if default.is_retreat() { default } else { advance_intent(default) };
        let decision = GroupDecision {
            intent,
            target: field.target,
            in_combat: false,
            hostile: None,
            reason: "no hostiles",
        };
        log_decision(own, &decision, &PowerValue::default());
        return decision;
    };
    let hostile = &field.hostile_groups[hostile_index];
    let in_combat = is_in_combat(cfg, own, hostile);

    let decide_as = |intent: Intent, target: Point2, reason: &'static str| GroupDecision {
        intent,
        target,
        in_combat,
        hostile: Some(hostile_index),
        reason,
    };

    let decision = if default.is_retreat() {
        decide_as(default, field.target, "retreat")
    } else if main_army_share(own, &field.own_total) > cfg.main_army_ratio {
        if own.too_spread && !in_combat {
            decide_as(Intent::ReGroup, own.center, "main army spread")
        } else {
            decide_as(advance_intent(default), hostile.center, "main army")
        }
    } else if in_combat {
        if own.power.is_enough_for(&hostile.power, cfg.hold_ratio) {
            decide_as(advance_intent(default), hostile.center, "holding")
        } else {
            match fallback_group(cfg, field, index) {
                Some(point) => decide_as(Intent::ReGroup, point, "falling back"),
                None => decide_as(Intent::Attack, hostile.center, "last stand"),
            }
        }
    } else if own.power.is_enough_for(&field.hostile_total, cfg.crush_ratio) {
        decide_as(advance_intent(default), hostile.center, "crushing")
    } else {
        let reference = if default.is_attack_class() {
            field.target
        } else {
            own.center
        };
        let point = closest_other_group(field.own_groups, index, reference).unwrap_or(own.center);
        decide_as(Intent::ReGroup, point, "gathering")
    };

    log_decision(own, &decision, &hostile.power);
    decision
}

fn main_army_share(own: &CombatGroup<'_>, total: &PowerValue) -> f32 {
    if total.power <= 0.0 {
        return 1.0;
    }
    own.power.power / total.power
}

/// Center of the nearest other friendly group within the search distance.
fn fallback_group(cfg: &EngagementConfig, field: &Battlefield<'_, '_>, index: usize) -> Option<Point2> {
    let own = &field.own_groups[index];
    field
        .own_groups
        .iter()
        .enumerate()
        .filter(|(i, g)| *i != index && g.center.distance(own.center) <= cfg.regroup_search_distance)
        .min_by(|(_, a), (_, b)| {
            a.center
                .distance(own.center)
                .total_cmp(&b.center.distance(own.center))
        })
        .map(|(_, g)| g.center)
}

/// Center of the other friendly group closest to `reference`.
fn closest_other_group(groups: &[CombatGroup<'_>], index: usize, reference: Point2) -> Option<Point2> {
    groups
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .min_by(|(_, a), (_, b)| {
            a.center
                .distance(reference)
                .total_cmp(&b.center.distance(reference))
        })
        .map(|(_, g)| g.center)
}

fn log_decision(own: &CombatGroup<'_>, decision: &GroupDecision, enemy: &PowerValue) {
    debug!(
        units = own.len(),
        center_x = own.center.x,
        center_y = own.center.y,
        power = own.power.power,
        enemy_power = enemy.power,
        in_combat = decision.in_combat,
        too_spread = own.too_spread,
        intent = ?decision.intent,
        reason = decision.reason,
        "group decision"
    );
}
