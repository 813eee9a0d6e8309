//! Movement system.
//!
//! Moves units toward their order's destination at their table speed.
//! Attacking units stop once something they can shoot is in range.

use hecs::World;

use skirmish_core::action::Target;
use skirmish_core::components::*;
use skirmish_core::constants::STIM_SPEED_FACTOR;
use skirmish_core::enums::*;
use skirmish_core::types::{towards, Point2};
use skirmish_core::unit::{Buffs, CombatUnit};

/// Distance at which a move order counts as arrived.
const ARRIVAL_TOLERANCE: f32 = 0.05;

/// Where `unit` wants to be, or `None` to stand still.
fn destination(unit: &CombatUnit, units: &[CombatUnit]) -> Option<Point2> {
    let (ability, target) = unit.order?;
    let target_unit = |tag: u64| {
        units
            .binary_search_by_key(&tag, |u| u.tag)
            .ok()
            .map(|i| &units[i])
    };

    match (ability, target) {
        (AbilityId::Move, Target::Point(p)) => Some(p),
        (AbilityId::Move, Target::Unit(tag)) => target_unit(tag).map(|t| t.position),
        (AbilityId::Attack, Target::Unit(tag)) => {
            let t = target_unit(tag)?;
            (!unit.in_real_range(t)).then_some(t.position)
        }
        (AbilityId::Attack, Target::Point(p)) => {
            let engaged = units
                .iter()
                .any(|u| u.side == unit.side.opponent() && unit.in_real_range(u));
            (!engaged).then_some(p)
        }
        _ => None,
    }
}

/// Integrate one step of movement.
///
/// `units` is the step's snapshot sorted by tag; `busy` the sorted tags
/// that are disabled or changing form.
pub fn run(world: &mut World, units: &[CombatUnit], busy: &[u64], dt: f32) {
    let mut moves: Vec<(u64, Point2)> = Vec::new();
    for unit in units {
        if busy.binary_search(&unit.tag).is_ok() {
            continue;
        }
        let mut speed = unit.speed();
        if unit.has_buff(Buffs::STIMMED) {
            speed *= STIM_SPEED_FACTOR;
        }
        if speed <= 0.0 {
            continue;
        }
        if let Some(goal) = destination(unit, units) {
            let step = (speed * dt).min(unit.position.distance(goal));
            moves.push((unit.tag, towards(unit.position, goal, step)));
        }
    }

    if moves.is_empty() {
        return;
    }
    for (_entity, (tag, pos, orders)) in world.query_mut::<(&UnitTag, &mut Position, &mut Orders)>() {
        let Ok(i) = moves.binary_search_by_key(&tag.0, |(t, _)| *t) else {
            continue;
        };
        let next = moves[i].1;
        pos.pos = next;
        // Plain moves end on arrival.
        if let Some((AbilityId::Move, Target::Point(p))) = orders.current {
            if next.distance(p) < ARRIVAL_TOLERANCE {
                orders.current = None;
            }
        }
    }
}
