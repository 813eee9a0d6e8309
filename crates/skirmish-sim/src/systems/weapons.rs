//! Weapon fire: target pick, cooldowns and damage.
//!
//! All shots of a step are picked from the same snapshot and applied
//! afterwards in tag order, so fire is simultaneous.

use std::collections::HashMap;

use hecs::{Entity, World};

use skirmish_core::action::Target;
use skirmish_core::components::*;
use skirmish_core::enums::*;
use skirmish_core::unit::{Buffs, CombatUnit};
use skirmish_core::unit_data::Attributes;

use super::abilities::apply_damage;

/// Flat damage reduction per ranged hit under a guardian shield.
const GUARDIAN_SHIELD_REDUCTION: f32 = 2.0;
const BANELING_RADIUS: f32 = 2.2;
const BANELING_LIGHT_BONUS: f32 = 19.0;

#[derive(Debug, Clone, Copy)]
struct Shot {
    target: u64,
    damage: f32,
}

/// Tags that can neither move nor shoot this step.
pub fn busy_units(world: &World) -> Vec<u64> {
    let mut busy: Vec<u64> = world
        .query::<(&UnitTag, &Effects, &Morph)>()
        .iter()
        .filter(|(_, (_, effects, morph))| effects.disable_secs > 0.0 || morph.pending.is_some())
        .map(|(_, (tag, _, _))| tag.0)
        .collect();
    busy.sort_unstable();
    busy
}

/// The unit an idle or attacking unit shoots this step, if any.
fn pick_target<'a>(shooter: &CombatUnit, units: &'a [CombatUnit]) -> Option<&'a CombatUnit> {
    let hostile = |u: &&CombatUnit| u.side == shooter.side.opponent() && shooter.in_real_range(u);

    match shooter.order {
        Some((AbilityId::Move, _)) => None,
        Some((AbilityId::Attack, Target::Unit(tag))) => {
            let ordered = units
                .binary_search_by_key(&tag, |u| u.tag)
                .ok()
                .map(|i| &units[i])
                .filter(hostile);
            ordered.or_else(|| nearest_in_range(shooter, units, hostile))
        }
        _ => nearest_in_range(shooter, units, hostile),
    }
}

fn nearest_in_range<'a>(
    shooter: &CombatUnit,
    units: &'a [CombatUnit],
    filter: impl Fn(&&CombatUnit) -> bool,
) -> Option<&'a CombatUnit> {
    let mut best: Option<&CombatUnit> = None;
    for unit in units.iter().filter(|u| filter(u)) {
        if best.map_or(true, |b| shooter.distance_to(unit) < shooter.distance_to(b)) {
            best = Some(unit);
        }
    }
    best
}

fn shot_damage(shooter: &CombatUnit, target: &CombatUnit) -> f32 {
    let stats = shooter.stats();
    let dps = if target.is_flying {
        stats.air_dps
    } else {
        stats.ground_dps
    };
    let mut damage = dps * stats.weapon_period;
    if !shooter.is_melee() && target.has_buff(Buffs::GUARDIAN_SHIELD) {
        damage = (damage - GUARDIAN_SHIELD_REDUCTION).max(0.5);
    }
    damage
}

/// Count weapon cooldowns down, fire every ready weapon and apply damage.
///
/// `units` is the step's snapshot, sorted by tag.
pub fn run(world: &mut World, units: &[CombatUnit], index: &HashMap<u64, Entity>, dt: f32) {
    for (_e, weapon) in world.query_mut::<&mut Weapon>() {
        weapon.cooldown = (weapon.cooldown - dt).max(0.0);
    }
    let busy = busy_units(world);

    let mut shots: Vec<Shot> = Vec::new();
    let mut fired: Vec<(u64, f32)> = Vec::new();
    let mut detonated: Vec<u64> = Vec::new();

    for shooter in units {
        if busy.binary_search(&shooter.tag).is_ok() || shooter.weapon_cooldown - dt > 0.0 {
            continue;
        }
        let Some(target) = pick_target(shooter, units) else {
            continue;
        };

        if shooter.unit_type == UnitTypeId::Baneling {
            for victim in units.iter().filter(|u| {
                u.side == shooter.side.opponent()
                    && !u.is_flying
                    && u.distance_to(target) <= BANELING_RADIUS
            }) {
                let mut damage = shot_damage(shooter, victim);
                if victim.has_attribute(Attributes::LIGHT) {
                    damage += BANELING_LIGHT_BONUS;
                }
                shots.push(Shot {
                    target: victim.tag,
                    damage,
                });
            }
            detonated.push(shooter.tag);
            continue;
        }

        shots.push(Shot {
            target: target.tag,
            damage: shot_damage(shooter, target),
        });
        fired.push((shooter.tag, shooter.stats().weapon_period));
    }

    for (tag, period) in fired {
        if let Some(&entity) = index.get(&tag) {
            if let Ok(mut weapon) = world.get::<&mut Weapon>(entity) {
                weapon.cooldown = period;
            }
        }
    }
    for shot in shots {
        if let Some(&entity) = index.get(&shot.target) {
            if let Ok(mut vitals) = world.get::<&mut Vitals>(entity) {
                apply_damage(&mut vitals, shot.damage);
            }
        }
    }
    for tag in detonated {
        if let Some(&entity) = index.get(&tag) {
            if let Ok(mut vitals) = world.get::<&mut Vitals>(entity) {
                vitals.health = 0.0;
            }
        }
    }
}
