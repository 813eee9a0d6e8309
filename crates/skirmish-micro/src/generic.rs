//! Fallback micro shared by every policy: per-intent handling, kiting,
//! pushing and focus fire.

use skirmish_core::action::Action;
use skirmish_core::enums::Intent;
use skirmish_core::types::towards;
use skirmish_core::unit::CombatUnit;
use skirmish_core::Result;

use crate::context::{GroupOrder, MicroContext};
use crate::targeting::{nearest, nearest_threat, FocusFire};

/// Distance inside own range a pushing unit aims for.
const PUSH_DEPTH: f32 = 1.0;

/// Minimum back-step when kiting.
const MIN_KITE_STEP: f32 = 1.0;

#[derive(Debug)]
pub struct GenericMicro {
    pub focus: FocusFire,
    kites: bool,
}

impl Default for GenericMicro {
    fn default() -> Self {
        Self {
            focus: FocusFire::default(),
            kites: true,
        }
    }
}

impl GenericMicro {
    /// Micro for units that gain nothing from stepping back.
    pub fn without_kite() -> Self {
        Self {
            focus: FocusFire::default(),
            kites: false,
        }
    }

    /// Resolve one unit. `special` is the archetype's own decision, which
    /// wins whenever present.
    pub fn solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
        special: Option<Action>,
    ) -> Result<Action> {
        if let Some(special) = special {
            return Ok(special);
        }
        let cfg = ctx.config;

        match group.intent {
            Intent::PanicRetreat => Ok(action),
            Intent::DefensiveRetreat => {
                if unit.weapon_ready() && unit.health_fraction() >= cfg.retreat_health {
                    if let Some(target) =
                        self.focus.select(cfg, unit, &group.enemies, group.intent, 0.0)
                    {
                        return Ok(Action::attack_unit(target.tag).with_note("cover"));
                    }
                }
                Ok(action)
            }
            Intent::ReGroup => {
                if unit.distance_to_point(group.target) > cfg.regroup_radius {
                    return Ok(Action::move_to(group.target).with_note("regroup"));
                }
                if let Some(target) = self.focus.select(cfg, unit, &group.enemies, group.intent, 0.0)
                {
                    return Ok(Action::attack_unit(target.tag));
                }
                Ok(Action::attack_to(group.target).with_note("gathered"))
            }
            Intent::Attack | Intent::SearchAndDestroy | Intent::Push | Intent::Harass => {
                self.fight(ctx, group, unit, action)
            }
        }
    }

    /// Kite, then push, then focus fire, then the group's action.
    pub fn fight(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let cfg = ctx.config;

        if self.kites && group.intent != Intent::Push {
            if let Some(kite) = kite(ctx, group, unit, &action)? {
                return Ok(kite);
            }
        }
        if let Some(push) = push(ctx, group, unit, &action)? {
            return Ok(push);
        }
        if let Some(target) = self.focus.select(
            cfg,
            unit,
            &group.enemies,
            group.intent,
            cfg.target_scan_extra,
        ) {
            return Ok(Action::attack_unit(target.tag));
        }
        Ok(action)
    }
}

/// Step back from the nearest threat while it is outranged.
///
/// Only fires for attacking units that are hurt or reloading. Ground
/// units holding high ground over a ground threat stay put.
pub fn kite(
    ctx: &MicroContext<'_>,
    group: &GroupOrder<'_>,
    unit: &CombatUnit,
    action: &Action,
) -> Result<Option<Action>> {
    if !action.is_attack {
        return Ok(None);
    }
    let cfg = ctx.config;
    let Some(enemy) = nearest_threat(unit, &group.enemies) else {
        return Ok(None);
    };

    let own_range = unit.real_range_vs(enemy);
    if own_range <= enemy.real_range_vs(unit) {
        return Ok(None);
    }
    let distance = unit.distance_to(enemy);
    if distance >= own_range {
        return Ok(None);
    }
    if unit.health_fraction() >= cfg.retreat_health && unit.weapon_ready() {
        return Ok(None);
    }
    if !unit.is_flying && !enemy.is_flying && unit.height > enemy.height + cfg.high_ground_margin {
        return Ok(None);
    }

    let step = (own_range - distance + 1.0).max(MIN_KITE_STEP);
    let away = towards(unit.position, enemy.position, -step);
    let waypoint = ctx.paths.find_path(unit.position, away, step)?;
    Ok(Some(Action::move_to(waypoint).with_note("kite")))
}

/// Close in on the nearest target while reloading, when clearly winning.
pub fn push(
    ctx: &MicroContext<'_>,
    group: &GroupOrder<'_>,
    unit: &CombatUnit,
    action: &Action,
) -> Result<Option<Action>> {
    let cfg = ctx.config;
    if !action.is_attack || unit.weapon_ready() {
        return Ok(None);
    }
    if unit.health_fraction() <= cfg.push_health || !group.winning(1.0 + cfg.push_margin) {
        return Ok(None);
    }
    let Some(enemy) = nearest(unit.position, &group.enemies, |e| unit.can_attack(e)) else {
        return Ok(None);
    };

    let own_range = unit.real_range_vs(enemy);
    let distance = unit.distance_to(enemy);
    let stand_off = (own_range - PUSH_DEPTH).max(0.5);
    if distance <= stand_off {
        return Ok(None);
    }
    let destination = towards(enemy.position, unit.position, stand_off);
    Ok(Some(Action::move_to(destination).with_note("push")))
}

/// Keep a unit without a useful weapon out of reach behind its group.
pub fn hold_back(
    ctx: &MicroContext<'_>,
    group: &GroupOrder<'_>,
    unit: &CombatUnit,
    safe_distance: f32,
) -> Result<Action> {
    if let Some(threat) = nearest_threat(unit, &group.enemies) {
        let distance = unit.distance_to(threat);
        if distance < safe_distance {
            let step = safe_distance - distance + 1.0;
            let away = towards(unit.position, threat.position, -step);
            let waypoint = ctx.paths.find_path(unit.position, away, step)?;
            return Ok(Action::move_to(waypoint).with_note("hold back"));
        }
    }
    if group.intent.is_retreat() {
        return Ok(Action::move_to(group.target).with_note("retreat"));
    }
    Ok(Action::move_to(group.center).with_note("follow"))
}
