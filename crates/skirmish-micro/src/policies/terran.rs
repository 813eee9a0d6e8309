//! Terran micro: stim, siege and burrow toggles, flight modes and casters.

use std::collections::HashMap;

use skirmish_core::action::{Action, Target};
use skirmish_core::enums::{AbilityId, UnitTypeId};
use skirmish_core::types::towards;
use skirmish_core::unit::{Buffs, CombatUnit};
use skirmish_core::unit_data::Attributes;
use skirmish_core::Result;

use super::{in_cast_range, pick_best};
use crate::context::{GroupOrder, MicroContext};
use crate::generic::{hold_back, GenericMicro};
use crate::modes::ModeSwitch;
use crate::policy::MicroPolicy;
use crate::targeting::{best_cluster, nearest_threat, within};

// --- Bio ---

/// Stim costs health, so only healthy units take it.
const STIM_MIN_HULL: f32 = 0.5;

/// Stim once an enemy is this far beyond weapon range.
const STIM_REACH: f32 = 2.0;

#[derive(Debug, Default)]
pub struct BioPolicy {
    generic: GenericMicro,
}

impl BioPolicy {
    fn stim(
        &self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        if !group.intent.is_attack_class()
            || unit.has_buff(Buffs::STIMMED)
            || unit.hull_fraction() < STIM_MIN_HULL
        {
            return Ok(None);
        }
        let engaged = group
            .enemies
            .iter()
            .any(|e| unit.can_attack(e) && unit.distance_to(e) <= unit.real_range_vs(e) + STIM_REACH);
        if !engaged {
            return Ok(None);
        }
        let ability = match unit.unit_type {
            UnitTypeId::Marauder => AbilityId::StimMarauder,
            _ => AbilityId::StimMarine,
        };
        if !ctx.can_cast(unit, ability)? {
            return Ok(None);
        }
        Ok(Some(Action::cast(ability, Target::None).with_note("stim")))
    }
}

impl MicroPolicy for BioPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self.stim(ctx, group, unit)?;
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- Siege tank ---

/// Ground enemies this close make a mobile tank siege up.
const SIEGE_TRIGGER: f32 = 15.0;
const SIEGE_DELAY: f32 = 0.3;
const UNSIEGE_DELAY: f32 = 2.0;

#[derive(Debug, Default)]
pub struct SiegeTankPolicy {
    generic: GenericMicro,
    modes: ModeSwitch,
}

impl MicroPolicy for SiegeTankPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if unit.unit_type != UnitTypeId::SiegeTankSieged {
            return self.generic.solve(ctx, group, unit, action, None);
        }
        // Sieged tanks cannot move: shoot what is in range, otherwise sit.
        if let Some(target) = self
            .generic
            .focus
            .select(ctx.config, unit, &group.enemies, group.intent, 0.0)
        {
            return Ok(Action::attack_unit(target.tag));
        }
        Ok(Action::attack_to(unit.position).with_note("sieged"))
    }

    fn final_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let ground_enemies = ctx
            .enemies_near(unit, unit.position, SIEGE_TRIGGER)
            .into_iter()
            .any(|e| !e.is_flying);
        let now = ctx.now();

        match unit.unit_type {
            UnitTypeId::SiegeTank => {
                if !group.intent.is_retreat() && ground_enemies {
                    if self.modes.request(unit.tag, AbilityId::SiegeMode, now, SIEGE_DELAY) {
                        self.modes.cancel(unit.tag);
                        return Ok(Action::cast(AbilityId::SiegeMode, Target::None).with_note("siege"));
                    }
                } else {
                    self.modes.cancel(unit.tag);
                }
            }
            UnitTypeId::SiegeTankSieged => {
                let retreating = group.intent.is_retreat();
                if retreating || !ground_enemies {
                    let delay = if retreating { 0.0 } else { UNSIEGE_DELAY };
                    if self.modes.request(unit.tag, AbilityId::Unsiege, now, delay) {
                        self.modes.cancel(unit.tag);
                        return Ok(Action::cast(AbilityId::Unsiege, Target::None).with_note("unsiege"));
                    }
                } else {
                    self.modes.cancel(unit.tag);
                }
            }
            _ => {}
        }
        Ok(action)
    }
}

// --- Widow mine ---

const MINE_BURROW_TRIGGER: f32 = 7.0;
const MINE_UNBURROW_CLEAR: f32 = 12.0;
const MINE_UNBURROW_DELAY: f32 = 3.0;

#[derive(Debug, Default)]
pub struct WidowMinePolicy {
    generic: GenericMicro,
    modes: ModeSwitch,
}

impl MicroPolicy for WidowMinePolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if unit.is_burrowed {
            return Ok(Action::attack_to(unit.position).with_note("armed"));
        }
        self.generic.solve(ctx, group, unit, action, None)
    }

    fn final_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let now = ctx.now();
        if unit.is_burrowed {
            let retreating = group.intent.is_retreat();
            let clear = ctx.enemies_near(unit, unit.position, MINE_UNBURROW_CLEAR).is_empty();
            if retreating || clear {
                let delay = if retreating { 0.0 } else { MINE_UNBURROW_DELAY };
                if self.modes.request(unit.tag, AbilityId::UnburrowWidowMine, now, delay) {
                    self.modes.cancel(unit.tag);
                    return Ok(Action::cast(AbilityId::UnburrowWidowMine, Target::None));
                }
            } else {
                self.modes.cancel(unit.tag);
            }
            return Ok(action);
        }

        let prey = ctx
            .enemies_near(unit, unit.position, MINE_BURROW_TRIGGER)
            .into_iter()
            .any(|e| !e.is_structure);
        if group.intent.is_attack_class() && prey {
            return Ok(Action::cast(AbilityId::BurrowWidowMine, Target::None).with_note("burrow"));
        }
        Ok(action)
    }
}

// --- Liberator ---

const LIBERATOR_ZONE_RADIUS: f32 = 5.0;
const LIBERATOR_TRIGGER: f32 = 12.0;
/// Anti-air units nearby that make landing a zone too risky.
const LIBERATOR_MAX_AA: usize = 2;
const LIBERATOR_SIEGE_DELAY: f32 = 0.5;
const LIBERATOR_UNSIEGE_DELAY: f32 = 1.5;

#[derive(Debug, Default)]
pub struct LiberatorPolicy {
    generic: GenericMicro,
    modes: ModeSwitch,
}

impl MicroPolicy for LiberatorPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if unit.unit_type == UnitTypeId::LiberatorAg {
            if let Some(target) = self
                .generic
                .focus
                .select(ctx.config, unit, &group.enemies, group.intent, 0.0)
            {
                return Ok(Action::attack_unit(target.tag));
            }
            return Ok(Action::attack_to(unit.position).with_note("defending"));
        }
        self.generic.solve(ctx, group, unit, action, None)
    }

    fn final_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let near = ctx.enemies_near(unit, unit.position, LIBERATOR_TRIGGER);
        let ground: Vec<&CombatUnit> = near.iter().copied().filter(|e| !e.is_flying).collect();
        let anti_air = near.iter().filter(|e| e.can_attack_air()).count();
        let now = ctx.now();

        match unit.unit_type {
            UnitTypeId::Liberator => {
                let wanted = group.intent.is_attack_class()
                    && !ground.is_empty()
                    && anti_air <= LIBERATOR_MAX_AA
                    && unit.hull_fraction() > 0.5;
                if !wanted {
                    self.modes.cancel(unit.tag);
                    return Ok(action);
                }
                if !self
                    .modes
                    .request(unit.tag, AbilityId::LiberatorAgMode, now, LIBERATOR_SIEGE_DELAY)
                {
                    return Ok(action);
                }
                let Some((zone, _)) = best_cluster(
                    &ground,
                    unit.position,
                    LIBERATOR_TRIGGER,
                    LIBERATOR_ZONE_RADIUS,
                    |e| e.stats().weight,
                ) else {
                    return Ok(action);
                };
                self.modes.cancel(unit.tag);
                let reach = AbilityId::LiberatorAgMode.cast_range().min(unit.distance_to_point(zone));
                let point = towards(unit.position, zone, reach);
                Ok(Action::cast(AbilityId::LiberatorAgMode, Target::Point(point)).with_note("zone"))
            }
            UnitTypeId::LiberatorAg => {
                let retreating = group.intent.is_retreat();
                if retreating || ground.is_empty() || unit.hull_fraction() < 0.3 {
                    let delay = if retreating { 0.0 } else { LIBERATOR_UNSIEGE_DELAY };
                    if self.modes.request(unit.tag, AbilityId::LiberatorAaMode, now, delay) {
                        self.modes.cancel(unit.tag);
                        return Ok(Action::cast(AbilityId::LiberatorAaMode, Target::None).with_note("lift zone"));
                    }
                } else {
                    self.modes.cancel(unit.tag);
                }
                Ok(action)
            }
            _ => Ok(action),
        }
    }
}

// --- Medivac ---

const HEAL_SCAN: f32 = 10.0;
const AFTERBURNER_HULL: f32 = 0.5;

#[derive(Debug, Default)]
pub struct MedivacPolicy;

impl MicroPolicy for MedivacPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        let threatened = nearest_threat(unit, &group.enemies)
            .is_some_and(|t| t.in_real_range(unit) || t.distance_to(unit) < 3.0);
        if (group.intent.is_retreat() || (threatened && unit.hull_fraction() < AFTERBURNER_HULL))
            && ctx.can_cast(unit, AbilityId::MedivacAfterburners)?
        {
            return Ok(Action::cast(AbilityId::MedivacAfterburners, Target::None).with_note("boost"));
        }
        if group.intent.is_retreat() {
            return Ok(Action::move_to(group.target).with_note("retreat"));
        }

        let wounded = pick_best(within(&group.allies, unit.position, HEAL_SCAN), |a| {
            if a.tag == unit.tag || a.is_flying || !a.has_attribute(Attributes::BIOLOGICAL) {
                return 0.0;
            }
            1.0 - a.hull_fraction()
        });
        if let Some(ally) = wounded {
            return Ok(Action::move_to(ally.position).with_note("heal"));
        }
        Ok(Action::attack_to(group.center).with_note("escort"))
    }
}

// --- Viking ---

const VIKING_SCAN: f32 = 12.0;
const VIKING_LAND_DELAY: f32 = 1.0;
const VIKING_LIFT_DELAY: f32 = 0.5;

#[derive(Debug, Default)]
pub struct VikingPolicy {
    generic: GenericMicro,
    modes: ModeSwitch,
}

impl MicroPolicy for VikingPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        self.generic.solve(ctx, group, unit, action, None)
    }

    fn final_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let near = ctx.enemies_near(unit, unit.position, VIKING_SCAN);
        let air_threat = near.iter().any(|e| e.is_flying);
        let ground_targets = near.iter().any(|e| !e.is_flying && !e.is_structure);
        let now = ctx.now();

        match unit.unit_type {
            UnitTypeId::VikingFighter => {
                let land = group.intent.is_attack_class()
                    && !air_threat
                    && ground_targets
                    && unit.hull_fraction() > 0.5;
                if land {
                    if self
                        .modes
                        .request(unit.tag, AbilityId::VikingAssaultMode, now, VIKING_LAND_DELAY)
                    {
                        self.modes.cancel(unit.tag);
                        return Ok(Action::cast(AbilityId::VikingAssaultMode, Target::None).with_note("land"));
                    }
                } else {
                    self.modes.cancel(unit.tag);
                }
            }
            UnitTypeId::VikingAssault => {
                let retreating = group.intent.is_retreat();
                if air_threat || retreating || !ground_targets {
                    let delay = if retreating { 0.0 } else { VIKING_LIFT_DELAY };
                    if self.modes.request(unit.tag, AbilityId::VikingFighterMode, now, delay) {
                        self.modes.cancel(unit.tag);
                        return Ok(Action::cast(AbilityId::VikingFighterMode, Target::None).with_note("lift"));
                    }
                } else {
                    self.modes.cancel(unit.tag);
                }
            }
            _ => {}
        }
        Ok(action)
    }
}

// --- Cyclone ---

const LOCK_DURATION: f32 = 14.0;
const LOCK_MIN_DISTANCE: f32 = 7.0;
const LOCK_MAX_DISTANCE: f32 = 12.0;

#[derive(Debug, Default)]
pub struct CyclonePolicy {
    generic: GenericMicro,
    /// Lock target and the game time the lock started.
    locks: HashMap<u64, (u64, f32)>,
}

impl CyclonePolicy {
    fn lock_on(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        if !group.intent.is_attack_class() {
            return Ok(None);
        }
        let now = ctx.now();

        if let Some(&(target_tag, since)) = self.locks.get(&unit.tag) {
            if now - since < LOCK_DURATION {
                if let Some(target) = group.enemies.iter().find(|e| e.tag == target_tag) {
                    let distance = unit.distance_to(target);
                    if distance < LOCK_MIN_DISTANCE {
                        let back = towards(unit.position, target.position, -(LOCK_MIN_DISTANCE + 1.0 - distance));
                        return Ok(Some(Action::move_to(back).with_note("lock kite")));
                    }
                    if distance > LOCK_MAX_DISTANCE {
                        let close = towards(target.position, unit.position, LOCK_MAX_DISTANCE - 2.0);
                        return Ok(Some(Action::move_to(close).with_note("lock chase")));
                    }
                    return Ok(None);
                }
            }
            self.locks.remove(&unit.tag);
        }

        let cast_range = AbilityId::LockOn.cast_range();
        let target = pick_best(group.enemies.iter().copied(), |e| {
            if e.is_structure || !in_cast_range(unit, e, cast_range) {
                return 0.0;
            }
            e.stats().weight * (0.5 + e.health_fraction())
        });
        let Some(target) = target else {
            return Ok(None);
        };
        if !ctx.can_cast(unit, AbilityId::LockOn)? {
            return Ok(None);
        }
        self.locks.insert(unit.tag, (target.tag, now));
        Ok(Some(Action::cast(AbilityId::LockOn, Target::Unit(target.tag)).with_note("lock on")))
    }
}

impl MicroPolicy for CyclonePolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self.lock_on(ctx, group, unit)?;
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- Raven ---

const RAVEN_SAFE_DISTANCE: f32 = 8.0;
const TURRET_TRIGGER: f32 = 8.0;

#[derive(Debug, Default)]
pub struct RavenPolicy;

impl MicroPolicy for RavenPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        if group.intent.is_attack_class() && group.has_enemies() {
            let matrix_range = AbilityId::InterferenceMatrix.cast_range();
            let disable = pick_best(group.enemies.iter().copied(), |e| {
                let mechanical = e.has_attribute(Attributes::MECHANICAL) || e.has_attribute(Attributes::PSIONIC);
                let worth = e.unit_type.is_high_value() || e.unit_type.is_caster();
                if !mechanical || !worth || e.has_buff(Buffs::INTERFERENCE) {
                    return 0.0;
                }
                if !in_cast_range(unit, e, matrix_range) {
                    return 0.0;
                }
                e.stats().weight
            });
            if let Some(target) = disable {
                if ctx.can_cast(unit, AbilityId::InterferenceMatrix)? {
                    return Ok(Action::cast(AbilityId::InterferenceMatrix, Target::Unit(target.tag))
                        .with_note("matrix"));
                }
            }

            let close = within(&group.enemies, unit.position, TURRET_TRIGGER)
                .filter(|e| !e.is_structure)
                .min_by(|a, b| {
                    unit.distance_to(a)
                        .total_cmp(&unit.distance_to(b))
                        .then(a.tag.cmp(&b.tag))
                });
            if let Some(enemy) = close {
                if ctx.can_cast(unit, AbilityId::BuildAutoTurret)? {
                    let spot = towards(unit.position, enemy.position, AbilityId::BuildAutoTurret.cast_range());
                    return Ok(Action::cast(AbilityId::BuildAutoTurret, Target::Point(spot)).with_note("turret"));
                }
            }
        }
        hold_back(ctx, group, unit, RAVEN_SAFE_DISTANCE)
    }
}

// --- Battlecruiser ---

const JUMP_HULL: f32 = 0.5;
const YAMATO_MIN_HEALTH: f32 = 200.0;

#[derive(Debug)]
pub struct BattlecruiserPolicy {
    generic: GenericMicro,
}

impl Default for BattlecruiserPolicy {
    fn default() -> Self {
        Self {
            generic: GenericMicro::without_kite(),
        }
    }
}

impl BattlecruiserPolicy {
    fn abilities(
        &self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        if group.intent.is_retreat() {
            if unit.hull_fraction() < JUMP_HULL && ctx.can_cast(unit, AbilityId::TacticalJump)? {
                return Ok(Some(
                    Action::cast(AbilityId::TacticalJump, Target::Point(group.target)).with_note("jump out"),
                ));
            }
            return Ok(None);
        }
        if !group.intent.is_attack_class() {
            return Ok(None);
        }
        let yamato_range = AbilityId::YamatoCannon.cast_range();
        let target = pick_best(group.enemies.iter().copied(), |e| {
            let health = e.health + e.shield;
            if !in_cast_range(unit, e, yamato_range) {
                return 0.0;
            }
            if !e.unit_type.is_high_value() && health < YAMATO_MIN_HEALTH {
                return 0.0;
            }
            health
        });
        let Some(target) = target else {
            return Ok(None);
        };
        if !ctx.can_cast(unit, AbilityId::YamatoCannon)? {
            return Ok(None);
        }
        Ok(Some(Action::cast(AbilityId::YamatoCannon, Target::Unit(target.tag)).with_note("yamato")))
    }
}

impl MicroPolicy for BattlecruiserPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self.abilities(ctx, group, unit)?;
        self.generic.solve(ctx, group, unit, action, special)
    }
}
