//! Protoss micro: blink, shades, shields, storms and the air fleet.

use std::collections::{HashMap, HashSet};

use skirmish_core::action::{Action, Target};
use skirmish_core::enums::{AbilityId, Intent};
use skirmish_core::types::{towards, Point2};
use skirmish_core::unit::{Buffs, CombatUnit};
use skirmish_core::unit_data::Attributes;
use skirmish_core::Result;

use super::{in_cast_range, pick_best};
use crate::context::{GroupOrder, MicroContext};
use crate::generic::{hold_back, GenericMicro};
use crate::policy::MicroPolicy;
use crate::targeting::{best_cluster, cluster_value, nearest, nearest_threat, within};

// --- Stalker ---

const BLINK_DISTANCE: f32 = 8.0;
const BLINK_HULL: f32 = 0.5;

#[derive(Debug, Default)]
pub struct StalkerPolicy {
    generic: GenericMicro,
}

impl StalkerPolicy {
    fn blink(
        &self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        if unit.shield > 0.0 || unit.hull_fraction() > BLINK_HULL {
            return Ok(None);
        }
        let Some(threat) = nearest_threat(unit, &group.enemies) else {
            return Ok(None);
        };
        if unit.distance_to(threat) > threat.real_range_vs(unit) + 1.0 {
            return Ok(None);
        }
        if !ctx.can_cast(unit, AbilityId::Blink)? {
            return Ok(None);
        }
        let destination = if group.intent.is_retreat() {
            towards(unit.position, group.target, BLINK_DISTANCE)
        } else {
            towards(unit.position, threat.position, -BLINK_DISTANCE)
        };
        Ok(Some(Action::cast(AbilityId::Blink, Target::Point(destination)).with_note("blink back")))
    }
}

impl MicroPolicy for StalkerPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self.blink(ctx, group, unit)?;
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- Adept and its shade ---

const SHADE_MAX_REACH: f32 = 12.0;
const SHADE_ESCAPE_DISTANCE: f32 = 10.0;

#[derive(Debug, Default)]
pub struct AdeptPolicy {
    generic: GenericMicro,
}

impl AdeptPolicy {
    fn shade(
        &self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        let point = if group.intent.is_retreat() {
            let chased = nearest_threat(unit, &group.enemies).is_some_and(|t| unit.distance_to(t) < 4.0);
            if !chased {
                return Ok(None);
            }
            towards(unit.position, group.target, SHADE_ESCAPE_DISTANCE)
        } else if group.intent.is_attack_class() {
            let prey = pick_best(group.enemies.iter().copied(), |e| {
                if e.is_flying || !(e.is_worker() || e.has_attribute(Attributes::LIGHT)) {
                    return 0.0;
                }
                let distance = unit.distance_to(e);
                if distance <= unit.real_range_vs(e) + 2.0 || distance > SHADE_MAX_REACH {
                    return 0.0;
                }
                let worker_bonus = if e.is_worker() && group.intent == Intent::Harass { 3.0 } else { 1.0 };
                e.stats().weight * worker_bonus
            });
            match prey {
                Some(prey) => prey.position,
                None => return Ok(None),
            }
        } else {
            return Ok(None);
        };

        if !ctx.can_cast(unit, AbilityId::AdeptPhaseShift)? {
            return Ok(None);
        }
        Ok(Some(Action::cast(AbilityId::AdeptPhaseShift, Target::Point(point)).with_note("shade")))
    }
}

impl MicroPolicy for AdeptPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self.shade(ctx, group, unit)?;
        self.generic.solve(ctx, group, unit, action, special)
    }
}

/// The phase-shift projection: scouts ahead toward light units.
#[derive(Debug, Default)]
pub struct AdeptShadePolicy;

impl MicroPolicy for AdeptShadePolicy {
    fn unit_solve(
        &mut self,
        _ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        if group.intent.is_retreat() {
            return Ok(Action::move_to(group.target).with_note("shade retreat"));
        }
        let prey = nearest(unit.position, &group.enemies, |e| {
            !e.is_flying && (e.is_worker() || e.has_attribute(Attributes::LIGHT))
        });
        match prey {
            Some(prey) => Ok(Action::move_to(prey.position).with_note("shade")),
            None => Ok(Action::move_to(group.target).with_note("shade")),
        }
    }
}

// --- Sentry ---

const SHIELD_RADIUS: f32 = 8.0;
const SHIELD_MIN_RANGED: usize = 2;

#[derive(Debug, Default)]
pub struct SentryPolicy {
    generic: GenericMicro,
    /// Sentries picked to shield this tick.
    shield_casters: HashSet<u64>,
}

impl MicroPolicy for SentryPolicy {
    fn group_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        units: &[&CombatUnit],
        default: Action,
    ) -> Result<Action> {
        for unit in units {
            self.shield_casters.remove(&unit.tag);
        }
        if !group.intent.is_attack_class() && group.intent != Intent::DefensiveRetreat {
            return Ok(default);
        }
        if group.allies.iter().any(|a| a.has_buff(Buffs::GUARDIAN_SHIELD)) {
            return Ok(default);
        }
        let ranged = within(&group.enemies, group.center, SHIELD_RADIUS)
            .filter(|e| e.stats().ground_range > 1.0)
            .count();
        if ranged < SHIELD_MIN_RANGED {
            return Ok(default);
        }
        // One shield per group.
        for unit in units {
            if ctx.can_cast(unit, AbilityId::GuardianShield)? {
                self.shield_casters.insert(unit.tag);
                break;
            }
        }
        Ok(default)
    }

    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self
            .shield_casters
            .remove(&unit.tag)
            .then(|| Action::cast(AbilityId::GuardianShield, Target::None).with_note("shield"));
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- High templar ---

const STORM_RADIUS: f32 = 1.5;
const STORM_MIN_VALUE: f32 = 4.0;
/// Friendly value under a storm may not exceed this share of the hostile value.
const STORM_FRIENDLY_SHARE: f32 = 0.5;
const FEEDBACK_MIN_ENERGY: f32 = 50.0;
const TEMPLAR_SAFE_DISTANCE: f32 = 6.0;

#[derive(Debug, Default)]
pub struct HighTemplarPolicy {
    storms: HashMap<u64, Point2>,
    feedbacks: HashMap<u64, u64>,
}

impl MicroPolicy for HighTemplarPolicy {
    /// Assign storms and feedbacks across the whole group so no two
    /// templars spend energy on the same enemies.
    fn group_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        units: &[&CombatUnit],
        default: Action,
    ) -> Result<Action> {
        for unit in units {
            self.storms.remove(&unit.tag);
            self.feedbacks.remove(&unit.tag);
        }
        if !group.intent.is_attack_class() || !group.has_enemies() {
            return Ok(default);
        }

        let feedback_range = AbilityId::Feedback.cast_range();
        let mut drained: HashSet<u64> = HashSet::new();
        for unit in units {
            let target = pick_best(group.enemies.iter().copied(), |e| {
                if drained.contains(&e.tag)
                    || !e.unit_type.is_caster()
                    || e.energy < FEEDBACK_MIN_ENERGY
                    || !in_cast_range(unit, e, feedback_range)
                {
                    return 0.0;
                }
                e.energy
            });
            if let Some(target) = target {
                if ctx.can_cast(unit, AbilityId::Feedback)? {
                    drained.insert(target.tag);
                    self.feedbacks.insert(unit.tag, target.tag);
                }
            }
        }

        let mut covered: HashSet<u64> = HashSet::new();
        for unit in units {
            if self.feedbacks.contains_key(&unit.tag) || !ctx.can_cast(unit, AbilityId::PsiStorm)? {
                continue;
            }
            let open: Vec<&CombatUnit> = group
                .enemies
                .iter()
                .copied()
                .filter(|e| !e.is_structure && !covered.contains(&e.tag))
                .collect();
            let cast_range = AbilityId::PsiStorm.cast_range() + STORM_RADIUS;
            let Some((point, value)) =
                best_cluster(&open, unit.position, cast_range, STORM_RADIUS, |e| e.stats().weight)
            else {
                continue;
            };
            if value < STORM_MIN_VALUE {
                continue;
            }
            let friendly = cluster_value(&group.allies, point, STORM_RADIUS, |a| a.stats().weight);
            if friendly > value * STORM_FRIENDLY_SHARE {
                continue;
            }
            covered.extend(within(&open, point, STORM_RADIUS).map(|e| e.tag));
            self.storms.insert(unit.tag, point);
        }
        Ok(default)
    }

    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        if let Some(point) = self.storms.remove(&unit.tag) {
            return Ok(Action::cast(AbilityId::PsiStorm, Target::Point(point)).with_note("storm"));
        }
        if let Some(target) = self.feedbacks.remove(&unit.tag) {
            return Ok(Action::cast(AbilityId::Feedback, Target::Unit(target)).with_note("feedback"));
        }
        hold_back(ctx, group, unit, TEMPLAR_SAFE_DISTANCE)
    }
}

// --- Disruptor and purification nova ---

const NOVA_RADIUS: f32 = 1.5;
const NOVA_MIN_VALUE: f32 = 3.0;
const NOVA_STEER_RANGE: f32 = 5.0;
const DISRUPTOR_SAFE_DISTANCE: f32 = 8.0;

#[derive(Debug, Default)]
pub struct DisruptorPolicy;

impl MicroPolicy for DisruptorPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        if group.intent.is_attack_class() && group.has_enemies() {
            let ground: Vec<&CombatUnit> = group
                .enemies
                .iter()
                .copied()
                .filter(|e| !e.is_flying && !e.is_structure)
                .collect();
            let cast_range = AbilityId::PurificationNova.cast_range();
            if let Some((point, value)) =
                best_cluster(&ground, unit.position, cast_range, NOVA_RADIUS, |e| e.stats().weight)
            {
                if value >= NOVA_MIN_VALUE && ctx.can_cast(unit, AbilityId::PurificationNova)? {
                    return Ok(Action::cast(AbilityId::PurificationNova, Target::Point(point)).with_note("nova"));
                }
            }
        }
        hold_back(ctx, group, unit, DISRUPTOR_SAFE_DISTANCE)
    }
}

/// Steers a launched nova into the densest ground cluster.
#[derive(Debug, Default)]
pub struct NovaPolicy;

impl MicroPolicy for NovaPolicy {
    fn unit_solve(
        &mut self,
        _ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        let ground: Vec<&CombatUnit> = group
            .enemies
            .iter()
            .copied()
            .filter(|e| !e.is_flying && !e.is_structure)
            .collect();
        let value = |e: &CombatUnit| e.stats().weight;
        if let Some((point, _)) = best_cluster(&ground, unit.position, NOVA_STEER_RANGE, NOVA_RADIUS, value) {
            let friendly = cluster_value(&group.allies, point, NOVA_RADIUS, |a| {
                if a.tag == unit.tag {
                    0.0
                } else {
                    a.stats().weight
                }
            });
            if friendly < cluster_value(&ground, point, NOVA_RADIUS, value) {
                return Ok(Action::move_to(point).with_note("nova"));
            }
        }
        match nearest(unit.position, &ground, |_| true) {
            Some(enemy) => Ok(Action::move_to(enemy.position).with_note("nova")),
            None => Ok(Action::move_to(unit.position).with_note("nova idle")),
        }
    }
}

// --- Void ray ---

const ALIGNMENT_RANGE: f32 = 6.0;

#[derive(Debug, Default)]
pub struct VoidRayPolicy {
    generic: GenericMicro,
}

impl MicroPolicy for VoidRayPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let armored_close = within(&group.enemies, unit.position, ALIGNMENT_RANGE)
            .any(|e| e.has_attribute(Attributes::ARMORED));
        let special = if group.intent.is_attack_class()
            && armored_close
            && ctx.can_cast(unit, AbilityId::PrismaticAlignment)?
        {
            Some(Action::cast(AbilityId::PrismaticAlignment, Target::None).with_note("alignment"))
        } else {
            None
        };
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- Phoenix ---

#[derive(Debug, Default)]
pub struct PhoenixPolicy {
    generic: GenericMicro,
}

impl MicroPolicy for PhoenixPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let mut special = None;
        if group.intent.is_attack_class() {
            let beam_range = AbilityId::GravitonBeam.cast_range();
            let lift = pick_best(group.enemies.iter().copied(), |e| {
                if e.is_flying
                    || e.is_structure
                    || e.has_attribute(Attributes::MASSIVE)
                    || e.has_buff(Buffs::GRAVITON)
                    || !in_cast_range(unit, e, beam_range)
                {
                    return 0.0;
                }
                let priority = if e.unit_type.is_caster() || e.unit_type.is_high_value() { 2.0 } else { 1.0 };
                e.stats().weight * priority
            });
            if let Some(target) = lift {
                if ctx.can_cast(unit, AbilityId::GravitonBeam)? {
                    special = Some(
                        Action::cast(AbilityId::GravitonBeam, Target::Unit(target.tag)).with_note("lift"),
                    );
                }
            }
        }
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- Oracle ---

const BEAM_TRIGGER: f32 = 6.0;
const BEAM_CLEAR: f32 = 8.0;
const BEAM_MIN_ENERGY: f32 = 50.0;
const BEAM_OFF_ENERGY: f32 = 5.0;
const ORACLE_SAFE_DISTANCE: f32 = 8.0;

#[derive(Debug, Default)]
pub struct OraclePolicy {
    generic: GenericMicro,
}

impl MicroPolicy for OraclePolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if unit.has_buff(Buffs::PULSAR_BEAM) {
            return self.generic.solve(ctx, group, unit, action, None);
        }
        let prey = within(&group.enemies, unit.position, BEAM_TRIGGER)
            .any(|e| !e.is_flying && (e.is_worker() || e.has_attribute(Attributes::LIGHT)));
        if group.intent.is_attack_class()
            && prey
            && unit.energy >= BEAM_MIN_ENERGY
            && ctx.can_cast(unit, AbilityId::PulsarBeamOn)?
        {
            return Ok(Action::cast(AbilityId::PulsarBeamOn, Target::None).with_note("beam on"));
        }
        hold_back(ctx, group, unit, ORACLE_SAFE_DISTANCE)
    }

    fn final_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if !unit.has_buff(Buffs::PULSAR_BEAM) {
            return Ok(action);
        }
        let idle = ctx
            .enemies_near(unit, unit.position, BEAM_CLEAR)
            .into_iter()
            .all(|e| e.is_flying);
        if group.intent.is_retreat() || idle || unit.energy < BEAM_OFF_ENERGY {
            return Ok(Action::cast(AbilityId::PulsarBeamOff, Target::None).with_note("beam off"));
        }
        Ok(action)
    }
}

// --- Tempest ---

#[derive(Debug, Default)]
pub struct TempestPolicy {
    generic: GenericMicro,
}

impl TempestPolicy {
    /// Stay at full range whenever a shorter-ranged threat closes in.
    fn keep_range(
        &self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        if !group.intent.is_attack_class() || group.intent == Intent::Push {
            return Ok(None);
        }
        let Some(threat) = nearest_threat(unit, &group.enemies) else {
            return Ok(None);
        };
        let own_range = unit.real_range_vs(threat);
        let threat_range = threat.real_range_vs(unit);
        let distance = unit.distance_to(threat);
        if own_range <= threat_range || distance > threat_range + 1.0 {
            return Ok(None);
        }
        let step = (own_range - 0.5 - distance).max(1.0);
        let away = towards(unit.position, threat.position, -step);
        let waypoint = ctx.paths.find_path(unit.position, away, step)?;
        Ok(Some(Action::move_to(waypoint).with_note("outrange")))
    }
}

impl MicroPolicy for TempestPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self.keep_range(ctx, group, unit)?;
        self.generic.solve(ctx, group, unit, action, special)
    }
}
