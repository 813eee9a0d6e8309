//! Zerg micro plus melee handling shared by every race.

use std::collections::{HashMap, HashSet};

use skirmish_core::action::{Action, Target};
use skirmish_core::enums::{AbilityId, Intent, UnitTypeId};
use skirmish_core::types::{towards, Point2};
use skirmish_core::unit::{Buffs, CombatUnit};
use skirmish_core::unit_data::Attributes;
use skirmish_core::Result;

use super::{in_cast_range, pick_best};
use crate::context::{GroupOrder, MicroContext};
use crate::generic::{hold_back, GenericMicro};
use crate::modes::ModeSwitch;
use crate::policy::MicroPolicy;
use crate::targeting::{best_cluster, cluster_value, nearest, nearest_threat, within};

// --- Melee ---

/// Zerglings, zealots, ultralisks, dark templar and workers.
#[derive(Debug)]
pub struct MeleePolicy {
    generic: GenericMicro,
}

impl Default for MeleePolicy {
    fn default() -> Self {
        Self {
            generic: GenericMicro::without_kite(),
        }
    }
}

impl MicroPolicy for MeleePolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        // Melee units that stop to swing while falling back never get away.
        if group.intent == Intent::DefensiveRetreat {
            return Ok(action);
        }
        self.generic.solve(ctx, group, unit, action, None)
    }
}

// --- Roach ---

const ROACH_BURROW_HULL: f32 = 0.3;
const ROACH_UNBURROW_HULL: f32 = 0.9;
const ROACH_SAFE_UNBURROW_HULL: f32 = 0.5;
const ROACH_CLEAR: f32 = 10.0;
const ROACH_SAFE_DISTANCE: f32 = 6.0;

#[derive(Debug, Default)]
pub struct RoachPolicy {
    generic: GenericMicro,
}

impl MicroPolicy for RoachPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if unit.is_burrowed {
            return hold_back(ctx, group, unit, ROACH_SAFE_DISTANCE);
        }
        let pressed = nearest_threat(unit, &group.enemies)
            .is_some_and(|t| unit.distance_to(t) <= t.real_range_vs(unit) + 2.0);
        let special = if unit.hull_fraction() < ROACH_BURROW_HULL
            && pressed
            && ctx.can_cast(unit, AbilityId::BurrowDown)?
        {
            Some(Action::cast(AbilityId::BurrowDown, Target::None).with_note("burrow heal"))
        } else {
            None
        };
        self.generic.solve(ctx, group, unit, action, special)
    }

    fn final_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        _group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if unit.unit_type != UnitTypeId::RoachBurrowed {
            return Ok(action);
        }
        let hull = unit.hull_fraction();
        let clear = ctx.enemies_near(unit, unit.position, ROACH_CLEAR).is_empty();
        if hull >= ROACH_UNBURROW_HULL || (clear && hull >= ROACH_SAFE_UNBURROW_HULL) {
            return Ok(Action::cast(AbilityId::BurrowUp, Target::None).with_note("unburrow"));
        }
        Ok(action)
    }
}

// --- Ravager ---

const BILE_RADIUS: f32 = 0.75;
const BILE_MIN_VALUE: f32 = 1.5;
const BILE_STATIONARY_BONUS: f32 = 3.0;

#[derive(Debug, Default)]
pub struct RavagerPolicy {
    generic: GenericMicro,
}

fn is_stationary(unit: &CombatUnit) -> bool {
    unit.is_structure
        || unit.speed() <= 0.0
        || matches!(
            unit.unit_type,
            UnitTypeId::SiegeTankSieged
                | UnitTypeId::LiberatorAg
                | UnitTypeId::LurkerBurrowed
                | UnitTypeId::WidowMineBurrowed
        )
}

impl RavagerPolicy {
    fn bile(
        &self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        if !group.intent.is_attack_class() {
            return Ok(None);
        }
        let cast_range = AbilityId::CorrosiveBile.cast_range();
        let target = pick_best(group.enemies.iter().copied(), |e| {
            if unit.distance_to(e) > cast_range {
                return 0.0;
            }
            let value = cluster_value(&group.enemies, e.position, BILE_RADIUS, |u| u.stats().weight);
            if is_stationary(e) {
                value * BILE_STATIONARY_BONUS
            } else if value >= BILE_MIN_VALUE {
                value
            } else {
                0.0
            }
        });
        let Some(target) = target else {
            return Ok(None);
        };
        if !ctx.can_cast(unit, AbilityId::CorrosiveBile)? {
            return Ok(None);
        }
        Ok(Some(
            Action::cast(AbilityId::CorrosiveBile, Target::Point(target.position)).with_note("bile"),
        ))
    }
}

impl MicroPolicy for RavagerPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let special = self.bile(ctx, group, unit)?;
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- Lurker ---

const LURKER_BURROW_TRIGGER: f32 = 9.0;
const LURKER_UNBURROW_CLEAR: f32 = 11.0;
const LURKER_UNBURROW_DELAY: f32 = 2.0;

#[derive(Debug, Default)]
pub struct LurkerPolicy {
    generic: GenericMicro,
    modes: ModeSwitch,
}

impl MicroPolicy for LurkerPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if !unit.is_burrowed {
            return self.generic.solve(ctx, group, unit, action, None);
        }
        if let Some(target) = self
            .generic
            .focus
            .select(ctx.config, unit, &group.enemies, group.intent, 0.0)
        {
            return Ok(Action::attack_unit(target.tag));
        }
        Ok(Action::attack_to(unit.position).with_note("lurking"))
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
            let clear = ctx
                .enemies_near(unit, unit.position, LURKER_UNBURROW_CLEAR)
                .into_iter()
                .all(|e| e.is_flying);
            if retreating || clear {
                let delay = if retreating { 0.0 } else { LURKER_UNBURROW_DELAY };
                if self.modes.request(unit.tag, AbilityId::UnburrowLurker, now, delay) {
                    self.modes.cancel(unit.tag);
                    return Ok(Action::cast(AbilityId::UnburrowLurker, Target::None).with_note("unburrow"));
                }
            } else {
                self.modes.cancel(unit.tag);
            }
            return Ok(action);
        }

        let prey = ctx
            .enemies_near(unit, unit.position, LURKER_BURROW_TRIGGER)
            .into_iter()
            .any(|e| !e.is_flying);
        if !group.intent.is_retreat() && prey {
            return Ok(Action::cast(AbilityId::BurrowLurker, Target::None).with_note("burrow"));
        }
        Ok(action)
    }
}

// --- Infestor ---

const FUNGAL_RADIUS: f32 = 2.25;
const FUNGAL_MIN_VALUE: f32 = 3.0;
const INFESTOR_SAFE_DISTANCE: f32 = 8.0;

#[derive(Debug, Default)]
pub struct InfestorPolicy {
    fungals: HashMap<u64, Point2>,
}

impl MicroPolicy for InfestorPolicy {
    fn group_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        units: &[&CombatUnit],
        default: Action,
    ) -> Result<Action> {
        for unit in units {
            self.fungals.remove(&unit.tag);
        }
        if !group.intent.is_attack_class() && group.intent != Intent::DefensiveRetreat {
            return Ok(default);
        }

        let mut covered: HashSet<u64> = HashSet::new();
        for unit in units {
            if !ctx.can_cast(unit, AbilityId::FungalGrowth)? {
                continue;
            }
            let open: Vec<&CombatUnit> = group
                .enemies
                .iter()
                .copied()
                .filter(|e| !e.is_structure && !e.has_buff(Buffs::FUNGAL) && !covered.contains(&e.tag))
                .collect();
            let cast_range = AbilityId::FungalGrowth.cast_range() + FUNGAL_RADIUS;
            let Some((point, value)) =
                best_cluster(&open, unit.position, cast_range, FUNGAL_RADIUS, |e| e.stats().weight)
            else {
                continue;
            };
            if value < FUNGAL_MIN_VALUE {
                continue;
            }
            covered.extend(within(&open, point, FUNGAL_RADIUS).map(|e| e.tag));
            self.fungals.insert(unit.tag, point);
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
        if let Some(point) = self.fungals.remove(&unit.tag) {
            return Ok(Action::cast(AbilityId::FungalGrowth, Target::Point(point)).with_note("fungal"));
        }
        hold_back(ctx, group, unit, INFESTOR_SAFE_DISTANCE)
    }
}

// --- Viper ---

const BOMB_RADIUS: f32 = 3.0;
const BOMB_MIN_VALUE: f32 = 3.0;
const CLOUD_RADIUS: f32 = 2.0;
const CLOUD_MIN_VALUE: f32 = 4.0;
/// Abducting something already next to the viper gains nothing.
const ABDUCT_MIN_DISTANCE: f32 = 3.0;
const VIPER_SAFE_DISTANCE: f32 = 9.0;

#[derive(Debug, Default)]
pub struct ViperPolicy;

impl ViperPolicy {
    fn cast(
        &self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
    ) -> Result<Option<Action>> {
        let air: Vec<&CombatUnit> = group.enemies.iter().copied().filter(|e| e.is_flying).collect();
        let bomb_range = AbilityId::ParasiticBomb.cast_range();
        let bomb = pick_best(air.iter().copied(), |e| {
            if e.has_buff(Buffs::PARASITIC_BOMB) || !in_cast_range(unit, e, bomb_range) {
                return 0.0;
            }
            let value = cluster_value(&air, e.position, BOMB_RADIUS, |u| u.stats().weight);
            if value < BOMB_MIN_VALUE {
                0.0
            } else {
                value
            }
        });
        if let Some(target) = bomb {
            if ctx.can_cast(unit, AbilityId::ParasiticBomb)? {
                return Ok(Some(
                    Action::cast(AbilityId::ParasiticBomb, Target::Unit(target.tag)).with_note("bomb"),
                ));
            }
        }

        let abduct_range = AbilityId::Abduct.cast_range();
        let pull = pick_best(group.enemies.iter().copied(), |e| {
            let worth = e.unit_type.is_high_value() || e.has_attribute(Attributes::MASSIVE);
            if !worth || e.is_structure || unit.distance_to(e) < ABDUCT_MIN_DISTANCE {
                return 0.0;
            }
            if !in_cast_range(unit, e, abduct_range) {
                return 0.0;
            }
            e.stats().weight
        });
        if let Some(target) = pull {
            if ctx.can_cast(unit, AbilityId::Abduct)? {
                return Ok(Some(Action::cast(AbilityId::Abduct, Target::Unit(target.tag)).with_note("abduct")));
            }
        }

        let ranged: Vec<&CombatUnit> = group
            .enemies
            .iter()
            .copied()
            .filter(|e| !e.is_flying && !e.is_structure && e.stats().ground_range > 1.0)
            .collect();
        let cloud_range = AbilityId::BlindingCloud.cast_range();
        if let Some((point, value)) =
            best_cluster(&ranged, unit.position, cloud_range, CLOUD_RADIUS, |e| e.stats().weight)
        {
            if value >= CLOUD_MIN_VALUE && ctx.can_cast(unit, AbilityId::BlindingCloud)? {
                return Ok(Some(
                    Action::cast(AbilityId::BlindingCloud, Target::Point(point)).with_note("cloud"),
                ));
            }
        }
        Ok(None)
    }
}

impl MicroPolicy for ViperPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        if group.intent.is_attack_class() {
            if let Some(cast) = self.cast(ctx, group, unit)? {
                return Ok(cast);
            }
        }
        hold_back(ctx, group, unit, VIPER_SAFE_DISTANCE)
    }
}

// --- Queen ---

const TRANSFUSE_HULL: f32 = 0.5;
const TRANSFUSE_MIN_MISSING: f32 = 75.0;

#[derive(Debug, Default)]
pub struct QueenPolicy {
    generic: GenericMicro,
}

impl MicroPolicy for QueenPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        let mut special = None;
        if group.intent != Intent::PanicRetreat {
            let transfuse_range = AbilityId::Transfuse.cast_range();
            let patient = pick_best(group.allies.iter().copied(), |a| {
                let missing = a.health_max - a.health;
                if a.tag == unit.tag
                    || a.is_structure
                    || a.hull_fraction() >= TRANSFUSE_HULL
                    || missing < TRANSFUSE_MIN_MISSING
                    || !in_cast_range(unit, a, transfuse_range)
                {
                    return 0.0;
                }
                1.0 - a.hull_fraction()
            });
            if let Some(patient) = patient {
                if ctx.can_cast(unit, AbilityId::Transfuse)? {
                    special = Some(
                        Action::cast(AbilityId::Transfuse, Target::Unit(patient.tag)).with_note("transfuse"),
                    );
                }
            }
        }
        self.generic.solve(ctx, group, unit, action, special)
    }
}

// --- Baneling ---

const BANE_SPLASH: f32 = 2.2;
const BANE_SCAN: f32 = 8.0;
const BANE_LIGHT_BONUS: f32 = 2.0;

#[derive(Debug)]
pub struct BanelingPolicy {
    generic: GenericMicro,
}

impl Default for BanelingPolicy {
    fn default() -> Self {
        Self {
            generic: GenericMicro::without_kite(),
        }
    }
}

impl MicroPolicy for BanelingPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        if group.intent.is_retreat() {
            return Ok(action);
        }
        if group.intent.is_attack_class() {
            let splash_value = |u: &CombatUnit| {
                if u.is_flying {
                    0.0
                } else if u.has_attribute(Attributes::LIGHT) {
                    u.stats().weight * BANE_LIGHT_BONUS
                } else {
                    u.stats().weight
                }
            };
            let target = pick_best(within(&group.enemies, unit.position, BANE_SCAN), |e| {
                if e.is_flying {
                    return 0.0;
                }
                cluster_value(&group.enemies, e.position, BANE_SPLASH, splash_value)
            });
            if let Some(target) = target {
                return Ok(Action::attack_unit(target.tag).with_note("connect"));
            }
        }
        self.generic.solve(ctx, group, unit, action, None)
    }
}

// --- Swarm host ---

const LOCUST_TRIGGER: f32 = 15.0;
const LOCUST_DROP_DISTANCE: f32 = 3.0;
const SWARM_HOST_SAFE_DISTANCE: f32 = 10.0;

#[derive(Debug, Default)]
pub struct SwarmHostPolicy;

impl MicroPolicy for SwarmHostPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        _action: Action,
    ) -> Result<Action> {
        if group.intent.is_attack_class() {
            let prey = nearest(unit.position, &group.enemies, |e| !e.is_flying);
            if let Some(prey) = prey.filter(|p| unit.distance_to(p) <= LOCUST_TRIGGER) {
                if ctx.can_cast(unit, AbilityId::SpawnLocusts)? {
                    let drop = towards(unit.position, prey.position, LOCUST_DROP_DISTANCE);
                    return Ok(Action::cast(AbilityId::SpawnLocusts, Target::Point(drop)).with_note("locusts"));
                }
            }
        }
        hold_back(ctx, group, unit, SWARM_HOST_SAFE_DISTANCE)
    }
}
