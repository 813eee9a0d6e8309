//! Ability casts and timed effects.
//!
//! Casts resolve instantly except form changes, which go through
//! `Morph` and complete after the transform time.

use std::collections::HashMap;

use hecs::{Component, Entity, World};

use skirmish_core::action::Target;
use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::*;
use skirmish_core::events::SkirmishEvent;
use skirmish_core::types::{towards, Point2};
use skirmish_core::unit::Buffs;
use skirmish_core::unit_data::stats;

use crate::world_setup::spawn_unit;

const GUARDIAN_SHIELD_RADIUS: f32 = 4.5;
const GUARDIAN_SHIELD_SECS: f32 = 5.5;
const STORM_RADIUS: f32 = 1.5;
const STORM_DAMAGE: f32 = 80.0;
const NOVA_RADIUS: f32 = 1.5;
const NOVA_DAMAGE: f32 = 145.0;
const FUNGAL_RADIUS: f32 = 2.25;
const FUNGAL_DAMAGE: f32 = 30.0;
const FUNGAL_ROOT_SECS: f32 = 2.85;
const BILE_RADIUS: f32 = 0.5;
const BILE_DAMAGE: f32 = 60.0;
const PARASITIC_RADIUS: f32 = 3.0;
const PARASITIC_DAMAGE: f32 = 120.0;
const BLINDING_RADIUS: f32 = 2.0;
const BLINDING_WEAPON_DELAY: f32 = 5.0;
const YAMATO_DAMAGE: f32 = 240.0;
const LOCK_ON_DAMAGE: f32 = 40.0;
const INTERFERENCE_SECS: f32 = 11.0;
const GRAVITON_SECS: f32 = 7.0;
const TRANSFUSE_HEAL: f32 = 75.0;
const LOCUSTS_PER_CAST: usize = 2;

/// Per-step state shared by the casts of one side.
pub struct CastContext<'a> {
    pub index: &'a HashMap<u64, Entity>,
    pub next_tag: &'a mut u64,
    pub events: &'a mut Vec<SkirmishEvent>,
}

/// The form a unit takes after casting `ability`, with the transform time.
pub fn morph_result(unit_type: UnitTypeId, ability: AbilityId) -> Option<(UnitTypeId, f32)> {
    use AbilityId as A;
    use UnitTypeId as T;

    let to = match (unit_type, ability) {
        (T::SiegeTank, A::SiegeMode) => T::SiegeTankSieged,
        (T::SiegeTankSieged, A::Unsiege) => T::SiegeTank,
        (T::WidowMine, A::BurrowWidowMine) => T::WidowMineBurrowed,
        (T::WidowMineBurrowed, A::UnburrowWidowMine) => T::WidowMine,
        (T::Liberator, A::LiberatorAgMode) => T::LiberatorAg,
        (T::LiberatorAg, A::LiberatorAaMode) => T::Liberator,
        (T::VikingFighter, A::VikingAssaultMode) => T::VikingAssault,
        (T::VikingAssault, A::VikingFighterMode) => T::VikingFighter,
        (T::Roach, A::BurrowDown) => T::RoachBurrowed,
        (T::RoachBurrowed, A::BurrowUp) => T::Roach,
        (T::Lurker, A::BurrowLurker) => T::LurkerBurrowed,
        (T::LurkerBurrowed, A::UnburrowLurker) => T::Lurker,
        _ => return None,
    };
    Some((to, ability.cooldown_secs()))
}

fn read<T: Component + Copy>(world: &World, entity: Entity) -> Option<T> {
    world.get::<&T>(entity).ok().map(|c| *c)
}

/// Shields absorb first, the rest comes off health.
pub fn apply_damage(vitals: &mut Vitals, amount: f32) {
    let absorbed = amount.min(vitals.shield);
    vitals.shield -= absorbed;
    vitals.health = (vitals.health - (amount - absorbed)).max(0.0);
}

/// Which units an area effect touches.
#[derive(Debug, Clone, Copy)]
struct AreaFilter {
    /// Only this side, or everyone.
    side: Option<Side>,
    ground: bool,
    air: bool,
}

/// Apply `effect` to every unit inside the circle that passes `filter`.
fn for_each_in_area(
    world: &mut World,
    center: Point2,
    radius: f32,
    filter: AreaFilter,
    mut effect: impl FnMut(&mut Vitals, &mut Effects, &mut Weapon),
) {
    for (_e, (owner, pos, unit_type, vitals, effects, weapon)) in world.query_mut::<(
        &Owner,
        &Position,
        &UnitTypeId,
        &mut Vitals,
        &mut Effects,
        &mut Weapon,
    )>() {
        if filter.side.is_some_and(|s| s != owner.0) {
            continue;
        }
        let flying = stats(*unit_type).is_flying;
        if (flying && !filter.air) || (!flying && !filter.ground) {
            continue;
        }
        if pos.pos.distance(center) <= radius {
            effect(vitals, effects, weapon);
        }
    }
}

fn target_point(world: &World, index: &HashMap<u64, Entity>, target: Target, fallback: Point2) -> Point2 {
    match target {
        Target::Point(p) => p,
        Target::Unit(tag) => index
            .get(&tag)
            .and_then(|&e| read::<Position>(world, e))
            .map_or(fallback, |p| p.pos),
        Target::None => fallback,
    }
}

fn with_target<T: Component>(
    world: &World,
    index: &HashMap<u64, Entity>,
    target: Target,
    f: impl FnOnce(&mut T),
) {
    let Some(entity) = target.unit().and_then(|tag| index.get(&tag)) else {
        return;
    };
    if let Ok(mut component) = world.get::<&mut T>(*entity) {
        f(&mut component);
    }
}

/// Execute one ability command. Returns false when the caster cannot
/// pay for it or no longer exists.
pub fn cast(
    world: &mut World,
    ctx: &mut CastContext<'_>,
    caster: u64,
    ability: AbilityId,
    target: Target,
) -> bool {
    let Some(&entity) = ctx.index.get(&caster) else {
        return false;
    };
    let (Some(unit_type), Some(owner), Some(pos), Some(mut vitals)) = (
        read::<UnitTypeId>(world, entity),
        read::<Owner>(world, entity),
        read::<Position>(world, entity),
        read::<Vitals>(world, entity),
    ) else {
        return false;
    };
    let side = owner.0;
    let enemies = AreaFilter {
        side: Some(side.opponent()),
        ground: true,
        air: true,
    };
    let point = target_point(world, ctx.index, target, pos.pos);

    let cost = ability.energy_cost();
    if vitals.energy < cost {
        return false;
    }
    vitals.energy -= cost;

    use AbilityId as A;
    match ability {
        A::StimMarine | A::StimMarauder => {
            let price = if ability == A::StimMarauder {
                STIM_HEALTH_COST * 2.0
            } else {
                STIM_HEALTH_COST
            };
            if vitals.health <= price {
                return false;
            }
            vitals.health -= price;
            if let Ok(mut effects) = world.get::<&mut Effects>(entity) {
                effects.buffs.insert(Buffs::STIMMED);
                effects.stim_secs = STIM_DURATION_SECS;
            }
        }
        A::SiegeMode
        | A::Unsiege
        | A::BurrowWidowMine
        | A::UnburrowWidowMine
        | A::LiberatorAgMode
        | A::LiberatorAaMode
        | A::VikingAssaultMode
        | A::VikingFighterMode
        | A::BurrowDown
        | A::BurrowUp
        | A::BurrowLurker
        | A::UnburrowLurker => {
            let Some((to, secs)) = morph_result(unit_type, ability) else {
                return false;
            };
            if let Ok(mut morph) = world.get::<&mut Morph>(entity) {
                morph.pending = Some(to);
                morph.remaining_secs = secs;
            }
            if let Ok(mut orders) = world.get::<&mut Orders>(entity) {
                orders.current = None;
            }
        }
        A::Blink | A::TacticalJump | A::AdeptPhaseShift => {
            let destination = if ability == A::Blink {
                towards(pos.pos, point, pos.pos.distance(point).min(A::Blink.cast_range()))
            } else {
                point
            };
            if let Ok(mut position) = world.get::<&mut Position>(entity) {
                position.pos = destination;
            }
        }
        A::GuardianShield => {
            let allies = AreaFilter {
                side: Some(side),
                ground: true,
                air: true,
            };
            for_each_in_area(world, pos.pos, GUARDIAN_SHIELD_RADIUS, allies, |_, effects, _| {
                effects.buffs.insert(Buffs::GUARDIAN_SHIELD);
                effects.shield_secs = GUARDIAN_SHIELD_SECS;
            });
        }
        A::PsiStorm => {
            let everyone = AreaFilter {
                side: None,
                ground: true,
                air: true,
            };
            for_each_in_area(world, point, STORM_RADIUS, everyone, |vitals, _, _| {
                vitals.health = (vitals.health - STORM_DAMAGE).max(0.0);
            });
        }
        A::PurificationNova => {
            let ground = AreaFilter { air: false, ..enemies };
            for_each_in_area(world, point, NOVA_RADIUS, ground, |vitals, _, _| {
                apply_damage(vitals, NOVA_DAMAGE);
            });
        }
        A::CorrosiveBile => {
            let everyone = AreaFilter {
                side: None,
                ground: true,
                air: true,
            };
            for_each_in_area(world, point, BILE_RADIUS, everyone, |vitals, _, _| {
                apply_damage(vitals, BILE_DAMAGE);
            });
        }
        A::FungalGrowth => {
            for_each_in_area(world, point, FUNGAL_RADIUS, enemies, |vitals, effects, _| {
                apply_damage(vitals, FUNGAL_DAMAGE);
                effects.buffs.insert(Buffs::FUNGAL);
                effects.disable_secs = effects.disable_secs.max(FUNGAL_ROOT_SECS);
            });
        }
        A::ParasiticBomb => {
            let air = AreaFilter { ground: false, ..enemies };
            for_each_in_area(world, point, PARASITIC_RADIUS, air, |vitals, _, _| {
                apply_damage(vitals, PARASITIC_DAMAGE);
            });
        }
        A::BlindingCloud => {
            let ground = AreaFilter { air: false, ..enemies };
            for_each_in_area(world, point, BLINDING_RADIUS, ground, |_, _, weapon| {
                weapon.cooldown = weapon.cooldown.max(BLINDING_WEAPON_DELAY);
            });
        }
        A::Feedback => {
            with_target::<Vitals>(world, ctx.index, target, |v| {
                let drained = v.energy;
                v.energy = 0.0;
                apply_damage(v, drained * 0.5);
            });
        }
        A::YamatoCannon => {
            with_target::<Vitals>(world, ctx.index, target, |v| apply_damage(v, YAMATO_DAMAGE));
        }
        A::LockOn => {
            with_target::<Vitals>(world, ctx.index, target, |v| apply_damage(v, LOCK_ON_DAMAGE));
            with_target::<Effects>(world, ctx.index, target, |e| e.buffs.insert(Buffs::LOCKED_ON));
        }
        A::Transfuse => {
            with_target::<Vitals>(world, ctx.index, target, |v| {
                v.health = (v.health + TRANSFUSE_HEAL).min(v.health_max);
            });
        }
        A::InterferenceMatrix | A::GravitonBeam => {
            let (buff, secs) = if ability == A::InterferenceMatrix {
                (Buffs::INTERFERENCE, INTERFERENCE_SECS)
            } else {
                (Buffs::GRAVITON, GRAVITON_SECS)
            };
            with_target::<Effects>(world, ctx.index, target, |e| {
                e.buffs.insert(buff);
                e.disable_secs = e.disable_secs.max(secs);
            });
        }
        A::Abduct => {
            with_target::<Position>(world, ctx.index, target, |p| p.pos = towards(pos.pos, p.pos, 1.0));
        }
        A::PulsarBeamOn | A::PulsarBeamOff => {
            if let Ok(mut effects) = world.get::<&mut Effects>(entity) {
                effects.buffs.set(Buffs::PULSAR_BEAM, ability == A::PulsarBeamOn);
            }
        }
        A::BuildAutoTurret => {
            spawn_unit(world, *ctx.next_tag, UnitTypeId::AutoTurret, side, point);
            *ctx.next_tag += 1;
        }
        A::SpawnLocusts => {
            for i in 0..LOCUSTS_PER_CAST {
                let offset = Point2::new(0.0, i as f32 - 0.5);
                spawn_unit(world, *ctx.next_tag, UnitTypeId::Locust, side, pos.pos + offset);
                *ctx.next_tag += 1;
            }
        }
        A::MedivacAfterburners | A::PrismaticAlignment => {}
        A::Attack | A::Move | A::HoldPosition | A::Stop => return false,
    }

    if let Ok(mut v) = world.get::<&mut Vitals>(entity) {
        v.energy = vitals.energy;
        v.health = v.health.min(vitals.health);
    }
    ctx.events.push(SkirmishEvent::AbilityUsed { tag: caster, ability });
    true
}

/// Energy regeneration, effect timers and form changes.
pub fn run(world: &mut World, dt: f32, events: &mut Vec<SkirmishEvent>) {
    for (_e, vitals) in world.query_mut::<&mut Vitals>() {
        if vitals.energy_max > 0.0 {
            vitals.energy = (vitals.energy + ENERGY_REGEN_PER_SEC * dt).min(vitals.energy_max);
        }
    }

    for (_e, effects) in world.query_mut::<&mut Effects>() {
        tick_timer(&mut effects.stim_secs, dt, || {
            effects.buffs.remove(Buffs::STIMMED);
        });
        tick_timer(&mut effects.shield_secs, dt, || {
            effects.buffs.remove(Buffs::GUARDIAN_SHIELD);
        });
        tick_timer(&mut effects.disable_secs, dt, || {
            effects
                .buffs
                .remove(Buffs::INTERFERENCE | Buffs::GRAVITON | Buffs::FUNGAL);
        });
    }

    let mut completed: Vec<(u64, UnitTypeId, UnitTypeId)> = Vec::new();
    for (_e, (tag, unit_type, morph, weapon)) in
        world.query_mut::<(&UnitTag, &mut UnitTypeId, &mut Morph, &mut Weapon)>()
    {
        let Some(to) = morph.pending else {
            continue;
        };
        morph.remaining_secs -= dt;
        if morph.remaining_secs <= 0.0 {
            completed.push((tag.0, *unit_type, to));
            *unit_type = to;
            morph.pending = None;
            morph.remaining_secs = 0.0;
            weapon.cooldown = 0.0;
        }
    }
    completed.sort_by_key(|(tag, _, _)| *tag);
    events.extend(
        completed
            .into_iter()
            .map(|(tag, from, to)| SkirmishEvent::Morphed { tag, from, to }),
    );
}

/// Count `timer` down; `on_expire` runs on the step it reaches zero.
fn tick_timer(timer: &mut f32, dt: f32, on_expire: impl FnOnce()) {
    if *timer <= 0.0 {
        return;
    }
    *timer -= dt;
    if *timer <= 0.0 {
        *timer = 0.0;
        on_expire();
    }
}
