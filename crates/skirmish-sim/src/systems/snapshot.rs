//! Snapshot system: reads the ECS world into unit snapshots and the
//! serializable `SkirmishSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use std::collections::HashMap;

use hecs::{Entity, World};

use skirmish_core::components::*;
use skirmish_core::enums::*;
use skirmish_core::events::SkirmishEvent;
use skirmish_core::state::{SkirmishSnapshot, UnitView};
use skirmish_core::types::SimTime;
use skirmish_core::unit::CombatUnit;

/// One `CombatUnit` per live entity, sorted by tag.
pub fn collect_units(world: &World) -> Vec<CombatUnit> {
    let mut units: Vec<CombatUnit> = world
        .query::<(
            &UnitTag,
            &UnitTypeId,
            &Owner,
            &Position,
            &Vitals,
            &Weapon,
            &Orders,
            &Effects,
        )>()
        .iter()
        .map(|(_, (tag, unit_type, owner, pos, vitals, weapon, orders, effects))| {
            let mut unit = CombatUnit::new(tag.0, *unit_type, owner.0, pos.pos);
            unit.height = pos.height;
            unit.health = vitals.health;
            unit.health_max = vitals.health_max;
            unit.shield = vitals.shield;
            unit.shield_max = vitals.shield_max;
            unit.energy = vitals.energy;
            unit.weapon_cooldown = weapon.cooldown;
            unit.buffs = effects.buffs;
            unit.order = orders.current;
            unit
        })
        .collect();
    units.sort_by_key(|u| u.tag);
    units
}

/// Tag to entity lookup for systems that act on command targets.
pub fn entity_index(world: &World) -> HashMap<u64, Entity> {
    world
        .query::<&UnitTag>()
        .iter()
        .map(|(entity, tag)| (tag.0, entity))
        .collect()
}

/// Build the visible state after a harness step.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    scenario: ScenarioId,
    events: Vec<SkirmishEvent>,
    command_counts: (usize, usize),
    winner: Option<Side>,
) -> SkirmishSnapshot {
    let mut units: Vec<UnitView> = world
        .query::<(&UnitTag, &UnitTypeId, &Owner, &Position, &Vitals, &Orders)>()
        .iter()
        .map(|(_, (tag, unit_type, owner, pos, vitals, orders))| UnitView {
            tag: tag.0,
            unit_type: *unit_type,
            side: owner.0,
            position: pos.pos,
            health: vitals.health,
            shield: vitals.shield,
            energy: vitals.energy,
            order: orders.current.map(|(ability, _)| ability),
        })
        .collect();
    units.sort_by_key(|u| u.tag);

    let own_alive = units.iter().filter(|u| u.side == Side::Own).count();
    let enemy_alive = units.iter().filter(|u| u.side == Side::Enemy).count();

    SkirmishSnapshot {
        time: *time,
        scenario,
        units,
        own_alive,
        enemy_alive,
        winner,
        events,
        own_commands: command_counts.0,
        enemy_commands: command_counts.1,
    }
}
