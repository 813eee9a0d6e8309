//! Entity spawn factories for setting up the skirmish world.
//!
//! Creates unit entities with the full component bundle and places
//! scenario squads around each side's spawn point.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::*;
use skirmish_core::constants::SCENARIO_SPAWN_JITTER;
use skirmish_core::enums::*;
use skirmish_core::types::Point2;
use skirmish_core::unit_data::stats;

/// Spawn one unit at full health with half its maximum energy.
pub fn spawn_unit(
    world: &mut World,
    tag: u64,
    unit_type: UnitTypeId,
    side: Side,
    position: Point2,
) -> hecs::Entity {
    let s = stats(unit_type);
    let vitals = Vitals {
        health: s.max_health,
        health_max: s.max_health,
        shield: s.max_shield,
        shield_max: s.max_shield,
        energy: s.max_energy * 0.5,
        energy_max: s.max_energy,
    };

    world.spawn((
        UnitTag(tag),
        unit_type,
        Owner(side),
        Position {
            pos: position,
            height: 0.0,
        },
        vitals,
        Weapon::default(),
        Orders::default(),
        Effects::default(),
        Morph::default(),
    ))
}

/// Spawn a squad of `count` units jittered around `center`.
///
/// Tags are taken from `next_tag`, which is advanced past the squad.
pub fn spawn_squad(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_tag: &mut u64,
    side: Side,
    center: Point2,
    unit_type: UnitTypeId,
    count: usize,
) {
    for _ in 0..count {
        let offset = Point2::new(
            rng.gen_range(-SCENARIO_SPAWN_JITTER..SCENARIO_SPAWN_JITTER),
            rng.gen_range(-SCENARIO_SPAWN_JITTER..SCENARIO_SPAWN_JITTER),
        );
        spawn_unit(world, *next_tag, unit_type, side, center + offset);
        *next_tag += 1;
    }
}

/// Find the entity carrying `tag`, if it is still alive.
pub fn find_unit(world: &World, tag: u64) -> Option<hecs::Entity> {
    world
        .query::<&UnitTag>()
        .iter()
        .find(|(_, t)| t.0 == tag)
        .map(|(entity, _)| entity)
}
