//! Scenario definitions: hardcoded army compositions.
//!
//! Each scenario names the squads both sides start with. The own army
//! spawns west of the origin and the enemy army east of it.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::SCENARIO_SPAWN_SEPARATION;
use skirmish_core::enums::{ScenarioId, Side, UnitTypeId};
use skirmish_core::types::Point2;

use crate::world_setup::spawn_squad;

/// One squad: a unit type and how many of it.
pub type Squad = (UnitTypeId, usize);

/// Starting armies of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSetup {
    pub own: Vec<Squad>,
    pub enemy: Vec<Squad>,
}

impl ScenarioSetup {
    pub fn total_units(&self) -> usize {
        self.own.iter().chain(&self.enemy).map(|(_, n)| n).sum()
    }
}

/// Spawn center of `side`.
pub fn spawn_point(side: Side) -> Point2 {
    let half = SCENARIO_SPAWN_SEPARATION * 0.5;
    match side {
        Side::Enemy => Point2::new(half, 0.0),
        Side::Own | Side::Neutral => Point2::new(-half, 0.0),
    }
}

/// Army compositions for a scenario.
pub fn build_setup(scenario: ScenarioId) -> ScenarioSetup {
    use UnitTypeId as T;

    match scenario {
        // Classic bio ball against speedlings, banelings and a roach core.
        ScenarioId::BioVsLingBane => ScenarioSetup {
            own: vec![(T::Marine, 16), (T::Marauder, 4), (T::Medivac, 2), (T::WidowMine, 2)],
            enemy: vec![(T::Zergling, 20), (T::Baneling, 6), (T::Roach, 6), (T::Queen, 1)],
        },
        ScenarioId::TankLine => ScenarioSetup {
            own: vec![
                (T::SiegeTank, 4),
                (T::Marine, 10),
                (T::Cyclone, 2),
                (T::Raven, 1),
            ],
            enemy: vec![(T::Roach, 12), (T::Ravager, 4), (T::Infestor, 1), (T::SwarmHost, 2)],
        },
        ScenarioId::GatewayVsHydra => ScenarioSetup {
            own: vec![
                (T::Stalker, 8),
                (T::Sentry, 2),
                (T::HighTemplar, 2),
                (T::Adept, 4),
                (T::Disruptor, 1),
                (T::Zealot, 4),
            ],
            enemy: vec![
                (T::Hydralisk, 12),
                (T::Lurker, 3),
                (T::Infestor, 2),
                (T::Viper, 1),
                (T::Ultralisk, 1),
            ],
        },
        ScenarioId::AirBattle => ScenarioSetup {
            own: vec![
                (T::VikingFighter, 8),
                (T::Liberator, 3),
                (T::Battlecruiser, 1),
                (T::Banshee, 2),
            ],
            enemy: vec![
                (T::VoidRay, 5),
                (T::Phoenix, 6),
                (T::Tempest, 2),
                (T::Oracle, 1),
            ],
        },
    }
}

/// Spawn both armies. Own tags come first, then enemy tags.
///
/// Returns the next unused tag.
pub fn spawn_scenario(world: &mut World, rng: &mut ChaCha8Rng, scenario: ScenarioId) -> u64 {
    let setup = build_setup(scenario);
    let mut next_tag = 1;
    for (side, squads) in [(Side::Own, &setup.own), (Side::Enemy, &setup.enemy)] {
        let center = spawn_point(side);
        for &(unit_type, count) in squads {
            spawn_squad(world, rng, &mut next_tag, side, center, unit_type, count);
        }
    }
    next_tag
}
