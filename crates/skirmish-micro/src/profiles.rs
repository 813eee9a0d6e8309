//! Per-attacker targeting preferences.
//!
//! Multipliers applied by the focus-fire scorer on top of a target's
//! combat weight, keyed by what the target is.

use skirmish_core::enums::UnitTypeId;

/// Target preference of one attacking unit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingProfile {
    pub armored: f32,
    pub light: f32,
    pub biological: f32,
    pub massive: f32,
    /// Bonus against flying targets.
    pub air: f32,
    /// Bonus against workers, on top of the harass multiplier.
    pub worker: f32,
}

impl Default for TargetingProfile {
    fn default() -> Self {
        Self {
            armored: 1.0,
            light: 1.0,
            biological: 1.0,
            massive: 1.0,
            air: 1.0,
            worker: 1.0,
        }
    }
}

/// Get the targeting profile for a given attacker type.
pub fn get_profile(attacker: UnitTypeId) -> TargetingProfile {
    use UnitTypeId as T;

    let base = TargetingProfile::default();
    match attacker {
        T::Marauder | T::SiegeTank | T::SiegeTankSieged | T::Cyclone => TargetingProfile {
            armored: 1.5,
            ..base
        },
        T::Immortal | T::VoidRay => TargetingProfile {
            armored: 2.0,
            ..base
        },
        T::Stalker | T::Ravager | T::LurkerBurrowed => TargetingProfile {
            armored: 1.3,
            ..base
        },
        T::Hellion | T::Hellbat | T::Colossus | T::Archon => TargetingProfile {
            light: 2.0,
            ..base
        },
        T::Adept | T::Oracle => TargetingProfile {
            light: 2.5,
            worker: 2.0,
            ..base
        },
        T::Reaper => TargetingProfile {
            light: 1.3,
            worker: 2.0,
            ..base
        },
        T::Baneling => TargetingProfile {
            light: 2.0,
            worker: 1.5,
            ..base
        },
        T::Ghost => TargetingProfile {
            biological: 1.5,
            ..base
        },
        T::Thor => TargetingProfile {
            light: 1.5,
            air: 1.5,
            ..base
        },
        T::VikingFighter | T::Corruptor | T::Tempest => TargetingProfile {
            massive: 2.0,
            armored: 1.3,
            ..base
        },
        T::Phoenix | T::Mutalisk => TargetingProfile {
            light: 1.5,
            ..base
        },
        T::Battlecruiser | T::Carrier => TargetingProfile {
            air: 1.2,
            ..base
        },
        T::Queen | T::MissileTurret | T::SporeCrawler => TargetingProfile {
            air: 1.5,
            ..base
        },
        T::Zergling | T::Zealot | T::DarkTemplar => TargetingProfile {
            worker: 1.5,
            ..base
        },
        T::Ultralisk => TargetingProfile {
            light: 1.2,
            biological: 1.2,
            ..base
        },
        _ => base,
    }
}
