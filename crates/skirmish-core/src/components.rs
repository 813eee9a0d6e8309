//! ECS components for the skirmish harness.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::action::Target;
use crate::enums::*;
use crate::types::Point2;
use crate::unit::Buffs;

/// Stable game tag of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitTag(pub u64);

/// Which side controls the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner(pub Side);

/// Map position and terrain height.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub pos: Point2,
    pub height: f32,
}

/// Health, shield and energy pools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub health_max: f32,
    pub shield: f32,
    pub shield_max: f32,
    pub energy: f32,
    pub energy_max: f32,
}

/// Weapon readiness. Range and damage come from the unit tables.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Weapon {
    /// Seconds until the next shot.
    pub cooldown: f32,
}

/// The command the unit is currently executing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Orders {
    pub current: Option<(AbilityId, Target)>,
}

/// A pending form change and the seconds left until it completes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Morph {
    pub pending: Option<UnitTypeId>,
    pub remaining_secs: f32,
}

/// Temporary effects and their remaining durations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Effects {
    #[serde(with = "buff_bits")]
    pub buffs: Buffs,
    pub stim_secs: f32,
    pub shield_secs: f32,
    pub disable_secs: f32,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            buffs: Buffs::empty(),
            stim_secs: 0.0,
            shield_secs: 0.0,
            disable_secs: 0.0,
        }
    }
}

mod buff_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::unit::Buffs;

    pub fn serialize<S: Serializer>(buffs: &Buffs, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(buffs.bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Buffs, D::Error> {
        u16::deserialize(deserializer).map(Buffs::from_bits_truncate)
    }
}
