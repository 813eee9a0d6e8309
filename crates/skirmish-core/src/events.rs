//! Events emitted by the skirmish harness.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something notable that happened during one harness step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SkirmishEvent {
    /// A unit's health reached zero.
    UnitKilled {
        tag: u64,
        unit_type: UnitTypeId,
        side: Side,
    },
    /// An ability command was executed.
    AbilityUsed { tag: u64, ability: AbilityId },
    /// A unit switched between two forms (siege, burrow, flight mode).
    Morphed {
        tag: u64,
        from: UnitTypeId,
        to: UnitTypeId,
    },
}
