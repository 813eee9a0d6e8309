//! Per-tick inputs handed to every policy hook.
//!
//! Nothing here outlives the tick. Policies keep their own per-tag state;
//! everything else arrives through these two structs.

use skirmish_core::action::Action;
use skirmish_core::config::MicroConfig;
use skirmish_core::enums::{AbilityId, Intent, Side};
use skirmish_core::power::PowerValue;
use skirmish_core::services::{AbilityOracle, PathService, UnitIndex};
use skirmish_core::types::{Point2, SimTime};
use skirmish_core::unit::CombatUnit;
use skirmish_core::Result;

/// Snapshot references and collaborator handles for one tick.
pub struct MicroContext<'a> {
    pub units: &'a dyn UnitIndex,
    pub abilities: &'a dyn AbilityOracle,
    pub paths: &'a dyn PathService,
    pub config: &'a MicroConfig,
    pub time: SimTime,
}

impl<'a> MicroContext<'a> {
    /// Game seconds since match start.
    pub fn now(&self) -> f32 {
        self.time.elapsed_secs
    }

    /// Off cooldown and enough energy for the cast.
    pub fn can_cast(&self, unit: &CombatUnit, ability: AbilityId) -> Result<bool> {
        if unit.energy < ability.energy_cost() {
            return Ok(false);
        }
        self.abilities.is_ready(unit.tag, ability)
    }

    /// Hostiles of `unit` within `radius` of `point`, from the live index.
    pub fn enemies_near(&self, unit: &CombatUnit, point: Point2, radius: f32) -> Vec<&'a CombatUnit> {
        let units = self.units;
        units.units_in_range(point, radius, unit.side.opponent())
    }
}

/// The engagement decision for one friendly group, as seen by micro.
#[derive(Debug, Clone)]
pub struct GroupOrder<'a> {
    pub intent: Intent,
    /// Where the group is sent: enemy center, regroup point or retreat point.
    pub target: Point2,
    pub center: Point2,
    pub own_power: PowerValue,
    /// Power of the hostile group being engaged.
    pub enemy_power: PowerValue,
    /// Hostiles near the group, sorted by tag.
    pub enemies: Vec<&'a CombatUnit>,
    /// All members of the group, sorted by tag.
    pub allies: Vec<&'a CombatUnit>,
}

impl<'a> GroupOrder<'a> {
    /// The action every unit falls back to when no policy has a better idea.
    pub fn default_action(&self) -> Action {
        match self.intent {
            Intent::DefensiveRetreat | Intent::PanicRetreat => {
                Action::move_to(self.target).with_note("retreat")
            }
            Intent::ReGroup => Action::move_to(self.target).with_note("regroup"),
            Intent::Attack | Intent::SearchAndDestroy | Intent::Push | Intent::Harass => {
                Action::attack_to(self.target)
            }
        }
    }

    pub fn side(&self) -> Side {
        self.allies.first().map(|u| u.side).unwrap_or_default()
    }

    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    /// Whether our side is winning this fight by at least `ratio`.
    pub fn winning(&self, ratio: f32) -> bool {
        self.own_power.is_enough_for(&self.enemy_power, ratio)
    }
}
