//! Combat power model.
//!
//! Pure arithmetic over unit snapshots. A set's value is the sum of its
//! members' values, so group and army totals can be built incrementally.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::constants::MELEE_MIX_BONUS;
use crate::unit::CombatUnit;

/// Aggregate combat value of a set of units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerValue {
    /// Total value regardless of what can be hit.
    pub power: f32,
    /// Value of units that can shoot ground targets.
    pub ground_power: f32,
    /// Value of units that can shoot air targets.
    pub air_power: f32,
    /// Value of melee units (subset of ground_power).
    pub melee_power: f32,
    /// Value standing on the ground, i.e. what ground weapons must answer.
    pub ground_presence: f32,
    /// Value in the air, i.e. what anti-air must answer.
    pub air_presence: f32,
}

impl PowerValue {
    pub fn has_air(&self) -> bool {
        self.air_presence > 0.0
    }

    pub fn has_ground(&self) -> bool {
        self.ground_presence > 0.0
    }

    pub fn is_zero(&self) -> bool {
        self.power <= 0.0
    }

    /// Share of `power` contributed by melee units.
    pub fn melee_fraction(&self) -> f32 {
        if self.power <= 0.0 {
            return 0.0;
        }
        (self.melee_power / self.power).clamp(0.0, 1.0)
    }

    /// Credit ranged units get against a melee-heavy opponent.
    fn mix_bonus(&self, enemy: &PowerValue) -> f32 {
        MELEE_MIX_BONUS * (self.power - self.melee_power).max(0.0) * enemy.melee_fraction()
    }

    /// Whether this side is strong enough to take on `enemy` at `ratio`.
    ///
    /// Air and ground are checked separately: an enemy we cannot shoot is
    /// never beatable no matter how large our total is.
    pub fn is_enough_for(&self, enemy: &PowerValue, ratio: f32) -> bool {
        let mix = self.mix_bonus(enemy);

        if enemy.has_air() && self.air_power < enemy.air_presence * ratio {
            return false;
        }
        if enemy.has_ground() && self.ground_power + mix < enemy.ground_presence * ratio {
            return false;
        }
        self.power + mix >= enemy.power * ratio
    }
}

impl Add for PowerValue {
    type Output = PowerValue;

    fn add(mut self, rhs: PowerValue) -> PowerValue {
        self += rhs;
        self
    }
}

impl AddAssign for PowerValue {
    fn add_assign(&mut self, rhs: PowerValue) {
        self.power += rhs.power;
        self.ground_power += rhs.ground_power;
        self.air_power += rhs.air_power;
        self.melee_power += rhs.melee_power;
        self.ground_presence += rhs.ground_presence;
        self.air_presence += rhs.air_presence;
    }
}

impl Sum for PowerValue {
    fn sum<I: Iterator<Item = PowerValue>>(iter: I) -> PowerValue {
        iter.fold(PowerValue::default(), Add::add)
    }
}

impl<'a> Sum<&'a PowerValue> for PowerValue {
    fn sum<I: Iterator<Item = &'a PowerValue>>(iter: I) -> PowerValue {
        iter.copied().sum()
    }
}

/// Combat value of a single unit.
///
/// Damaged units count for less, but never below half their weight.
pub fn unit_power(unit: &CombatUnit) -> PowerValue {
    let stats = unit.stats();
    let power = stats.weight * (0.5 + 0.5 * unit.health_fraction());

    PowerValue {
        power,
        ground_power: if stats.can_attack_ground() { power } else { 0.0 },
        air_power: if stats.can_attack_air() { power } else { 0.0 },
        melee_power: if stats.is_melee() { power } else { 0.0 },
        ground_presence: if unit.is_flying { 0.0 } else { power },
        air_presence: if unit.is_flying { power } else { 0.0 },
    }
}

/// Combat value of a set of units.
pub fn value<'a>(units: impl IntoIterator<Item = &'a CombatUnit>) -> PowerValue {
    units.into_iter().map(unit_power).sum()
}
