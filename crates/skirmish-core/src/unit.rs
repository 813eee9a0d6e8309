//! Read-only per-tick unit snapshot.
//!
//! Snapshots are owned by the unit cache. The engine only borrows them for
//! the duration of one tick and never stores them across ticks.

use bitflags::bitflags;

use crate::action::Target;
use crate::constants::WEAPON_READY_SLACK;
use crate::enums::{AbilityId, Side, UnitTypeId};
use crate::types::Point2;
use crate::unit_data::{stats, Attributes, UnitStats};

bitflags! {
    /// Temporary effects visible on a unit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buffs: u16 {
        const STIMMED = 1 << 0;
        const GUARDIAN_SHIELD = 1 << 1;
        const LOCKED_ON = 1 << 2;
        const FUNGAL = 1 << 3;
        const PULSAR_BEAM = 1 << 4;
        const PARASITIC_BOMB = 1 << 5;
        const INTERFERENCE = 1 << 6;
        const GRAVITON = 1 << 7;
    }
}

/// One live unit as seen at the start of the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatUnit {
    pub tag: u64,
    pub unit_type: UnitTypeId,
    pub side: Side,
    pub position: Point2,
    /// Terrain height under the unit.
    pub height: f32,
    pub radius: f32,
    pub health: f32,
    pub health_max: f32,
    pub shield: f32,
    pub shield_max: f32,
    pub energy: f32,
    /// Seconds until the weapon can fire again.
    pub weapon_cooldown: f32,
    pub is_flying: bool,
    pub is_structure: bool,
    pub is_burrowed: bool,
    pub buffs: Buffs,
    /// The order the unit is currently executing, if any.
    pub order: Option<(AbilityId, Target)>,
}

impl CombatUnit {
    /// Full-health snapshot with stats taken from the unit tables.
    pub fn new(tag: u64, unit_type: UnitTypeId, side: Side, position: Point2) -> Self {
        let s = stats(unit_type);
        Self {
            tag,
            unit_type,
            side,
            position,
            height: 0.0,
            radius: s.radius,
            health: s.max_health,
            health_max: s.max_health,
            shield: s.max_shield,
            shield_max: s.max_shield,
            energy: s.max_energy * 0.5,
            weapon_cooldown: 0.0,
            is_flying: s.is_flying,
            is_structure: s.is_structure(),
            is_burrowed: matches!(
                unit_type,
                UnitTypeId::WidowMineBurrowed
                    | UnitTypeId::RoachBurrowed
                    | UnitTypeId::LurkerBurrowed
            ),
            buffs: Buffs::empty(),
            order: None,
        }
    }

    /// Scale health and shield to the given fraction of their maximum.
    pub fn with_health_fraction(mut self, fraction: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        self.health = self.health_max * fraction;
        self.shield = self.shield_max * fraction;
        self
    }

    pub fn with_weapon_cooldown(mut self, secs: f32) -> Self {
        self.weapon_cooldown = secs;
        self
    }

    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn stats(&self) -> UnitStats {
        stats(self.unit_type)
    }

    pub fn has_attribute(&self, attribute: Attributes) -> bool {
        self.stats().attributes.contains(attribute)
    }

    pub fn has_buff(&self, buff: Buffs) -> bool {
        self.buffs.contains(buff)
    }

    /// Combined health and shield as a fraction of the combined maximum.
    pub fn health_fraction(&self) -> f32 {
        let max = self.health_max + self.shield_max;
        if max <= 0.0 {
            return 1.0;
        }
        ((self.health + self.shield) / max).clamp(0.0, 1.0)
    }

    /// Health alone (ignoring shields) as a fraction of maximum.
    pub fn hull_fraction(&self) -> f32 {
        if self.health_max <= 0.0 {
            return 1.0;
        }
        (self.health / self.health_max).clamp(0.0, 1.0)
    }

    pub fn distance_to(&self, other: &CombatUnit) -> f32 {
        self.position.distance(other.position)
    }

    pub fn distance_to_point(&self, point: Point2) -> f32 {
        self.position.distance(point)
    }

    /// Raw weapon range against the given target, 0 if it cannot be hit.
    pub fn range_vs(&self, target: &CombatUnit) -> f32 {
        let s = self.stats();
        if target.is_flying {
            s.air_range
        } else {
            s.ground_range
        }
    }

    pub fn can_attack(&self, target: &CombatUnit) -> bool {
        self.range_vs(target) > 0.0
    }

    pub fn can_attack_ground(&self) -> bool {
        self.stats().can_attack_ground()
    }

    pub fn can_attack_air(&self) -> bool {
        self.stats().can_attack_air()
    }

    /// Weapon range including both participants' radii, 0 if it cannot attack.
    pub fn real_range_vs(&self, target: &CombatUnit) -> f32 {
        let range = self.range_vs(target);
        if range <= 0.0 {
            return 0.0;
        }
        range + self.radius + target.radius
    }

    /// True when `target` is already inside this unit's real range.
    pub fn in_real_range(&self, target: &CombatUnit) -> bool {
        self.can_attack(target) && self.distance_to(target) <= self.real_range_vs(target)
    }

    pub fn weapon_ready(&self) -> bool {
        self.weapon_cooldown <= WEAPON_READY_SLACK
    }

    pub fn is_melee(&self) -> bool {
        self.stats().is_melee()
    }

    pub fn is_worker(&self) -> bool {
        self.unit_type.is_worker()
    }

    /// Maximum of the ground and air weapon ranges.
    pub fn max_range(&self) -> f32 {
        let s = self.stats();
        s.ground_range.max(s.air_range)
    }

    pub fn speed(&self) -> f32 {
        self.stats().speed
    }
}
