//! Abstract per-unit actions produced by micro policies.

use serde::{Deserialize, Serialize};

use crate::enums::AbilityId;
use crate::types::Point2;

/// What an action or command is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// Self-cast or untargeted.
    None,
    Point(Point2),
    Unit(u64),
}

impl Target {
    pub fn point(&self) -> Option<Point2> {
        match self {
            Target::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn unit(&self) -> Option<u64> {
        match self {
            Target::Unit(tag) => Some(*tag),
            _ => None,
        }
    }

    /// Same unit, or points within `tolerance` of each other.
    pub fn approx_eq(&self, other: &Target, tolerance: f32) -> bool {
        match (self, other) {
            (Target::None, Target::None) => true,
            (Target::Unit(a), Target::Unit(b)) => a == b,
            (Target::Point(a), Target::Point(b)) => a.distance(*b) <= tolerance,
            _ => false,
        }
    }
}

/// Immutable decision for one unit. Converted to exactly one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub target: Target,
    pub is_attack: bool,
    pub ability: Option<AbilityId>,
    /// Short human-readable reason, for reports and logs.
    pub note: &'static str,
}

impl Action {
    pub fn attack_to(point: Point2) -> Self {
        Self {
            target: Target::Point(point),
            is_attack: true,
            ability: None,
            note: "attack",
        }
    }

    pub fn attack_unit(tag: u64) -> Self {
        Self {
            target: Target::Unit(tag),
            is_attack: true,
            ability: None,
            note: "focus",
        }
    }

    pub fn move_to(point: Point2) -> Self {
        Self {
            target: Target::Point(point),
            is_attack: false,
            ability: None,
            note: "move",
        }
    }

    pub fn cast(ability: AbilityId, target: Target) -> Self {
        Self {
            target,
            is_attack: false,
            ability: Some(ability),
            note: "cast",
        }
    }

    pub fn hold() -> Self {
        Self::cast(AbilityId::HoldPosition, Target::None).with_note("hold")
    }

    pub fn with_note(mut self, note: &'static str) -> Self {
        self.note = note;
        self
    }

    /// The ability a command for this action would carry.
    pub fn command_ability(&self) -> AbilityId {
        match self.ability {
            Some(ability) => ability,
            None if self.is_attack => AbilityId::Attack,
            None => AbilityId::Move,
        }
    }

    pub fn is_cast(&self) -> bool {
        self.ability.is_some()
    }
}
