//! Concrete unit commands handed to the command sink.
//!
//! Commands are fire-and-forget from the engine's point of view.

use serde::Serialize;

use crate::action::{Action, Target};
use crate::enums::AbilityId;

/// One order for one unit, ready for transmission to the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitCommand {
    pub tag: u64,
    pub ability: AbilityId,
    pub target: Target,
}

impl UnitCommand {
    pub fn from_action(tag: u64, action: &Action) -> Self {
        Self {
            tag,
            ability: action.command_ability(),
            target: action.target,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.ability == AbilityId::Attack
    }

    pub fn is_move(&self) -> bool {
        self.ability == AbilityId::Move
    }
}
