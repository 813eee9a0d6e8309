//! Action to command conversion with duplicate suppression.
//!
//! The resolver remembers the last command per tag and drops equivalents
//! issued inside the suppression window.

use std::collections::HashMap;

use tracing::trace;

use skirmish_core::action::{Action, Target};
use skirmish_core::commands::UnitCommand;
use skirmish_core::config::DedupConfig;
use skirmish_core::enums::AbilityId;
use skirmish_core::unit::CombatUnit;

#[derive(Debug, Clone, Copy)]
struct Issued {
    ability: AbilityId,
    target: Target,
    step: u64,
}

#[derive(Debug)]
pub struct ActionResolver {
    config: DedupConfig,
    history: HashMap<u64, Issued>,
}

impl ActionResolver {
    pub fn new(config: DedupConfig) -> Self {
        Self {
            config,
            history: HashMap::new(),
        }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Drop history entries older than the suppression window.
    pub fn age(&mut self, step: u64) {
        let window = self.config.window_steps();
        self.history
            .retain(|_, issued| step.saturating_sub(issued.step) <= window);
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Turn `action` into a command, or `None` when it would repeat an
    /// equivalent order.
    ///
    /// Suppressed when the same ability and (approximately) the same
    /// target went out inside the window, or when a move or attack
    /// matches the order the unit is already executing.
    pub fn resolve(&mut self, unit: &CombatUnit, action: &Action, step: u64) -> Option<UnitCommand> {
        let command = UnitCommand::from_action(unit.tag, action);
        let tolerance = self.config.point_tolerance;
        let window = self.config.window_steps();

        if let Some(issued) = self.history.get(&unit.tag) {
            if step.saturating_sub(issued.step) <= window
                && issued.ability == command.ability
                && issued.target.approx_eq(&command.target, tolerance)
            {
                trace!(tag = unit.tag, ability = ?command.ability, "suppressed recent duplicate");
                return None;
            }
        }

        if !action.is_cast() {
            if let Some((ability, target)) = unit.order {
                if ability == command.ability && target.approx_eq(&command.target, tolerance) {
                    trace!(tag = unit.tag, ability = ?command.ability, "already executing");
                    return None;
                }
            }
        }

        self.history.insert(
            unit.tag,
            Issued {
                ability: command.ability,
                target: command.target,
                step,
            },
        );
        Some(command)
    }
}
