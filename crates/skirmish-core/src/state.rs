//! Reports produced by the engine and snapshots produced by the harness.

use serde::Serialize;

use crate::action::Action;
use crate::enums::*;
use crate::events::SkirmishEvent;
use crate::power::PowerValue;
use crate::types::{Point2, SimTime};

/// Outcome of one `execute` pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickReport {
    pub step: u64,
    pub groups: Vec<GroupReport>,
    /// Exactly one entry per registered live unit.
    pub actions: Vec<ResolvedAction>,
    /// Commands handed to the sink.
    pub emitted: usize,
    /// Commands dropped as duplicates.
    pub suppressed: usize,
    /// Hooks that failed and fell back to the default action.
    pub faults: usize,
    /// Registered tags that were not live this tick.
    pub missing: usize,
}

impl TickReport {
    pub fn action_for(&self, tag: u64) -> Option<&Action> {
        self.actions.iter().find(|a| a.tag == tag).map(|a| &a.action)
    }

    pub fn group_of(&self, tag: u64) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.tags.contains(&tag))
    }
}

/// Engagement decision for one friendly group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub center: Point2,
    pub tags: Vec<u64>,
    pub intent: Intent,
    pub target: Point2,
    pub in_combat: bool,
    pub too_spread: bool,
    pub power: PowerValue,
    /// Power of the nearest hostile group, zero when none was found.
    pub enemy_power: PowerValue,
    /// Which decision branch produced the intent.
    pub reason: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAction {
    pub tag: u64,
    pub action: Action,
}

/// Visible state of the harness after a step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkirmishSnapshot {
    pub time: SimTime,
    pub scenario: ScenarioId,
    pub units: Vec<UnitView>,
    pub own_alive: usize,
    pub enemy_alive: usize,
    /// Set once one side has no units left.
    pub winner: Option<Side>,
    pub events: Vec<SkirmishEvent>,
    pub own_commands: usize,
    pub enemy_commands: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitView {
    pub tag: u64,
    pub unit_type: UnitTypeId,
    pub side: Side,
    pub position: Point2,
    pub health: f32,
    pub shield: f32,
    pub energy: f32,
    pub order: Option<AbilityId>,
}
