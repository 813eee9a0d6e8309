//! Contracts for the collaborators the combat engine consumes.
//!
//! The engine never owns game state. Everything it reads arrives through
//! these traits as a per-tick snapshot, and everything it decides leaves
//! through the command sink.

use crate::commands::UnitCommand;
use crate::enums::{AbilityId, Side};
use crate::error::Result;
use crate::types::{Point2, SimTime};
use crate::unit::CombatUnit;

/// Spatial and tag lookup over the current tick's unit snapshots.
pub trait UnitIndex {
    /// Live units of `side` within `radius` of `position`, sorted by tag.
    fn units_in_range(&self, position: Point2, radius: f32, side: Side) -> Vec<&CombatUnit>;

    fn by_tag(&self, tag: u64) -> Option<&CombatUnit>;
}

/// Ability availability, keyed by unit tag.
pub trait AbilityOracle {
    /// Ready according to the ability's default cooldown.
    fn is_ready(&self, tag: u64, ability: AbilityId) -> Result<bool>;

    /// Ready if at least `cooldown_secs` of game time passed since last use.
    fn is_ready_after(&self, tag: u64, ability: AbilityId, cooldown_secs: f32) -> Result<bool>;

    fn mark_used(&mut self, tag: u64, ability: AbilityId);
}

/// Path and influence queries.
pub trait PathService {
    /// Next waypoint from `from` toward `to`, at most `max_distance` away.
    fn find_path(&self, from: Point2, to: Point2, max_distance: f32) -> Result<Point2>;

    /// Lowest-threat point within `radius` of `around`.
    fn weakest_influence_point(&self, around: Point2, radius: f32, air: bool) -> Result<Point2>;
}

/// Destination for concrete commands. Fire-and-forget.
pub trait CommandSink {
    fn push(&mut self, command: UnitCommand);
}

impl CommandSink for Vec<UnitCommand> {
    fn push(&mut self, command: UnitCommand) {
        Vec::push(self, command);
    }
}

/// Collaborator handles for one `execute` call.
pub struct Services<'a> {
    pub units: &'a dyn UnitIndex,
    pub abilities: &'a mut dyn AbilityOracle,
    pub paths: &'a dyn PathService,
    pub commands: &'a mut dyn CommandSink,
    pub time: SimTime,
}
