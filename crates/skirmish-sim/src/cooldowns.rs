//! Game-time cooldown tracking for unit abilities.

use std::collections::HashMap;

use skirmish_core::enums::AbilityId;
use skirmish_core::services::AbilityOracle;
use skirmish_core::Result;

/// Last use per (tag, ability), in game seconds.
///
/// Entries are never evicted. Tags of dead units are simply not asked
/// about again.
#[derive(Debug, Default, Clone)]
pub struct CooldownTracker {
    last_used: HashMap<(u64, AbilityId), f32>,
    now: f32,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock used by readiness checks and `mark_used`.
    pub fn set_time(&mut self, now: f32) {
        self.now = now;
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn last_used(&self, tag: u64, ability: AbilityId) -> Option<f32> {
        self.last_used.get(&(tag, ability)).copied()
    }

    pub fn len(&self) -> usize {
        self.last_used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_used.is_empty()
    }
}

impl AbilityOracle for CooldownTracker {
    fn is_ready(&self, tag: u64, ability: AbilityId) -> Result<bool> {
        self.is_ready_after(tag, ability, ability.cooldown_secs())
    }

    fn is_ready_after(&self, tag: u64, ability: AbilityId, cooldown_secs: f32) -> Result<bool> {
        Ok(match self.last_used(tag, ability) {
            Some(used) => self.now - used >= cooldown_secs,
            None => true,
        })
    }

    fn mark_used(&mut self, tag: u64, ability: AbilityId) {
        self.last_used.insert((tag, ability), self.now);
    }
}
