//! Delayed form changes for units that toggle between two modes.

use std::collections::HashMap;

use skirmish_core::enums::AbilityId;

/// Pending mode-change requests keyed by unit tag.
///
/// A switch only fires once the same request has stood for the required
/// game time, which keeps units from flickering between modes when enemies
/// hover at the edge of a threshold. Entries live as long as the policy.
#[derive(Debug, Default)]
pub struct ModeSwitch {
    requests: HashMap<u64, (AbilityId, f32)>,
}

impl ModeSwitch {
    /// Record a request. True once it has been held for `delay` seconds.
    pub fn request(&mut self, tag: u64, ability: AbilityId, now: f32, delay: f32) -> bool {
        let entry = self.requests.entry(tag).or_insert((ability, now));
        if entry.0 != ability {
            *entry = (ability, now);
        }
        now - entry.1 >= delay
    }

    pub fn cancel(&mut self, tag: u64) {
        self.requests.remove(&tag);
    }

    pub fn pending(&self, tag: u64) -> Option<AbilityId> {
        self.requests.get(&tag).map(|(ability, _)| *ability)
    }
}
