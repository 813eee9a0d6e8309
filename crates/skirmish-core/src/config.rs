//! Combat engine configuration.
//!
//! Every threshold is a hand-tuned game constant with no derivation behind
//! it. Defaults come from `constants`; any subset can be overridden from
//! JSON, missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{CombatError, Result};

/// Top-level configuration handed to a `CombatEngine`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub grouping: GroupingConfig,
    pub engagement: EngagementConfig,
    pub micro: MicroConfig,
    pub dedup: DedupConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Flood-fill link distance between friendly units.
    pub own_group_distance: f32,
    /// Flood-fill link distance between hostile units.
    pub enemy_group_distance: f32,
    /// Spread check: mean-distance² > footprint-sum × spread_factor.
    pub spread_factor: f32,
    /// Radius scanned around each registered unit for hostiles.
    pub hostile_scan_radius: f32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            own_group_distance: OWN_GROUP_DISTANCE,
            enemy_group_distance: ENEMY_GROUP_DISTANCE,
            spread_factor: SPREAD_FACTOR,
            hostile_scan_radius: HOSTILE_SCAN_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Share of committed power above which a group is the main army.
    pub main_army_ratio: f32,
    /// Power ratio needed to keep fighting an engaged hostile group.
    pub hold_ratio: f32,
    /// Power ratio against the whole hostile army for a minority group to attack.
    pub crush_ratio: f32,
    /// Engaged-power share that makes a medium-range group count as in combat.
    pub engaged_power_fraction: f32,
    /// How far to look for another friendly group to fall back on.
    pub regroup_search_distance: f32,
    /// Center distance below which groups are always in combat.
    pub in_combat_center_distance: f32,
    /// Center distance below which engaged power is measured.
    pub engaged_check_distance: f32,
    /// Margin beyond a group's extent in which hostiles are handed to micro.
    pub group_enemy_margin: f32,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            main_army_ratio: MAIN_ARMY_RATIO,
            hold_ratio: HOLD_RATIO,
            crush_ratio: CRUSH_RATIO,
            engaged_power_fraction: ENGAGED_POWER_FRACTION,
            regroup_search_distance: REGROUP_SEARCH_DISTANCE,
            in_combat_center_distance: IN_COMBAT_CENTER_DISTANCE,
            engaged_check_distance: ENGAGED_CHECK_DISTANCE,
            group_enemy_margin: GROUP_ENEMY_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroConfig {
    pub retreat_health: f32,
    pub push_health: f32,
    pub push_margin: f32,
    pub maybe_fight_ratio: f32,
    pub regroup_radius: f32,
    pub target_scan_extra: f32,
    pub in_range_bonus: f32,
    pub low_health_base: f32,
    pub continue_bonus: f32,
    pub distance_penalty: f32,
    pub high_ground_margin: f32,
}

impl Default for MicroConfig {
    fn default() -> Self {
        Self {
            retreat_health: RETREAT_HEALTH,
            push_health: PUSH_HEALTH,
            push_margin: PUSH_MARGIN,
            maybe_fight_ratio: MAYBE_FIGHT_RATIO,
            regroup_radius: REGROUP_RADIUS,
            target_scan_extra: TARGET_SCAN_EXTRA,
            in_range_bonus: IN_RANGE_BONUS,
            low_health_base: LOW_HEALTH_BASE,
            continue_bonus: CONTINUE_TARGET_BONUS,
            distance_penalty: DISTANCE_PENALTY,
            high_ground_margin: HIGH_GROUND_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Real-time mode uses the longer suppression window.
    pub realtime: bool,
    pub lockstep_window_steps: u64,
    pub realtime_window_steps: u64,
    /// Point targets within this distance count as equal.
    pub point_tolerance: f32,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            realtime: false,
            lockstep_window_steps: LOCKSTEP_DEDUP_STEPS,
            realtime_window_steps: REALTIME_DEDUP_STEPS,
            point_tolerance: DEDUP_POINT_TOLERANCE,
        }
    }
}

impl DedupConfig {
    /// Suppression window in steps for the current mode.
    pub fn window_steps(&self) -> u64 {
        if self.realtime {
            self.realtime_window_steps
        } else {
            self.lockstep_window_steps
        }
    }
}

impl CombatConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject internally inconsistent settings.
    pub fn validate(&self) -> Result<()> {
        let e = &self.engagement;
        for (name, ratio) in [
            ("main_army_ratio", e.main_army_ratio),
            ("hold_ratio", e.hold_ratio),
            ("crush_ratio", e.crush_ratio),
            ("engaged_power_fraction", e.engaged_power_fraction),
            ("retreat_health", self.micro.retreat_health),
            ("push_health", self.micro.push_health),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(CombatError::InvalidConfig(format!(
                    "{name} ({ratio}) must be in (0, 1]"
                )));
            }
        }

        let g = &self.grouping;
        for (name, distance) in [
            ("own_group_distance", g.own_group_distance),
            ("enemy_group_distance", g.enemy_group_distance),
            ("hostile_scan_radius", g.hostile_scan_radius),
            ("regroup_search_distance", e.regroup_search_distance),
            ("in_combat_center_distance", e.in_combat_center_distance),
            ("engaged_check_distance", e.engaged_check_distance),
            ("group_enemy_margin", e.group_enemy_margin),
            ("regroup_radius", self.micro.regroup_radius),
            ("point_tolerance", self.dedup.point_tolerance),
        ] {
            if !(0.0..=MAX_CONFIG_DISTANCE).contains(&distance) {
                return Err(CombatError::InvalidConfig(format!(
                    "{name} ({distance}) must be in [0, {MAX_CONFIG_DISTANCE}]"
                )));
            }
        }

        if e.in_combat_center_distance >= e.engaged_check_distance {
            return Err(CombatError::InvalidConfig(format!(
                "in_combat_center_distance ({}) should be < engaged_check_distance ({})",
                e.in_combat_center_distance, e.engaged_check_distance
            )));
        }

        if !(self.micro.push_margin >= 0.0 && self.micro.push_margin.is_finite()) {
            return Err(CombatError::InvalidConfig(format!(
                "push_margin ({}) must be finite and not negative",
                self.micro.push_margin
            )));
        }

        if !(g.spread_factor > 0.0 && g.spread_factor.is_finite()) {
            return Err(CombatError::InvalidConfig(format!(
                "spread_factor ({}) must be finite and positive",
                g.spread_factor
            )));
        }

        Ok(())
    }
}
