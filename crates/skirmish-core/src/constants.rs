//! Engine constants and tuning defaults.
//!
//! Every engagement threshold here is a hand-tuned game constant. They seed
//! `CombatConfig::default()` and can be overridden at load time.

/// Game steps per second at "faster" game speed.
pub const STEP_RATE: f32 = 22.4;

/// Seconds per step.
pub const DT: f32 = 1.0 / STEP_RATE;

// --- Spatial grouping ---

/// Flood-fill link distance for friendly groups.
pub const OWN_GROUP_DISTANCE: f32 = 7.0;

/// Flood-fill link distance for hostile groups.
pub const ENEMY_GROUP_DISTANCE: f32 = 7.0;

/// Group is too spread out when mean-distance² exceeds footprint-sum × this.
pub const SPREAD_FACTOR: f32 = 2.0;

/// Radius around each registered unit scanned for hostiles.
pub const HOSTILE_SCAN_RADIUS: f32 = 15.0;

/// Cell size of the spatial hash grid.
pub const GRID_CELL_SIZE: f32 = 8.0;

// --- Engagement ---

/// A group holding more than this share of committed power is the main army.
pub const MAIN_ARMY_RATIO: f32 = 0.75;

/// Minimum own/enemy power ratio to keep fighting once engaged.
pub const HOLD_RATIO: f32 = 0.75;

/// Own/whole-enemy-army ratio at which a minority group still attacks.
pub const CRUSH_RATIO: f32 = 0.85;

/// Engaged power share above which a medium-range group counts as in combat.
pub const ENGAGED_POWER_FRACTION: f32 = 0.15;

/// Maximum distance to another friendly group worth falling back to.
pub const REGROUP_SEARCH_DISTANCE: f32 = 50.0;

/// Group centers closer than this are always in combat.
pub const IN_COMBAT_CENTER_DISTANCE: f32 = 10.0;

/// Upper bound of the medium range where engaged power is measured.
pub const ENGAGED_CHECK_DISTANCE: f32 = 17.0;

/// Extra radius beyond a group's extent in which hostiles are handed to micro.
pub const GROUP_ENEMY_MARGIN: f32 = 12.0;

// --- Power model ---

/// Power weight for types missing from the unit tables.
pub const UNKNOWN_UNIT_WEIGHT: f32 = 0.1;

/// Portion of ranged power credited against a melee-heavy enemy.
pub const MELEE_MIX_BONUS: f32 = 0.2;

// --- Unit micro ---

/// Health fraction below which units kite and retreating units stop firing.
pub const RETREAT_HEALTH: f32 = 0.3;

/// Minimum health fraction for an offensive push step.
pub const PUSH_HEALTH: f32 = 0.35;

/// Extra power margin demanded before pushing (1.0 + margin).
pub const PUSH_MARGIN: f32 = 0.25;

/// "Can maybe fight" ratio used by casters deciding to commit energy.
pub const MAYBE_FIGHT_RATIO: f32 = 0.25;

/// Units within this distance of a regroup point count as gathered.
pub const REGROUP_RADIUS: f32 = 4.0;

/// Lookahead beyond real range when scanning for focus-fire targets.
pub const TARGET_SCAN_EXTRA: f32 = 3.0;

/// Score multiplier for targets already within real range.
pub const IN_RANGE_BONUS: f32 = 10.0;

/// Low-health bonus is `LOW_HEALTH_BASE - health_fraction`.
pub const LOW_HEALTH_BASE: f32 = 1.75;

/// Score multiplier for the previously locked target.
pub const CONTINUE_TARGET_BONUS: f32 = 1.2;

/// Score subtracted per distance unit.
pub const DISTANCE_PENALTY: f32 = 0.1;

/// Height difference that counts as holding high ground.
pub const HIGH_GROUND_MARGIN: f32 = 1.0;

/// Weapon cooldown (seconds) still treated as ready to fire.
pub const WEAPON_READY_SLACK: f32 = 0.05;

// --- Command de-duplication ---

/// Suppression window in lock-step mode (steps).
pub const LOCKSTEP_DEDUP_STEPS: u64 = 1;

/// Suppression window in real-time mode (steps).
pub const REALTIME_DEDUP_STEPS: u64 = 11;

/// Point targets closer than this count as the same target.
pub const DEDUP_POINT_TOLERANCE: f32 = 0.5;

/// Largest distance any configured threshold may take.
pub const MAX_CONFIG_DISTANCE: f32 = 500.0;

// --- Harness ---

/// Distance between the two armies' spawn centers.
pub const SCENARIO_SPAWN_SEPARATION: f32 = 40.0;

/// Squad spawn jitter radius.
pub const SCENARIO_SPAWN_JITTER: f32 = 2.5;

/// Hard cap on harness length (steps).
pub const MAX_SKIRMISH_STEPS: u64 = 22_400;

/// Stim speed multiplier.
pub const STIM_SPEED_FACTOR: f32 = 1.5;

/// Stim duration (seconds).
pub const STIM_DURATION_SECS: f32 = 11.0;

/// Health cost of stim for marines; marauders pay double.
pub const STIM_HEALTH_COST: f32 = 10.0;

/// Energy regeneration per second for casters.
pub const ENERGY_REGEN_PER_SEC: f32 = 0.7875;
