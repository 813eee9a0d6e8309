//! Headless skirmish harness.
//!
//! `Skirmish` owns a hecs world with two armies, each commanded by its
//! own `CombatEngine`, and advances it at a fixed step rate. Completely
//! deterministic for a given seed.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use skirmish_core::commands::UnitCommand;
use skirmish_core::config::CombatConfig;
use skirmish_core::components::Owner;
use skirmish_core::constants::MAX_SKIRMISH_STEPS;
use skirmish_core::enums::*;
use skirmish_core::events::SkirmishEvent;
use skirmish_core::power::value;
use skirmish_core::services::Services;
use skirmish_core::state::{SkirmishSnapshot, TickReport};
use skirmish_core::types::{centroid, Point2, SimTime};

use crate::cache::UnitCache;
use crate::cooldowns::CooldownTracker;
use crate::engine::CombatEngine;
use crate::pathing::InfluencePaths;
use crate::scenario;
use crate::systems;
use crate::systems::abilities::CastContext;

/// Configuration for starting a new skirmish.
#[derive(Debug, Clone)]
pub struct SkirmishConfig {
    /// RNG seed for determinism. Same seed = same skirmish.
    pub seed: u64,
    pub scenario: ScenarioId,
    /// Shared by both sides' engines.
    pub combat: CombatConfig,
    /// Stop after this many steps even without a winner.
    pub max_steps: u64,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scenario: ScenarioId::default(),
            combat: CombatConfig::default(),
            max_steps: MAX_SKIRMISH_STEPS,
        }
    }
}

/// One army's commander: an engine plus its collaborators.
struct Commander {
    side: Side,
    engine: CombatEngine,
    cooldowns: CooldownTracker,
    paths: InfluencePaths,
    home: Point2,
    last_report: TickReport,
}

impl Commander {
    fn new(side: Side, config: CombatConfig) -> Self {
        Self {
            side,
            engine: CombatEngine::new(config),
            cooldowns: CooldownTracker::new(),
            paths: InfluencePaths::new(),
            home: scenario::spawn_point(side),
            last_report: TickReport::default(),
        }
    }

    /// Register every live unit of this side and run one combat pass.
    fn think(&mut self, cache: &UnitCache, time: SimTime) -> Vec<UnitCommand> {
        let opponent = self.side.opponent();
        let hostile_power = value(cache.of_side(opponent));
        let own_power = value(cache.of_side(self.side));

        self.paths.refresh(cache.of_side(opponent));
        self.cooldowns.set_time(time.elapsed_secs);
        self.engine.register_all(cache.of_side(self.side).map(|u| u.tag));

        let target = centroid(cache.of_side(opponent).map(|u| u.position))
            .unwrap_or_else(|| scenario::spawn_point(opponent));
        let ratio = self.engine.config().micro.maybe_fight_ratio;
        let intent = (!own_power.is_enough_for(&hostile_power, ratio))
            .then_some(Intent::DefensiveRetreat);
        let destination = if intent.is_some() { self.home } else { target };

        let mut commands: Vec<UnitCommand> = Vec::new();
        let mut services = Services {
            units: cache,
            abilities: &mut self.cooldowns,
            paths: &self.paths,
            commands: &mut commands,
            time,
        };
        self.last_report = self.engine.execute(&mut services, destination, intent);
        commands
    }
}

/// The harness. Owns the ECS world and both commanders.
pub struct Skirmish {
    world: World,
    time: SimTime,
    scenario: ScenarioId,
    next_tag: u64,
    max_steps: u64,
    own: Commander,
    enemy: Commander,
    cache: UnitCache,
    winner: Option<Side>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SkirmishEvent>,
}

impl Skirmish {
    /// Create a skirmish and spawn the scenario's armies.
    pub fn new(config: SkirmishConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let next_tag = scenario::spawn_scenario(&mut world, &mut rng, config.scenario);
        info!(scenario = ?config.scenario, seed = config.seed, units = next_tag - 1, "skirmish started");

        Self {
            world,
            time: SimTime::default(),
            scenario: config.scenario,
            next_tag,
            max_steps: config.max_steps,
            own: Commander::new(Side::Own, config.combat.clone()),
            enemy: Commander::new(Side::Enemy, config.combat),
            cache: UnitCache::new(),
            winner: None,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Advance one step and return the resulting snapshot.
    pub fn tick(&mut self) -> SkirmishSnapshot {
        let mut counts = (0, 0);
        if !self.is_finished() {
            counts = self.run_systems();
            self.time.advance();
            self.check_winner();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.scenario,
            events,
            counts,
            self.winner,
        )
    }

    /// Run until a side wins or the step limit is reached.
    pub fn run_to_end(&mut self) -> SkirmishSnapshot {
        let mut snapshot = self.tick();
        while !self.is_finished() {
            snapshot = self.tick();
        }
        snapshot
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.time.step >= self.max_steps
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The last combat pass report of `side`.
    pub fn last_report(&self, side: Side) -> &TickReport {
        match side {
            Side::Enemy => &self.enemy.last_report,
            Side::Own | Side::Neutral => &self.own.last_report,
        }
    }

    fn check_winner(&mut self) {
        let own = self.alive(Side::Own);
        let enemy = self.alive(Side::Enemy);
        self.winner = match (own, enemy) {
            (0, 0) => Some(Side::Neutral),
            (_, 0) => Some(Side::Own),
            (0, _) => Some(Side::Enemy),
            _ => None,
        };
        if let Some(winner) = self.winner {
            info!(?winner, step = self.time.step, "skirmish over");
        }
    }

    fn alive(&self, side: Side) -> usize {
        self.world
            .query::<&Owner>()
            .iter()
            .filter(|(_, owner)| owner.0 == side)
            .count()
    }

    /// Run all systems in order. Returns the commands emitted per side.
    fn run_systems(&mut self) -> (usize, usize) {
        let dt = self.time.dt();

        // 1. Snapshot
        self.cache
            .refresh(systems::snapshot::collect_units(&self.world));

        // 2. Both commanders decide from the same snapshot
        let own_commands = self.own.think(&self.cache, self.time);
        let enemy_commands = self.enemy.think(&self.cache, self.time);

        // 3. Orders and casts
        let index = systems::snapshot::entity_index(&self.world);
        let mut ctx = CastContext {
            index: &index,
            next_tag: &mut self.next_tag,
            events: &mut self.events,
        };
        systems::orders::apply(&mut self.world, &own_commands, &mut ctx);
        systems::orders::apply(&mut self.world, &enemy_commands, &mut ctx);

        // 4. Movement and weapons see the post-order state
        let units = systems::snapshot::collect_units(&self.world);
        let busy = systems::weapons::busy_units(&self.world);
        systems::movement::run(&mut self.world, &units, &busy, dt);
        systems::weapons::run(&mut self.world, &units, &index, dt);

        // 5. Energy, effect timers and form changes
        systems::abilities::run(&mut self.world, dt, &mut self.events);

        // 6. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);

        (own_commands.len(), enemy_commands.len())
    }
}
