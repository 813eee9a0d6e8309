//! Combat engine: the per-tick pipeline.
//!
//! `CombatEngine` owns everything that lives across ticks for one side:
//! configuration, the micro policy registry and the command history.
//! Everything else arrives through `Services` and is discarded at the end
//! of `execute`.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, error};

use skirmish_core::action::Action;
use skirmish_core::config::CombatConfig;
use skirmish_core::enums::Intent;
use skirmish_core::power::PowerValue;
use skirmish_core::services::{Services, UnitIndex};
use skirmish_core::state::{GroupReport, ResolvedAction, TickReport};
use skirmish_core::types::Point2;
use skirmish_core::unit::CombatUnit;
use skirmish_micro::{GroupOrder, MicroContext, MicroRegistry};

use crate::engagement::{self, Battlefield};
use crate::grouping::{group_units, CombatGroup};
use crate::resolver::ActionResolver;

pub struct CombatEngine {
    config: CombatConfig,
    registry: MicroRegistry,
    resolver: ActionResolver,
    /// Tags under combat control for the next `execute`.
    registered: BTreeSet<u64>,
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatEngine {
    pub fn new(config: CombatConfig) -> Self {
        let resolver = ActionResolver::new(config.dedup.clone());
        Self {
            config,
            registry: MicroRegistry::new(),
            resolver,
            registered: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Mark a unit as under combat control for this tick.
    pub fn register(&mut self, tag: u64) {
        self.registered.insert(tag);
    }

    pub fn register_all(&mut self, tags: impl IntoIterator<Item = u64>) {
        self.registered.extend(tags);
    }

    pub fn registered(&self) -> usize {
        self.registered.len()
    }

    /// Run one full pass: group, decide, resolve and emit.
    ///
    /// Every registered live unit receives exactly one action. Decisions
    /// are all made against the same snapshot before any command is
    /// emitted. Registration is cleared afterwards.
    pub fn execute(
        &mut self,
        services: &mut Services<'_>,
        target: Point2,
        intent_override: Option<Intent>,
    ) -> TickReport {
        let step = services.time.step;
        let default_intent = intent_override.unwrap_or_default();
        let units: &dyn UnitIndex = services.units;
        self.resolver.age(step);

        let mut report = TickReport {
            step,
            ..TickReport::default()
        };

        let registered = std::mem::take(&mut self.registered);
        let mut own: Vec<&CombatUnit> = Vec::with_capacity(registered.len());
        for &tag in &registered {
            match units.by_tag(tag) {
                Some(unit) => own.push(unit),
                None => report.missing += 1,
            }
        }
        if own.is_empty() {
            return report;
        }

        let side = own[0].side;
        let grouping = &self.config.grouping;
        let mut hostiles: BTreeMap<u64, &CombatUnit> = BTreeMap::new();
        for unit in &own {
            for enemy in units.units_in_range(unit.position, grouping.hostile_scan_radius, side.opponent()) {
                hostiles.insert(enemy.tag, enemy);
            }
        }
        let hostile_units: Vec<&CombatUnit> = hostiles.values().copied().collect();

        let own_groups = group_units(&own, grouping.own_group_distance, grouping.spread_factor);
        let hostile_groups = group_units(
            &hostile_units,
            grouping.enemy_group_distance,
            grouping.spread_factor,
        );

        let grouped: usize = own_groups.iter().map(CombatGroup::len).sum();
        if grouped != own.len() {
            error!(grouped, registered = own.len(), "grouping lost units");
            debug_assert_eq!(grouped, own.len(), "every registered unit must be grouped");
        }

        let field = Battlefield {
            own_groups: &own_groups,
            hostile_groups: &hostile_groups,
            own_total: own_groups.iter().map(|g| g.power).sum(),
            hostile_total: hostile_groups.iter().map(|g| g.power).sum(),
            target,
            default_intent,
        };

        let mut resolved: BTreeMap<u64, Action> = BTreeMap::new();
        {
            let ctx = MicroContext {
                units,
                abilities: &*services.abilities,
                paths: services.paths,
                config: &self.config.micro,
                time: services.time,
            };

            for (index, group) in own_groups.iter().enumerate() {
                let decision = engagement::decide(&self.config.engagement, &field, index);
                let enemy_power = decision
                    .hostile
                    .map(|i| hostile_groups[i].power)
                    .unwrap_or_default();
                let reach = group.extent() + self.config.engagement.group_enemy_margin;
                let order = GroupOrder {
                    intent: decision.intent,
                    target: decision.target,
                    center: group.center,
                    own_power: group.power,
                    enemy_power,
                    enemies: hostile_units
                        .iter()
                        .copied()
                        .filter(|e| e.distance_to_point(group.center) <= reach)
                        .collect(),
                    allies: group.units.clone(),
                };

                let solution = self.registry.solve_group(&ctx, &order, &group.units);
                report.faults += solution.faults;
                for (tag, action) in solution.actions {
                    if resolved.contains_key(&tag) {
                        error!(tag, "unit resolved twice, keeping the first action");
                        debug_assert!(false, "unit {tag} resolved twice");
                        continue;
                    }
                    resolved.insert(tag, action);
                }

                report.groups.push(group_report(group, &decision, enemy_power));
            }
        }

        for unit in &own {
            if !resolved.contains_key(&unit.tag) {
                error!(tag = unit.tag, "unit left without an action");
                debug_assert!(false, "unit {} left without an action", unit.tag);
            }
        }

        for (tag, action) in resolved {
            let Some(unit) = units.by_tag(tag) else {
                continue;
            };
            match self.resolver.resolve(unit, &action, step) {
                Some(command) => {
                    if let Some(ability) = action.ability {
                        services.abilities.mark_used(tag, ability);
                    }
                    services.commands.push(command);
                    report.emitted += 1;
                }
                None => report.suppressed += 1,
            }
            report.actions.push(ResolvedAction { tag, action });
        }

        debug!(
            step,
            groups = report.groups.len(),
            units = report.actions.len(),
            emitted = report.emitted,
            suppressed = report.suppressed,
            faults = report.faults,
            "combat pass"
        );
        report
    }
}

fn group_report(
    group: &CombatGroup<'_>,
    decision: &engagement::GroupDecision,
    enemy_power: PowerValue,
) -> GroupReport {
    GroupReport {
        center: group.center,
        tags: group.tags(),
        intent: decision.intent,
        target: decision.target,
        in_combat: decision.in_combat,
        too_spread: group.too_spread,
        power: group.power,
        enemy_power,
        reason: decision.reason,
    }
}
