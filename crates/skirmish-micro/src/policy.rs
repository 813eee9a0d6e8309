//! The three-hook micro contract and the closed registry of policies.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use skirmish_core::action::Action;
use skirmish_core::enums::UnitTypeId;
use skirmish_core::unit::CombatUnit;
use skirmish_core::Result;

use crate::context::{GroupOrder, MicroContext};
use crate::generic::GenericMicro;
use crate::policies::protoss::*;
use crate::policies::terran::*;
use crate::policies::zerg::*;

/// Per-archetype micro, called in three stages each tick.
///
/// `group_solve` runs once per group with every unit of the archetype,
/// `unit_solve` once per unit with the group-stage action, and
/// `final_solve` last, even when no enemy is around, so mode-toggling
/// units can manage their form unconditionally.
pub trait MicroPolicy {
    fn group_solve(
        &mut self,
        _ctx: &MicroContext<'_>,
        _group: &GroupOrder<'_>,
        _units: &[&CombatUnit],
        default: Action,
    ) -> Result<Action> {
        Ok(default)
    }

    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action>;

    fn final_solve(
        &mut self,
        _ctx: &MicroContext<'_>,
        _group: &GroupOrder<'_>,
        _unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        Ok(action)
    }
}

/// Fallback for every archetype without dedicated micro.
#[derive(Debug, Default)]
pub struct GenericPolicy {
    generic: GenericMicro,
}

impl MicroPolicy for GenericPolicy {
    fn unit_solve(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        unit: &CombatUnit,
        action: Action,
    ) -> Result<Action> {
        self.generic.solve(ctx, group, unit, action, None)
    }
}

macro_rules! policy_table {
    ($($kind:ident => $policy:ty),+ $(,)?) => {
        /// Closed set of micro archetypes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PolicyKind {
            $($kind),+
        }

        /// One instance per archetype, owning that archetype's per-tag state.
        #[derive(Debug)]
        pub enum Policy {
            $($kind($policy)),+
        }

        impl Policy {
            pub fn new(kind: PolicyKind) -> Self {
                match kind {
                    $(PolicyKind::$kind => Policy::$kind(<$policy>::default())),+
                }
            }

            pub fn kind(&self) -> PolicyKind {
                match self {
                    $(Policy::$kind(_) => PolicyKind::$kind),+
                }
            }
        }

        impl MicroPolicy for Policy {
            fn group_solve(
                &mut self,
                ctx: &MicroContext<'_>,
                group: &GroupOrder<'_>,
                units: &[&CombatUnit],
                default: Action,
            ) -> Result<Action> {
                match self {
                    $(Policy::$kind(p) => p.group_solve(ctx, group, units, default)),+
                }
            }

            fn unit_solve(
                &mut self,
                ctx: &MicroContext<'_>,
                group: &GroupOrder<'_>,
                unit: &CombatUnit,
                action: Action,
            ) -> Result<Action> {
                match self {
                    $(Policy::$kind(p) => p.unit_solve(ctx, group, unit, action)),+
                }
            }

            fn final_solve(
                &mut self,
                ctx: &MicroContext<'_>,
                group: &GroupOrder<'_>,
                unit: &CombatUnit,
                action: Action,
            ) -> Result<Action> {
                match self {
                    $(Policy::$kind(p) => p.final_solve(ctx, group, unit, action)),+
                }
            }
        }
    };
}

policy_table! {
    Generic => GenericPolicy,
    // Terran
    Bio => BioPolicy,
    SiegeTank => SiegeTankPolicy,
    WidowMine => WidowMinePolicy,
    Liberator => LiberatorPolicy,
    Medivac => MedivacPolicy,
    Viking => VikingPolicy,
    Cyclone => CyclonePolicy,
    Raven => RavenPolicy,
    Battlecruiser => BattlecruiserPolicy,
    // Protoss
    Stalker => StalkerPolicy,
    Adept => AdeptPolicy,
    AdeptShade => AdeptShadePolicy,
    Sentry => SentryPolicy,
    HighTemplar => HighTemplarPolicy,
    Disruptor => DisruptorPolicy,
    PurificationNova => NovaPolicy,
    VoidRay => VoidRayPolicy,
    Phoenix => PhoenixPolicy,
    Oracle => OraclePolicy,
    Tempest => TempestPolicy,
    // Zerg
    Melee => MeleePolicy,
    Roach => RoachPolicy,
    Ravager => RavagerPolicy,
    Lurker => LurkerPolicy,
    Infestor => InfestorPolicy,
    Viper => ViperPolicy,
    Queen => QueenPolicy,
    Baneling => BanelingPolicy,
    SwarmHost => SwarmHostPolicy,
}

impl PolicyKind {
    /// Which archetype drives a unit type.
    pub fn for_unit(unit_type: UnitTypeId) -> PolicyKind {
        use UnitTypeId as T;

        match unit_type {
            T::Marine | T::Marauder => PolicyKind::Bio,
            T::SiegeTank | T::SiegeTankSieged => PolicyKind::SiegeTank,
            T::WidowMine | T::WidowMineBurrowed => PolicyKind::WidowMine,
            T::Liberator | T::LiberatorAg => PolicyKind::Liberator,
            T::Medivac => PolicyKind::Medivac,
            T::VikingFighter | T::VikingAssault => PolicyKind::Viking,
            T::Cyclone => PolicyKind::Cyclone,
            T::Raven => PolicyKind::Raven,
            T::Battlecruiser => PolicyKind::Battlecruiser,

            T::Stalker => PolicyKind::Stalker,
            T::Adept => PolicyKind::Adept,
            T::AdeptPhaseShift => PolicyKind::AdeptShade,
            T::Sentry => PolicyKind::Sentry,
            T::HighTemplar => PolicyKind::HighTemplar,
            T::Disruptor => PolicyKind::Disruptor,
            T::DisruptorPhased => PolicyKind::PurificationNova,
            T::VoidRay => PolicyKind::VoidRay,
            T::Phoenix => PolicyKind::Phoenix,
            T::Oracle => PolicyKind::Oracle,
            T::Tempest => PolicyKind::Tempest,

            T::Zergling
            | T::Zealot
            | T::DarkTemplar
            | T::Ultralisk
            | T::Scv
            | T::Probe
            | T::Drone => PolicyKind::Melee,
            T::Roach | T::RoachBurrowed => PolicyKind::Roach,
            T::Ravager => PolicyKind::Ravager,
            T::Lurker | T::LurkerBurrowed => PolicyKind::Lurker,
            T::Infestor => PolicyKind::Infestor,
            T::Viper => PolicyKind::Viper,
            T::Queen => PolicyKind::Queen,
            T::Baneling => PolicyKind::Baneling,
            T::SwarmHost => PolicyKind::SwarmHost,

            _ => PolicyKind::Generic,
        }
    }
}

/// Actions for every unit of one group, plus how many hooks failed.
#[derive(Debug, Default)]
pub struct GroupSolution {
    /// One entry per input unit, in tag order.
    pub actions: Vec<(u64, Action)>,
    pub faults: usize,
}

/// Owns one policy instance per archetype for the whole match.
#[derive(Debug, Default)]
pub struct MicroRegistry {
    policies: BTreeMap<PolicyKind, Policy>,
}

impl MicroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy_mut(&mut self, kind: PolicyKind) -> &mut Policy {
        self.policies.entry(kind).or_insert_with(|| Policy::new(kind))
    }

    /// Run the three hooks for every unit of a group.
    ///
    /// A failing hook never blocks other units: the unit keeps the
    /// previous stage's action and the fault is counted.
    pub fn solve_group(
        &mut self,
        ctx: &MicroContext<'_>,
        group: &GroupOrder<'_>,
        units: &[&CombatUnit],
    ) -> GroupSolution {
        let default = group.default_action();
        let mut by_kind: BTreeMap<PolicyKind, Vec<&CombatUnit>> = BTreeMap::new();
        for &unit in units {
            by_kind
                .entry(PolicyKind::for_unit(unit.unit_type))
                .or_default()
                .push(unit);
        }

        let mut solution = GroupSolution::default();
        for (kind, mut members) in by_kind {
            members.sort_by_key(|u| u.tag);
            let policy = self.policy_mut(kind);

            let group_action = match policy.group_solve(ctx, group, &members, default.clone()) {
                Ok(action) => action,
                Err(e) => {
                    warn!(?kind, error = %e, "group hook failed, using default action");
                    solution.faults += 1;
                    default.clone()
                }
            };

            for unit in members {
                let action = match policy.unit_solve(ctx, group, unit, group_action.clone()) {
                    Ok(action) => action,
                    Err(e) => {
                        warn!(tag = unit.tag, ?kind, error = %e, "unit hook failed, using default action");
                        solution.faults += 1;
                        group_action.clone()
                    }
                };
                let action = match policy.final_solve(ctx, group, unit, action.clone()) {
                    Ok(action) => action,
                    Err(e) => {
                        warn!(tag = unit.tag, ?kind, error = %e, "final hook failed, keeping action");
                        solution.faults += 1;
                        action
                    }
                };
                trace!(tag = unit.tag, ?kind, note = action.note, "action chosen");
                solution.actions.push((unit.tag, action));
            }
        }

        solution.actions.sort_by_key(|(tag, _)| *tag);
        solution
    }
}
