#[cfg(test)]
mod tests {
    use glam::Vec2;

    use skirmish_core::action::{Action, Target};
    use skirmish_core::config::MicroConfig;
    use skirmish_core::enums::*;
    use skirmish_core::error::CombatError;
    use skirmish_core::power::value;
    use skirmish_core::services::{AbilityOracle, PathService, UnitIndex};
    use skirmish_core::types::{centroid, towards, Point2, SimTime};
    use skirmish_core::unit::CombatUnit;
    use skirmish_core::Result;

    use crate::context::{GroupOrder, MicroContext};
    use crate::generic::GenericMicro;
    use crate::modes::ModeSwitch;
    use crate::policy::{MicroRegistry, PolicyKind};
    use crate::targeting::{best_cluster, best_target};

    struct Units(Vec<CombatUnit>);

    impl UnitIndex for Units {
        fn units_in_range(&self, position: Point2, radius: f32, side: Side) -> Vec<&CombatUnit> {
            let mut found: Vec<&CombatUnit> = self
                .0
                .iter()
                .filter(|u| u.side == side && u.distance_to_point(position) <= radius)
                .collect();
            found.sort_by_key(|u| u.tag);
            found
        }

        fn by_tag(&self, tag: u64) -> Option<&CombatUnit> {
            self.0.iter().find(|u| u.tag == tag)
        }
    }

    struct AlwaysReady;

    impl AbilityOracle for AlwaysReady {
        fn is_ready(&self, _tag: u64, _ability: AbilityId) -> Result<bool> {
            Ok(true)
        }
        fn is_ready_after(&self, _tag: u64, _ability: AbilityId, _cooldown_secs: f32) -> Result<bool> {
            Ok(true)
        }
        fn mark_used(&mut self, _tag: u64, _ability: AbilityId) {}
    }

    struct Offline;

    impl AbilityOracle for Offline {
        fn is_ready(&self, _tag: u64, _ability: AbilityId) -> Result<bool> {
            Err(CombatError::AbilityQuery("oracle offline".into()))
        }
        fn is_ready_after(&self, _tag: u64, _ability: AbilityId, _cooldown_secs: f32) -> Result<bool> {
            Err(CombatError::AbilityQuery("oracle offline".into()))
        }
        fn mark_used(&mut self, _tag: u64, _ability: AbilityId) {}
    }

    struct StraightLine;

    impl PathService for StraightLine {
        fn find_path(&self, from: Point2, to: Point2, max_distance: f32) -> Result<Point2> {
            Ok(towards(from, to, from.distance(to).min(max_distance)))
        }
        fn weakest_influence_point(&self, around: Point2, _radius: f32, _air: bool) -> Result<Point2> {
            Ok(around)
        }
    }

    fn unit(tag: u64, unit_type: UnitTypeId, side: Side, x: f32, y: f32) -> CombatUnit {
        CombatUnit::new(tag, unit_type, side, Vec2::new(x, y))
    }

    fn context<'a>(
        units: &'a Units,
        oracle: &'a dyn AbilityOracle,
        config: &'a MicroConfig,
        secs: f32,
    ) -> MicroContext<'a> {
        MicroContext {
            units,
            abilities: oracle,
            paths: &StraightLine,
            config,
            time: SimTime::new(0, secs),
        }
    }

    fn order<'a>(
        intent: Intent,
        target: Point2,
        allies: &[&'a CombatUnit],
        enemies: &[&'a CombatUnit],
    ) -> GroupOrder<'a> {
        GroupOrder {
            intent,
            target,
            center: centroid(allies.iter().map(|u| u.position)).unwrap_or(target),
            own_power: value(allies.iter().copied()),
            enemy_power: value(enemies.iter().copied()),
            enemies: enemies.to_vec(),
            allies: allies.to_vec(),
        }
    }

    #[test]
    fn test_kite_boundary_healthy_unit_keeps_shooting() {
        // Range 6 against range 4, five apart, half health.
        let stalker = unit(1, UnitTypeId::Stalker, Side::Own, 0.0, 0.0).with_health_fraction(0.5);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 5.0, 0.0);
        let units = Units(vec![stalker.clone(), roach.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::Attack, roach.position, &[&stalker], &[&roach]);

        let mut registry = MicroRegistry::new();
        let solution = registry.solve_group(&ctx, &group, &[&stalker]);
        assert_eq!(solution.actions.len(), 1);
        assert_eq!(solution.actions[0].1, Action::attack_unit(2));
    }

    #[test]
    fn test_kite_boundary_hurt_unit_steps_back() {
        let stalker = unit(1, UnitTypeId::Stalker, Side::Own, 0.0, 0.0).with_health_fraction(0.2);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 5.0, 0.0);
        let units = Units(vec![stalker.clone(), roach.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::Attack, roach.position, &[&stalker], &[&roach]);

        let mut registry = MicroRegistry::new();
        let solution = registry.solve_group(&ctx, &group, &[&stalker]);
        let action = &solution.actions[0].1;
        assert!(!action.is_attack);
        assert_eq!(action.note, "kite");
        let point = action.target.point().unwrap();
        assert!(point.distance(roach.position) > stalker.distance_to(&roach));
    }

    #[test]
    fn test_reloading_unit_kites() {
        let stalker = unit(1, UnitTypeId::Stalker, Side::Own, 0.0, 0.0).with_weapon_cooldown(1.0);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 5.0, 0.0);
        let units = Units(vec![stalker.clone(), roach.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::Attack, roach.position, &[&stalker], &[&roach]);

        let mut generic = GenericMicro::default();
        let action = generic
            .solve(&ctx, &group, &stalker, group.default_action(), None)
            .unwrap();
        assert_eq!(action.note, "kite");
    }

    #[test]
    fn test_push_intent_never_kites() {
        let stalker = unit(1, UnitTypeId::Stalker, Side::Own, 0.0, 0.0).with_health_fraction(0.2);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 5.0, 0.0);
        let units = Units(vec![stalker.clone(), roach.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::Push, roach.position, &[&stalker], &[&roach]);

        let mut generic = GenericMicro::default();
        let action = generic
            .solve(&ctx, &group, &stalker, group.default_action(), None)
            .unwrap();
        assert_eq!(action, Action::attack_unit(2));
    }

    #[test]
    fn test_no_kite_on_high_ground() {
        let stalker = unit(1, UnitTypeId::Stalker, Side::Own, 0.0, 0.0)
            .with_health_fraction(0.2)
            .with_height(2.0);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 5.0, 0.0);
        let units = Units(vec![stalker.clone(), roach.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::Attack, roach.position, &[&stalker], &[&roach]);

        let mut generic = GenericMicro::default();
        let action = generic
            .solve(&ctx, &group, &stalker, group.default_action(), None)
            .unwrap();
        assert_eq!(action, Action::attack_unit(2));
    }

    #[test]
    fn test_winning_unit_pushes_while_reloading() {
        let marines: Vec<CombatUnit> = (1..=6)
            .map(|t| unit(t, UnitTypeId::Marine, Side::Own, -(t as f32) * 0.5, 0.0).with_weapon_cooldown(0.5))
            .collect();
        let ling = unit(10, UnitTypeId::Zergling, Side::Enemy, 6.0, 0.0);
        let mut all = marines.clone();
        all.push(ling.clone());
        let units = Units(all);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let refs: Vec<&CombatUnit> = marines.iter().collect();
        let group = order(Intent::Attack, ling.position, &refs, &[&ling]);

        let mut generic = GenericMicro::default();
        // Marine 6 stands at -3, out of its 5.75 reach of the zergling.
        let action = generic
            .solve(&ctx, &group, &marines[5], group.default_action(), None)
            .unwrap();
        assert_eq!(action.note, "push");
        let point = action.target.point().unwrap();
        assert!(point.distance(ling.position) < marines[5].distance_to(&ling));
    }

    #[test]
    fn test_focus_fire_tie_breaks_on_lowest_tag() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let a = unit(7, UnitTypeId::Zergling, Side::Enemy, 3.0, 1.0);
        let b = unit(5, UnitTypeId::Zergling, Side::Enemy, 3.0, -1.0);
        let cfg = MicroConfig::default();

        let picked = best_target(&cfg, &marine, &[&a, &b], Intent::Attack, None, 3.0).unwrap();
        assert_eq!(picked.tag, 5);
        let picked = best_target(&cfg, &marine, &[&b, &a], Intent::Attack, None, 3.0).unwrap();
        assert_eq!(picked.tag, 5);
    }

    #[test]
    fn test_focus_fire_prefers_wounded_and_locked() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let full = unit(5, UnitTypeId::Zergling, Side::Enemy, 3.0, 1.0);
        let hurt = unit(7, UnitTypeId::Zergling, Side::Enemy, 3.0, -1.0).with_health_fraction(0.2);
        let cfg = MicroConfig::default();

        let picked = best_target(&cfg, &marine, &[&full, &hurt], Intent::Attack, None, 3.0).unwrap();
        assert_eq!(picked.tag, 7);

        // Equal targets: the previously locked one keeps the focus.
        let twin = unit(9, UnitTypeId::Zergling, Side::Enemy, 3.0, -1.0);
        let picked = best_target(&cfg, &marine, &[&full, &twin], Intent::Attack, Some(9), 3.0).unwrap();
        assert_eq!(picked.tag, 9);
    }

    #[test]
    fn test_harass_prefers_workers() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let ling = unit(2, UnitTypeId::Zergling, Side::Enemy, 3.0, 1.0);
        let drone = unit(3, UnitTypeId::Drone, Side::Enemy, 3.0, -1.0);
        let cfg = MicroConfig::default();

        let attack = best_target(&cfg, &marine, &[&ling, &drone], Intent::Attack, None, 3.0).unwrap();
        assert_eq!(attack.tag, 2);
        let harass = best_target(&cfg, &marine, &[&ling, &drone], Intent::Harass, None, 3.0).unwrap();
        assert_eq!(harass.tag, 3);
    }

    #[test]
    fn test_out_of_reach_targets_ignored() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let far = unit(2, UnitTypeId::Zergling, Side::Enemy, 20.0, 0.0);
        let cfg = MicroConfig::default();
        assert!(best_target(&cfg, &marine, &[&far], Intent::Attack, None, 3.0).is_none());
    }

    #[test]
    fn test_panic_retreat_never_shoots() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let ling = unit(2, UnitTypeId::Zergling, Side::Enemy, 2.0, 0.0);
        let units = Units(vec![marine.clone(), ling.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let home = Vec2::new(-30.0, 0.0);
        let group = order(Intent::PanicRetreat, home, &[&marine], &[&ling]);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &[&marine]);
        let action = &solution.actions[0].1;
        assert!(!action.is_attack);
        assert_eq!(action.target, Target::Point(home));
    }

    #[test]
    fn test_defensive_retreat_fires_only_when_healthy() {
        let ling = unit(2, UnitTypeId::Zergling, Side::Enemy, 3.0, 0.0);
        let home = Vec2::new(-30.0, 0.0);
        let cfg = MicroConfig::default();

        let dying = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0).with_health_fraction(0.1);
        let units = Units(vec![dying.clone(), ling.clone()]);
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::DefensiveRetreat, home, &[&dying], &[&ling]);
        let solution = MicroRegistry::new().solve_group(&ctx, &group, &[&dying]);
        assert_eq!(solution.actions[0].1.target, Target::Point(home));
        assert!(!solution.actions[0].1.is_attack);

        let healthy = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0).with_health_fraction(0.9);
        let units = Units(vec![healthy.clone(), ling.clone()]);
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::DefensiveRetreat, home, &[&healthy], &[&ling]);
        let solution = MicroRegistry::new().solve_group(&ctx, &group, &[&healthy]);
        assert_eq!(solution.actions[0].1, Action::attack_unit(2).with_note("cover"));
    }

    #[test]
    fn test_regroup_gathers_then_fights() {
        let point = Vec2::ZERO;
        let straggler = unit(1, UnitTypeId::Marine, Side::Own, 20.0, 0.0);
        let gathered = unit(2, UnitTypeId::Marine, Side::Own, 1.0, 0.0);
        let ling = unit(3, UnitTypeId::Zergling, Side::Enemy, 4.0, 0.0);
        let units = Units(vec![straggler.clone(), gathered.clone(), ling.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::ReGroup, point, &[&straggler, &gathered], &[&ling]);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &[&straggler, &gathered]);
        assert_eq!(solution.actions[0].0, 1);
        assert_eq!(solution.actions[0].1, Action::move_to(point).with_note("regroup"));
        assert_eq!(solution.actions[1].0, 2);
        assert_eq!(solution.actions[1].1, Action::attack_unit(3));
    }

    #[test]
    fn test_oracle_fault_falls_back_per_unit() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let hellion = unit(2, UnitTypeId::Hellion, Side::Own, 0.0, 1.0);
        let ling = unit(3, UnitTypeId::Zergling, Side::Enemy, 3.0, 0.0);
        let units = Units(vec![marine.clone(), hellion.clone(), ling.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &Offline, &cfg, 0.0);
        let group = order(Intent::Attack, ling.position, &[&marine, &hellion], &[&ling]);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &[&marine, &hellion]);
        assert_eq!(solution.actions.len(), 2);
        assert_eq!(solution.faults, 1);
        // The marine's stim query failed: it keeps the group action.
        assert_eq!(solution.actions[0].1, group.default_action());
        assert_eq!(solution.actions[1].1, Action::attack_unit(3));
    }

    #[test]
    fn test_every_unit_gets_one_action() {
        let own = vec![
            unit(4, UnitTypeId::Marine, Side::Own, 0.0, 0.0),
            unit(2, UnitTypeId::Medivac, Side::Own, 0.5, 0.0),
            unit(9, UnitTypeId::SiegeTank, Side::Own, -1.0, 0.0),
            unit(1, UnitTypeId::Other(77), Side::Own, 0.0, 1.0),
            unit(6, UnitTypeId::HighTemplar, Side::Own, -1.0, 1.0),
        ];
        let enemy = unit(20, UnitTypeId::Roach, Side::Enemy, 6.0, 0.0);
        let mut all = own.clone();
        all.push(enemy.clone());
        let units = Units(all);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let refs: Vec<&CombatUnit> = own.iter().collect();
        let group = order(Intent::Attack, enemy.position, &refs, &[&enemy]);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &refs);
        let tags: Vec<u64> = solution.actions.iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, vec![1, 2, 4, 6, 9]);
    }

    #[test]
    fn test_siege_tank_sieges_without_hostile_group() {
        let tank = unit(1, UnitTypeId::SiegeTank, Side::Own, 0.0, 0.0);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 12.0, 0.0);
        let units = Units(vec![tank.clone(), roach]);
        let cfg = MicroConfig::default();
        let target = Vec2::new(30.0, 0.0);
        // The roach is known to the index but not part of any engaged group.
        let group = order(Intent::Attack, target, &[&tank], &[]);
        let mut registry = MicroRegistry::new();

        let ctx = context(&units, &AlwaysReady, &cfg, 10.0);
        let first = registry.solve_group(&ctx, &group, &[&tank]);
        assert_eq!(first.actions[0].1, Action::attack_to(target));

        let ctx = context(&units, &AlwaysReady, &cfg, 10.5);
        let later = registry.solve_group(&ctx, &group, &[&tank]);
        assert_eq!(later.actions[0].1.ability, Some(AbilityId::SiegeMode));
    }

    #[test]
    fn test_sieged_tank_unsieges_at_once_on_retreat() {
        let tank = unit(1, UnitTypeId::SiegeTankSieged, Side::Own, 0.0, 0.0);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 10.0, 0.0);
        let units = Units(vec![tank.clone(), roach.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 3.0);
        let group = order(Intent::PanicRetreat, Vec2::new(-40.0, 0.0), &[&tank], &[&roach]);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &[&tank]);
        assert_eq!(solution.actions[0].1.ability, Some(AbilityId::Unsiege));
    }

    #[test]
    fn test_one_guardian_shield_per_group() {
        let sentries = vec![
            unit(1, UnitTypeId::Sentry, Side::Own, 0.0, 0.0),
            unit(2, UnitTypeId::Sentry, Side::Own, 1.0, 0.0),
        ];
        let marines = vec![
            unit(10, UnitTypeId::Marine, Side::Enemy, 6.0, 0.0),
            unit(11, UnitTypeId::Marine, Side::Enemy, 6.0, 1.0),
            unit(12, UnitTypeId::Marine, Side::Enemy, 6.0, -1.0),
        ];
        let mut all = sentries.clone();
        all.extend(marines.clone());
        let units = Units(all);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let own: Vec<&CombatUnit> = sentries.iter().collect();
        let hostile: Vec<&CombatUnit> = marines.iter().collect();
        let group = order(Intent::Attack, Vec2::new(6.0, 0.0), &own, &hostile);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &own);
        let shields: Vec<u64> = solution
            .actions
            .iter()
            .filter(|(_, a)| a.ability == Some(AbilityId::GuardianShield))
            .map(|(t, _)| *t)
            .collect();
        assert_eq!(shields, vec![1]);
    }

    #[test]
    fn test_templars_do_not_stack_storms() {
        let templars = vec![
            unit(1, UnitTypeId::HighTemplar, Side::Own, 0.0, 0.0),
            unit(2, UnitTypeId::HighTemplar, Side::Own, 0.0, 1.0),
        ];
        let offsets = [(0.0, 0.0), (0.3, 0.0), (0.0, 0.3), (-0.3, 0.0), (0.0, -0.3), (0.3, 0.3)];
        let marines: Vec<CombatUnit> = offsets
            .iter()
            .enumerate()
            .map(|(i, (dx, dy))| unit(10 + i as u64, UnitTypeId::Marine, Side::Enemy, 7.0 + dx, dy + 0.0))
            .collect();
        let mut all = templars.clone();
        all.extend(marines.clone());
        let units = Units(all);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let own: Vec<&CombatUnit> = templars.iter().collect();
        let hostile: Vec<&CombatUnit> = marines.iter().collect();
        let group = order(Intent::Attack, Vec2::new(7.0, 0.0), &own, &hostile);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &own);
        let storms = solution
            .actions
            .iter()
            .filter(|(_, a)| a.ability == Some(AbilityId::PsiStorm))
            .count();
        assert_eq!(storms, 1);
    }

    #[test]
    fn test_medivac_moves_to_wounded_bio() {
        let medivac = unit(1, UnitTypeId::Medivac, Side::Own, 0.0, 0.0);
        let hurt = unit(2, UnitTypeId::Marine, Side::Own, 3.0, 0.0).with_health_fraction(0.5);
        let fine = unit(3, UnitTypeId::Marine, Side::Own, 2.0, 0.0);
        let units = Units(vec![medivac.clone(), hurt.clone(), fine.clone()]);
        let cfg = MicroConfig::default();
        let ctx = context(&units, &AlwaysReady, &cfg, 0.0);
        let group = order(Intent::Attack, Vec2::new(40.0, 0.0), &[&medivac, &hurt, &fine], &[]);

        let solution = MicroRegistry::new().solve_group(&ctx, &group, &[&medivac]);
        assert_eq!(solution.actions[0].1, Action::move_to(hurt.position).with_note("heal"));
    }

    #[test]
    fn test_policy_kind_mapping() {
        assert_eq!(PolicyKind::for_unit(UnitTypeId::Marauder), PolicyKind::Bio);
        assert_eq!(PolicyKind::for_unit(UnitTypeId::SiegeTankSieged), PolicyKind::SiegeTank);
        assert_eq!(PolicyKind::for_unit(UnitTypeId::AdeptPhaseShift), PolicyKind::AdeptShade);
        assert_eq!(PolicyKind::for_unit(UnitTypeId::DisruptorPhased), PolicyKind::PurificationNova);
        assert_eq!(PolicyKind::for_unit(UnitTypeId::Zealot), PolicyKind::Melee);
        assert_eq!(PolicyKind::for_unit(UnitTypeId::LurkerBurrowed), PolicyKind::Lurker);
        assert_eq!(PolicyKind::for_unit(UnitTypeId::Hydralisk), PolicyKind::Generic);
        assert_eq!(PolicyKind::for_unit(UnitTypeId::Other(3)), PolicyKind::Generic);
    }

    #[test]
    fn test_mode_switch_waits_for_delay() {
        let mut modes = ModeSwitch::default();
        assert!(!modes.request(1, AbilityId::SiegeMode, 5.0, 1.0));
        assert!(!modes.request(1, AbilityId::SiegeMode, 5.5, 1.0));
        assert!(modes.request(1, AbilityId::SiegeMode, 6.0, 1.0));

        // A different request restarts the clock.
        assert!(!modes.request(1, AbilityId::Unsiege, 6.1, 1.0));
        assert_eq!(modes.pending(1), Some(AbilityId::Unsiege));
        modes.cancel(1);
        assert_eq!(modes.pending(1), None);
        assert!(modes.request(2, AbilityId::Unsiege, 0.0, 0.0));
    }

    #[test]
    fn test_best_cluster_finds_dense_spot() {
        let spread = vec![
            unit(1, UnitTypeId::Marine, Side::Enemy, 0.0, 0.0),
            unit(2, UnitTypeId::Marine, Side::Enemy, 10.0, 0.0),
            unit(3, UnitTypeId::Marine, Side::Enemy, 10.5, 0.0),
            unit(4, UnitTypeId::Marine, Side::Enemy, 10.0, 0.5),
        ];
        let refs: Vec<&CombatUnit> = spread.iter().collect();
        let (point, value) = best_cluster(&refs, Vec2::new(5.0, 0.0), 9.0, 1.0, |u| u.stats().weight).unwrap();
        assert!(point.distance(Vec2::new(10.0, 0.0)) < 0.6);
        assert!((value - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_default_action_per_intent() {
        let target = Vec2::new(5.0, 5.0);
        let group = order(Intent::Harass, target, &[], &[]);
        assert!(group.default_action().is_attack);
        let group = order(Intent::DefensiveRetreat, target, &[], &[]);
        assert!(!group.default_action().is_attack);
        let group = order(Intent::ReGroup, target, &[], &[]);
        assert_eq!(group.default_action().target, Target::Point(target));
    }
}
