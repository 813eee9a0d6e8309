#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::action::{Action, Target};
    use crate::commands::UnitCommand;
    use crate::config::CombatConfig;
    use crate::enums::*;
    use crate::error::CombatError;
    use crate::power::{unit_power, value, PowerValue};
    use crate::spatial::SpatialGrid;
    use crate::types::{centroid, towards, SimTime};
    use crate::unit::CombatUnit;
    use crate::unit_data::{stats, Attributes};

    fn unit(tag: u64, unit_type: UnitTypeId, side: Side, x: f32, y: f32) -> CombatUnit {
        CombatUnit::new(tag, unit_type, side, Vec2::new(x, y))
    }

    #[test]
    fn test_intent_serde() {
        let variants = vec![
            Intent::Attack,
            Intent::SearchAndDestroy,
            Intent::Push,
            Intent::DefensiveRetreat,
            Intent::PanicRetreat,
            Intent::Harass,
            Intent::ReGroup,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: Intent = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_intent_classes() {
        assert!(Intent::DefensiveRetreat.is_retreat());
        assert!(Intent::PanicRetreat.is_retreat());
        assert!(!Intent::ReGroup.is_retreat());
        assert!(Intent::Harass.is_attack_class());
        assert!(!Intent::ReGroup.is_attack_class());
        assert!(!Intent::PanicRetreat.is_attack_class());
    }

    #[test]
    fn test_unknown_unit_type_has_minimal_weight() {
        let s = stats(UnitTypeId::Other(9999));
        assert!(s.weight > 0.0);
        assert!(s.weight < stats(UnitTypeId::Zergling).weight);
    }

    #[test]
    fn test_unit_attributes() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        assert!(marine.has_attribute(Attributes::LIGHT | Attributes::BIOLOGICAL));
        assert!(!marine.has_attribute(Attributes::ARMORED));
        assert!(stats(UnitTypeId::Zergling).is_melee());
        assert!(!stats(UnitTypeId::Marine).is_melee());
        assert!(stats(UnitTypeId::Bunker).is_structure());
    }

    #[test]
    fn test_real_range_includes_both_radii() {
        let marine = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let roach = unit(2, UnitTypeId::Roach, Side::Enemy, 5.9, 0.0);
        assert!((marine.real_range_vs(&roach) - (5.0 + 0.375 + 0.625)).abs() < 1e-5);
        assert!(marine.in_real_range(&roach));

        let far = unit(3, UnitTypeId::Roach, Side::Enemy, 6.1, 0.0);
        assert!(!marine.in_real_range(&far));
    }

    #[test]
    fn test_ground_only_unit_cannot_hit_air() {
        let roach = unit(1, UnitTypeId::Roach, Side::Enemy, 0.0, 0.0);
        let medivac = unit(2, UnitTypeId::Medivac, Side::Own, 1.0, 0.0);
        assert!(!roach.can_attack(&medivac));
        assert_eq!(roach.real_range_vs(&medivac), 0.0);
        assert!(!roach.in_real_range(&medivac));
    }

    #[test]
    fn test_health_fraction_combines_shield() {
        let stalker = unit(1, UnitTypeId::Stalker, Side::Own, 0.0, 0.0).with_health_fraction(0.5);
        assert!((stalker.health_fraction() - 0.5).abs() < 1e-5);

        let mut hurt = unit(2, UnitTypeId::Stalker, Side::Own, 0.0, 0.0);
        hurt.shield = 0.0;
        assert!((hurt.health_fraction() - 0.5).abs() < 1e-5);
        assert!((hurt.hull_fraction() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_burrowed_types_start_burrowed() {
        assert!(unit(1, UnitTypeId::LurkerBurrowed, Side::Own, 0.0, 0.0).is_burrowed);
        assert!(!unit(2, UnitTypeId::Lurker, Side::Own, 0.0, 0.0).is_burrowed);
    }

    #[test]
    fn test_unit_power_scales_with_health() {
        let full = unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0);
        let dying = full.clone().with_health_fraction(0.0);
        assert!((unit_power(&full).power - 1.0).abs() < 1e-5);
        assert!((unit_power(&dying).power - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_unit_power_channels() {
        let viking = unit_power(&unit(1, UnitTypeId::VikingFighter, Side::Own, 0.0, 0.0));
        assert_eq!(viking.ground_power, 0.0);
        assert!(viking.air_power > 0.0);
        assert!(viking.air_presence > 0.0);
        assert_eq!(viking.ground_presence, 0.0);

        let ling = unit_power(&unit(2, UnitTypeId::Zergling, Side::Enemy, 0.0, 0.0));
        assert!(ling.melee_power > 0.0);
        assert_eq!(ling.air_power, 0.0);
    }

    #[test]
    fn test_power_sum_matches_add() {
        let units = vec![
            unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0),
            unit(2, UnitTypeId::Medivac, Side::Own, 1.0, 0.0),
            unit(3, UnitTypeId::SiegeTank, Side::Own, 2.0, 0.0),
        ];
        let total = value(&units);
        let manual = unit_power(&units[0]) + unit_power(&units[1]) + unit_power(&units[2]);
        assert!((total.power - manual.power).abs() < 1e-5);
        assert!(total.has_air());
    }

    #[test]
    fn test_is_enough_for_requires_anti_air() {
        let roaches = value(&[
            unit(1, UnitTypeId::Roach, Side::Own, 0.0, 0.0),
            unit(2, UnitTypeId::Roach, Side::Own, 1.0, 0.0),
            unit(3, UnitTypeId::Roach, Side::Own, 2.0, 0.0),
        ]);
        let banshee = value(&[unit(4, UnitTypeId::Banshee, Side::Enemy, 0.0, 0.0)]);
        assert!(roaches.power > banshee.power);
        assert!(!roaches.is_enough_for(&banshee, 0.75));
    }

    #[test]
    fn test_is_enough_for_ratio() {
        let one = value(&[unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0)]);
        let two = value(&[
            unit(2, UnitTypeId::Marine, Side::Enemy, 0.0, 0.0),
            unit(3, UnitTypeId::Marine, Side::Enemy, 1.0, 0.0),
        ]);
        assert!(!one.is_enough_for(&two, 0.75));
        assert!(one.is_enough_for(&two, 0.5));
        assert!(two.is_enough_for(&one, 1.25));
    }

    #[test]
    fn test_is_enough_for_against_nothing() {
        let one = value(&[unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0)]);
        assert!(one.is_enough_for(&PowerValue::default(), 0.85));
    }

    #[test]
    fn test_ranged_gets_mix_bonus_against_melee() {
        let marines = value(&[
            unit(1, UnitTypeId::Marine, Side::Own, 0.0, 0.0),
            unit(2, UnitTypeId::Marine, Side::Own, 1.0, 0.0),
        ]);
        let lings = value(&[
            unit(3, UnitTypeId::Zergling, Side::Enemy, 0.0, 0.0),
            unit(4, UnitTypeId::Zergling, Side::Enemy, 1.0, 0.0),
            unit(5, UnitTypeId::Zergling, Side::Enemy, 2.0, 0.0),
            unit(6, UnitTypeId::Zergling, Side::Enemy, 3.0, 0.0),
            unit(7, UnitTypeId::Zergling, Side::Enemy, 4.0, 0.0),
        ]);
        // 2.0 raw against 2.5, plus 0.2 * 2.0 of mix credit.
        assert!(marines.is_enough_for(&lings, 0.95));
        assert!(!marines.is_enough_for(&lings, 1.0));
    }

    #[test]
    fn test_spatial_grid_radius_query_sorted() {
        let mut grid = SpatialGrid::new(8.0);
        grid.insert(30, Vec2::new(1.0, 1.0));
        grid.insert(10, Vec2::new(-3.0, 2.0));
        grid.insert(20, Vec2::new(9.0, 0.0));
        grid.insert(40, Vec2::new(40.0, 40.0));

        assert_eq!(grid.query_radius(Vec2::ZERO, 10.0), vec![10, 20, 30]);
        assert_eq!(grid.query_radius(Vec2::ZERO, 5.0), vec![10, 30]);
        assert_eq!(grid.len(), 4);

        grid.remove(30, Vec2::new(1.0, 1.0));
        assert_eq!(grid.query_radius(Vec2::ZERO, 5.0), vec![10]);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_spatial_grid_rebuild_clears() {
        let mut grid = SpatialGrid::new(4.0);
        grid.insert(1, Vec2::ZERO);
        grid.rebuild([(2, Vec2::new(1.0, 0.0))]);
        assert_eq!(grid.query_radius(Vec2::ZERO, 2.0), vec![2]);
    }

    #[test]
    fn test_spatial_grid_huge_radius_scans_occupied_cells() {
        let mut grid = SpatialGrid::new(8.0);
        grid.insert(1, Vec2::new(3.0, -2.0));
        assert_eq!(grid.query_radius(Vec2::ZERO, 200_000.0), vec![1]);
        assert_eq!(grid.query_radius(Vec2::new(1.0e6, 0.0), 200_000.0), Vec::<u64>::new());
        assert!(grid.query_radius(Vec2::ZERO, f32::NAN).is_empty());
        assert!(grid.query_radius(Vec2::ZERO, f32::INFINITY).contains(&1));
    }

    #[test]
    fn test_config_defaults_match_constants() {
        let config = CombatConfig::default();
        assert_eq!(config.grouping.own_group_distance, 7.0);
        assert_eq!(config.engagement.main_army_ratio, 0.75);
        assert_eq!(config.engagement.crush_ratio, 0.85);
        assert_eq!(config.engagement.engaged_power_fraction, 0.15);
        assert_eq!(config.engagement.regroup_search_distance, 50.0);
        assert_eq!(config.dedup.window_steps(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_override() {
        let config =
            CombatConfig::from_json(r#"{"engagement": {"crush_ratio": 0.9}, "dedup": {"realtime": true}}"#)
                .unwrap();
        assert_eq!(config.engagement.crush_ratio, 0.9);
        assert_eq!(config.engagement.hold_ratio, 0.75);
        assert_eq!(config.dedup.window_steps(), 11);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = CombatConfig::from_json(r#"{"engagement": {"hold_ratio": 1.5}}"#).unwrap_err();
        assert!(matches!(err, CombatError::InvalidConfig(_)));

        let err = CombatConfig::from_json(
            r#"{"engagement": {"in_combat_center_distance": 20.0, "engaged_check_distance": 17.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CombatError::InvalidConfig(_)));

        let err = CombatConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, CombatError::ConfigParse(_)));
    }

    #[test]
    fn test_config_rejects_non_finite_and_huge_distances() {
        let err = CombatConfig::from_json(r#"{"grouping": {"hostile_scan_radius": 200000.0}}"#).unwrap_err();
        assert!(matches!(err, CombatError::InvalidConfig(_)));

        let mut config = CombatConfig::default();
        config.grouping.own_group_distance = f32::NAN;
        assert!(matches!(config.validate(), Err(CombatError::InvalidConfig(_))));

        let mut config = CombatConfig::default();
        config.engagement.regroup_search_distance = f32::INFINITY;
        assert!(matches!(config.validate(), Err(CombatError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_push_margin_and_spread_factor_separately() {
        let mut config = CombatConfig::default();
        config.micro.push_margin = -1.0;
        let Err(CombatError::InvalidConfig(message)) = config.validate() else {
            panic!("negative push_margin accepted");
        };
        assert!(message.contains("push_margin"));

        let mut config = CombatConfig::default();
        config.grouping.spread_factor = 0.0;
        let Err(CombatError::InvalidConfig(message)) = config.validate() else {
            panic!("zero spread_factor accepted");
        };
        assert!(message.contains("spread_factor"));
    }

    #[test]
    fn test_action_command_ability() {
        assert_eq!(Action::attack_to(Vec2::ONE).command_ability(), AbilityId::Attack);
        assert_eq!(Action::move_to(Vec2::ONE).command_ability(), AbilityId::Move);
        let cast = Action::cast(AbilityId::PsiStorm, Target::Point(Vec2::ONE));
        assert_eq!(cast.command_ability(), AbilityId::PsiStorm);

        let cmd = UnitCommand::from_action(7, &Action::attack_unit(9));
        assert_eq!(cmd.tag, 7);
        assert!(cmd.is_attack());
        assert_eq!(cmd.target, Target::Unit(9));
    }

    #[test]
    fn test_target_approx_eq() {
        let a = Target::Point(Vec2::new(1.0, 1.0));
        assert!(a.approx_eq(&Target::Point(Vec2::new(1.3, 1.0)), 0.5));
        assert!(!a.approx_eq(&Target::Point(Vec2::new(2.0, 1.0)), 0.5));
        assert!(!a.approx_eq(&Target::Unit(1), 0.5));
        assert!(Target::Unit(4).approx_eq(&Target::Unit(4), 0.0));
    }

    #[test]
    fn test_towards_and_centroid() {
        let p = towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 3.0);
        assert!((p - Vec2::new(3.0, 0.0)).length() < 1e-5);
        let back = towards(Vec2::ZERO, Vec2::new(10.0, 0.0), -2.0);
        assert!((back - Vec2::new(-2.0, 0.0)).length() < 1e-5);
        assert_eq!(towards(Vec2::ONE, Vec2::ONE, 5.0), Vec2::ONE);

        assert_eq!(centroid(std::iter::empty::<Vec2>()), None);
        let c = centroid([Vec2::ZERO, Vec2::new(4.0, 2.0)]).unwrap();
        assert!((c - Vec2::new(2.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..224 {
            t.advance();
        }
        assert_eq!(t.step, 224);
        assert!((t.elapsed_secs - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_ability_metadata() {
        assert!(AbilityId::PsiStorm.energy_cost() > 0.0);
        assert_eq!(AbilityId::Blink.energy_cost(), 0.0);
        assert!(AbilityId::Blink.cooldown_secs() > 0.0);
        assert_eq!(AbilityId::Attack.cooldown_secs(), 0.0);
    }
}
