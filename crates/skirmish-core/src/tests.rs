#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use approx::assert_abs_diff_eq;
    use glam::DVec2;

    use crate::commands::{Decision, FireOrder, GunCommand};
    use crate::config::{EngineConfig, PowerTable};
    use crate::error::ConfigError;
    use crate::events::{BattleEvent, ScanEvent};
    use crate::geometry::*;
    use crate::types::{Battlefield, LateralDirection, OpponentId, SelfTelemetry};

    // ---- Geometry ----

    #[test]
    fn test_normal_relative_angle_range() {
        assert_abs_diff_eq!(normal_relative_angle(0.0), 0.0);
        assert_abs_diff_eq!(normal_relative_angle(PI), PI);
        assert_abs_diff_eq!(normal_relative_angle(-PI), PI);
        assert_abs_diff_eq!(normal_relative_angle(3.0 * FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(normal_relative_angle(-TAU - 0.25), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_absolute_angle_never_returns_tau() {
        let a = normal_absolute_angle(-1e-18);
        assert!((0.0..TAU).contains(&a));
        assert_abs_diff_eq!(normal_absolute_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_vector_convention() {
        // 0 = North, clockwise: 90 degrees points East.
        let north = unit_vector(0.0);
        assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(north.y, 1.0, epsilon = 1e-12);
        let east = unit_vector(FRAC_PI_2);
        assert_abs_diff_eq!(east.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(east.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_absolute_angle_between_matches_projection() {
        let origin = DVec2::new(100.0, 200.0);
        let target = project(origin, 2.0, 250.0);
        assert_abs_diff_eq!(absolute_angle_between(origin, target), 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.distance(target), 250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_blend_angles_takes_short_arc() {
        // 350 and 10 degrees blend around North, not through South.
        let a = 350f64.to_radians();
        let b = 10f64.to_radians();
        let mid = blend_angles(a, b, 0.5);
        assert_abs_diff_eq!(normal_relative_angle(mid), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(blend_angles(a, b, 0.0), a, epsilon = 1e-12);
        assert_abs_diff_eq!(blend_angles(a, b, 1.0), b, epsilon = 1e-9);
    }

    #[test]
    fn test_sign_is_three_valued() {
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(f64::NAN), 0.0);
    }

    #[test]
    fn test_finite_or() {
        assert_eq!(finite_or(2.0, 0.0), 2.0);
        assert_eq!(finite_or(f64::INFINITY, 0.0), 0.0);
        assert_eq!(finite_or(f64::NAN, 1.0), 1.0);
    }

    // ---- Types ----

    #[test]
    fn test_battlefield_wall_distances() {
        let field = Battlefield::new(800.0, 600.0);
        let d = field.wall_distances(DVec2::new(10.0, 500.0));
        assert_eq!(d, [10.0, 790.0, 500.0, 100.0]);
        assert!(field.is_near_wall(DVec2::new(10.0, 300.0), 80.0));
        assert!(!field.is_near_wall(field.center(), 80.0));
        // Outside the field the distance clamps at zero.
        assert_eq!(field.wall_distances(DVec2::new(-5.0, 300.0))[0], 0.0);
    }

    #[test]
    fn test_self_telemetry_angle_to_center() {
        let telemetry = SelfTelemetry {
            position: DVec2::new(10.0, 300.0),
            ..Default::default()
        };
        // Center is due East.
        assert_abs_diff_eq!(telemetry.angle_to_center(), FRAC_PI_2, epsilon = 1e-12);
        assert!(telemetry.gun_ready());
    }

    #[test]
    fn test_lateral_direction_reverses() {
        let d = LateralDirection::default();
        assert_eq!(d.sign(), 1.0);
        assert_eq!(d.reversed().sign(), -1.0);
        assert_eq!(d.reversed().reversed(), d);
    }

    #[test]
    fn test_opponent_id_is_transparent_in_json() {
        let id = OpponentId::new("Walls");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Walls\"");
        assert_eq!(id.to_string(), "Walls");
    }

    // ---- Events & commands ----

    #[test]
    fn test_scan_event_is_tagged() {
        let event = BattleEvent::Scanned(ScanEvent {
            opponent: "Crazy".into(),
            bearing: 0.5,
            distance: 300.0,
            heading: 1.0,
            velocity: -8.0,
            energy: 100.0,
            tick: 7,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Scanned");
        assert_eq!(json["opponent"], "Crazy");
        let back: BattleEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_decision_fire_order() {
        assert!(Decision::none().is_empty());
        let decision = Decision {
            movement: None,
            gun: Some(GunCommand {
                turn: 0.0,
                fire: Some(FireOrder {
                    power: 2.0,
                    shot_id: 4,
                }),
            }),
        };
        assert!(!decision.is_empty());
        assert_eq!(decision.fire_order().map(|f| f.shot_id), Some(4));
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_power_table_steps() {
        let table = PowerTable::new(&[(100.0, 3.0), (200.0, 2.5), (400.0, 2.0)], 1.5);
        assert_eq!(table.power_for(50.0), 3.0);
        assert_eq!(table.power_for(100.0), 2.5);
        assert_eq!(table.power_for(300.0), 2.0);
        assert_eq!(table.power_for(400.0), 1.5);
        assert_eq!(table.power_for(5000.0), 1.5);
    }

    #[test]
    fn test_config_rejects_even_bins() {
        let mut config = EngineConfig::default();
        config.targeting.bins = 30;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EvenBinCount { bins: 30 })
        ));
        config.targeting.bins = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooFewBins { bins: 1 })
        ));
    }

    #[test]
    fn test_config_rejects_bad_weights_and_capacities() {
        let mut config = EngineConfig::default();
        config.movement.field_weight = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightOutOfRange { .. })
        ));

        let mut config = EngineConfig::default();
        config.movement.history_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCapacity { .. })
        ));

        let mut config = EngineConfig::default();
        config.targeting.min_power = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPowerRange { .. })
        ));

        let mut config = EngineConfig::default();
        config.targeting.power = PowerTable::new(&[(400.0, 2.0), (100.0, 3.0)], 1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsortedPowerTiers { .. })
        ));
    }

    #[test]
    fn test_config_from_json_partial_override() {
        let config = EngineConfig::from_json(
            r#"{ "movement": { "wall_margin": 100.0 }, "targeting": { "bins": 21 } }"#,
        )
        .unwrap();
        assert_eq!(config.movement.wall_margin, 100.0);
        assert_eq!(config.targeting.bins, 21);
        // Untouched fields keep their defaults.
        assert_eq!(config.movement.move_distance, 180.0);
        assert_eq!(config.rage_energy_threshold, 50.0);
    }

    #[test]
    fn test_config_from_json_errors() {
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "targeting": { "bins": 4 } }"#),
            Err(ConfigError::EvenBinCount { bins: 4 })
        ));
    }
}
