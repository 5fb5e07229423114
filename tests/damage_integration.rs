//! Damage engine integration tests
//!
//! Shot damage, BTK and TTK across the shipped roster and all three falloff
//! models.

use std::sync::Arc;

use battlebit_ttk::arsenal::default_roster;
use battlebit_ttk::core::error::TtkError;
use battlebit_ttk::core::types::DamageType;
use battlebit_ttk::damage::{
    bullets_to_kill, shot_damage_at_range, time_to_kill, DamageEngine, TtkOptions, DEFAULT_HEALTH,
};
use battlebit_ttk::falloff::{BezierCache, BezierCurve, FalloffModel, ModelKind, DEFAULT_OFFSET};
use battlebit_ttk::weapon::{
    new_weapon_profile, AttachmentModifier, FalloffInterval, WeaponCategory, WeaponProfile,
};

fn all_models() -> Vec<FalloffModel> {
    let cache = Arc::new(BezierCache::new());
    vec![
        FalloffModel::linear(),
        FalloffModel::cubic(),
        FalloffModel::bezier(DEFAULT_OFFSET, cache).unwrap(),
    ]
}

fn roster_weapons() -> Vec<WeaponProfile> {
    default_roster().unwrap().build_all().unwrap()
}

#[test]
fn test_reference_rifle_with_cubic_model() {
    let ak = new_weapon_profile(WeaponCategory::Ar, 33.0, 670.0, 700.0, 0.25, 50.0, 300.0, 0.35).unwrap();
    let model = FalloffModel::cubic();

    assert_eq!(shot_damage_at_range(&ak, 50.0, DamageType::Body, &model).unwrap(), 33.0);
    let far = shot_damage_at_range(&ak, 300.0, DamageType::Body, &model).unwrap();
    assert!((far - 11.55).abs() < 1e-9);
    assert_eq!(bullets_to_kill(&ak, 50.0, DamageType::Body, &model, DEFAULT_HEALTH).unwrap(), 4);

    let heavy = ak.with_attachment(&AttachmentModifier::heavy_barrel()).unwrap();
    assert_eq!(shot_damage_at_range(&heavy, 50.0, DamageType::Body, &model).unwrap(), 36.3);
    assert_eq!(bullets_to_kill(&heavy, 50.0, DamageType::Body, &model, DEFAULT_HEALTH).unwrap(), 3);
}

#[test]
fn test_linear_midpoint_scenario() {
    let lmg = new_weapon_profile(WeaponCategory::Lmg, 32.0, 775.0, 600.0, 0.3, 100.0, 300.0, 0.3).unwrap();
    let damage = shot_damage_at_range(&lmg, 200.0, DamageType::Body, &FalloffModel::linear()).unwrap();
    assert!((damage - 20.8).abs() < 1e-9);
}

#[test]
fn test_plateaus_for_every_weapon_and_model() {
    for model in all_models() {
        for weapon in roster_weapons() {
            let falloff = *weapon.falloff();
            for dt in [DamageType::Body, DamageType::Armor] {
                let base = weapon.damage(dt);
                for d in [0.0, falloff.near.distance / 2.0, falloff.near.distance] {
                    assert_eq!(shot_damage_at_range(&weapon, d, dt, &model).unwrap(), base);
                }
                for d in [falloff.far.distance, falloff.far.distance + 1.0, 1000.0] {
                    let damage = shot_damage_at_range(&weapon, d, dt, &model).unwrap();
                    assert_eq!(damage, base * weapon.min_coefficient(), "{} at {}", weapon, d);
                }
            }
        }
    }
}

#[test]
fn test_damage_falls_with_distance() {
    // The fitted cubic turns up by a few 1e-5 of a coefficient just before
    // the end of its reference domain
    const TOLERANCE: f64 = 1e-3;
    for model in all_models() {
        for weapon in roster_weapons() {
            let mut previous = f64::INFINITY;
            for step in 0..=350 {
                let d = step as f64;
                let damage = shot_damage_at_range(&weapon, d, DamageType::Body, &model).unwrap();
                assert!(
                    damage <= previous + TOLERANCE,
                    "{:?} {} rises at {} m: {} -> {}",
                    model.kind(),
                    weapon,
                    d,
                    previous,
                    damage
                );
                previous = damage;
            }
        }
    }
}

#[test]
fn test_btk_is_ceiling_of_health_over_damage() {
    let engine = DamageEngine::default();
    for weapon in roster_weapons() {
        for step in 0..40 {
            let d = step as f64 * 8.0;
            let damage = engine.shot_damage(&weapon, d, DamageType::Body).unwrap();
            let btk = engine.bullets_to_kill(&weapon, d, DamageType::Body).unwrap();
            assert_eq!(btk as f64, (100.0 / damage).ceil(), "{} at {}", weapon, d);
        }
    }
}

#[test]
fn test_ttk_formula() {
    let roster = default_roster().unwrap();
    let mp7 = roster.build("MP7").unwrap();
    let model = FalloffModel::default();
    // 25 damage: 4 hits, 3 gaps at 950 rpm, 35 m at 350 m/s
    let options = TtkOptions {
        health: 100.0,
        include_aim_time: true,
    };
    let ttk = time_to_kill(&mp7, 35.0, DamageType::Body, &model, options).unwrap();
    let expected = 3.0 * 60_000.0 / 950.0 + 100.0 + 150.0;
    assert!((ttk - expected).abs() < 1e-9, "{} vs {}", ttk, expected);
}

#[test]
fn test_ttk_single_hit_has_no_fire_interval() {
    let gun = new_weapon_profile(WeaponCategory::Ar, 120.0, 600.0, 800.0, 0.3, 50.0, 300.0, 0.35).unwrap();
    let ttk = time_to_kill(&gun, 40.0, DamageType::Body, &FalloffModel::default(), TtkOptions::default()).unwrap();
    assert!((ttk - 50.0).abs() < 1e-9);
}

#[test]
fn test_armor_damage_used_for_armor_type() {
    let roster = default_roster().unwrap();
    let m249 = roster.build("M249").unwrap();
    let engine = DamageEngine::default();
    assert_eq!(engine.shot_damage(&m249, 10.0, DamageType::Armor).unwrap(), 50.0);
    assert_eq!(engine.bullets_to_kill(&m249, 10.0, DamageType::Armor).unwrap(), 2);
    assert_eq!(engine.bullets_to_kill(&m249, 10.0, DamageType::Body).unwrap(), 4);
}

#[test]
fn test_invalid_distance_everywhere() {
    let weapon = roster_weapons().remove(0);
    let engine = DamageEngine::default();
    assert!(matches!(
        engine.shot_damage(&weapon, -10.0, DamageType::Body),
        Err(TtkError::InvalidDistance(_))
    ));
    assert!(matches!(
        engine.bullets_to_kill(&weapon, -10.0, DamageType::Body),
        Err(TtkError::InvalidDistance(_))
    ));
    assert!(matches!(
        engine.time_to_kill(&weapon, f64::NAN, DamageType::Body),
        Err(TtkError::InvalidDistance(_))
    ));
}

#[test]
fn test_bezier_shares_cache_across_weapons() {
    let cache = Arc::new(BezierCache::new());
    let engine = DamageEngine::new(FalloffModel::bezier(DEFAULT_OFFSET, cache.clone()).unwrap());
    for weapon in roster_weapons() {
        for d in [60.0, 120.0, 180.0] {
            engine.shot_damage(&weapon, d, DamageType::Body).unwrap();
        }
    }
    // AR 50-300, AR 150-300, LMG 100-300, and 50-200 at 0.25
    assert_eq!(cache.len(), 4);
}

#[test]
fn test_target_without_health_is_an_error() {
    let weapon = roster_weapons().remove(0);
    for health in [0.0, -50.0] {
        let engine = DamageEngine::default().with_health(health);
        assert!(matches!(
            engine.bullets_to_kill(&weapon, 10.0, DamageType::Body),
            Err(TtkError::InvalidConfig(_))
        ));
        assert!(engine.time_to_kill(&weapon, 10.0, DamageType::Body).is_err());
        assert!(engine.sample(&weapon, 10.0, DamageType::Armor).is_err());
        // Shot damage does not depend on the target
        assert!(engine.shot_damage(&weapon, 10.0, DamageType::Body).is_ok());
    }
}

#[test]
fn test_folded_bezier_offsets_never_reach_the_engine() {
    let cache = Arc::new(BezierCache::new());
    for offset in [0.5, 0.6, 0.7, -0.1] {
        assert!(matches!(
            FalloffModel::from_kind(ModelKind::Bezier, offset, cache.clone()),
            Err(TtkError::InvalidConfig(_))
        ));
    }
    assert!(cache.is_empty());
}

#[test]
fn test_folded_bezier_curve_reports_its_failures() {
    // With an offset past 0.5 the curve doubles back beyond both anchors
    let interval = FalloffInterval::new(50.0, 200.0, 0.25).unwrap();
    let curve = BezierCurve::new(&interval, 0.6);
    assert!(matches!(
        curve.solve(49.5, 0.6),
        Err(TtkError::AmbiguousSolution { offset, .. }) if offset == 0.6
    ));
    assert!(matches!(
        curve.solve(200.5, 0.6),
        Err(TtkError::AmbiguousSolution { .. })
    ));
    assert!(matches!(
        curve.solve(250.0, 0.6),
        Err(TtkError::NoRealSolution { .. })
    ));
    // Between the anchors it still crosses each distance once
    assert!((curve.solve(125.0, 0.6).unwrap() - 0.625).abs() < 1e-9);
}
