use std::fs;

use lanyard::config::{BallFieldConfig, PhysicsConfig};
use lanyard::{BadgeConfig, LanyardError};
use tempfile::tempdir;

#[test]
fn loads_partial_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("physics.ron");
    fs::write(&path, "(balls: (gravity: 0.05, restitution: 0.8), scroll: (threshold: 4.0))").unwrap();

    let cfg = PhysicsConfig::load_from_file(&path).unwrap();
    assert_eq!(cfg.balls.gravity, 0.05);
    assert_eq!(cfg.balls.restitution, 0.8);
    assert_eq!(cfg.balls.area_per_ball, BallFieldConfig::default().area_per_ball);
    assert_eq!(cfg.scroll.threshold, 4.0);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let (cfg, err) = PhysicsConfig::load_or_default(dir.path().join("absent.ron"));
    assert_eq!(cfg, PhysicsConfig::default());
    assert!(matches!(err, Some(LanyardError::Io { .. })));
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.ron");
    fs::write(&path, "(pendulum: (spring_stiffness: ").unwrap();
    let (cfg, err) = PhysicsConfig::load_or_default(&path);
    assert_eq!(cfg, PhysicsConfig::default());
    assert!(matches!(err, Some(LanyardError::ConfigParse(_))));
}

#[test]
fn layers_merge_nested_keys() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base.ron");
    let overlay = dir.path().join("overlay.ron");
    fs::write(&base, "(pendulum: (spring_stiffness: 0.05, base_damping: 0.9))").unwrap();
    fs::write(&overlay, "(pendulum: (base_damping: 0.93), layout: (mobile_breakpoint: 768.0))").unwrap();

    let (cfg, errors) = PhysicsConfig::load_layered([&base, &overlay]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(cfg.pendulum.spring_stiffness, 0.05);
    assert_eq!(cfg.pendulum.base_damping, 0.93);
    assert_eq!(cfg.layout.mobile_breakpoint, 768.0);
}

#[test]
fn bad_layers_are_skipped() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.ron");
    fs::write(&good, "(scroll: (reset_delay_ms: 250.0))").unwrap();
    let missing = dir.path().join("missing.ron");

    let (cfg, errors) = PhysicsConfig::load_layered([&missing, &good]);
    assert_eq!(errors.len(), 1);
    assert_eq!(cfg.scroll.reset_delay_ms, 250.0);
}

#[test]
fn validate_flags_suspicious_values() {
    let mut cfg = PhysicsConfig::default();
    cfg.balls.restitution = 1.4;
    cfg.layout.mobile_badge.width = 20.0;
    let warnings = cfg.validate();
    assert!(warnings.iter().any(|w| w.contains("balls.restitution")));
    assert!(warnings.iter().any(|w| w.contains("mobile_badge")));
    // Warnings alone are not fatal.
    assert!(cfg.validate_strict().is_ok());
}

#[test]
fn badge_config_from_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("badge.json");
    fs::write(&path, r#"{"company":"ACME","footerLink":null,"eventName":"RustConf"}"#).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let badge = BadgeConfig::from_json_str(&text).unwrap();
    assert_eq!(badge.company, "ACME");
    assert_eq!(badge.event_name, "RustConf");
    // `null` is the same as leaving the key out.
    assert!(badge.footer().is_some());
}

#[test]
fn badge_config_rejects_non_string_fields() {
    let err = BadgeConfig::from_json_str(r#"{"firstName": 7}"#).unwrap_err();
    assert!(matches!(err, LanyardError::BadgeConfigParse(_)));
}
