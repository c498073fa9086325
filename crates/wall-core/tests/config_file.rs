//! Configuration file loading.

use glam::Vec3;
use std::fs;
use tempfile::tempdir;

use wall_core::{AppConfig, ConfigError, Rgba, WallConfig};

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wall.toml");
    fs::write(
        &path,
        r#"
        [wall]
        row_count = 6
        column_count = 9
        wall_size = [8.0, 4.0, 2.0]
        max_angle = 30.0

        [pointer]
        shoot_color = { r = 0.0, g = 1.0, b = 0.0, a = 1.0 }
        "#,
    )
    .unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.wall.row_count, 6);
    assert_eq!(config.wall.column_count, 9);
    assert_eq!(config.wall.wall_size, Vec3::new(8.0, 4.0, 2.0));
    assert_eq!(config.wall.max_angle, 30.0);
    assert_eq!(config.pointer.shoot_color, Rgba::new(0.0, 1.0, 0.0, 1.0));
    assert_eq!(config.pointer.flash_duration, 0.1);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = AppConfig::from_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_load_or_default_falls_back() {
    let dir = tempdir().unwrap();
    let config = AppConfig::load_or_default(dir.path().join("absent.toml"));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_written_config_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wall.toml");

    let mut config = AppConfig::default();
    config.wall.update_curve_ratio(Some(0.25), Some(0.75));
    config.engine.seed = 99;
    fs::write(&path, config.to_toml().unwrap()).unwrap();

    let reloaded = AppConfig::from_file(&path).unwrap();
    assert_eq!(reloaded, config);
    assert_ne!(reloaded.wall, WallConfig::default());
}

#[test]
fn test_shipped_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../wall.toml");
    let config = AppConfig::from_file(path).unwrap();
    assert_eq!(config.wall.column_count, 11);
    assert_eq!(config.wall.y_curve_ratio, 0.6);
}
