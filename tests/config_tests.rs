// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use camera_preview::Config;
use camera_preview::backends::camera::types::{CameraBackendType, CameraFacing};
use camera_preview::config::SyntheticSettings;
use camera_preview::constants::transition;
use std::time::Duration;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.backend, CameraBackendType::Synthetic);
    assert_eq!(config.default_facing, CameraFacing::Back);
    assert!(
        config.mirror_front_preview,
        "Front preview should be mirrored by default"
    );
}

#[test]
fn test_transition_defaults_match_constants() {
    let config = Config::default();
    assert_eq!(config.transition.blur_scale, transition::BLUR_SCALE);
    assert_eq!(config.transition.blur_radius, transition::BLUR_RADIUS);
    assert_eq!(config.transition.hide_delay(), Duration::from_millis(300));
}

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.backend = CameraBackendType::Image;
    config.image_sources.front = Some("front.png".into());
    config.mirror_front_preview = false;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "default_facing": "Front", "transition": { "blur_radius": 10 } }"#)
        .unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.default_facing, CameraFacing::Front);
    assert_eq!(loaded.transition.blur_radius, 10);
    assert_eq!(loaded.transition.blur_scale, transition::BLUR_SCALE);
    assert_eq!(loaded.synthetic, SyntheticSettings::default());
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_loaded_blur_scale_is_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "transition": { "blur_scale": -1.0 } }"#).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.transition.blur_scale, transition::BLUR_SCALE);
}
