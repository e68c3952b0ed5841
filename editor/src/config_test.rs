#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.cell_size, 20.0);
    assert_eq!(cfg.brick_height, 10.0);
    assert_eq!(cfg.ground_extent, Some(500.0));
    assert_eq!(cfg.min_zoom, 0.1);
    assert_eq!(cfg.max_zoom, 5.0);
    assert_eq!(cfg.move_step, 1);
    assert_eq!(cfg.move_step_fast, 5);
}

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn cell_size_override_scales_default_brick_height() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[("BRICK_CELL_SIZE", "8")])).unwrap();
    assert_eq!(cfg.cell_size, 8.0);
    assert_eq!(cfg.brick_height, 4.0);
    assert_eq!(cfg.grid().cell_size(), 8.0);
}

#[test]
fn explicit_brick_height_wins() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[("BRICK_CELL_SIZE", "8"), ("BRICK_HEIGHT", "9.6")])).unwrap();
    assert_eq!(cfg.brick_height, 9.6);
}

#[test]
fn ground_extent_none_is_unbounded() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[("BRICK_GROUND_EXTENT", "None")])).unwrap();
    assert!(cfg.ground_extent.is_none());
    let cfg = EngineConfig::from_lookup(lookup_from(&[("BRICK_GROUND_EXTENT", "1000")])).unwrap();
    assert_eq!(cfg.ground_extent, Some(1000.0));
}

#[test]
fn rejects_non_numeric() {
    let err = EngineConfig::from_lookup(lookup_from(&[("BRICK_CELL_SIZE", "big")])).unwrap_err();
    assert!(matches!(err, EditorError::Config { key: "BRICK_CELL_SIZE", .. }));
}

#[test]
fn rejects_non_positive() {
    for raw in ["0", "-3", "NaN", "inf"] {
        let err = EngineConfig::from_lookup(lookup_from(&[("BRICK_MAX_ZOOM", raw)])).unwrap_err();
        assert!(matches!(err, EditorError::Config { key: "BRICK_MAX_ZOOM", .. }), "{raw}");
    }
}

#[test]
fn rejects_inverted_zoom_range() {
    let err = EngineConfig::from_lookup(lookup_from(&[("BRICK_MIN_ZOOM", "3"), ("BRICK_MAX_ZOOM", "2")])).unwrap_err();
    assert!(matches!(err, EditorError::Config { key: "BRICK_MIN_ZOOM", .. }));
}

#[test]
fn editor_config_defaults() {
    let cfg = EditorConfig::default();
    assert_eq!(cfg.active_color, "#ff0000");
    assert_eq!(cfg.active_footprint.to_string(), "1x1");
    assert_eq!(cfg.active_rotation, Rotation::Deg0);
    assert_eq!(cfg.projection, Projection::ThreeD);
}
