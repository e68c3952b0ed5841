//! Engine geometry settings and the active editor settings.
//!
//! `EngineConfig` holds the fixed geometry shared by both projections and is
//! read once at start-up, optionally from environment variables.
//! `EditorConfig` is the user's current palette choice (colour, footprint,
//! rotation) and projection; it is passed explicitly into every commit.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::block::{Footprint, Rotation};
use crate::consts::{
    BRICK_HEIGHT_RATIO, CELL_SIZE, DEFAULT_COLOR, GROUND_EXTENT, MAX_ZOOM, MIN_ZOOM, MOVE_STEP, MOVE_STEP_FAST,
    ZOOM_STEP_IN, ZOOM_STEP_OUT,
};
use crate::error::EditorError;
use crate::grid::Grid;

/// Which view the user is editing through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Orthographic top-down canvas.
    TwoD,
    /// Perspective scene with raycasting.
    #[default]
    ThreeD,
}

/// Geometry and interaction constants.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Edge length of a grid cell in world units.
    pub cell_size: f64,
    /// Height of one stacking layer in world units (3D only).
    pub brick_height: f64,
    /// Side of the square ground plane centred on the origin; `None` for an
    /// unbounded plane.
    pub ground_extent: Option<f64>,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step_in: f64,
    pub zoom_step_out: f64,
    pub move_step: i32,
    pub move_step_fast: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            brick_height: CELL_SIZE * BRICK_HEIGHT_RATIO,
            ground_extent: Some(GROUND_EXTENT),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step_in: ZOOM_STEP_IN,
            zoom_step_out: ZOOM_STEP_OUT,
            move_step: MOVE_STEP,
            move_step_fast: MOVE_STEP_FAST,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `BRICK_CELL_SIZE`: default 20
    /// - `BRICK_HEIGHT`: default half the cell size
    /// - `BRICK_GROUND_EXTENT`: default 500, or `none` for an unbounded plane
    /// - `BRICK_MIN_ZOOM`: default 0.1
    /// - `BRICK_MAX_ZOOM`: default 5
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Config`] if a value is present but not a
    /// positive number, or if the zoom range is inverted.
    pub fn from_env() -> Result<Self, EditorError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup. Used by [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EditorError> {
        let defaults = Self::default();
        let cell_size = parse_positive(&lookup, "BRICK_CELL_SIZE")?.unwrap_or(defaults.cell_size);
        let brick_height = parse_positive(&lookup, "BRICK_HEIGHT")?.unwrap_or(cell_size * BRICK_HEIGHT_RATIO);
        let ground_extent = match lookup("BRICK_GROUND_EXTENT") {
            Some(raw) if raw.trim().eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(positive("BRICK_GROUND_EXTENT", &raw)?),
            None => defaults.ground_extent,
        };
        let min_zoom = parse_positive(&lookup, "BRICK_MIN_ZOOM")?.unwrap_or(defaults.min_zoom);
        let max_zoom = parse_positive(&lookup, "BRICK_MAX_ZOOM")?.unwrap_or(defaults.max_zoom);
        if min_zoom > max_zoom {
            return Err(EditorError::Config { key: "BRICK_MIN_ZOOM", value: min_zoom.to_string() });
        }

        Ok(Self { cell_size, brick_height, ground_extent, min_zoom, max_zoom, ..defaults })
    }

    /// Grid geometry for this config.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.cell_size)
    }
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<f64>, EditorError> {
    lookup(key).map(|raw| positive(key, &raw)).transpose()
}

fn positive(key: &'static str, raw: &str) -> Result<f64, EditorError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(EditorError::Config { key, value: raw.to_string() }),
    }
}

/// The user's current palette selection and view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub active_color: String,
    pub active_footprint: Footprint,
    pub active_rotation: Rotation,
    pub projection: Projection,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            active_color: DEFAULT_COLOR.to_string(),
            active_footprint: Footprint::default(),
            active_rotation: Rotation::Deg0,
            projection: Projection::default(),
        }
    }
}
