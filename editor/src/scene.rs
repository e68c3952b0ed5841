//! Draw lists: what the front ends paint, derived from engine state.
//!
//! The engine never touches a canvas or a GPU. It hands renderers plain
//! lists of rectangles (2D, world units) or boxes (3D, world units with mesh
//! handles) plus the selection highlight and the placement ghost. Renderers
//! apply their own camera transform.
//!
//! Draw order matches hit-test priority: blocks are sorted by layer, and
//! within a layer by registry order, so whatever is painted on top is what a
//! click selects.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::block::{Block, BlockId};
use crate::camera::{Camera, Point};
use crate::grid::{Cell, Grid};
use crate::hit::{BlockBox, block_box, span_box};
use crate::place::Preview;
use crate::registry::{BlockRegistry, MeshHandle};

/// Selection outline padding around a block, in world units.
const HIGHLIGHT_MARGIN: f64 = 2.0;

/// Outline darkening, in percent.
const OUTLINE_SHADE: u8 = 20;

/// Stud darkening, in percent.
const STUD_SHADE: u8 = 10;

/// Stud radius as a fraction of the cell size.
const STUD_RADIUS_RATIO: f64 = 0.25;

// =============================================================================
// 2D
// =============================================================================

/// Axis-aligned world rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One block on the top-down canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct BrickRect {
    pub block_id: BlockId,
    pub rect: Rect,
    pub fill: String,
    pub outline: String,
    pub stud_color: String,
    pub stud_radius: f64,
    /// World-space stud centres, one per covered cell.
    pub studs: Vec<Point>,
}

/// Everything the 2D canvas draws, bottom first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene2D {
    pub bricks: Vec<BrickRect>,
    pub highlight: Option<Rect>,
    pub ghost: Option<Ghost2D>,
}

/// Placement ghost on the 2D canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost2D {
    pub rect: Rect,
    pub valid: bool,
}

/// Build the 2D draw list.
#[must_use]
pub fn scene_2d(
    registry: &BlockRegistry,
    selected: Option<BlockId>,
    preview: Option<&Preview>,
    grid: &Grid,
) -> Scene2D {
    let bricks = draw_order(registry).into_iter().map(|block| brick_rect(block, grid)).collect();
    let highlight = selected.and_then(|id| registry.get(&id)).map(|block| {
        let r = span_rect(grid, block.origin(), block.span());
        Rect {
            x: r.x - HIGHLIGHT_MARGIN,
            y: r.y - HIGHLIGHT_MARGIN,
            width: r.width + HIGHLIGHT_MARGIN * 2.0,
            height: r.height + HIGHLIGHT_MARGIN * 2.0,
        }
    });
    let ghost = preview.map(|p| Ghost2D { rect: span_rect(grid, p.cell, p.span()), valid: p.valid });
    Scene2D { bricks, highlight, ghost }
}

fn brick_rect(block: &Block, grid: &Grid) -> BrickRect {
    let half = grid.cell_size() * 0.5;
    let studs = block
        .cells()
        .map(|cell| {
            let corner = grid.cell_to_world(cell);
            Point::new(corner.x + half, corner.y + half)
        })
        .collect();
    BrickRect {
        block_id: block.id,
        rect: span_rect(grid, block.origin(), block.span()),
        fill: block.color.clone(),
        outline: shade(&block.color, OUTLINE_SHADE).unwrap_or_else(|| block.color.clone()),
        stud_color: shade(&block.color, STUD_SHADE).unwrap_or_else(|| block.color.clone()),
        stud_radius: grid.cell_size() * STUD_RADIUS_RATIO,
        studs,
    }
}

fn span_rect(grid: &Grid, origin: Cell, span: (u32, u32)) -> Rect {
    let corner = grid.cell_to_world(origin);
    let size = grid.cell_size();
    Rect { x: corner.x, y: corner.y, width: f64::from(span.0) * size, height: f64::from(span.1) * size }
}

/// World positions of the grid lines visible in a viewport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLines {
    /// Vertical lines, as world x.
    pub xs: Vec<f64>,
    /// Horizontal lines, as world y.
    pub ys: Vec<f64>,
}

/// Grid lines covering the viewport under `camera`.
#[must_use]
pub fn grid_lines(camera: &Camera, viewport_width: f64, viewport_height: f64, grid: &Grid) -> GridLines {
    if viewport_width <= 0.0 || viewport_height <= 0.0 {
        return GridLines::default();
    }
    let min = camera.screen_to_world(Point::new(0.0, 0.0));
    let max = camera.screen_to_world(Point::new(viewport_width, viewport_height));
    let size = grid.cell_size();
    GridLines { xs: lines_between(min.x, max.x, size), ys: lines_between(min.y, max.y, size) }
}

fn lines_between(from: f64, to: f64, step: f64) -> Vec<f64> {
    let mut lines = Vec::new();
    let mut at = (from / step).floor() * step;
    while at <= to {
        lines.push(at);
        at += step;
    }
    lines
}

// =============================================================================
// 3D
// =============================================================================

/// One block in the perspective scene.
#[derive(Debug, Clone, PartialEq)]
pub struct BrickBox {
    pub handle: MeshHandle,
    pub block_id: BlockId,
    pub bounds: BlockBox,
    pub color: String,
    pub selected: bool,
}

/// Placement ghost in the perspective scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost3D {
    pub bounds: BlockBox,
    pub valid: bool,
}

/// Everything the 3D scene draws.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene3D {
    pub bricks: Vec<BrickBox>,
    pub ghost: Option<Ghost3D>,
}

/// Build the 3D draw list.
#[must_use]
pub fn scene_3d(
    registry: &BlockRegistry,
    selected: Option<BlockId>,
    preview: Option<&Preview>,
    grid: &Grid,
    brick_height: f64,
) -> Scene3D {
    let bricks = registry
        .meshes()
        .map(|(handle, block)| BrickBox {
            handle,
            block_id: block.id,
            bounds: block_box(block, grid, brick_height),
            color: block.color.clone(),
            selected: selected == Some(block.id),
        })
        .collect();
    let ghost = preview
        .map(|p| Ghost3D { bounds: span_box(grid, p.cell, p.layer, p.span(), brick_height), valid: p.valid });
    Scene3D { bricks, ghost }
}

// =============================================================================
// Helpers
// =============================================================================

/// Blocks sorted by layer; registry order within a layer.
#[must_use]
pub fn draw_order(registry: &BlockRegistry) -> Vec<&Block> {
    let mut blocks: Vec<&Block> = registry.iter().collect();
    blocks.sort_by_key(|b| b.z);
    blocks
}

/// Darken a `#rrggbb` colour by `percent`. `None` if the colour is not in that form.
#[must_use]
pub fn shade(hex: &str, percent: u8) -> Option<String> {
    let digits = hex.strip_prefix('#').filter(|d| d.len() == 6 && d.is_ascii())?;
    let keep = u32::from(100_u8.saturating_sub(percent));
    let mut channels = [0_u32; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let Ok(value) = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16) else {
            return None;
        };
        *channel = u32::from(value) * keep / 100;
    }
    Some(format!("#{:02x}{:02x}{:02x}", channels[0], channels[1], channels[2]))
}
