//! Placement resolution: turning a hit into a target cell and layer.
//!
//! DESIGN
//! ======
//! Resolution is a pure query over the hit, the registry and the height map.
//! A ground hit lands on whatever already stacks in that cell. A block hit
//! either stacks on the struck block (top or bottom face) or steps one cell
//! sideways along the dominant horizontal axis of the face normal, so a
//! corner hit always resolves to a cardinal neighbour and never a diagonal.
//!
//! Committing is separate. [`commit`] turns a resolved [`Placement`] plus the
//! active [`EditorConfig`] into a new [`Block`], refusing footprints whose
//! cells do not all stack exactly to the target layer.
//!
//! ERROR HANDLING
//! ==============
//! `resolve` never fails; "nothing to place on" is `None`. `commit` returns
//! [`EditorError::UnevenFootprint`] when the block would float over a gap or
//! cut into a neighbouring stack.

#[cfg(test)]
#[path = "place_test.rs"]
mod place_test;

use crate::block::{Block, Footprint, Rotation, footprint_cells};
use crate::config::EditorConfig;
use crate::consts::VERTICAL_FACE_THRESHOLD;
use crate::error::EditorError;
use crate::grid::Cell;
use crate::height::HeightMap;
use crate::hit::HitResult;
use crate::registry::BlockRegistry;

/// Where a new block would go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub cell: Cell,
    pub layer: u32,
}

/// Ghost shown under the pointer before a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview {
    pub cell: Cell,
    pub layer: u32,
    pub footprint: Footprint,
    pub rotation: Rotation,
    /// Whether a commit at this spot would be accepted.
    pub valid: bool,
}

impl Preview {
    /// Post-rotation `(width, height)` in cells.
    #[must_use]
    pub fn span(&self) -> (u32, u32) {
        self.footprint.rotated(self.rotation)
    }
}

/// Resolve a hit into a target cell and layer.
#[must_use]
pub fn resolve(hit: &HitResult, registry: &BlockRegistry, heights: &HeightMap) -> Option<Placement> {
    match *hit {
        HitResult::None => None,
        HitResult::Ground { cell } => Some(Placement { cell, layer: heights.height_at(cell) }),
        HitResult::Block { block_id, cell, face_normal } => {
            if face_normal.y.abs() >= VERTICAL_FACE_THRESHOLD {
                let block = registry.get(&block_id)?;
                return Some(Placement { cell, layer: block.z.saturating_add(1) });
            }
            let (dx, dy) = side_step(face_normal.x, face_normal.z);
            let target = cell.offset(dx, dy);
            Some(Placement { cell: target, layer: heights.height_at(target) })
        }
    }
}

/// One cardinal step along the dominant horizontal component. World X maps
/// to grid x and world Z to grid y. X must strictly dominate; ties and a
/// zero horizontal normal fall to the z axis, where a non-positive component
/// steps to `y - 1`.
fn side_step(nx: f64, nz: f64) -> (i32, i32) {
    let unit = |v: f64| if v > 0.0 { 1 } else { -1 };
    if nx.abs() > nz.abs() { (unit(nx), 0) } else { (0, unit(nz)) }
}

/// Check that every cell under a `span` footprint stacks exactly to `layer`.
///
/// # Errors
///
/// Returns [`EditorError::UnevenFootprint`] naming the first cell whose stack
/// differs from `layer`.
pub fn check_level(cell: Cell, span: (u32, u32), layer: u32, heights: &HeightMap) -> Result<(), EditorError> {
    match footprint_cells(cell, span).find(|c| heights.height_at(*c) != layer) {
        Some(blocking) => {
            Err(EditorError::UnevenFootprint { cell, layer, blocking, height: heights.height_at(blocking) })
        }
        None => Ok(()),
    }
}

/// Build the preview for a resolved placement under the active settings.
#[must_use]
pub fn preview(placement: Placement, config: &EditorConfig, heights: &HeightMap) -> Preview {
    let span = config.active_footprint.rotated(config.active_rotation);
    Preview {
        cell: placement.cell,
        layer: placement.layer,
        footprint: config.active_footprint,
        rotation: config.active_rotation,
        valid: check_level(placement.cell, span, placement.layer, heights).is_ok(),
    }
}

/// Create the block a placement describes, using the active footprint,
/// colour and rotation.
///
/// # Errors
///
/// Returns [`EditorError::UnevenFootprint`] if the footprint is not level at
/// the placement layer.
pub fn commit(placement: Placement, config: &EditorConfig, heights: &HeightMap) -> Result<Block, EditorError> {
    let span = config.active_footprint.rotated(config.active_rotation);
    check_level(placement.cell, span, placement.layer, heights)?;
    Ok(Block::new(
        placement.cell,
        placement.layer,
        config.active_footprint,
        config.active_color.clone(),
        config.active_rotation,
    ))
}
