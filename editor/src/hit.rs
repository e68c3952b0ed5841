//! Hit-testing: what is under the pointer, in either projection.
//!
//! Both testers answer with the same [`HitResult`], so placement is written
//! once against it. The 2D tester inverts the pan/zoom transform and checks
//! footprints directly; the 3D tester casts a ray through the pointer,
//! first against every block box and then against the ground plane.
//!
//! Hit-testing is a pure query: it reads the registry and camera state and
//! mutates nothing.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use glam::DVec3;

use crate::block::{Block, BlockId};
use crate::camera::{Camera, PerspectiveCamera, Point, Ray, screen_to_ndc};
use crate::consts::HIT_NUDGE;
use crate::grid::{Cell, Grid};
use crate::registry::{BlockRegistry, MeshHandle};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// The pointer is over a face of an existing block.
    Block {
        block_id: BlockId,
        /// Grid cell of the struck point, always inside the block's footprint.
        cell: Cell,
        /// World-space unit normal of the struck face (Y up).
        face_normal: DVec3,
    },
    /// The pointer is over bare ground (or, in 2D, over no block).
    Ground { cell: Cell },
    /// Nothing placeable is under the pointer.
    None,
}

/// A hit-testing strategy for one projection.
pub trait HitTester {
    /// Resolve a screen-space pointer position against the registry.
    fn detect_hit(&self, pointer: Point, registry: &BlockRegistry) -> HitResult;
}

// =============================================================================
// 2D
// =============================================================================

/// Hit tester for the top-down canvas.
///
/// When several blocks cover the pointer, the one with the highest layer
/// wins; among equal layers the one placed last wins.
#[derive(Debug, Clone, Copy)]
pub struct AffineHit2D {
    pub camera: Camera,
    pub grid: Grid,
}

impl HitTester for AffineHit2D {
    fn detect_hit(&self, pointer: Point, registry: &BlockRegistry) -> HitResult {
        let world = self.camera.screen_to_world(pointer);
        let cell = self.grid.world_to_cell(world.x, world.y);

        let mut top: Option<&Block> = None;
        for block in registry.iter().rev() {
            if block.covers(cell) && top.is_none_or(|t| block.z > t.z) {
                top = Some(block);
            }
        }

        match top {
            // Seen from above, every visible face is a top face.
            Some(block) => HitResult::Block { block_id: block.id, cell, face_normal: DVec3::Y },
            None => HitResult::Ground { cell },
        }
    }
}

// =============================================================================
// 3D
// =============================================================================

/// Axis-aligned world-space box of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BlockBox {
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

/// World box of a block: grid x along X, grid y along Z, layers along Y.
#[must_use]
pub fn block_box(block: &Block, grid: &Grid, brick_height: f64) -> BlockBox {
    span_box(grid, block.origin(), block.z, block.span(), brick_height)
}

/// World box of a `(width, height)` span anchored at `origin` on `layer`.
#[must_use]
pub fn span_box(grid: &Grid, origin: Cell, layer: u32, span: (u32, u32), brick_height: f64) -> BlockBox {
    let corner = grid.cell_to_world(origin);
    let cell = grid.cell_size();
    let bottom = f64::from(layer) * brick_height;
    BlockBox {
        min: DVec3::new(corner.x, bottom, corner.y),
        max: DVec3::new(
            corner.x + f64::from(span.0) * cell,
            bottom + brick_height,
            corner.y + f64::from(span.1) * cell,
        ),
    }
}

/// Slab test. Returns the entry distance and the entry face normal, or
/// `None` on a miss or when the ray starts inside the box.
#[must_use]
pub fn intersect_box(ray: &Ray, aabb: &BlockBox) -> Option<(f64, DVec3)> {
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    let mut enter_axis = None;

    for axis in 0..3 {
        let (o, d) = (ray.origin[axis], ray.dir[axis]);
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);
        if d.abs() < f64::EPSILON {
            // Parallel to this slab: inside it for the whole ray, or never.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (t0, t1) = if d > 0.0 { ((lo - o) / d, (hi - o) / d) } else { ((hi - o) / d, (lo - o) / d) };
        if t0 > t_enter {
            t_enter = t0;
            enter_axis = Some(axis);
        }
        t_exit = t_exit.min(t1);
    }

    let axis = enter_axis?;
    if t_enter < 0.0 || t_exit < t_enter {
        return None;
    }
    let mut normal = DVec3::ZERO;
    normal[axis] = -ray.dir[axis].signum();
    Some((t_enter, normal))
}

/// Hit tester for the perspective scene.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit3D {
    pub camera: PerspectiveCamera,
    /// Viewport size in CSS pixels.
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub grid: Grid,
    pub brick_height: f64,
    /// Side of the square ground plane centred on the origin; `None` for an
    /// unbounded plane.
    pub ground_extent: Option<f64>,
}

impl RaycastHit3D {
    /// The pick ray through a screen point, if the viewport and camera allow one.
    #[must_use]
    pub fn pick_ray(&self, pointer: Point) -> Option<Ray> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return None;
        }
        let ndc = screen_to_ndc(pointer, self.viewport_width, self.viewport_height);
        self.camera.ray_from_ndc(ndc.x, ndc.y, self.viewport_width / self.viewport_height)
    }

    /// Whether a distance along the pick ray lies between the near and far
    /// clip planes. Pick rays are unit length, so `t` is a distance.
    fn in_clip(&self, t: f64) -> bool {
        t >= self.camera.near && t <= self.camera.far
    }

    fn hit_blocks(&self, ray: &Ray, registry: &BlockRegistry) -> Option<HitResult> {
        let mut nearest: Option<(f64, DVec3, MeshHandle)> = None;
        for (handle, block) in registry.meshes() {
            let aabb = block_box(block, &self.grid, self.brick_height);
            if let Some((t, normal)) = intersect_box(ray, &aabb) {
                if self.in_clip(t) && nearest.is_none_or(|(best, _, _)| t < best) {
                    nearest = Some((t, normal, handle));
                }
            }
        }

        let (t, normal, handle) = nearest?;
        let block = registry.block_for_mesh(handle)?;
        // Step just inside the struck face so a hit on a cell boundary maps
        // into the block rather than onto its neighbour.
        let inside = ray.at(t) - normal * HIT_NUDGE;
        let cell = clamp_to_block(self.grid.world_to_cell(inside.x, inside.z), block);
        Some(HitResult::Block { block_id: block.id, cell, face_normal: normal })
    }

    fn hit_ground(&self, ray: &Ray) -> HitResult {
        if ray.dir.y.abs() < f64::EPSILON {
            return HitResult::None;
        }
        let t = -ray.origin.y / ray.dir.y;
        if t <= 0.0 || !self.in_clip(t) {
            return HitResult::None;
        }
        let point = ray.at(t);
        if let Some(extent) = self.ground_extent {
            let half = extent * 0.5;
            if point.x.abs() > half || point.z.abs() > half {
                return HitResult::None;
            }
        }
        HitResult::Ground { cell: self.grid.world_to_cell(point.x, point.z) }
    }
}

impl HitTester for RaycastHit3D {
    fn detect_hit(&self, pointer: Point, registry: &BlockRegistry) -> HitResult {
        let Some(ray) = self.pick_ray(pointer) else {
            return HitResult::None;
        };
        match self.hit_blocks(&ray, registry) {
            Some(hit) => hit,
            None => self.hit_ground(&ray),
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
fn clamp_to_block(cell: Cell, block: &Block) -> Cell {
    let (w, h) = block.span();
    let max_x = block.x.saturating_add(w as i32 - 1);
    let max_y = block.y.saturating_add(h as i32 - 1);
    Cell::new(cell.x.clamp(block.x, max_x), cell.y.clamp(block.y, max_y))
}
