//! Editing session: routes pointer and keyboard input through hit-testing and
//! placement, and owns the build in progress.
//!
//! DESIGN
//! ======
//! `EngineCore` holds every piece of session state: the registry, its derived
//! height map, the selection, both cameras, the gesture state, the placement
//! preview and the build metadata. Handlers take plain event data and return
//! the [`Action`]s the host should react to (redraw, sync a mesh, persist).
//!
//! The height map is rebuilt inside every mutating method before it returns,
//! so the next hit test or placement decision always sees current stacks.
//!
//! ERROR HANDLING
//! ==============
//! Input handlers never fail. A refused commit (uneven footprint, nothing
//! under the pointer) is logged and yields no actions. Only the explicit
//! boundary calls (`load_build`, `place`, `commit_preview`) return
//! [`EditorError`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info, warn};

use crate::block::{Block, BlockId, BuildRecord, Footprint, Rotation};
use crate::camera::{Camera, OrbitCamera, Point};
use crate::config::{EditorConfig, EngineConfig, Projection};
use crate::consts::{DEFAULT_BUILD_NAME, ORBIT_RAD_PER_PX};
use crate::error::EditorError;
use crate::height::HeightMap;
use crate::hit::{AffineHit2D, HitResult, HitTester, RaycastHit3D};
use crate::input::{BlockEdit, Button, InputState, Key, KeyCommand, Modifiers, WheelDelta};
use crate::place::{self, Placement, Preview};
use crate::registry::{BlockPatch, BlockRegistry, MeshHandle};
use crate::scene::{self, GridLines, Scene2D, Scene3D};
use crate::selection::SelectionController;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BlockCreated(Block),
    BlockUpdated(Block),
    BlockDeleted { id: BlockId },
    SelectionChanged(Option<BlockId>),
    PreviewChanged(Option<Preview>),
    RenderNeeded,
}

/// Core engine state: all editing logic, independent of any renderer.
#[derive(Debug)]
pub struct EngineCore {
    pub config: EngineConfig,
    pub editor: EditorConfig,
    pub camera: Camera,
    pub orbit: OrbitCamera,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    registry: BlockRegistry,
    heights: HeightMap,
    selection: SelectionController,
    preview: Option<Preview>,
    /// Last pointer position inside the viewport; `None` after pointer-leave.
    pointer: Option<Point>,
    name: String,
    build_id: Option<String>,
    dirty: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            editor: EditorConfig::default(),
            camera: Camera::default(),
            orbit: OrbitCamera::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            registry: BlockRegistry::new(),
            heights: HeightMap::default(),
            selection: SelectionController::new(),
            preview: None,
            pointer: None,
            name: DEFAULT_BUILD_NAME.to_string(),
            build_id: None,
            dirty: false,
        }
    }

    // =========================================================================
    // Viewport / mode / active settings
    // =========================================================================

    /// Update viewport dimensions in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Switch projection. Drops the preview and any gesture in progress.
    pub fn set_mode(&mut self, projection: Projection) -> Vec<Action> {
        if self.editor.projection == projection {
            return Vec::new();
        }
        debug!(?projection, "projection changed");
        self.editor.projection = projection;
        self.input = InputState::Idle;
        let mut actions = self.set_preview(None);
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_active_color(&mut self, color: impl Into<String>) {
        self.editor.active_color = color.into();
    }

    /// Change the footprint used by new blocks; the preview follows.
    pub fn set_active_footprint(&mut self, footprint: Footprint) -> Vec<Action> {
        self.editor.active_footprint = footprint;
        self.refresh_preview()
    }

    /// Change the rotation used by new blocks; the preview follows.
    pub fn set_active_rotation(&mut self, rotation: Rotation) -> Vec<Action> {
        self.editor.active_rotation = rotation;
        self.refresh_preview()
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.pointer = Some(screen_pt);
        // A second button during a camera gesture is ignored.
        if self.input.is_gesture() {
            return Vec::new();
        }
        match (self.editor.projection, button) {
            (Projection::TwoD, Button::Primary) if modifiers.shift => {
                self.input = InputState::Panning { last_screen: screen_pt };
                Vec::new()
            }
            (Projection::TwoD, Button::Primary) => self.click_2d(screen_pt),
            // Shift-click in 3D belongs to camera control.
            (Projection::ThreeD, Button::Primary) if modifiers.shift => Vec::new(),
            (Projection::ThreeD, Button::Primary) => {
                let mut actions = self.refresh_preview();
                actions.extend(self.commit_or_log());
                actions
            }
            (Projection::ThreeD, Button::Secondary) => {
                self.input = InputState::Orbiting { last_screen: screen_pt };
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        self.pointer = Some(screen_pt);
        match self.input {
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::Orbiting { last_screen } => {
                let dx = screen_pt.x - last_screen.x;
                let dy = screen_pt.y - last_screen.y;
                self.orbit.orbit(-dx * ORBIT_RAD_PER_PX, -dy * ORBIT_RAD_PER_PX);
                self.input = InputState::Orbiting { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::Idle => self.refresh_preview(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.pointer = Some(screen_pt);
        self.input = InputState::Idle;
        Vec::new()
    }

    /// The pointer left the viewport: end any gesture and hide the preview.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.pointer = None;
        self.input = InputState::Idle;
        self.set_preview(None)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy < 0.0 { self.config.zoom_step_in } else { self.config.zoom_step_out };
        match self.editor.projection {
            Projection::TwoD => {
                self.camera.zoom_at(screen_pt, factor, self.config.min_zoom, self.config.max_zoom);
            }
            Projection::ThreeD => self.orbit.dolly(1.0 / factor),
        }
        self.pointer = Some(screen_pt);
        let mut actions = self.refresh_preview();
        actions.push(Action::RenderNeeded);
        actions
    }

    // =========================================================================
    // Keyboard input
    // =========================================================================

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match KeyCommand::from_key(key, modifiers) {
            None => Vec::new(),
            Some(KeyCommand::PlaceAtCursor) => {
                let mut actions = self.refresh_preview();
                actions.extend(self.commit_or_log());
                actions
            }
            Some(KeyCommand::Edit(edit)) => match self.selection.current(&self.registry).cloned() {
                Some(block) => self.edit_block(&block, edit),
                None => Vec::new(),
            },
        }
    }

    fn edit_block(&mut self, block: &Block, edit: BlockEdit) -> Vec<Action> {
        match edit {
            BlockEdit::Rotate => {
                let patch = BlockPatch { rotation: Some(block.rotation.rotate_cw()), ..BlockPatch::default() };
                self.update_block(block.id, &patch)
            }
            BlockEdit::Delete => self.delete_block(block.id),
            BlockEdit::ClearSelection => self.clear_selection(),
            BlockEdit::Move { dx, dy, fast } => {
                let step = if fast { self.config.move_step_fast } else { self.config.move_step };
                let patch = BlockPatch {
                    x: Some(block.x.saturating_add(dx.saturating_mul(step))),
                    y: Some(block.y.saturating_add(dy.saturating_mul(step))),
                    ..BlockPatch::default()
                };
                self.update_block(block.id, &patch)
            }
            BlockEdit::Raise => {
                self.update_block(block.id, &BlockPatch { z: Some(block.z.saturating_add(1)), ..BlockPatch::default() })
            }
            BlockEdit::Lower => match block.z.checked_sub(1) {
                Some(z) => self.update_block(block.id, &BlockPatch { z: Some(z), ..BlockPatch::default() }),
                None => Vec::new(),
            },
        }
    }

    // =========================================================================
    // Block operations
    // =========================================================================

    /// Resolve a hit against the current registry and stacks.
    #[must_use]
    pub fn resolve_hit(&self, hit: &HitResult) -> Option<Placement> {
        place::resolve(hit, &self.registry, &self.heights)
    }

    /// What the active projection sees under a screen point.
    #[must_use]
    pub fn hit_at(&self, screen_pt: Point) -> HitResult {
        match self.editor.projection {
            Projection::TwoD => self.affine_tester().detect_hit(screen_pt, &self.registry),
            Projection::ThreeD => self.raycast_tester().detect_hit(screen_pt, &self.registry),
        }
    }

    /// Create a block at `placement` with the active settings and select it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnevenFootprint`] if the footprint is not level
    /// at the placement layer.
    pub fn place(&mut self, placement: Placement) -> Result<Vec<Action>, EditorError> {
        let block = place::commit(placement, &self.editor, &self.heights)?;
        let id = block.id;
        debug!(block_id = %id, x = block.x, y = block.y, layer = block.z, kind = %block.footprint, "block placed");
        self.registry.insert(block.clone());
        self.after_mutation();
        self.selection.select(id, &self.registry);

        let mut actions = vec![Action::BlockCreated(block), Action::SelectionChanged(Some(id))];
        actions.extend(self.refresh_preview());
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Commit the current preview.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoPlacement`] if there is no preview, or
    /// [`EditorError::UnevenFootprint`] if it is not level.
    pub fn commit_preview(&mut self) -> Result<Vec<Action>, EditorError> {
        let preview = self.preview.ok_or(EditorError::NoPlacement)?;
        self.place(Placement { cell: preview.cell, layer: preview.layer })
    }

    /// Select a block by id; unknown ids clear the selection.
    pub fn select(&mut self, id: BlockId) -> Vec<Action> {
        let before = self.selection.current_id(&self.registry);
        self.selection.select(id, &self.registry);
        let after = self.selection.current_id(&self.registry);
        if before == after {
            return Vec::new();
        }
        debug!(block_id = ?after, "selection changed");
        vec![Action::SelectionChanged(after), Action::RenderNeeded]
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        let had = self.selection.current_id(&self.registry).is_some();
        self.selection.clear();
        if !had {
            return Vec::new();
        }
        debug!("selection cleared");
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Apply a sparse update to a block. Moves and rotations are taken as
    /// given; the footprint is not re-checked against its neighbours.
    pub fn update_block(&mut self, id: BlockId, patch: &BlockPatch) -> Vec<Action> {
        if patch.is_empty() {
            return Vec::new();
        }
        let Some(block) = self.registry.apply(&id, patch).cloned() else {
            return Vec::new();
        };
        let rotation = block.rotation.degrees();
        debug!(block_id = %id, x = block.x, y = block.y, layer = block.z, rotation, "block updated");
        self.after_mutation();
        let mut actions = vec![Action::BlockUpdated(block)];
        actions.extend(self.refresh_preview());
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn delete_block(&mut self, id: BlockId) -> Vec<Action> {
        if self.registry.remove(&id).is_none() {
            return Vec::new();
        }
        debug!(block_id = %id, "block deleted");
        self.after_mutation();
        let mut actions = vec![Action::BlockDeleted { id }];
        if self.selection.prune(&self.registry) {
            actions.push(Action::SelectionChanged(None));
        }
        actions.extend(self.refresh_preview());
        actions.push(Action::RenderNeeded);
        actions
    }

    // =========================================================================
    // Build lifecycle
    // =========================================================================

    pub fn set_build_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.dirty = true;
    }

    /// Start an empty, unsaved build.
    pub fn new_build(&mut self) -> Vec<Action> {
        info!("new build");
        self.registry.replace_all(Vec::new());
        self.heights = HeightMap::rebuild(&self.registry);
        self.selection.clear();
        self.input = InputState::Idle;
        self.name = DEFAULT_BUILD_NAME.to_string();
        self.build_id = None;
        self.dirty = false;
        self.preview = None;
        vec![Action::SelectionChanged(None), Action::PreviewChanged(None), Action::RenderNeeded]
    }

    /// Replace the build wholesale. Every record is validated first; on any
    /// invalid record the current build is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first validation error among the records.
    pub fn load_build(&mut self, record: &BuildRecord, build_id: Option<String>) -> Result<Vec<Action>, EditorError> {
        let blocks = record
            .blocks
            .iter()
            .map(Block::from_record)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!(error = %e, name = %record.name, "rejected build"))?;
        info!(name = %record.name, blocks = blocks.len(), "build loaded");
        self.registry.replace_all(blocks);
        self.heights = HeightMap::rebuild(&self.registry);
        self.selection.clear();
        self.input = InputState::Idle;
        self.preview = None;
        self.name.clone_from(&record.name);
        self.build_id = build_id;
        self.dirty = false;
        Ok(vec![Action::SelectionChanged(None), Action::PreviewChanged(None), Action::RenderNeeded])
    }

    /// Export the build as records, in registry order.
    #[must_use]
    pub fn save_build(&self) -> BuildRecord {
        BuildRecord { name: self.name.clone(), blocks: self.registry.to_records() }
    }

    /// Record the id the persistence collaborator assigned and clear the dirty flag.
    pub fn mark_saved(&mut self, build_id: impl Into<String>) {
        let build_id = build_id.into();
        info!(build_id = %build_id, name = %self.name, "build saved");
        self.build_id = Some(build_id);
        self.dirty = false;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    #[must_use]
    pub fn heights(&self) -> &HeightMap {
        &self.heights
    }

    /// The selected block id, if it still exists.
    #[must_use]
    pub fn selection(&self) -> Option<BlockId> {
        self.selection.current_id(&self.registry)
    }

    #[must_use]
    pub fn selected_block(&self) -> Option<&Block> {
        self.selection.current(&self.registry)
    }

    #[must_use]
    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn mesh_for(&self, id: &BlockId) -> Option<MeshHandle> {
        self.registry.mesh_for(id)
    }

    #[must_use]
    pub fn preview(&self) -> Option<Preview> {
        self.preview
    }

    #[must_use]
    pub fn projection(&self) -> Projection {
        self.editor.projection
    }

    #[must_use]
    pub fn build_name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn build_id(&self) -> Option<&str> {
        self.build_id.as_deref()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn scene_2d(&self) -> Scene2D {
        scene::scene_2d(&self.registry, self.selection(), self.preview.as_ref(), &self.config.grid())
    }

    #[must_use]
    pub fn scene_3d(&self) -> Scene3D {
        let grid = self.config.grid();
        scene::scene_3d(&self.registry, self.selection(), self.preview.as_ref(), &grid, self.config.brick_height)
    }

    #[must_use]
    pub fn grid_lines(&self) -> GridLines {
        scene::grid_lines(&self.camera, self.viewport_width, self.viewport_height, &self.config.grid())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn affine_tester(&self) -> AffineHit2D {
        AffineHit2D { camera: self.camera, grid: self.config.grid() }
    }

    fn raycast_tester(&self) -> RaycastHit3D {
        RaycastHit3D {
            camera: self.orbit.perspective(),
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            grid: self.config.grid(),
            brick_height: self.config.brick_height,
            ground_extent: self.config.ground_extent,
        }
    }

    /// 2D primary click: select the block under the pointer, or place on the
    /// ground there.
    fn click_2d(&mut self, screen_pt: Point) -> Vec<Action> {
        let hit = self.hit_at(screen_pt);
        match hit {
            HitResult::Block { block_id, .. } => self.select(block_id),
            HitResult::Ground { .. } => match self.resolve_hit(&hit) {
                Some(placement) => self.place_or_log(placement),
                None => Vec::new(),
            },
            HitResult::None => Vec::new(),
        }
    }

    fn commit_or_log(&mut self) -> Vec<Action> {
        match self.commit_preview() {
            Ok(actions) => actions,
            Err(EditorError::NoPlacement) => {
                debug!("nothing to place under the pointer");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "placement refused");
                Vec::new()
            }
        }
    }

    fn place_or_log(&mut self, placement: Placement) -> Vec<Action> {
        match self.place(placement) {
            Ok(actions) => actions,
            Err(e) => {
                let Placement { cell, layer } = placement;
                warn!(error = %e, x = cell.x, y = cell.y, layer, "placement refused");
                Vec::new()
            }
        }
    }

    fn after_mutation(&mut self) {
        self.heights = HeightMap::rebuild(&self.registry);
        self.dirty = true;
    }

    /// Recompute the preview under the last pointer position.
    fn refresh_preview(&mut self) -> Vec<Action> {
        let next = self.pointer.and_then(|pt| {
            let hit = self.hit_at(pt);
            self.resolve_hit(&hit).map(|placement| place::preview(placement, &self.editor, &self.heights))
        });
        self.set_preview(next)
    }

    fn set_preview(&mut self, next: Option<Preview>) -> Vec<Action> {
        if self.preview == next {
            return Vec::new();
        }
        self.preview = next;
        vec![Action::PreviewChanged(next), Action::RenderNeeded]
    }
}
