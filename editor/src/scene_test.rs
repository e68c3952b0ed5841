#![allow(clippy::float_cmp)]

use glam::DVec3;

use super::*;
use crate::block::{Footprint, Rotation};

fn make_block(x: i32, y: i32, z: u32, kind: &str, color: &str) -> Block {
    Block::new(Cell::new(x, y), z, kind.parse::<Footprint>().unwrap(), color, Rotation::Deg0)
}

fn registry_with(blocks: &[Block]) -> BlockRegistry {
    let mut reg = BlockRegistry::new();
    for b in blocks {
        reg.insert(b.clone());
    }
    reg
}

fn grid() -> Grid {
    Grid::new(20.0)
}

fn ghost_preview(kind: &str, valid: bool) -> Preview {
    Preview {
        cell: Cell::new(1, 2),
        layer: 3,
        footprint: kind.parse().unwrap(),
        rotation: Rotation::Deg90,
        valid,
    }
}

// =============================================================
// 2D
// =============================================================

#[test]
fn empty_scene_draws_nothing() {
    let scene = scene_2d(&BlockRegistry::new(), None, None, &grid());
    assert_eq!(scene, Scene2D::default());
}

#[test]
fn brick_rect_covers_rotated_span() {
    let mut block = make_block(3, 4, 0, "2x1", "#ff0000");
    block.rotation = Rotation::Deg90;
    let scene = scene_2d(&registry_with(&[block]), None, None, &grid());
    assert_eq!(scene.bricks[0].rect, Rect { x: 60.0, y: 80.0, width: 20.0, height: 40.0 });
}

#[test]
fn brick_has_one_stud_per_cell() {
    let block = make_block(0, 0, 0, "2x2", "#ff0000");
    let scene = scene_2d(&registry_with(&[block]), None, None, &grid());
    let brick = &scene.bricks[0];
    assert_eq!(brick.studs.len(), 4);
    assert!(brick.studs.contains(&Point::new(10.0, 10.0)));
    assert!(brick.studs.contains(&Point::new(30.0, 30.0)));
    assert_eq!(brick.stud_radius, 5.0);
}

#[test]
fn brick_colours_are_shaded() {
    let block = make_block(0, 0, 0, "1x1", "#ff8000");
    let scene = scene_2d(&registry_with(&[block]), None, None, &grid());
    let brick = &scene.bricks[0];
    assert_eq!(brick.fill, "#ff8000");
    assert_eq!(brick.outline, "#cc6600");
    assert_eq!(brick.stud_color, "#e57300");
}

#[test]
fn unparseable_colour_is_used_as_is() {
    let block = make_block(0, 0, 0, "1x1", "red");
    let scene = scene_2d(&registry_with(&[block]), None, None, &grid());
    assert_eq!(scene.bricks[0].outline, "red");
}

#[test]
fn bricks_drawn_by_layer_then_registry_order() {
    let high = make_block(0, 0, 1, "1x1", "#000001");
    let low_a = make_block(0, 0, 0, "1x1", "#000002");
    let low_b = make_block(5, 5, 0, "1x1", "#000003");
    let scene = scene_2d(&registry_with(&[high.clone(), low_a.clone(), low_b.clone()]), None, None, &grid());
    let order: Vec<_> = scene.bricks.iter().map(|b| b.block_id).collect();
    assert_eq!(order, vec![low_a.id, low_b.id, high.id]);
}

#[test]
fn highlight_pads_selected_block() {
    let block = make_block(1, 1, 0, "2x1", "#ff0000");
    let id = block.id;
    let scene = scene_2d(&registry_with(&[block]), Some(id), None, &grid());
    assert_eq!(scene.highlight, Some(Rect { x: 18.0, y: 18.0, width: 44.0, height: 24.0 }));
}

#[test]
fn dangling_selection_has_no_highlight() {
    let block = make_block(1, 1, 0, "2x1", "#ff0000");
    let scene = scene_2d(&registry_with(&[block]), Some(BlockId::new_v4()), None, &grid());
    assert_eq!(scene.highlight, None);
}

#[test]
fn ghost_uses_preview_span() {
    let preview = ghost_preview("3x1", false);
    let scene = scene_2d(&BlockRegistry::new(), None, Some(&preview), &grid());
    let ghost = scene.ghost.unwrap();
    assert_eq!(ghost.rect, Rect { x: 20.0, y: 40.0, width: 20.0, height: 60.0 });
    assert!(!ghost.valid);
}

// =============================================================
// Grid lines
// =============================================================

#[test]
fn grid_lines_cover_viewport() {
    let lines = grid_lines(&Camera::default(), 100.0, 50.0, &grid());
    assert_eq!(lines.xs, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    assert_eq!(lines.ys, vec![0.0, 20.0, 40.0]);
}

#[test]
fn grid_lines_follow_pan_and_zoom() {
    let camera = Camera { pan_x: 30.0, pan_y: 0.0, zoom: 2.0 };
    // World x spans [-15, 35].
    let lines = grid_lines(&camera, 100.0, 40.0, &grid());
    assert_eq!(lines.xs, vec![-20.0, 0.0, 20.0]);
    assert_eq!(lines.ys, vec![0.0, 20.0]);
}

#[test]
fn grid_lines_empty_for_zero_viewport() {
    assert_eq!(grid_lines(&Camera::default(), 0.0, 100.0, &grid()), GridLines::default());
}

// =============================================================
// 3D
// =============================================================

#[test]
fn boxes_carry_mesh_handles() {
    let a = make_block(0, 0, 0, "1x1", "#ff0000");
    let b = make_block(2, 0, 1, "2x2", "#00ff00");
    let reg = registry_with(&[a.clone(), b.clone()]);
    let scene = scene_3d(&reg, Some(b.id), None, &grid(), 10.0);
    assert_eq!(scene.bricks.len(), 2);
    for brick in &scene.bricks {
        assert_eq!(reg.mesh_for(&brick.block_id), Some(brick.handle));
        assert_eq!(brick.selected, brick.block_id == b.id);
    }
    let b_box = scene.bricks.iter().find(|x| x.block_id == b.id).unwrap().bounds;
    assert_eq!(b_box.min, DVec3::new(40.0, 10.0, 0.0));
    assert_eq!(b_box.max, DVec3::new(80.0, 20.0, 40.0));
}

#[test]
fn ghost_box_sits_on_preview_layer() {
    let preview = ghost_preview("2x1", true);
    let scene = scene_3d(&BlockRegistry::new(), None, Some(&preview), &grid(), 10.0);
    let ghost = scene.ghost.unwrap();
    assert!(ghost.valid);
    assert_eq!(ghost.bounds.min, DVec3::new(20.0, 30.0, 40.0));
    assert_eq!(ghost.bounds.max, DVec3::new(40.0, 40.0, 80.0));
}

// =============================================================
// shade
// =============================================================

#[test]
fn shade_darkens_each_channel() {
    assert_eq!(shade("#ffffff", 20).as_deref(), Some("#cccccc"));
    assert_eq!(shade("#000000", 50).as_deref(), Some("#000000"));
    assert_eq!(shade("#0a0b0c", 0).as_deref(), Some("#0a0b0c"));
}

#[test]
fn shade_rejects_other_forms() {
    assert_eq!(shade("ff0000", 10), None);
    assert_eq!(shade("#fff", 10), None);
    assert_eq!(shade("#gg0000", 10), None);
}
