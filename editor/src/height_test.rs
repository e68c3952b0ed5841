use super::*;
use crate::block::{Block, Footprint, Rotation};

fn make_block(x: i32, y: i32, z: u32, kind: &str, rotation: Rotation) -> Block {
    Block::new(Cell::new(x, y), z, kind.parse::<Footprint>().unwrap(), "#ff0000", rotation)
}

fn registry_of(blocks: Vec<Block>) -> BlockRegistry {
    let mut reg = BlockRegistry::new();
    reg.replace_all(blocks);
    reg
}

#[test]
fn empty_registry_is_flat() {
    let map = HeightMap::rebuild(&BlockRegistry::new());
    assert!(map.is_empty());
    assert_eq!(map.height_at(Cell::new(0, 0)), 0);
    assert_eq!(map.height_at(Cell::new(-100, 42)), 0);
    assert_eq!(map.max_height(), 0);
    assert!(map.bounds().is_none());
}

#[test]
fn ground_block_raises_every_covered_cell_to_one() {
    let reg = registry_of(vec![make_block(3, 4, 0, "2x1", Rotation::Deg0)]);
    let map = HeightMap::rebuild(&reg);
    assert_eq!(map.height_at(Cell::new(3, 4)), 1);
    assert_eq!(map.height_at(Cell::new(4, 4)), 1);
    assert_eq!(map.height_at(Cell::new(5, 4)), 0);
    assert_eq!(map.height_at(Cell::new(3, 5)), 0);
    assert_eq!(map.len(), 2);
}

#[test]
fn stacked_blocks_take_the_max() {
    let reg = registry_of(vec![
        make_block(0, 0, 0, "2x2", Rotation::Deg0),
        make_block(0, 0, 1, "1x1", Rotation::Deg0),
        make_block(1, 1, 3, "1x1", Rotation::Deg0),
    ]);
    let map = HeightMap::rebuild(&reg);
    assert_eq!(map.height_at(Cell::new(0, 0)), 2);
    assert_eq!(map.height_at(Cell::new(1, 0)), 1);
    assert_eq!(map.height_at(Cell::new(1, 1)), 4);
    assert_eq!(map.max_height(), 4);
}

#[test]
fn lower_block_after_higher_does_not_lower_height() {
    let reg = registry_of(vec![make_block(0, 0, 2, "1x1", Rotation::Deg0), make_block(0, 0, 0, "1x1", Rotation::Deg0)]);
    let map = HeightMap::rebuild(&reg);
    assert_eq!(map.height_at(Cell::new(0, 0)), 3);
}

#[test]
fn rotation_changes_covered_cells() {
    let reg = registry_of(vec![make_block(0, 0, 0, "3x1", Rotation::Deg90)]);
    let map = HeightMap::rebuild(&reg);
    assert_eq!(map.height_at(Cell::new(0, 2)), 1);
    assert_eq!(map.height_at(Cell::new(2, 0)), 0);
}

#[test]
fn order_of_blocks_does_not_matter() {
    let a = make_block(0, 0, 0, "2x3", Rotation::Deg0);
    let b = make_block(1, 1, 1, "2x1", Rotation::Deg90);
    let c = make_block(-2, 0, 0, "1x4", Rotation::Deg270);
    let forward = HeightMap::rebuild(&registry_of(vec![a.clone(), b.clone(), c.clone()]));
    let backward = HeightMap::rebuild(&registry_of(vec![c, b, a]));
    assert_eq!(forward, backward);
}

#[test]
fn bounds_cover_all_occupied_cells() {
    let reg = registry_of(vec![make_block(-2, 3, 0, "1x1", Rotation::Deg0), make_block(4, -1, 0, "2x2", Rotation::Deg0)]);
    let bounds = HeightMap::rebuild(&reg).bounds().unwrap();
    assert_eq!(bounds.min, Cell::new(-2, -1));
    assert_eq!(bounds.max, Cell::new(5, 3));
}

#[test]
fn iter_yields_each_occupied_cell_once() {
    let reg = registry_of(vec![make_block(0, 0, 0, "2x2", Rotation::Deg0), make_block(0, 0, 1, "2x2", Rotation::Deg0)]);
    let map = HeightMap::rebuild(&reg);
    let mut cells: Vec<_> = map.iter().collect();
    cells.sort();
    assert_eq!(
        cells,
        vec![(Cell::new(0, 0), 2), (Cell::new(0, 1), 2), (Cell::new(1, 0), 2), (Cell::new(1, 1), 2)]
    );
}
