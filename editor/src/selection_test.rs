use super::*;
use crate::block::{Footprint, Rotation};
use crate::grid::Cell;

fn registry_with_one() -> (BlockRegistry, BlockId) {
    let mut reg = BlockRegistry::new();
    let block = Block::new(Cell::new(0, 0), 0, Footprint::default(), "#ff0000", Rotation::Deg0);
    let id = block.id;
    reg.insert(block);
    (reg, id)
}

#[test]
fn starts_empty() {
    let (reg, _) = registry_with_one();
    let sel = SelectionController::new();
    assert_eq!(sel.selected_id(), None);
    assert!(sel.current(&reg).is_none());
}

#[test]
fn select_existing_block() {
    let (reg, id) = registry_with_one();
    let mut sel = SelectionController::new();
    sel.select(id, &reg);
    assert_eq!(sel.selected_id(), Some(id));
    assert_eq!(sel.current(&reg).unwrap().id, id);
    assert_eq!(sel.current_id(&reg), Some(id));
}

#[test]
fn select_unknown_id_clears() {
    let (reg, id) = registry_with_one();
    let mut sel = SelectionController::new();
    sel.select(id, &reg);
    sel.select(BlockId::new_v4(), &reg);
    assert_eq!(sel.selected_id(), None);
}

#[test]
fn clear_empties() {
    let (reg, id) = registry_with_one();
    let mut sel = SelectionController::new();
    sel.select(id, &reg);
    sel.clear();
    assert!(sel.current(&reg).is_none());
}

#[test]
fn current_sees_live_edits() {
    let (mut reg, id) = registry_with_one();
    let mut sel = SelectionController::new();
    sel.select(id, &reg);
    assert!(reg.apply(&id, &crate::registry::BlockPatch { x: Some(7), ..Default::default() }).is_some());
    assert_eq!(sel.current(&reg).unwrap().x, 7);
}

#[test]
fn deleted_block_degrades_to_empty() {
    let (mut reg, id) = registry_with_one();
    let mut sel = SelectionController::new();
    sel.select(id, &reg);
    assert!(reg.remove(&id).is_some());
    assert!(sel.current(&reg).is_none());
    assert_eq!(sel.current_id(&reg), None);
    // The raw id lingers until pruned.
    assert_eq!(sel.selected_id(), Some(id));
    assert!(sel.prune(&reg));
    assert_eq!(sel.selected_id(), None);
    assert!(!sel.prune(&reg));
}

#[test]
fn prune_keeps_live_selection() {
    let (reg, id) = registry_with_one();
    let mut sel = SelectionController::new();
    sel.select(id, &reg);
    assert!(!sel.prune(&reg));
    assert_eq!(sel.selected_id(), Some(id));
}
