use super::*;

fn key(name: &str) -> Key {
    Key(name.to_string())
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

// =============================================================
// Modifiers / buttons
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

#[test]
fn button_equality() {
    assert_eq!(Button::Primary, Button::Primary);
    assert_ne!(Button::Primary, Button::Secondary);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::Idle.is_gesture());
}

#[test]
fn pan_and_orbit_are_gestures() {
    let last_screen = Point::new(1.0, 2.0);
    assert!(InputState::Panning { last_screen }.is_gesture());
    assert!(InputState::Orbiting { last_screen }.is_gesture());
}

// =============================================================
// KeyCommand
// =============================================================

/// The block edit a key maps to, if it maps to one.
fn edit_for(name: &str, modifiers: Modifiers) -> Option<BlockEdit> {
    match KeyCommand::from_key(&key(name), modifiers) {
        Some(KeyCommand::Edit(edit)) => Some(edit),
        _ => None,
    }
}

fn plain(name: &str) -> Option<BlockEdit> {
    edit_for(name, Modifiers::default())
}

#[test]
fn place_key_either_case() {
    assert_eq!(KeyCommand::from_key(&key("p"), Modifiers::default()), Some(KeyCommand::PlaceAtCursor));
    assert_eq!(KeyCommand::from_key(&key("P"), shift()), Some(KeyCommand::PlaceAtCursor));
}

#[test]
fn rotate_key_either_case() {
    assert_eq!(plain("r"), Some(BlockEdit::Rotate));
    assert_eq!(plain("R"), Some(BlockEdit::Rotate));
}

#[test]
fn delete_and_backspace_delete() {
    assert_eq!(plain("Delete"), Some(BlockEdit::Delete));
    assert_eq!(plain("Backspace"), Some(BlockEdit::Delete));
}

#[test]
fn escape_clears() {
    assert_eq!(plain("Escape"), Some(BlockEdit::ClearSelection));
}

#[test]
fn arrows_move_with_up_as_negative_y() {
    assert_eq!(plain("ArrowUp"), Some(BlockEdit::Move { dx: 0, dy: -1, fast: false }));
    assert_eq!(plain("ArrowDown"), Some(BlockEdit::Move { dx: 0, dy: 1, fast: false }));
    assert_eq!(plain("ArrowLeft"), Some(BlockEdit::Move { dx: -1, dy: 0, fast: false }));
    assert_eq!(plain("ArrowRight"), Some(BlockEdit::Move { dx: 1, dy: 0, fast: false }));
}

#[test]
fn shift_arrow_is_fast() {
    assert_eq!(edit_for("ArrowLeft", shift()), Some(BlockEdit::Move { dx: -1, dy: 0, fast: true }));
}

#[test]
fn page_keys_change_layer() {
    assert_eq!(plain("PageUp"), Some(BlockEdit::Raise));
    assert_eq!(plain("PageDown"), Some(BlockEdit::Lower));
}

#[test]
fn unbound_keys_are_ignored() {
    for name in ["a", "Enter", "Tab", " ", "F5"] {
        assert_eq!(KeyCommand::from_key(&key(name), Modifiers::default()), None, "{name}");
    }
}

#[test]
fn only_place_is_not_a_block_edit() {
    let edits = ["r", "Delete", "Escape", "ArrowUp", "PageUp", "PageDown"];
    for name in edits {
        let command = KeyCommand::from_key(&key(name), Modifiers::default());
        assert!(matches!(command, Some(KeyCommand::Edit(_))), "{name}");
    }
    assert_eq!(KeyCommand::from_key(&key("p"), Modifiers::default()), Some(KeyCommand::PlaceAtCursor));
}
