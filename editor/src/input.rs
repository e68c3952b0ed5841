//! Input model: modifier keys, pointer buttons, key commands, and the gesture
//! state machine.
//!
//! Front ends translate their native events into these types before calling
//! the engine. `InputState` tracks the camera gesture in progress between
//! pointer-down and pointer-up; `KeyCommand` is the editing intent a key
//! press maps to; [`BlockEdit`] covers the ones aimed at the selection.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Modifier keys held when the event fired.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Pans in 2D, reserves clicks for the camera in 3D, and selects the
    /// large arrow-key step.
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Places and selects.
    Primary,
    /// Orbits the 3D camera while held.
    Secondary,
}

/// Key name as the host reports it, e.g. `"ArrowUp"`, `"PageDown"`, `"r"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Scroll delta in pixels; positive `dy` scrolls down (zooms out).
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Camera gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; pointer moves refresh the placement preview.
    #[default]
    Idle,
    /// Shift-drag on the 2D canvas.
    Panning {
        /// Pointer position at the previous event.
        last_screen: Point,
    },
    /// Secondary-button drag in the 3D scene.
    Orbiting {
        last_screen: Point,
    },
}

impl InputState {
    /// Whether a camera gesture owns the pointer.
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Editing intent of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Commit the preview under the cursor.
    PlaceAtCursor,
    /// Act on the selected block; ignored without a selection.
    Edit(BlockEdit),
}

/// Key command that targets the selected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEdit {
    /// Quarter turn clockwise.
    Rotate,
    Delete,
    ClearSelection,
    /// Move by one unit step along grid x/y; `fast` selects the large step.
    Move { dx: i32, dy: i32, fast: bool },
    /// One layer up.
    Raise,
    /// One layer down, stopping at the ground.
    Lower,
}

impl KeyCommand {
    /// Map a key press to a command. Unbound keys yield `None`.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        let fast = modifiers.shift;
        let edit = match key.0.as_str() {
            "p" | "P" => return Some(Self::PlaceAtCursor),
            "r" | "R" => BlockEdit::Rotate,
            "Delete" | "Backspace" => BlockEdit::Delete,
            "Escape" => BlockEdit::ClearSelection,
            "ArrowLeft" => BlockEdit::Move { dx: -1, dy: 0, fast },
            "ArrowRight" => BlockEdit::Move { dx: 1, dy: 0, fast },
            "ArrowUp" => BlockEdit::Move { dx: 0, dy: -1, fast },
            "ArrowDown" => BlockEdit::Move { dx: 0, dy: 1, fast },
            "PageUp" => BlockEdit::Raise,
            "PageDown" => BlockEdit::Lower,
            _ => return None,
        };
        Some(Self::Edit(edit))
    }
}
