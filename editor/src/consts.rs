//! Shared numeric constants for the editor crate.

// ── Grid ────────────────────────────────────────────────────────

/// Edge length of one grid cell in world units, shared by both projections.
pub const CELL_SIZE: f64 = 20.0;

/// Height of one stacking layer relative to the cell size.
pub const BRICK_HEIGHT_RATIO: f64 = 0.5;

/// Side length of the square ground plane used by the 3D hit tester.
pub const GROUND_EXTENT: f64 = 500.0;

/// Distance a block hit point is pushed into the struck box before it is
/// converted to a grid cell.
pub const HIT_NUDGE: f64 = 1e-6;

/// Minimum magnitude of the vertical normal component for a face to count as
/// a top or bottom face.
pub const VERTICAL_FACE_THRESHOLD: f64 = 0.5;

// ── 2D camera ───────────────────────────────────────────────────

/// Smallest allowed 2D zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed 2D zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom multiplier applied per wheel notch when scrolling up.
pub const ZOOM_STEP_IN: f64 = 1.1;

/// Zoom multiplier applied per wheel notch when scrolling down.
pub const ZOOM_STEP_OUT: f64 = 0.9;

// ── 3D camera ───────────────────────────────────────────────────

/// Vertical field of view of the perspective camera, in degrees.
pub const FOV_Y_DEG: f64 = 45.0;

/// Near clip distance of the perspective camera; closer hits are ignored.
pub const NEAR: f64 = 0.1;

/// Far clip distance of the perspective camera; farther hits are ignored.
pub const FAR: f64 = 1000.0;

/// Initial eye position of the orbit camera.
pub const DEFAULT_EYE: [f64; 3] = [100.0, 100.0, 50.0];

/// Radians of orbit per pixel of secondary-button drag.
pub const ORBIT_RAD_PER_PX: f64 = 0.005;

/// Closest the orbit camera may dolly toward its target.
pub const MIN_ORBIT_DISTANCE: f64 = 10.0;

// ── Keyboard ────────────────────────────────────────────────────

/// Grid cells moved per arrow key press.
pub const MOVE_STEP: i32 = 1;

/// Grid cells moved per arrow key press while shift is held.
pub const MOVE_STEP_FAST: i32 = 5;

// ── Catalogue ───────────────────────────────────────────────────

/// Name given to a fresh build.
pub const DEFAULT_BUILD_NAME: &str = "Untitled Build";

/// Colour selected when the editor starts.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Footprint selected when the editor starts.
pub const DEFAULT_FOOTPRINT: &str = "1x1";

/// Largest span, in cells, accepted for either side of a footprint.
pub const MAX_FOOTPRINT_SIDE: u32 = 64;

/// Standard brick footprints offered by the palette.
pub const BLOCK_TYPES: [&str; 8] = ["1x1", "2x1", "2x2", "2x3", "2x4", "1x2", "1x3", "1x4"];

/// Standard brick colours offered by the palette, as `(name, hex)`.
pub const PALETTE: [(&str, &str); 8] = [
    ("Red", "#ff0000"),
    ("Blue", "#0000ff"),
    ("Green", "#00ff00"),
    ("Yellow", "#ffff00"),
    ("Black", "#000000"),
    ("White", "#ffffff"),
    ("Orange", "#ffa500"),
    ("Purple", "#800080"),
];
