//! Error type for data entering the editor and for placement commits.
//!
//! Hit tests and selection lookups never fail: a miss is a normal
//! [`crate::hit::HitResult::None`] and a dangling selection reads as empty.
//! Errors are reserved for malformed records at the load boundary, bad
//! configuration, and commits that would create a floating or overlapping
//! brick.

use crate::grid::Cell;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A footprint string was not `"WxH"` with two positive integers.
    #[error("malformed footprint {0:?}; expected \"WxH\" with positive integers")]
    MalformedFootprint(String),
    /// A footprint side exceeded the supported span.
    #[error("footprint {width}x{height} too large; each side must be at most {max}")]
    FootprintTooLarge { width: u32, height: u32, max: u32 },
    /// A rotation was not a multiple of 90 degrees.
    #[error("invalid rotation {0}; expected a multiple of 90 degrees")]
    InvalidRotation(i32),
    /// A stack layer was below the ground plane.
    #[error("invalid layer {0}; layers start at 0")]
    NegativeLayer(i32),
    /// The cells under a new block do not all stack up to the target layer.
    #[error("cannot place at {cell:?} layer {layer}: cell {blocking:?} stacks to {height}")]
    UnevenFootprint { cell: Cell, layer: u32, blocking: Cell, height: u32 },
    /// A commit was requested but nothing is under the pointer.
    #[error("no placement target under the pointer")]
    NoPlacement,
    /// A configuration value could not be parsed or was out of range.
    #[error("invalid configuration value for {key}: {value:?}")]
    Config { key: &'static str, value: String },
    /// A build document was not valid JSON for the record shape.
    #[error("invalid build JSON: {0}")]
    Json(#[from] serde_json::Error),
}
