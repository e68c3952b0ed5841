//! Block data model: footprints, rotations, placed blocks, and the plain
//! records exchanged with the persistence collaborator.
//!
//! A block is anchored at its origin corner `(x, y)` and spans its footprint,
//! with width and height swapped for occupancy when it is turned a quarter
//! turn. Rotation never changes the stored origin or footprint, only which
//! cells are covered.
//!
//! Records are validated here, at the boundary: a footprint that is not
//! `"WxH"`, a footprint wider than [`MAX_FOOTPRINT_SIDE`] on either side, a
//! rotation off the 90° grid, or a negative layer is rejected
//! before it can reach the registry.

#[cfg(test)]
#[path = "block_test.rs"]
mod block_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::MAX_FOOTPRINT_SIDE;
use crate::error::EditorError;
use crate::grid::Cell;

/// Unique identifier for a placed block.
pub type BlockId = Uuid;

// =============================================================================
// FOOTPRINT
// =============================================================================

/// The `W` x `H` cell span a block covers before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    /// Build a footprint from two positive spans.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MalformedFootprint`] if either span is zero and
    /// [`EditorError::FootprintTooLarge`] if either exceeds
    /// [`MAX_FOOTPRINT_SIDE`].
    pub fn new(width: u32, height: u32) -> Result<Self, EditorError> {
        if width == 0 || height == 0 {
            return Err(EditorError::MalformedFootprint(format!("{width}x{height}")));
        }
        if width > MAX_FOOTPRINT_SIDE || height > MAX_FOOTPRINT_SIDE {
            return Err(EditorError::FootprintTooLarge { width, height, max: MAX_FOOTPRINT_SIDE });
        }
        Ok(Self { width, height })
    }

    /// Spans after applying `rotation`: swapped for 90° and 270°.
    #[must_use]
    pub fn rotated(self, rotation: Rotation) -> (u32, u32) {
        if rotation.swaps_axes() { (self.height, self.width) } else { (self.width, self.height) }
    }

    /// Number of cells covered.
    #[must_use]
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self { width: 1, height: 1 }
    }
}

impl FromStr for Footprint {
    type Err = EditorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || EditorError::MalformedFootprint(raw.to_string());
        let (w, h) = raw.split_once('x').ok_or_else(malformed)?;
        let width = w.trim().parse::<u32>().map_err(|_| malformed())?;
        let height = h.trim().parse::<u32>().map_err(|_| malformed())?;
        if width == 0 || height == 0 {
            return Err(malformed());
        }
        Self::new(width, height)
    }
}

impl TryFrom<String> for Footprint {
    type Error = EditorError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Footprint> for String {
    fn from(footprint: Footprint) -> Self {
        footprint.to_string()
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// =============================================================================
// ROTATION
// =============================================================================

/// Quarter-turn rotation about the footprint's own center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse integer degrees. Any multiple of 90 is accepted and normalised
    /// into `[0, 360)`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRotation`] for anything off the 90° grid.
    pub fn from_degrees(degrees: i32) -> Result<Self, EditorError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(EditorError::InvalidRotation(degrees)),
        }
    }

    #[must_use]
    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// The next rotation clockwise (+90°), wrapping at 360.
    #[must_use]
    pub fn rotate_cw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Whether width and height trade places for occupancy.
    #[must_use]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = EditorError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

// =============================================================================
// BLOCK
// =============================================================================

/// A placed brick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable for the block's lifetime; assigned at creation.
    pub id: BlockId,
    /// Grid column of the origin corner.
    pub x: i32,
    /// Grid row of the origin corner.
    pub y: i32,
    /// Stack layer; 0 rests on the ground plane.
    pub z: u32,
    /// Span before rotation.
    #[serde(rename = "type")]
    pub footprint: Footprint,
    /// Render-only colour.
    pub color: String,
    pub rotation: Rotation,
}

impl Block {
    /// Create a block with a fresh id.
    #[must_use]
    pub fn new(origin: Cell, z: u32, footprint: Footprint, color: impl Into<String>, rotation: Rotation) -> Self {
        Self { id: Uuid::new_v4(), x: origin.x, y: origin.y, z, footprint, color: color.into(), rotation }
    }

    #[must_use]
    pub fn origin(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Occupied spans after rotation, as `(width, height)` in cells.
    #[must_use]
    pub fn span(&self) -> (u32, u32) {
        self.footprint.rotated(self.rotation)
    }

    /// Every grid cell this block covers.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        footprint_cells(self.origin(), self.span())
    }

    /// Whether `cell` lies inside this block's rotated footprint.
    #[must_use]
    pub fn covers(&self, cell: Cell) -> bool {
        let (w, h) = self.span();
        let dx = i64::from(cell.x) - i64::from(self.x);
        let dy = i64::from(cell.y) - i64::from(self.y);
        (0..i64::from(w)).contains(&dx) && (0..i64::from(h)).contains(&dy)
    }

    /// Validate a persistence record and turn it into a block with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the footprint is malformed or oversized, the rotation is not a
    /// multiple of 90, or the layer is negative.
    pub fn from_record(record: &BlockRecord) -> Result<Self, EditorError> {
        let footprint: Footprint = record.kind.parse()?;
        let rotation = Rotation::from_degrees(record.rotation)?;
        let z = u32::try_from(record.z).map_err(|_| EditorError::NegativeLayer(record.z))?;
        Ok(Self::new(Cell::new(record.x, record.y), z, footprint, record.color.clone(), rotation))
    }

    /// The persistence shape of this block. The id is not persisted.
    #[must_use]
    pub fn to_record(&self) -> BlockRecord {
        BlockRecord {
            x: self.x,
            y: self.y,
            z: i32::try_from(self.z).unwrap_or(i32::MAX),
            color: self.color.clone(),
            kind: self.footprint.to_string(),
            rotation: self.rotation.degrees(),
        }
    }
}

/// Cells covered by a `(width, height)` span anchored at `origin`.
pub fn footprint_cells(origin: Cell, span: (u32, u32)) -> impl Iterator<Item = Cell> {
    let (w, h) = span;
    (0..w).flat_map(move |dx| (0..h).map(move |dy| offset_cell(origin, dx, dy)))
}

#[allow(clippy::cast_possible_wrap)]
fn offset_cell(origin: Cell, dx: u32, dy: u32) -> Cell {
    Cell::new(origin.x.wrapping_add(dx as i32), origin.y.wrapping_add(dy as i32))
}

// =============================================================================
// RECORDS
// =============================================================================

/// One block as stored by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: String,
    /// Footprint string, `"WxH"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub rotation: i32,
}

/// A named build: the unit saved and loaded as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

impl BuildRecord {
    /// Parse a build document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] if the document does not match the
    /// record shape. Block contents are validated later, on load.
    pub fn from_json(raw: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialise as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
