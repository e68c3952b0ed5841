//! Conversions between continuous world coordinates and discrete grid cells.
//!
//! The grid is shared by both projections. In 2D the world plane is the
//! canvas plane (`x` right, `y` down); in 3D grid `x` runs along world X and
//! grid `y` along world Z.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::CELL_SIZE;

/// One discrete `(x, y)` square of the construction surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `dx`, `dy` steps away from this one.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Stateless grid geometry parameterised by the cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    cell_size: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self { cell_size: CELL_SIZE }
    }
}

impl Grid {
    /// Create a grid with the given cell size. The caller guarantees it is
    /// positive; [`crate::config::EngineConfig`] validates it on load.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// The cell containing a world-space point. Floors, so negative
    /// coordinates map to negative cells.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_to_cell(&self, world_x: f64, world_y: f64) -> Cell {
        Cell { x: (world_x / self.cell_size).floor() as i32, y: (world_y / self.cell_size).floor() as i32 }
    }

    /// The minimum corner of a cell in world space.
    #[must_use]
    pub fn cell_to_world(&self, cell: Cell) -> Point {
        Point::new(f64::from(cell.x) * self.cell_size, f64::from(cell.y) * self.cell_size)
    }

    /// The world-space center of a `width` x `height` cell span whose origin
    /// corner is `cell`.
    #[must_use]
    pub fn span_center(&self, cell: Cell, width: u32, height: u32) -> Point {
        let origin = self.cell_to_world(cell);
        Point::new(
            origin.x + f64::from(width) * self.cell_size / 2.0,
            origin.y + f64::from(height) * self.cell_size / 2.0,
        )
    }
}
