//! Derived per-cell stack height.
//!
//! The height of a cell is one above the highest block covering it, or 0 for
//! bare ground, so it doubles as the next free layer. The map is a pure
//! function of the registry: it is rebuilt from scratch after every mutation,
//! in time proportional to the total footprint area, and owns no state of its
//! own.

#[cfg(test)]
#[path = "height_test.rs"]
mod height_test;

use std::collections::HashMap;

use crate::grid::Cell;
use crate::registry::BlockRegistry;

/// Inclusive cell bounds of the occupied area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub min: Cell,
    pub max: Cell,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightMap {
    heights: HashMap<Cell, u32>,
}

impl HeightMap {
    /// Recompute from the registry contents.
    #[must_use]
    pub fn rebuild(registry: &BlockRegistry) -> Self {
        let mut heights: HashMap<Cell, u32> = HashMap::new();
        for block in registry.iter() {
            let top = block.z.saturating_add(1);
            for cell in block.cells() {
                let h = heights.entry(cell).or_insert(0);
                *h = (*h).max(top);
            }
        }
        Self { heights }
    }

    /// Next free layer at `cell`; 0 where nothing was ever placed.
    #[must_use]
    pub fn height_at(&self, cell: Cell) -> u32 {
        self.heights.get(&cell).copied().unwrap_or(0)
    }

    /// Occupied cells and their heights, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, u32)> {
        self.heights.iter().map(|(c, h)| (*c, *h))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Tallest stack anywhere; 0 for an empty map.
    #[must_use]
    pub fn max_height(&self) -> u32 {
        self.heights.values().copied().max().unwrap_or(0)
    }

    /// Bounding cells of everything occupied, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<CellBounds> {
        let mut cells = self.heights.keys();
        let first = *cells.next()?;
        let mut bounds = CellBounds { min: first, max: first };
        for c in cells {
            bounds.min.x = bounds.min.x.min(c.x);
            bounds.min.y = bounds.min.y.min(c.y);
            bounds.max.x = bounds.max.x.max(c.x);
            bounds.max.y = bounds.max.y.max(c.y);
        }
        Some(bounds)
    }
}
