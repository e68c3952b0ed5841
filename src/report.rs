//! Text renderings of a loaded build for the terminal.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use std::fmt;

use editor::engine::EngineCore;
use editor::grid::Cell;
use editor::height::{CellBounds, HeightMap};

/// One-paragraph overview of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub name: String,
    pub blocks: usize,
    pub cells: usize,
    pub tallest: u32,
    pub bounds: Option<CellBounds>,
}

impl Summary {
    #[must_use]
    pub fn of(engine: &EngineCore) -> Self {
        let heights = engine.heights();
        Self {
            name: engine.build_name().to_string(),
            blocks: engine.registry().len(),
            cells: heights.len(),
            tallest: heights.max_height(),
            bounds: heights.bounds(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name:    {}", self.name)?;
        writeln!(f, "blocks:  {}", self.blocks)?;
        writeln!(f, "cells:   {}", self.cells)?;
        writeln!(f, "tallest: {}", self.tallest)?;
        match self.bounds {
            Some(b) => write!(f, "bounds:  ({}, {}) .. ({}, {})", b.min.x, b.min.y, b.max.x, b.max.y),
            None => write!(f, "bounds:  empty"),
        }
    }
}

/// Heights over the occupied bounds, one row per grid y. Bare cells print
/// as `.`, stacks above 9 as `+`.
#[must_use]
pub fn height_grid(heights: &HeightMap) -> String {
    let Some(bounds) = heights.bounds() else {
        return String::new();
    };
    let mut out = String::new();
    for y in bounds.min.y..=bounds.max.y {
        for x in bounds.min.x..=bounds.max.x {
            out.push(match heights.height_at(Cell::new(x, y)) {
                0 => '.',
                h @ 1..=9 => char::from_digit(h, 10).unwrap_or('+'),
                _ => '+',
            });
        }
        out.push('\n');
    }
    out
}
