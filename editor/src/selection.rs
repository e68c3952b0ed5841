//! Single-block selection.
//!
//! The controller stores only an id. Every read re-resolves it against the
//! live registry, so a block deleted behind the selection's back simply reads
//! as "nothing selected" instead of a stale snapshot.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::block::{Block, BlockId};
use crate::registry::BlockRegistry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<BlockId>,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` if the registry holds it; otherwise clear.
    pub fn select(&mut self, id: BlockId, registry: &BlockRegistry) {
        self.selected = registry.contains(&id).then_some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected block, if it still exists.
    #[must_use]
    pub fn current<'a>(&self, registry: &'a BlockRegistry) -> Option<&'a Block> {
        self.selected.and_then(|id| registry.get(&id))
    }

    /// The selected id, if it still exists.
    #[must_use]
    pub fn current_id(&self, registry: &BlockRegistry) -> Option<BlockId> {
        self.current(registry).map(|b| b.id)
    }

    /// The stored id without checking the registry. May be dangling.
    #[must_use]
    pub fn selected_id(&self) -> Option<BlockId> {
        self.selected
    }

    /// Drop a dangling id. Returns `true` if the selection changed.
    pub fn prune(&mut self, registry: &BlockRegistry) -> bool {
        match self.selected {
            Some(id) if !registry.contains(&id) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}
