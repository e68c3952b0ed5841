//! The canonical ordered collection of placed blocks.
//!
//! DESIGN
//! ======
//! Blocks are kept in insertion order (the order they are saved in and drawn
//! in) with O(1) lookup by id. Each block is also given a [`MeshHandle`] when
//! it enters the registry; the handle is what a 3D front end attaches to the
//! block's mesh, and the reverse map lets the raycast hit tester recover the
//! block behind a mesh without scanning. Both maps are updated in the same
//! call as the block list, so they can never disagree.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::block::{Block, BlockId, BlockRecord, Rotation};
use crate::grid::Cell;

/// Opaque identity of the render object that draws a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Sparse update for a block. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub z: Option<u32>,
    pub rotation: Option<Rotation>,
    pub color: Option<String>,
}

impl BlockPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Ordered block store with id and render-handle indexes.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    blocks: IndexMap<BlockId, Block>,
    handles: HashMap<BlockId, MeshHandle>,
    owners: HashMap<MeshHandle, BlockId>,
    next_handle: u64,
}

impl BlockRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block, or replace the block with the same id in place. A
    /// replaced block keeps its position in the order and its mesh handle.
    pub fn insert(&mut self, block: Block) -> MeshHandle {
        let id = block.id;
        self.blocks.insert(id, block);
        if let Some(handle) = self.handles.get(&id) {
            return *handle;
        }
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(id, handle);
        self.owners.insert(handle, id);
        handle
    }

    /// Remove a block by id, returning it if it was present. Later blocks
    /// keep their relative order.
    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let block = self.blocks.shift_remove(id)?;
        if let Some(handle) = self.handles.remove(id) {
            self.owners.remove(&handle);
        }
        Some(block)
    }

    /// Apply a sparse update. Returns the updated block, or `None` if the id
    /// is unknown.
    pub fn apply(&mut self, id: &BlockId, patch: &BlockPatch) -> Option<&Block> {
        let block = self.blocks.get_mut(id)?;
        if let Some(x) = patch.x {
            block.x = x;
        }
        if let Some(y) = patch.y {
            block.y = y;
        }
        if let Some(z) = patch.z {
            block.z = z;
        }
        if let Some(rotation) = patch.rotation {
            block.rotation = rotation;
        }
        if let Some(ref color) = patch.color {
            block.color.clone_from(color);
        }
        Some(&*block)
    }

    /// Replace every block. Mesh handles of the previous contents are
    /// released; handle numbers are never reused.
    pub fn replace_all(&mut self, blocks: Vec<Block>) {
        self.blocks.clear();
        self.handles.clear();
        self.owners.clear();
        for block in blocks {
            self.insert(block);
        }
    }

    #[must_use]
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    /// Blocks in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Block> {
        self.blocks.values()
    }

    /// Position of a block in insertion order.
    #[must_use]
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.get_index_of(id)
    }

    /// Blocks whose rotated footprint covers `cell`, in insertion order.
    pub fn blocks_at(&self, cell: Cell) -> impl Iterator<Item = &Block> {
        self.blocks.values().filter(move |b| b.covers(cell))
    }

    /// The render handle attached to a block.
    #[must_use]
    pub fn mesh_for(&self, id: &BlockId) -> Option<MeshHandle> {
        self.handles.get(id).copied()
    }

    /// The block drawn by a render handle.
    #[must_use]
    pub fn block_for_mesh(&self, handle: MeshHandle) -> Option<&Block> {
        self.owners.get(&handle).and_then(|id| self.blocks.get(id))
    }

    /// Every live `(handle, block)` pair, in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshHandle, &Block)> {
        self.blocks.values().filter_map(|b| self.handles.get(&b.id).map(|h| (*h, b)))
    }

    /// Persistence records in insertion order.
    #[must_use]
    pub fn to_records(&self) -> Vec<BlockRecord> {
        self.blocks.values().map(Block::to_record).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
