//! Storage for computed label tiles

use parking_lot::RwLock;
use regionalize_core::Pix;
use std::collections::HashMap;

/// Store of computed label tiles keyed by `(col, row)`
///
/// The engine is the only writer. Each tile is stored once and never
/// replaced. Implementations may evict; the engine reports an evicted
/// tile as unavailable rather than recomputing it.
pub trait TileCache: Send + Sync {
    /// Cached tile, if present.
    fn get(&self, col: i32, row: i32) -> Option<Pix>;

    /// Store a newly computed tile.
    fn put(&self, col: i32, row: i32, tile: Pix);

    /// Number of cached tiles.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory tile cache
#[derive(Debug, Default)]
pub struct MemoryTileCache {
    tiles: RwLock<HashMap<(i32, i32), Pix>>,
}

impl MemoryTileCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TileCache for MemoryTileCache {
    fn get(&self, col: i32, row: i32) -> Option<Pix> {
        self.tiles.read().get(&(col, row)).cloned()
    }

    fn put(&self, col: i32, row: i32, tile: Pix) {
        let previous = self.tiles.write().insert((col, row), tile);
        debug_assert!(previous.is_none(), "tile ({}, {}) stored twice", col, row);
    }

    fn len(&self) -> usize {
        self.tiles.read().len()
    }
}
