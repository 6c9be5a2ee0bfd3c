//! Per-block height cache shared across recomputation passes

use crate::document::ScriptDocument;
use rustc_hash::FxHashMap;

/// Mapping from block position to last-measured height.
///
/// The cache persists between edit passes; that persistence is what makes
/// pagination incremental instead of O(document) per keystroke. An entry is
/// superseded whenever the engine re-measures its position, and dropped
/// when the position no longer resolves to a live block.
#[derive(Debug, Default)]
pub struct HeightCache {
    entries: FxHashMap<usize, f32>,
}

impl HeightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached height for a position
    pub fn get(&self, position: usize) -> Option<f32> {
        self.entries.get(&position).copied()
    }

    /// Record a measured height, superseding any previous entry
    pub fn set(&mut self, position: usize, height: f32) {
        self.entries.insert(position, height);
    }

    /// Drop entries whose position no longer resolves to a block
    pub fn retain_live(&mut self, doc: &ScriptDocument) {
        self.entries.retain(|&position, _| doc.has_block_at(position));
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
