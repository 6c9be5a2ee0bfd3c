//! Read-only ordered view of the host document's blocks

mod block;

pub use block::{Block, BlockContent, BlockKind, Emphasis, StyleSpan, NBSP};

/// An ordered snapshot of the host document's blocks.
///
/// The host owns the real document; it hands the engine one of these per
/// edit event. Positions are in the document's flat offset space: each
/// block occupies `[position, position + span)` and blocks are contiguous.
#[derive(Debug, Clone, Default)]
pub struct ScriptDocument {
    blocks: Vec<Block>,
}

impl ScriptDocument {
    /// Create an empty document view
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view from pre-positioned blocks.
    ///
    /// Blocks must already be in document order.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        debug_assert!(
            blocks.windows(2).all(|w| w[0].end() <= w[1].position),
            "blocks must be ordered and non-overlapping"
        );
        Self { blocks }
    }

    /// Append a block, assigning it the next free position
    pub fn push(&mut self, kind: BlockKind, content: BlockContent) -> usize {
        let position = self.size();
        self.blocks.push(Block::new(position, kind, content));
        position
    }

    /// Append a dialogue block with a speaker name
    pub fn push_dialogue(&mut self, name: &str, content: BlockContent) -> usize {
        let position = self.size();
        let mut block = Block::new(position, BlockKind::Dialogue, content);
        block.character_name = Some(name.to_string());
        self.blocks.push(block);
        position
    }

    /// Blocks in document order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block count
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total size of the flat offset space
    pub fn size(&self) -> usize {
        self.blocks.last().map(|b| b.end()).unwrap_or(0)
    }

    /// Check if no block carries any text
    pub fn is_textually_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.content.is_empty())
    }

    /// Look up the block starting at a position
    pub fn block_at(&self, position: usize) -> Option<&Block> {
        self.blocks
            .binary_search_by(|b| b.position.cmp(&position))
            .ok()
            .map(|idx| &self.blocks[idx])
    }

    /// Check whether a position still resolves to a live block
    pub fn has_block_at(&self, position: usize) -> bool {
        self.block_at(position).is_some()
    }

    /// Write a height correction back onto a block.
    ///
    /// This is the host side of the engine's height-update protocol;
    /// unknown positions are ignored (best-effort write-back).
    pub fn set_height(&mut self, position: usize, height: f32) {
        if let Ok(idx) = self
            .blocks
            .binary_search_by(|b| b.position.cmp(&position))
        {
            self.blocks[idx].height = Some(height);
        }
    }
}
