//! Scriptpage: an incremental screenplay pagination engine
//!
//! This crate decides where page boundaries fall in a flowing document of
//! typed screenplay blocks, recomputing incrementally as the document is
//! edited:
//! - Per-block height caching (unchanged blocks are never re-measured)
//! - Dialogue splitting across page boundaries with "(MORE)" / "(CONT'D)"
//!   continuation markers
//! - Scene-header carry-over (a slugline is never stranded at a page's
//!   bottom)
//! - Decoration freezing while the cursor sits in an overflowing block, so
//!   nothing jumps around mid-keystroke
//!
//! The editing surface, document schema, and rendering are host concerns;
//! the engine consumes an ordered block view, a measurement oracle, and
//! edit events, and produces a page table, break decorations, and height
//! corrections.

pub mod cache;
pub mod document;
pub mod editing;
pub mod layout;
pub mod measure;
pub mod render;

// Re-export primary types
pub use cache::HeightCache;
pub use document::{Block, BlockContent, BlockKind, Emphasis, ScriptDocument, StyleSpan};
pub use editing::{touched_blocks, EditEvent, Selection, StepRange};
pub use layout::{
    DialogueSplitter, HeightUpdate, LayoutPass, Page, PageBreakMarker, PageConstraints,
    PunctuationSegmenter, SentenceSegmenter, SplitDecision,
};
pub use measure::{FontMetrics, HeightMeasurer, MeasureError, MeasureOracle, MeasureSurface};
pub use render::{BreakDecoration, BreakLabel};

use layout::{run_pass, PassInput};
use render::build_decorations;
use rustc_hash::FxHashSet;

/// What one recomputation hands back to the host
#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    /// Corrections to write back onto blocks, best-effort; empty when every
    /// stored height already matches
    pub height_updates: Vec<HeightUpdate>,
    /// The pass reused the previous decorations instead of recomputing
    /// them (cursor inside an overflowing, unsplittable dialogue)
    pub frozen: bool,
}

impl PassOutcome {
    /// Check if the host needs to apply any correction
    pub fn has_updates(&self) -> bool {
        !self.height_updates.is_empty()
    }
}

/// Pagination context for one document.
///
/// Owns the height cache, the measurement coordinator, the split resolver,
/// and the previous pass's output. Multiple documents get independent
/// `Paginator`s; there is no shared hidden state.
pub struct Paginator {
    constraints: PageConstraints,
    cache: HeightCache,
    measurer: HeightMeasurer,
    splitter: DialogueSplitter,
    pages: Vec<Page>,
    decorations: Vec<BreakDecoration>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Paginator with default constraints and the built-in metrics oracle
    pub fn new() -> Self {
        Self::with_constraints(PageConstraints::default())
    }

    /// Paginator with custom constraints
    pub fn with_constraints(constraints: PageConstraints) -> Self {
        Self {
            constraints,
            cache: HeightCache::new(),
            measurer: HeightMeasurer::with_default_oracle(constraints.page_width),
            splitter: DialogueSplitter::default(),
            pages: Vec::new(),
            decorations: Vec::new(),
        }
    }

    /// Replace the measurement oracle (e.g. with the host's renderer)
    pub fn set_oracle(&mut self, oracle: Box<dyn MeasureOracle>) {
        self.measurer = HeightMeasurer::new(oracle, self.constraints.page_width);
    }

    /// Replace the sentence segmentation strategy used for dialogue splits
    pub fn set_segmenter(&mut self, segmenter: Box<dyn SentenceSegmenter>) {
        self.splitter = DialogueSplitter::new(segmenter);
    }

    /// The constraints this paginator lays out against
    pub fn constraints(&self) -> &PageConstraints {
        &self.constraints
    }

    /// Process one edit event.
    ///
    /// Events with no document change and no force flag leave the previous
    /// output untouched. An empty document short-circuits to an empty page
    /// table and no decorations.
    pub fn handle_edit(
        &mut self,
        doc: &ScriptDocument,
        event: &EditEvent,
        selection: Selection,
    ) -> PassOutcome {
        if !event.doc_changed && !event.force {
            return PassOutcome::default();
        }

        if doc.is_textually_empty() {
            self.pages.clear();
            self.decorations.clear();
            return PassOutcome::default();
        }

        // Positions that stopped resolving since the last pass are stale
        self.cache.retain_live(doc);

        let touched = if event.doc_changed {
            touched_blocks(doc, &event.steps)
        } else {
            FxHashSet::default()
        };

        let result = run_pass(
            &self.constraints,
            &mut self.cache,
            &mut self.measurer,
            &self.splitter,
            PassInput {
                doc,
                touched: &touched,
                selection,
                force: event.force,
            },
        );

        let frozen = match result.layout {
            LayoutPass::Fresh { pages, markers } => {
                self.decorations = build_decorations(&markers, &self.constraints);
                self.pages = pages;
                false
            }
            // Previous decorations and page table stand until the cursor
            // leaves the block or a force pass runs
            LayoutPass::Frozen => true,
        };

        PassOutcome {
            height_updates: result.height_updates,
            frozen,
        }
    }

    /// Recompute now, without a document change (e.g. after initial load)
    pub fn recompute_now(&mut self, doc: &ScriptDocument, selection: Selection) -> PassOutcome {
        self.handle_edit(doc, &EditEvent::force_recompute(), selection)
    }

    /// The current page table
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The current break decorations
    pub fn decorations(&self) -> &[BreakDecoration] {
        &self.decorations
    }

    /// Find the page containing a document offset
    pub fn page_at_offset(&self, offset: usize) -> Option<&Page> {
        layout::page_at_offset(&self.pages, offset)
    }
}
