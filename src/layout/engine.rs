//! Core pagination walk with incremental height reuse

use crate::cache::HeightCache;
use crate::document::ScriptDocument;
use crate::editing::Selection;
use crate::layout::pagination::{build_page_table, Page, PageBreakMarker};
use crate::layout::split::DialogueSplitter;
use crate::measure::HeightMeasurer;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::time::Instant;

/// Usable vertical room on one page
pub const PAGE_HEIGHT: f32 = 800.0;

/// Height of the rendered page-number header strip
pub const PAGE_HEADER_HEIGHT: f32 = 60.0;

/// Render width used when the host reports none
pub const DEFAULT_PAGE_WIDTH: f32 = 650.0;

/// Tolerance when checking that a scene header sits flush above a block
const HEADER_ADJACENCY: f32 = 0.5;

/// Layout constraints for one paginated document
#[derive(Debug, Clone, Copy)]
pub struct PageConstraints {
    pub page_height: f32,
    pub page_width: f32,
    pub header_height: f32,
    /// Free space at or below this never attempts a dialogue split; also
    /// the minimum block height worth splitting
    pub min_split_space: f32,
    /// Let a page temporarily overflow instead of breaking under the
    /// cursor, keeping decorations still while the user types. Corrected on
    /// the first pass after the cursor leaves the block.
    pub overflow_while_typing: bool,
}

impl Default for PageConstraints {
    fn default() -> Self {
        Self {
            page_height: PAGE_HEIGHT,
            page_width: DEFAULT_PAGE_WIDTH,
            header_height: PAGE_HEADER_HEIGHT,
            min_split_space: 48.0,
            overflow_while_typing: true,
        }
    }
}

/// A height correction to write back onto a host block
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeightUpdate {
    pub position: usize,
    pub height: f32,
}

/// Outcome of one layout pass.
///
/// `Frozen` is the explicit form of the reuse-while-typing rule: the walk
/// ran (and still produced height updates) but its positions are not to be
/// trusted, so the previous pass's decorations and page table stand.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutPass {
    Fresh {
        pages: Vec<Page>,
        markers: Vec<PageBreakMarker>,
    },
    Frozen,
}

/// Everything one pass hands back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct PassResult {
    pub layout: LayoutPass,
    pub height_updates: Vec<HeightUpdate>,
}

/// Per-pass inputs from the host
#[derive(Debug, Clone, Copy)]
pub struct PassInput<'a> {
    pub doc: &'a ScriptDocument,
    /// Block positions textually touched by the triggering edit
    pub touched: &'a FxHashSet<usize>,
    pub selection: Selection,
    pub force: bool,
}

/// The last placed block, kept for the scene-header carry-over rule
#[derive(Debug, Clone, Copy)]
struct PlacedBlock {
    position: usize,
    kind: crate::document::BlockKind,
    top: f32,
    bottom: f32,
    page_top: f32,
}

/// Walk the document's blocks in order, resolve each height (measure or
/// cached), accumulate page-relative offsets, and emit page breaks where a
/// block would overflow.
pub fn run_pass(
    constraints: &PageConstraints,
    cache: &mut HeightCache,
    measurer: &mut HeightMeasurer,
    splitter: &DialogueSplitter,
    input: PassInput<'_>,
) -> PassResult {
    // A page concept does not apply to a null document
    if input.doc.is_textually_empty() {
        return PassResult {
            layout: LayoutPass::Fresh {
                pages: Vec::new(),
                markers: Vec::new(),
            },
            height_updates: Vec::new(),
        };
    }

    let started = Instant::now();

    let mut page_number: usize = 1;
    let mut page_top: f32 = 0.0;
    let mut last_bottom: f32 = 0.0;
    let mut previous: Option<PlacedBlock> = None;

    let mut frozen = false;
    let mut markers: Vec<PageBreakMarker> = Vec::new();
    let mut break_positions: Vec<usize> = Vec::new();
    let mut height_updates: Vec<HeightUpdate> = Vec::new();

    for block in input.doc.blocks() {
        let cursor_inside = input
            .selection
            .touches(block.position, block.position + block.span());

        // Height resolution order: force, live typing, touched by this
        // edit, nothing usable cached
        let cached = cache.get(block.position).or(block.height);
        let should_measure = input.force
            || cursor_inside
            || input.touched.contains(&block.position)
            || !cached.is_some_and(|h| h > 0.0);

        let height = if should_measure {
            let measured = measurer.measure(block.kind, &block.content);
            cache.set(block.position, measured);
            if block.height.map_or(true, |h| (h - measured).abs() > 0.01) {
                height_updates.push(HeightUpdate {
                    position: block.position,
                    height: measured,
                });
            }
            measured
        } else {
            cached.unwrap_or_default()
        };

        let top = last_bottom;
        let bottom = top + height;

        if bottom - page_top <= constraints.page_height {
            last_bottom = bottom;
            previous = Some(PlacedBlock {
                position: block.position,
                kind: block.kind,
                top,
                bottom,
                page_top,
            });
            continue;
        }

        let free_space = constraints.page_height - (last_bottom - page_top);

        // 1. Try to split an oversized dialogue at a sentence boundary
        if block.kind.is_dialogue()
            && free_space > constraints.min_split_space
            && height > free_space
            && height > constraints.min_split_space
        {
            match splitter.resolve(measurer, block, free_space) {
                Some(decision) if !decision.force_fit => {
                    // Later passes must see the true total of both fragments
                    let combined = decision.top_height + decision.bottom_height;
                    cache.set(block.position, combined);
                    height_updates.retain(|u| u.position != block.position);
                    if block.height.map_or(true, |h| (h - combined).abs() > 0.01) {
                        height_updates.push(HeightUpdate {
                            position: block.position,
                            height: combined,
                        });
                    }

                    let marker_position = block.position + 1 + decision.split_offset;
                    markers.push(PageBreakMarker {
                        position: marker_position,
                        page_number: page_number + 1,
                        free_space,
                        continuation: Some(block.speaker_label().to_string()),
                    });
                    break_positions.push(marker_position);

                    page_number += 1;
                    page_top = top + decision.top_height;
                    last_bottom = page_top;
                    previous = Some(PlacedBlock {
                        position: block.position,
                        kind: block.kind,
                        top,
                        bottom: last_bottom,
                        page_top,
                    });
                    continue;
                }
                _ => {
                    // No clean split under the cursor: tolerate the
                    // overflow and keep the previous decorations until the
                    // cursor moves away
                    if cursor_inside && constraints.overflow_while_typing {
                        frozen = true;
                        last_bottom = bottom;
                        previous = Some(PlacedBlock {
                            position: block.position,
                            kind: block.kind,
                            top,
                            bottom,
                            page_top,
                        });
                        continue;
                    }
                }
            }
        }

        // 2. A scene header must not be stranded alone at a page's bottom:
        // move the break to before the header
        let carried = previous.filter(|p| {
            p.kind.is_scene_header()
                && (p.page_top - page_top).abs() < f32::EPSILON
                && (p.bottom - top).abs() <= HEADER_ADJACENCY
        });
        if let Some(header) = carried {
            let header_free = constraints.page_height - (header.top - page_top);
            markers.push(PageBreakMarker {
                position: header.position,
                page_number: page_number + 1,
                free_space: header_free,
                continuation: None,
            });
            break_positions.push(header.position);

            page_number += 1;
            page_top = header.top;
            last_bottom = bottom;
            previous = Some(PlacedBlock {
                position: block.position,
                kind: block.kind,
                top,
                bottom,
                page_top,
            });
            continue;
        }

        // 3. Generic break before this block
        markers.push(PageBreakMarker {
            position: block.position,
            page_number: page_number + 1,
            free_space,
            continuation: None,
        });
        break_positions.push(block.position);

        page_number += 1;
        page_top = last_bottom;
        last_bottom = bottom;
        previous = Some(PlacedBlock {
            position: block.position,
            kind: block.kind,
            top,
            bottom,
            page_top,
        });
    }

    log::debug!(
        "pagination pass: {} blocks, {} breaks, {} height updates, frozen={}, {:?}",
        input.doc.len(),
        break_positions.len(),
        height_updates.len(),
        frozen,
        started.elapsed()
    );

    let layout = if frozen {
        LayoutPass::Frozen
    } else {
        LayoutPass::Fresh {
            pages: build_page_table(&break_positions, input.doc.size()),
            markers,
        }
    };

    PassResult {
        layout,
        height_updates,
    }
}
