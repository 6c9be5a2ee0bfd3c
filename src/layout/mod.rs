//! Pagination engine and its supporting pieces

mod engine;
mod pagination;
mod split;

pub use engine::{
    run_pass, HeightUpdate, LayoutPass, PageConstraints, PassInput, PassResult,
    DEFAULT_PAGE_WIDTH, PAGE_HEADER_HEIGHT, PAGE_HEIGHT,
};
pub use pagination::{build_page_table, page_at_offset, Page, PageBreakMarker};
pub use split::{DialogueSplitter, PunctuationSegmenter, SentenceSegmenter, SplitDecision};
