//! Change detection: which blocks did an edit touch?

use crate::document::ScriptDocument;
use crate::editing::StepRange;
use rustc_hash::FxHashSet;

/// Compute the set of block positions whose content range intersects any
/// step's post-edit range.
///
/// Ranges are clamped to `[0, doc.size()]`, reversed ranges are swapped,
/// and zero-width ranges are skipped. The result only decides which blocks
/// must be re-measured; it does not itself change the layout.
pub fn touched_blocks(doc: &ScriptDocument, steps: &[StepRange]) -> FxHashSet<usize> {
    let size = doc.size();
    let mut touched = FxHashSet::default();

    for step in steps {
        let (mut start, mut end) = (step.start, step.end);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        let start = start.min(size);
        let end = end.min(size);
        if start == end {
            continue;
        }

        for block in doc.blocks() {
            if block.position >= end {
                break;
            }
            if start < block.end() {
                touched.insert(block.position);
            }
        }
    }

    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockContent, BlockKind};

    fn three_block_doc() -> ScriptDocument {
        let mut doc = ScriptDocument::new();
        doc.push(BlockKind::Action, BlockContent::plain("aaa")); // [0, 5)
        doc.push(BlockKind::Action, BlockContent::plain("bbb")); // [5, 10)
        doc.push(BlockKind::Action, BlockContent::plain("ccc")); // [10, 15)
        doc
    }

    #[test]
    fn test_single_block_touched() {
        let doc = three_block_doc();
        let touched = touched_blocks(&doc, &[StepRange::new(6, 8)]);
        assert_eq!(touched.len(), 1);
        assert!(touched.contains(&5));
    }

    #[test]
    fn test_range_spanning_blocks() {
        let doc = three_block_doc();
        let touched = touched_blocks(&doc, &[StepRange::new(3, 12)]);
        assert_eq!(touched.len(), 3);
    }

    #[test]
    fn test_reversed_range_swapped() {
        let doc = three_block_doc();
        let touched = touched_blocks(&doc, &[StepRange::new(8, 6)]);
        assert!(touched.contains(&5));
    }

    #[test]
    fn test_zero_width_skipped() {
        let doc = three_block_doc();
        let touched = touched_blocks(&doc, &[StepRange::new(7, 7)]);
        assert!(touched.is_empty());
    }

    #[test]
    fn test_clamped_to_document() {
        let doc = three_block_doc();
        let touched = touched_blocks(&doc, &[StepRange::new(12, 999)]);
        assert_eq!(touched.len(), 1);
        assert!(touched.contains(&10));

        // Entirely past the end clamps to zero width
        let past = touched_blocks(&doc, &[StepRange::new(20, 30)]);
        assert!(past.is_empty());
    }
}
