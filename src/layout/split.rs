//! Dialogue split resolution at page boundaries

use crate::document::Block;
use crate::measure::HeightMeasurer;
use serde::Serialize;

/// Where and how an oversized dialogue block splits across a page boundary.
/// Produced per overflow event, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitDecision {
    /// Char length of the top fragment's text; maps the split back to a
    /// document offset
    pub split_offset: usize,
    /// Measured height of the fragment that stays on the closing page
    pub top_height: f32,
    /// Height of the continuing fragment, minus the block's own top margin
    /// since the fragments render as siblings
    pub bottom_height: f32,
    /// The split exists but the continuing fragment is below one readable
    /// line; callers should prefer not to use it while the user is typing
    pub force_fit: bool,
}

/// Sentence segmentation strategy for split-point search.
///
/// The default punctuation heuristic is lossy around abbreviations,
/// ellipses, and decimal numbers; hosts with a proper sentence boundary
/// analyzer can substitute their own.
pub trait SentenceSegmenter {
    /// Segment text into sentence-like fragments. Each fragment keeps its
    /// terminal punctuation and trailing whitespace, and the fragments
    /// concatenate back to the input.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Default segmenter: fragments end at `.`, `!` or `?` runs followed by
/// optional whitespace.
#[derive(Debug, Default)]
pub struct PunctuationSegmenter;

impl SentenceSegmenter for PunctuationSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut fragments = Vec::new();
        let mut start = 0;
        let mut iter = text.char_indices().peekable();

        while let Some((i, c)) = iter.next() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            let mut end = i + c.len_utf8();
            // Swallow the rest of the punctuation run ("...", "?!") and any
            // trailing whitespace
            while let Some(&(j, next)) = iter.peek() {
                if matches!(next, '.' | '!' | '?') || next.is_whitespace() {
                    end = j + next.len_utf8();
                    iter.next();
                } else {
                    break;
                }
            }
            fragments.push(&text[start..end]);
            start = end;
        }

        if start < text.len() {
            fragments.push(&text[start..]);
        }

        fragments
    }
}

/// Finds a safe split point for a dialogue block that overflows the page.
pub struct DialogueSplitter {
    segmenter: Box<dyn SentenceSegmenter>,
    /// Minimum readable height for the continuing fragment
    min_fragment_height: f32,
}

impl Default for DialogueSplitter {
    fn default() -> Self {
        Self::new(Box::new(PunctuationSegmenter))
    }
}

impl DialogueSplitter {
    pub fn new(segmenter: Box<dyn SentenceSegmenter>) -> Self {
        Self {
            segmenter,
            min_fragment_height: 20.0,
        }
    }

    /// Search for the largest sentence prefix whose rendered height fits in
    /// `free_space`. Returns `None` when the content has fewer than two
    /// fragments or no prefix fits; the caller falls back to a generic
    /// whole-block break.
    pub fn resolve(
        &self,
        measurer: &mut HeightMeasurer,
        block: &Block,
        free_space: f32,
    ) -> Option<SplitDecision> {
        let text = block.content.text();
        let fragments = self.segmenter.segment(text);
        if fragments.len() < 2 {
            return None;
        }

        // Char length of each fragment, for slicing candidate prefixes
        let mut cumulative_chars = Vec::with_capacity(fragments.len());
        let mut total = 0;
        for fragment in &fragments {
            total += fragment.chars().count();
            cumulative_chars.push(total);
        }

        // Largest prefix first (everything but the last fragment), shrinking
        // one fragment at a time
        for take in (1..fragments.len()).rev() {
            let top_chars = cumulative_chars[take - 1];

            let mut top = block.content.slice_chars(0, top_chars);
            top.normalize_trailing_space();

            let top_height = measurer.measure(block.kind, &top);
            if top_height <= 0.0 {
                // Degraded measurement; a zero-height fragment would make
                // every candidate "fit"
                return None;
            }
            if top_height > free_space {
                continue;
            }

            let bottom = block
                .content
                .slice_chars(top_chars, block.content.char_len());
            let measured_bottom = measurer.measure(block.kind, &bottom);
            let bottom_height = (measured_bottom - block.kind.top_margin()).max(0.0);

            return Some(SplitDecision {
                split_offset: top_chars,
                top_height,
                bottom_height,
                force_fit: bottom_height < self.min_fragment_height,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockContent, BlockKind};
    use crate::measure::{MeasureError, MeasureOracle, MeasureSurface};

    /// Height = one unit per char, ignoring kind margins. Gives tests exact
    /// control over fragment heights.
    struct CharCountOracle;

    impl MeasureOracle for CharCountOracle {
        fn measure(
            &mut self,
            surface: &mut MeasureSurface,
            _kind: BlockKind,
            content: &crate::document::BlockContent,
            _width: f32,
        ) -> Result<f32, MeasureError> {
            surface.set_text(content.text());
            Ok(surface.text().chars().count() as f32)
        }
    }

    fn char_measurer() -> HeightMeasurer {
        HeightMeasurer::new(Box::new(CharCountOracle), 650.0)
    }

    fn dialogue(text: &str) -> Block {
        Block::new(0, BlockKind::Dialogue, BlockContent::plain(text))
    }

    #[test]
    fn test_segmenter_keeps_trailing_whitespace() {
        let segmenter = PunctuationSegmenter;
        let fragments = segmenter.segment("One. Two! Three");
        assert_eq!(fragments, vec!["One. ", "Two! ", "Three"]);
        assert_eq!(fragments.concat(), "One. Two! Three");
    }

    #[test]
    fn test_segmenter_punctuation_runs() {
        let segmenter = PunctuationSegmenter;
        let fragments = segmenter.segment("Wait... what?! Go");
        assert_eq!(fragments, vec!["Wait... ", "what?! ", "Go"]);
    }

    #[test]
    fn test_single_fragment_no_split() {
        let splitter = DialogueSplitter::default();
        let block = dialogue("no terminal punctuation at all");
        assert!(splitter
            .resolve(&mut char_measurer(), &block, 100.0)
            .is_none());
    }

    #[test]
    fn test_largest_fitting_prefix_wins() {
        let splitter = DialogueSplitter::default();
        // Fragments of 30, 30, 30 chars
        let sentence = format!("{}. ", "x".repeat(28));
        let block = dialogue(&format!("{s}{s}{}", "y".repeat(30), s = sentence));

        // Both two-fragment (60) and one-fragment (30) prefixes fit; the
        // larger one is chosen
        let decision = splitter
            .resolve(&mut char_measurer(), &block, 70.0)
            .unwrap();
        assert_eq!(decision.split_offset, 60);
        assert_eq!(decision.top_height, 60.0);
        assert!(!decision.force_fit);

        // Tighter space shrinks to the one-fragment prefix
        let decision = splitter
            .resolve(&mut char_measurer(), &block, 45.0)
            .unwrap();
        assert_eq!(decision.split_offset, 30);
    }

    #[test]
    fn test_no_prefix_fits() {
        let splitter = DialogueSplitter::default();
        let block = dialogue(&format!("{0}. {0}", "x".repeat(50)));
        assert!(splitter
            .resolve(&mut char_measurer(), &block, 10.0)
            .is_none());
    }

    #[test]
    fn test_force_fit_for_degenerate_bottom() {
        let splitter = DialogueSplitter::default();
        // Bottom fragment of 10 chars, minus the dialogue top margin, is
        // below the 20-unit readable minimum
        let block = dialogue(&format!("{}. {}", "x".repeat(40), "y".repeat(10)));
        let decision = splitter
            .resolve(&mut char_measurer(), &block, 60.0)
            .unwrap();
        assert!(decision.force_fit);
        assert!(decision.bottom_height < 20.0);
    }

    #[test]
    fn test_top_fragment_trailing_space_becomes_nbsp() {
        struct CapturingOracle {
            seen: Vec<String>,
        }
        impl MeasureOracle for CapturingOracle {
            fn measure(
                &mut self,
                surface: &mut MeasureSurface,
                _kind: BlockKind,
                content: &BlockContent,
                _width: f32,
            ) -> Result<f32, MeasureError> {
                surface.set_text(content.text());
                self.seen.push(surface.text().to_string());
                Ok(surface.text().chars().count() as f32)
            }
        }

        let splitter = DialogueSplitter::default();
        let block = dialogue("First part here. Second part over there.");
        let mut measurer =
            HeightMeasurer::new(Box::new(CapturingOracle { seen: Vec::new() }), 650.0);
        let decision = splitter.resolve(&mut measurer, &block, 100.0).unwrap();

        // split_offset counts the original chars, NBSP included
        assert_eq!(decision.split_offset, "First part here. ".chars().count());
        assert!(decision.top_height > 0.0);
    }

    #[test]
    fn test_measurement_failure_returns_none() {
        struct FailingOracle;
        impl MeasureOracle for FailingOracle {
            fn measure(
                &mut self,
                _surface: &mut MeasureSurface,
                _kind: BlockKind,
                _content: &BlockContent,
                _width: f32,
            ) -> Result<f32, MeasureError> {
                Err(MeasureError::SurfaceUnavailable)
            }
        }

        let splitter = DialogueSplitter::default();
        let block = dialogue("One. Two. Three.");
        let mut measurer = HeightMeasurer::new(Box::new(FailingOracle), 650.0);
        assert!(splitter.resolve(&mut measurer, &block, 100.0).is_none());
    }
}
