//! Screenplay block model

use serde::Serialize;
use smallvec::SmallVec;

/// Non-breaking space used to keep a trailing space measurable
pub const NBSP: char = '\u{a0}';

/// The kind of screenplay block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    /// Scene description / stage direction
    Action,
    /// Character cue introducing dialogue
    Character,
    /// Spoken dialogue
    Dialogue,
    /// Slugline ("INT. KITCHEN - NIGHT")
    SceneHeader,
}

impl BlockKind {
    /// Check if this is a dialogue block
    pub fn is_dialogue(&self) -> bool {
        matches!(self, BlockKind::Dialogue)
    }

    /// Check if this is a scene header
    pub fn is_scene_header(&self) -> bool {
        matches!(self, BlockKind::SceneHeader)
    }

    /// Vertical margin rendered above a block of this kind
    pub fn top_margin(&self) -> f32 {
        match self {
            BlockKind::Action => 12.0,
            BlockKind::Character => 16.0,
            BlockKind::Dialogue => 4.0,
            BlockKind::SceneHeader => 24.0,
        }
    }

    /// Fraction of the page width this kind's text column occupies
    pub fn width_fraction(&self) -> f32 {
        match self {
            BlockKind::Action => 1.0,
            BlockKind::Character => 0.4,
            BlockKind::Dialogue => 0.55,
            BlockKind::SceneHeader => 1.0,
        }
    }
}

/// Inline emphasis applied to a span of block text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    Italic,
    Bold,
    Underline,
}

/// A styled span over a char range of block text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleSpan {
    /// Start char offset, inclusive
    pub start: usize,
    /// End char offset, exclusive
    pub end: usize,
    pub emphasis: Emphasis,
}

/// The textual content of a block, with inline style spans.
///
/// Opaque to the engine except for measurement and dialogue splitting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockContent {
    text: String,
    spans: SmallVec<[StyleSpan; 2]>,
}

impl BlockContent {
    /// Create plain content
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: SmallVec::new(),
        }
    }

    /// Create content with style spans
    pub fn styled(text: impl Into<String>, spans: impl IntoIterator<Item = StyleSpan>) -> Self {
        Self {
            text: text.into(),
            spans: spans.into_iter().collect(),
        }
    }

    /// Get the text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the style spans
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Length in chars
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the text is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Extract a char range as new content.
    ///
    /// Spans that straddle the boundary are clamped to the slice, so a
    /// fragment produced by truncation never carries a dangling span.
    pub fn slice_chars(&self, start: usize, end: usize) -> BlockContent {
        let byte_start = char_to_byte(&self.text, start);
        let byte_end = char_to_byte(&self.text, end);

        let spans = self
            .spans
            .iter()
            .filter_map(|span| {
                let s = span.start.max(start);
                let e = span.end.min(end);
                if s < e {
                    Some(StyleSpan {
                        start: s - start,
                        end: e - start,
                        emphasis: span.emphasis,
                    })
                } else {
                    None
                }
            })
            .collect();

        BlockContent {
            text: self.text[byte_start..byte_end].to_string(),
            spans,
        }
    }

    /// Replace a trailing ASCII space with a non-breaking space so that
    /// measurement does not collapse it.
    pub fn normalize_trailing_space(&mut self) {
        if self.text.ends_with(' ') {
            self.text.pop();
            self.text.push(NBSP);
        }
    }
}

/// Convert a char offset to a byte offset, clamped to the text length
fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// One typed flow unit of the screenplay document.
///
/// Blocks are produced and owned by the host document; the engine only
/// reads them and requests height corrections.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Stable position in the document's flat offset space
    pub position: usize,
    pub kind: BlockKind,
    pub content: BlockContent,
    /// Last measured height, round-tripped through the host document
    pub height: Option<f32>,
    /// Stable speaker reference, if the host tracks one
    pub character_ref: Option<String>,
    /// Display name of the speaker
    pub character_name: Option<String>,
}

impl Block {
    /// Create a block with no stored height and no speaker
    pub fn new(position: usize, kind: BlockKind, content: BlockContent) -> Self {
        Self {
            position,
            kind,
            content,
            height: None,
            character_ref: None,
            character_name: None,
        }
    }

    /// Offset span this block occupies, including its open and close tokens
    pub fn span(&self) -> usize {
        self.content.char_len() + 2
    }

    /// Offset one past the end of this block
    pub fn end(&self) -> usize {
        self.position + self.span()
    }

    /// Display name used for continuation labels
    pub fn speaker_label(&self) -> &str {
        self.character_ref
            .as_deref()
            .or(self.character_name.as_deref())
            .unwrap_or("CHARACTER")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_span() {
        let block = Block::new(0, BlockKind::Action, BlockContent::plain("hello"));
        assert_eq!(block.span(), 7);
        assert_eq!(block.end(), 7);
    }

    #[test]
    fn test_speaker_label_fallback() {
        let mut block = Block::new(0, BlockKind::Dialogue, BlockContent::plain("hi"));
        assert_eq!(block.speaker_label(), "CHARACTER");

        block.character_name = Some("ALICE".to_string());
        assert_eq!(block.speaker_label(), "ALICE");

        block.character_ref = Some("BOB".to_string());
        assert_eq!(block.speaker_label(), "BOB");
    }

    #[test]
    fn test_slice_chars_clamps_spans() {
        let content = BlockContent::styled(
            "hello world",
            [StyleSpan {
                start: 3,
                end: 8,
                emphasis: Emphasis::Italic,
            }],
        );

        let top = content.slice_chars(0, 5);
        assert_eq!(top.text(), "hello");
        assert_eq!(
            top.spans(),
            &[StyleSpan {
                start: 3,
                end: 5,
                emphasis: Emphasis::Italic,
            }]
        );

        let bottom = content.slice_chars(5, 11);
        assert_eq!(bottom.text(), " world");
        assert_eq!(
            bottom.spans(),
            &[StyleSpan {
                start: 0,
                end: 3,
                emphasis: Emphasis::Italic,
            }]
        );

        // Span entirely outside the slice is dropped
        let tail = content.slice_chars(9, 11);
        assert!(tail.spans().is_empty());
    }

    #[test]
    fn test_normalize_trailing_space() {
        let mut content = BlockContent::plain("First sentence. ");
        content.normalize_trailing_space();
        assert_eq!(content.text(), "First sentence.\u{a0}");

        let mut no_space = BlockContent::plain("No space");
        no_space.normalize_trailing_space();
        assert_eq!(no_space.text(), "No space");
    }

    #[test]
    fn test_char_len_multibyte() {
        let content = BlockContent::plain("café");
        assert_eq!(content.char_len(), 4);
        assert_eq!(content.slice_chars(0, 3).text(), "caf");
    }
}
