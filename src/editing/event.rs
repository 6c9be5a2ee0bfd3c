//! Edit events delivered by the host editing surface

use smallvec::SmallVec;

/// The current selection in document offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
}

impl Selection {
    /// A collapsed selection (caret)
    pub fn caret(offset: usize) -> Self {
        Self {
            from: offset,
            to: offset,
        }
    }

    /// A range selection
    pub fn range(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Check if either end of the selection falls inside `[start, end)`
    pub fn touches(&self, start: usize, end: usize) -> bool {
        (self.from >= start && self.from < end) || (self.to >= start && self.to < end)
    }
}

/// The post-edit range touched by one low-level edit step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRange {
    pub start: usize,
    pub end: usize,
}

impl StepRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One document-edit event as delivered by the host.
///
/// A forced recomputation is an event with no document change and the
/// force flag set.
#[derive(Debug, Clone, Default)]
pub struct EditEvent {
    /// Whether the document content changed
    pub doc_changed: bool,
    /// Post-edit ranges of the edit's steps
    pub steps: SmallVec<[StepRange; 4]>,
    /// Recompute everything, ignoring cached heights
    pub force: bool,
}

impl EditEvent {
    /// An event describing a content edit
    pub fn edit(steps: impl IntoIterator<Item = StepRange>) -> Self {
        Self {
            doc_changed: true,
            steps: steps.into_iter().collect(),
            force: false,
        }
    }

    /// A forced recomputation with no document change
    pub fn force_recompute() -> Self {
        Self {
            doc_changed: false,
            steps: SmallVec::new(),
            force: true,
        }
    }
}
