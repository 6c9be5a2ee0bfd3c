//! Page-break decorations for the host renderer

use crate::layout::{PageBreakMarker, PageConstraints};
use serde::Serialize;

/// Continuation marker on the outgoing dialogue fragment
pub const MORE_MARKER: &str = "(MORE)";

/// Label shown where a break is rendered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BreakLabel {
    /// Plain break: render the next page's number in the header strip
    PageNumber(usize),
    /// Dialogue continuation: `more` closes the outgoing fragment,
    /// `contd` reopens the incoming one
    Continuation { more: String, contd: String },
}

/// One renderable break widget.
///
/// `spacing_before` is the vertical gap that pushes the following content
/// onto the next page: the closing page's unused free space plus the page
/// header strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakDecoration {
    pub position: usize,
    pub page_number: usize,
    pub spacing_before: f32,
    pub label: BreakLabel,
}

/// Continuation label for a speaker resuming after a page break
pub fn continued_label(name: &str) -> String {
    format!("{name} (CONT'D)")
}

/// Turn a pass's break markers into renderable decorations
pub fn build_decorations(
    markers: &[PageBreakMarker],
    constraints: &PageConstraints,
) -> Vec<BreakDecoration> {
    markers
        .iter()
        .map(|marker| BreakDecoration {
            position: marker.position,
            page_number: marker.page_number,
            spacing_before: marker.free_space + constraints.header_height,
            label: match &marker.continuation {
                Some(name) => BreakLabel::Continuation {
                    more: MORE_MARKER.to_string(),
                    contd: continued_label(name),
                },
                None => BreakLabel::PageNumber(marker.page_number),
            },
        })
        .collect()
}
