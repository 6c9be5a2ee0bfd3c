//! Page table construction

use serde::Serialize;

/// One page over the document's flat offset space.
///
/// Pages are contiguous and ordered: `pages[i].end == pages[i + 1].start`,
/// the first page starts at 0, the last ends at the document size, and
/// indices are 1-based and consecutive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page_index: usize,
    pub start: usize,
    pub end: usize,
}

impl Page {
    /// Check if this page contains an offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// A positioned page-break annotation, recomputed every pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageBreakMarker {
    /// Document offset where the break is rendered
    pub position: usize,
    /// Page the content after the break lands on
    pub page_number: usize,
    /// Vertical room left unused on the closing page
    pub free_space: f32,
    /// Speaker display name, present when the break splits a dialogue block
    pub continuation: Option<String>,
}

/// Build the page table from the ordered break positions of one pass.
///
/// Page 1 starts at offset 0; each break closes the current page and opens
/// the next; the final page ends at the document size.
pub fn build_page_table(break_positions: &[usize], doc_size: usize) -> Vec<Page> {
    let mut pages = Vec::with_capacity(break_positions.len() + 1);
    let mut start = 0;
    let mut page_index = 1;

    for &br in break_positions {
        pages.push(Page {
            page_index,
            start,
            end: br,
        });
        start = br;
        page_index += 1;
    }

    pages.push(Page {
        page_index,
        start,
        end: doc_size,
    });

    pages
}

/// Find the page containing an offset.
///
/// The document-end offset resolves to the last page so a caret at the very
/// end of the document still has a page.
pub fn page_at_offset(pages: &[Page], offset: usize) -> Option<&Page> {
    pages
        .iter()
        .find(|p| p.contains(offset))
        .or_else(|| pages.last().filter(|p| p.end == offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_breaks_single_page() {
        let pages = build_page_table(&[], 100);
        assert_eq!(
            pages,
            vec![Page {
                page_index: 1,
                start: 0,
                end: 100
            }]
        );
    }

    #[test]
    fn test_breaks_are_contiguous() {
        let pages = build_page_table(&[40, 75], 100);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].start, 0);
        assert_eq!(pages.last().unwrap().end, 100);
        for w in pages.windows(2) {
            assert_eq!(w[0].end, w[1].start);
            assert_eq!(w[0].page_index + 1, w[1].page_index);
        }
    }

    #[test]
    fn test_page_at_offset() {
        let pages = build_page_table(&[40], 100);
        assert_eq!(page_at_offset(&pages, 0).unwrap().page_index, 1);
        assert_eq!(page_at_offset(&pages, 39).unwrap().page_index, 1);
        assert_eq!(page_at_offset(&pages, 40).unwrap().page_index, 2);
        assert_eq!(page_at_offset(&pages, 100).unwrap().page_index, 2);
        assert!(page_at_offset(&pages, 101).is_none());
    }
}
