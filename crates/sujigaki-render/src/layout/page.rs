//! Page-break state machine.
//!
//! [`paginate`] turns flat rows into per-page row blocks. The fit decision is
//! made before a row is placed, so a row block is atomic: its wrapped lines
//! never straddle a page boundary. A row taller than an entire page still
//! gets a fresh page and is placed whole; splitting it would be worse than
//! letting it overrun the bottom margin.

use super::types::{PageMetrics, TableSpec};
use super::wrap::wrap;

/// Tolerance for cursor arithmetic in backend units.
const EPSILON: f32 = 1e-3;

/// One laid-out row: wrapped lines per column plus vertical placement.
#[derive(Clone, Debug, PartialEq)]
pub struct RowBlock {
    /// Offset from the top of the page's content area.
    pub y: f32,
    /// Block height including row padding.
    pub height: f32,
    /// Wrapped lines, one `Vec<String>` per column.
    pub lines: Vec<Vec<String>>,
}

impl RowBlock {
    /// Line count of the tallest cell in this block.
    pub fn line_count(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(1)
    }
}

/// An ordered sequence of row blocks on one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    /// Zero-based page index.
    pub index: usize,
    /// Row blocks in document order.
    pub blocks: Vec<RowBlock>,
}

/// Cursor tracking the vertical position within a page's content area.
///
/// Pure arithmetic: the cursor decides whether a block fits, the caller
/// decides what to do about it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageCursor {
    y: f32,
}

impl PageCursor {
    /// Cursor at the top of a fresh content area.
    pub fn top() -> Self {
        PageCursor { y: 0.0 }
    }

    /// Current offset from the top of the content area.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// True while the cursor is still at the top of the page.
    pub fn at_top(&self) -> bool {
        self.y <= EPSILON
    }

    /// Would a block of this height fit in the remaining space?
    pub fn fits(&self, height: f32, metrics: &PageMetrics) -> bool {
        self.y + height <= metrics.content_height + EPSILON
    }

    /// Advance past a placed block.
    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }
}

/// Wrap one row's cells and compute its block height.
///
/// The row height is the tallest cell's line count (at least one line) times
/// the line height, plus the fixed row padding.
pub fn layout_row(cells: &[String], spec: &TableSpec, metrics: &PageMetrics) -> RowBlock {
    let lines: Vec<Vec<String>> = spec
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| wrap(cells.get(i).map(String::as_str).unwrap_or(""), col.width))
        .collect();
    let tallest = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
    RowBlock {
        y: 0.0,
        height: tallest as f32 * metrics.line_height + metrics.row_padding,
        lines,
    }
}

/// Lay rows onto pages, breaking before any row that would overflow.
///
/// Always returns at least one page, so headers render even for an empty
/// document.
pub fn paginate(rows: &[Vec<String>], spec: &TableSpec, metrics: &PageMetrics) -> Vec<PageLayout> {
    let mut pages: Vec<PageLayout> = Vec::new();
    let mut blocks: Vec<RowBlock> = Vec::new();
    let mut cursor = PageCursor::top();

    for cells in rows {
        let mut block = layout_row(cells, spec, metrics);

        if !cursor.fits(block.height, metrics) && !cursor.at_top() {
            pages.push(PageLayout {
                index: pages.len(),
                blocks: std::mem::take(&mut blocks),
            });
            cursor = PageCursor::top();
        }

        block.y = cursor.y();
        cursor.advance(block.height);
        blocks.push(block);
    }

    pages.push(PageLayout {
        index: pages.len(),
        blocks,
    });
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::ColumnSpec;

    fn four_col_spec() -> TableSpec {
        TableSpec::builder()
            .column(ColumnSpec::centered("時間", 8))
            .column(ColumnSpec::centered("担当", 8))
            .column(ColumnSpec::wrapped("準備・動き", 10))
            .column(ColumnSpec::wrapped("進行内容", 20))
            .build()
    }

    fn row(time: &str, owner: &str, prep: &str, content: &str) -> Vec<String> {
        vec![
            time.to_string(),
            owner.to_string(),
            prep.to_string(),
            content.to_string(),
        ]
    }

    #[test]
    fn empty_document_is_one_empty_page() {
        let pages = paginate(&[], &four_col_spec(), &PageMetrics::lines(40));
        assert_eq!(pages.len(), 1);
        assert!(pages[0].blocks.is_empty());
    }

    #[test]
    fn row_height_tracks_tallest_cell() {
        let metrics = PageMetrics::lines(40);
        let block = layout_row(
            &row("14:00", "司会", "", &"あ".repeat(40)),
            &four_col_spec(),
            &metrics,
        );
        // 40 wide chars at width 20 -> 10 cells per line -> 4 lines.
        assert_eq!(block.line_count(), 4);
        assert_eq!(block.height, 4.0);
    }

    #[test]
    fn blank_row_still_occupies_one_line() {
        let metrics = PageMetrics::lines(40);
        let block = layout_row(&row("", "", "", ""), &four_col_spec(), &metrics);
        assert_eq!(block.line_count(), 1);
        assert_eq!(block.height, 1.0);
    }

    #[test]
    fn breaks_before_overflowing_row() {
        // 10 lines of space left; next row needs 40 lines. The break happens
        // before the row, which lands whole at the top of page 2.
        let metrics = PageMetrics::lines(10);
        let tall = "x".repeat(20 * 40); // wraps to 40 lines in the content column
        let rows = vec![row("14:00", "司会", "", "短い"), row("", "", "", &tall)];

        let pages = paginate(&rows, &four_col_spec(), &metrics);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].blocks.len(), 1);
        assert_eq!(pages[1].blocks.len(), 1);
        assert_eq!(pages[1].blocks[0].y, 0.0);
        assert_eq!(pages[1].blocks[0].line_count(), 40);
    }

    #[test]
    fn rows_fill_page_before_breaking() {
        let metrics = PageMetrics::lines(3);
        let rows: Vec<Vec<String>> = (0..7).map(|i| row("", "", "", &format!("r{i}"))).collect();

        let pages = paginate(&rows, &four_col_spec(), &metrics);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].blocks.len(), 3);
        assert_eq!(pages[1].blocks.len(), 3);
        assert_eq!(pages[2].blocks.len(), 1);
    }

    #[test]
    fn page_indices_are_sequential() {
        let metrics = PageMetrics::lines(2);
        let rows: Vec<Vec<String>> = (0..5).map(|_| row("", "", "", "x")).collect();
        let pages = paginate(&rows, &four_col_spec(), &metrics);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.index, i);
        }
    }

    #[test]
    fn cursor_fit_predicate() {
        let metrics = PageMetrics::lines(10);
        let mut cursor = PageCursor::top();
        assert!(cursor.fits(10.0, &metrics));
        cursor.advance(8.0);
        assert!(cursor.fits(2.0, &metrics));
        assert!(!cursor.fits(2.01, &metrics));
    }
}
