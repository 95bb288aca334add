//! Monospace text backend with box-drawing borders.
//!
//! Renders the same paginated layout as the PDF backend, one display cell
//! per character, so page-break behavior can be inspected (and tested)
//! without a font file. Pages are separated by a form feed.

use crate::error::RenderError;
use crate::layout::{
    display_width, pad_center, pad_right, paginate, Flow, PageChrome, PageLayout, PageMetrics,
    RowBlock, TableSpec,
};

use super::DrawBackend;

/// Border character set for the text backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// ASCII borders: +, -, |
    Ascii,
    /// Light Unicode box-drawing characters.
    #[default]
    Light,
}

struct BorderChars {
    horizontal: char,
    vertical: char,
    left: char,
    right: char,
    cross: char,
}

impl BorderStyle {
    fn chars(&self) -> BorderChars {
        match self {
            BorderStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                left: '+',
                right: '+',
                cross: '+',
            },
            BorderStyle::Light => BorderChars {
                horizontal: '─',
                vertical: '│',
                left: '├',
                right: '┤',
                cross: '┼',
            },
        }
    }
}

/// Plain-text drawing backend.
#[derive(Clone, Debug)]
pub struct TextBackend {
    border: BorderStyle,
    rows_per_page: usize,
}

impl Default for TextBackend {
    fn default() -> Self {
        TextBackend {
            border: BorderStyle::Light,
            rows_per_page: 48,
        }
    }
}

impl TextBackend {
    /// Backend with the default border style and page height.
    pub fn new() -> Self {
        TextBackend::default()
    }

    /// Set the border character set.
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Set the number of content lines per page.
    pub fn rows_per_page(mut self, lines: usize) -> Self {
        self.rows_per_page = lines.max(1);
        self
    }

    /// Render to a `String` (the byte output is this, UTF-8 encoded).
    pub fn render_to_string(
        &self,
        spec: &TableSpec,
        chrome: &PageChrome,
        rows: &[Vec<String>],
    ) -> String {
        let metrics = PageMetrics::lines(self.rows_per_page);
        let pages = paginate(rows, spec, &metrics);
        let total_width = spec.total_width() + spec.num_columns() + 1;

        let mut out = String::new();
        for page in &pages {
            if page.index > 0 {
                out.push('\u{0c}');
            }
            self.draw_page(spec, chrome, page, pages.len(), total_width, &mut out);
        }
        out
    }

    fn draw_page(
        &self,
        spec: &TableSpec,
        chrome: &PageChrome,
        page: &PageLayout,
        page_count: usize,
        total_width: usize,
        out: &mut String,
    ) {
        let chars = self.border.chars();

        out.push_str(pad_center(&chrome.title, total_width).trim_end());
        out.push('\n');
        if let Some(subtitle) = &chrome.subtitle {
            out.push_str(pad_center(subtitle, total_width).trim_end());
            out.push('\n');
        }

        self.rule(spec, &chars, out);
        let titles: Vec<String> = spec
            .columns
            .iter()
            .map(|c| pad_center(&c.title, c.width))
            .collect();
        self.text_line(&titles, &chars, out);
        self.rule(spec, &chars, out);

        for block in &page.blocks {
            self.draw_block(spec, block, &chars, out);
            self.rule(spec, &chars, out);
        }

        if chrome.page_numbers {
            let footer = format!("- {} / {} -", page.index + 1, page_count);
            out.push_str(pad_center(&footer, total_width).trim_end());
            out.push('\n');
        }
    }

    fn draw_block(&self, spec: &TableSpec, block: &RowBlock, chars: &BorderChars, out: &mut String) {
        let height = block.line_count();
        for line_idx in 0..height {
            let cells: Vec<String> = spec
                .columns
                .iter()
                .enumerate()
                .map(|(col, c)| {
                    let lines = &block.lines[col];
                    // Centered columns float their block; wrapped columns are
                    // top-anchored.
                    let offset = match c.flow {
                        Flow::Centered => (height - lines.len()) / 2,
                        Flow::Top => 0,
                    };
                    let text = line_idx
                        .checked_sub(offset)
                        .and_then(|i| lines.get(i))
                        .map(String::as_str)
                        .unwrap_or("");
                    pad_right(text, c.width)
                })
                .collect();
            self.text_line(&cells, chars, out);
        }
    }

    fn text_line(&self, cells: &[String], chars: &BorderChars, out: &mut String) {
        out.push(chars.vertical);
        for cell in cells {
            out.push_str(cell);
            out.push(chars.vertical);
        }
        out.push('\n');
    }

    fn rule(&self, spec: &TableSpec, chars: &BorderChars, out: &mut String) {
        out.push(chars.left);
        for (i, col) in spec.columns.iter().enumerate() {
            for _ in 0..col.width {
                out.push(chars.horizontal);
            }
            out.push(if i + 1 == spec.num_columns() {
                chars.right
            } else {
                chars.cross
            });
        }
        out.push('\n');
    }
}

impl DrawBackend for TextBackend {
    fn render(
        &self,
        spec: &TableSpec,
        chrome: &PageChrome,
        rows: &[Vec<String>],
    ) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_to_string(spec, chrome, rows).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnSpec;

    fn spec() -> TableSpec {
        TableSpec::builder()
            .column(ColumnSpec::centered("時間", 8))
            .column(ColumnSpec::wrapped("進行内容", 20))
            .build()
    }

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["14:00".to_string(), "オープニング動画開始。".to_string()],
            vec![String::new(), "あ".repeat(30)],
        ]
    }

    #[test]
    fn renders_header_on_single_page() {
        let chrome = PageChrome::titled("第56回 進行シナリオ");
        let text = TextBackend::new().render_to_string(&spec(), &chrome, &rows());
        assert!(text.contains("第56回 進行シナリオ"));
        assert!(text.contains("時間"));
        assert!(text.contains("進行内容"));
        assert!(text.contains("14:00"));
    }

    #[test]
    fn every_page_repeats_the_header() {
        let chrome = PageChrome::titled("題").subtitle("2026年1月10日");
        let many: Vec<Vec<String>> = (0..20)
            .map(|i| vec![format!("{i:02}:00"), "内容".to_string()])
            .collect();
        let text = TextBackend::new()
            .rows_per_page(5)
            .render_to_string(&spec(), &chrome, &many);

        let pages: Vec<&str> = text.split('\u{0c}').collect();
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.contains("題"));
            assert!(page.contains("2026年1月10日"));
            assert!(page.contains("進行内容"));
        }
    }

    #[test]
    fn footer_numbers_pages_from_one() {
        let chrome = PageChrome::titled("題");
        let many: Vec<Vec<String>> = (0..8).map(|_| vec![String::new(), "x".to_string()]).collect();
        let text = TextBackend::new()
            .rows_per_page(4)
            .render_to_string(&spec(), &chrome, &many);
        assert!(text.contains("- 1 / 2 -"));
        assert!(text.contains("- 2 / 2 -"));
    }

    #[test]
    fn body_lines_share_one_width() {
        let chrome = PageChrome::titled("題");
        let text = TextBackend::new()
            .border(BorderStyle::Ascii)
            .render_to_string(&spec(), &chrome, &rows());
        let widths: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with('|') || l.starts_with('+'))
            .map(display_width)
            .collect();
        assert!(!widths.is_empty());
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn draw_backend_yields_utf8_bytes() {
        let chrome = PageChrome::titled("題");
        let bytes = TextBackend::new()
            .render(&spec(), &chrome, &rows())
            .unwrap();
        assert!(String::from_utf8(bytes).is_ok());
    }
}
