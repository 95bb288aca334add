//! PDF drawing backend built on printpdf.
//!
//! Draws the paginated layout as a bordered table on A4 pages, with the page
//! chrome (title, optional subtitle, column headers) redrawn on every page
//! and a page-number footer. Text is set in an external TTF supplied by the
//! caller; the whole document is CJK, so a missing or unparsable font fails
//! the render outright instead of falling back to a Latin face.
//!
//! Glyph metrics: the backend assumes a fixed-pitch gothic face where a
//! full-width character advances by the font size and a half-width character
//! by half of it. Column widths in display cells therefore map to
//! `cells × font_size / 2` points.

use std::path::{Path, PathBuf};

use printpdf::{IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::error::RenderError;
use crate::layout::{
    display_width, paginate, Flow, PageChrome, PageLayout, PageMetrics, RowBlock, TableSpec,
};

use super::DrawBackend;

const PT_TO_MM: f32 = 0.352_778;
/// Line height as a multiple of the font size.
const LINE_FACTOR: f32 = 1.35;
/// Vertical padding added to each row, split between top and bottom.
const ROW_PADDING_MM: f32 = 1.6;
/// Baseline sits this fraction of a line above the line's bottom edge.
const DESCENT_FACTOR: f32 = 0.28;
/// Horizontal inset of cell text from the cell border.
const CELL_INSET_MM: f32 = 1.2;
/// Height reserved for the footer band.
const FOOTER_BAND_MM: f32 = 7.0;

fn mm(v: f32) -> Mm {
    Mm(v as _)
}

/// printpdf-based drawing backend.
#[derive(Clone, Debug)]
pub struct PdfBackend {
    font_path: PathBuf,
    font_size: f32,
    title_size: f32,
    page_width: f32,
    page_height: f32,
    margin: f32,
}

impl PdfBackend {
    /// Backend for A4 portrait pages using the given TTF file.
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        PdfBackend {
            font_path: font_path.into(),
            font_size: 9.0,
            title_size: 12.0,
            page_width: 210.0,
            page_height: 297.0,
            margin: 12.0,
        }
    }

    /// Set the body font size in points.
    pub fn font_size(mut self, pt: f32) -> Self {
        self.font_size = pt;
        self
    }

    /// Path of the font file this backend will load.
    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Horizontal advance of one display cell in millimeters.
    fn cell_width(&self) -> f32 {
        self.font_size * 0.5 * PT_TO_MM
    }

    fn line_height(&self) -> f32 {
        self.font_size * LINE_FACTOR * PT_TO_MM
    }

    fn header_row_height(&self) -> f32 {
        self.line_height() + ROW_PADDING_MM
    }

    /// Height of the per-page chrome above the table body.
    fn header_band(&self, chrome: &PageChrome) -> f32 {
        let title_line = self.title_size * PT_TO_MM * 1.6;
        let subtitle_line = if chrome.subtitle.is_some() {
            self.font_size * PT_TO_MM * 1.6
        } else {
            0.0
        };
        title_line + subtitle_line + self.header_row_height()
    }

    /// PDF y-coordinate of the top of the table body area.
    fn content_top(&self, chrome: &PageChrome) -> f32 {
        self.page_height - self.margin - self.header_band(chrome)
    }

    fn metrics(&self, chrome: &PageChrome) -> PageMetrics {
        PageMetrics {
            line_height: self.line_height(),
            row_padding: ROW_PADDING_MM,
            content_height: self.content_top(chrome) - self.margin - FOOTER_BAND_MM,
        }
    }

    /// Read the font file and verify it is a TrueType/OpenType face.
    ///
    /// The magic check catches truncated or wrong-format files before any
    /// page is assembled, so a bad font never yields partial output.
    fn load_font(&self) -> Result<Vec<u8>, RenderError> {
        let unavailable = |reason: String| RenderError::FontUnavailable {
            path: self.font_path.clone(),
            reason,
        };
        let bytes = std::fs::read(&self.font_path).map_err(|e| unavailable(e.to_string()))?;
        const MAGICS: [&[u8]; 4] = [&[0x00, 0x01, 0x00, 0x00], b"OTTO", b"true", b"ttcf"];
        if bytes.len() < 4 || !MAGICS.iter().any(|m| bytes.starts_with(m)) {
            return Err(unavailable("not a TrueType/OpenType font".to_string()));
        }
        Ok(bytes)
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        display_width(text) as f32 * font_size * 0.5 * PT_TO_MM
    }

    fn centered_text(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        text: &str,
        font_size: f32,
        center_x: f32,
        baseline_y: f32,
    ) {
        let x = center_x - self.text_width(text, font_size) / 2.0;
        layer.use_text(text, font_size as _, mm(x), mm(baseline_y), font);
    }

    fn stroke(&self, layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
        let line = Line {
            points: vec![
                (Point::new(mm(x1), mm(y1)), false),
                (Point::new(mm(x2), mm(y2)), false),
            ],
            is_closed: false,
        };
        layer.add_line(line);
    }

    /// Draw the bordered frame of a band: top and bottom rules plus the five
    /// vertical separators.
    fn frame(&self, layer: &PdfLayerReference, spec: &TableSpec, x0: f32, top: f32, bottom: f32) {
        let table_w = spec.total_width() as f32 * self.cell_width();
        self.stroke(layer, x0, top, x0 + table_w, top);
        self.stroke(layer, x0, bottom, x0 + table_w, bottom);
        let mut x = x0;
        self.stroke(layer, x, top, x, bottom);
        for col in &spec.columns {
            x += col.width as f32 * self.cell_width();
            self.stroke(layer, x, top, x, bottom);
        }
    }

    fn draw_block(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        spec: &TableSpec,
        block: &RowBlock,
        x0: f32,
        content_top: f32,
    ) {
        let top = content_top - block.y;
        let bottom = top - block.height;
        self.frame(layer, spec, x0, top, bottom);

        let line_h = self.line_height();
        let inner_h = block.height - ROW_PADDING_MM;
        let mut x = x0;
        for (col_idx, col) in spec.columns.iter().enumerate() {
            let lines = &block.lines[col_idx];
            let block_h = lines.len() as f32 * line_h;
            let start = match col.flow {
                Flow::Centered => (inner_h - block_h) / 2.0,
                Flow::Top => 0.0,
            };
            for (i, text) in lines.iter().enumerate() {
                let baseline = top
                    - ROW_PADDING_MM / 2.0
                    - start
                    - (i as f32 + 1.0) * line_h
                    + DESCENT_FACTOR * line_h;
                layer.use_text(
                    text.as_str(),
                    self.font_size as _,
                    mm(x + CELL_INSET_MM),
                    mm(baseline),
                    font,
                );
            }
            x += col.width as f32 * self.cell_width();
        }
    }

    fn draw_page(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        spec: &TableSpec,
        chrome: &PageChrome,
        page: &PageLayout,
        page_count: usize,
    ) {
        let table_w = spec.total_width() as f32 * self.cell_width();
        let x0 = (self.page_width - table_w) / 2.0;
        let center_x = self.page_width / 2.0;

        let mut y = self.page_height - self.margin - self.title_size * PT_TO_MM;
        self.centered_text(layer, font, &chrome.title, self.title_size, center_x, y);
        if let Some(subtitle) = &chrome.subtitle {
            y -= self.font_size * PT_TO_MM * 1.6;
            self.centered_text(layer, font, subtitle, self.font_size, center_x, y);
        }

        let content_top = self.content_top(chrome);
        let band_top = content_top + self.header_row_height();
        self.frame(layer, spec, x0, band_top, content_top);
        let line_h = self.line_height();
        let mut x = x0;
        for col in &spec.columns {
            let col_w = col.width as f32 * self.cell_width();
            let baseline =
                band_top - ROW_PADDING_MM / 2.0 - line_h + DESCENT_FACTOR * line_h;
            self.centered_text(
                layer,
                font,
                &col.title,
                self.font_size,
                x + col_w / 2.0,
                baseline,
            );
            x += col_w;
        }

        for block in &page.blocks {
            self.draw_block(layer, font, spec, block, x0, content_top);
        }

        if chrome.page_numbers {
            let footer = format!("{} / {}", page.index + 1, page_count);
            self.centered_text(layer, font, &footer, self.font_size, center_x, self.margin / 2.0);
        }
    }
}

impl DrawBackend for PdfBackend {
    fn render(
        &self,
        spec: &TableSpec,
        chrome: &PageChrome,
        rows: &[Vec<String>],
    ) -> Result<Vec<u8>, RenderError> {
        let font_bytes = self.load_font()?;

        let (doc, first_page, first_layer) = PdfDocument::new(
            chrome.title.clone(),
            mm(self.page_width),
            mm(self.page_height),
            "scenario",
        );
        let font = doc
            .add_external_font(std::io::Cursor::new(font_bytes))
            .map_err(|e| RenderError::FontUnavailable {
                path: self.font_path.clone(),
                reason: e.to_string(),
            })?;

        let pages = paginate(rows, spec, &self.metrics(chrome));
        for page in &pages {
            let (page_idx, layer_idx) = if page.index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(mm(self.page_width), mm(self.page_height), "scenario")
            };
            let layer = doc.get_page(page_idx).get_layer(layer_idx);
            layer.set_outline_thickness(0.4);
            self.draw_page(&layer, &font, spec, chrome, page, pages.len());
        }

        doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnSpec;
    use std::io::Write;

    fn spec() -> TableSpec {
        TableSpec::builder()
            .column(ColumnSpec::centered("時間", 8))
            .column(ColumnSpec::wrapped("進行内容", 40))
            .build()
    }

    #[test]
    fn missing_font_is_font_unavailable() {
        let backend = PdfBackend::new("/nonexistent/IPAexGothic.ttf");
        let err = backend
            .render(&spec(), &PageChrome::titled("題"), &[])
            .unwrap_err();
        assert!(matches!(err, RenderError::FontUnavailable { .. }));
    }

    #[test]
    fn junk_font_is_font_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a truetype font").unwrap();

        let backend = PdfBackend::new(file.path());
        let err = backend
            .render(&spec(), &PageChrome::titled("題"), &[])
            .unwrap_err();
        assert!(matches!(err, RenderError::FontUnavailable { .. }));
    }

    #[test]
    fn failed_render_produces_no_bytes() {
        let backend = PdfBackend::new("/nonexistent/font.ttf");
        let result = backend.render(
            &spec(),
            &PageChrome::titled("題"),
            &[vec!["14:00".to_string(), "開会".to_string()]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn geometry_leaves_room_for_content() {
        let backend = PdfBackend::new("unused.ttf");
        let chrome = PageChrome::titled("題").subtitle("2026年1月10日");
        let metrics = backend.metrics(&chrome);
        // An A4 page must fit dozens of single-line rows.
        let row = metrics.line_height + metrics.row_padding;
        assert!(metrics.content_height / row > 30.0);
    }
}
