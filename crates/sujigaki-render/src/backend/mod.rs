//! Drawing backends for the paginated table layout.
//!
//! [`DrawBackend`] is the seam between the pure layout (wrapping, row
//! heights, page breaks) and a concrete drawing surface. Two backends ship
//! with the crate:
//!
//! - [`PdfBackend`]: bordered A4 pages via printpdf, using an external CJK
//!   font file.
//! - [`TextBackend`]: monospace box-drawing output for previews and tests.
//!
//! Both produce a fully materialized byte buffer; a failed render returns an
//! error and no bytes.

mod pdf;
mod text;

pub use pdf::PdfBackend;
pub use text::{BorderStyle, TextBackend};

use crate::error::RenderError;
use crate::layout::{PageChrome, TableSpec};

/// A drawing surface that can render laid-out table pages into a document.
///
/// Implementations call [`paginate`](crate::layout::paginate) with their own
/// [`PageMetrics`](crate::layout::PageMetrics), since line height and usable
/// page height are properties of the surface, not of the data.
pub trait DrawBackend {
    /// Render rows into complete document bytes.
    ///
    /// The same page chrome (title, subtitle, column headers) is redrawn on
    /// every page; the footer carries the 1-based page number when enabled.
    fn render(
        &self,
        spec: &TableSpec,
        chrome: &PageChrome,
        rows: &[Vec<String>],
    ) -> Result<Vec<u8>, RenderError>;
}
