//! # sujigaki-render — paginated table rendering
//!
//! `sujigaki-render` lays rows of text into a fixed-column table that wraps
//! cell content, computes row heights, and breaks across pages without ever
//! splitting a row. It is the rendering foundation for the `sujigaki`
//! scenario generator, but knows nothing about rosters or scripts: callers
//! hand it rows of strings and a column spec, and get document bytes back.
//!
//! ## Core concepts
//!
//! - [`TableSpec`] / [`ColumnSpec`]: column titles, widths in display cells,
//!   and vertical flow (top-anchored prose vs. centered labels)
//! - [`paginate`]: the pure page-break state machine producing [`PageLayout`]s
//! - [`DrawBackend`]: the seam between layout and a drawing surface
//! - [`PdfBackend`] / [`TextBackend`]: the two shipped surfaces
//! - [`export_xlsx`] / [`export_csv`]: layout-free spreadsheet dumps
//!
//! ## Quick start
//!
//! ```rust
//! use sujigaki_render::{ColumnSpec, DrawBackend, PageChrome, TableSpec, TextBackend};
//!
//! let spec = TableSpec::builder()
//!     .column(ColumnSpec::centered("時間", 8))
//!     .column(ColumnSpec::centered("担当", 8))
//!     .column(ColumnSpec::wrapped("準備・動き", 24))
//!     .column(ColumnSpec::wrapped("進行内容", 72))
//!     .build();
//!
//! let rows = vec![vec![
//!     "14:00".to_string(),
//!     "司会".to_string(),
//!     "照明OFF".to_string(),
//!     "オープニング動画開始。皆様スクリーンに注目をお願いします。".to_string(),
//! ]];
//!
//! let chrome = PageChrome::titled("第56回 進行シナリオ");
//! let bytes = TextBackend::new().render(&spec, &chrome, &rows).unwrap();
//! assert!(!bytes.is_empty());
//! ```
//!
//! A render either returns a complete document or an error; there is no
//! partial output. The PDF backend in particular fails with
//! [`RenderError::FontUnavailable`] rather than substituting glyphs, since
//! garbled CJK text reads as plausible and wrong.

pub mod backend;
mod error;
pub mod export;
pub mod layout;

pub use backend::{BorderStyle, DrawBackend, PdfBackend, TextBackend};
pub use error::RenderError;
pub use export::{export_csv, export_xlsx};
pub use layout::{
    display_width, layout_row, pad_center, pad_right, paginate, wrap, ColumnSpec, Flow,
    PageChrome, PageCursor, PageLayout, PageMetrics, RowBlock, TableSpec, TableSpecBuilder,
};
