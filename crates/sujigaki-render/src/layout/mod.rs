//! Backend-independent table layout.
//!
//! The layout pipeline is pure: cells wrap to per-column widths measured in
//! display cells, row heights derive from the tallest wrapped cell, and a
//! page cursor decides breaks before anything is drawn. Drawing backends
//! consume the resulting [`PageLayout`]s; see [`crate::backend`].
//!
//! ```rust
//! use sujigaki_render::{paginate, ColumnSpec, PageMetrics, TableSpec};
//!
//! let spec = TableSpec::builder()
//!     .column(ColumnSpec::centered("時間", 8))
//!     .column(ColumnSpec::wrapped("進行内容", 40))
//!     .build();
//!
//! let rows = vec![vec!["14:00".to_string(), "オープニング動画開始。".to_string()]];
//! let pages = paginate(&rows, &spec, &PageMetrics::lines(48));
//! assert_eq!(pages.len(), 1);
//! ```

mod page;
mod types;
mod wrap;

pub use page::{layout_row, paginate, PageCursor, PageLayout, RowBlock};
pub use types::{ColumnSpec, Flow, PageChrome, PageMetrics, TableSpec, TableSpecBuilder};
pub use wrap::{display_width, pad_center, pad_right, wrap};
