//! Column and page-geometry types for the paginated table layout.
//!
//! Column widths are expressed in display cells (see
//! [`display_width`](super::display_width)); each drawing backend converts
//! cells to its own physical unit. Vertical geometry is unit-agnostic: the
//! backend supplies a [`PageMetrics`] in whatever unit it draws in
//! (millimeters for PDF, line counts for plain text).

use serde::{Deserialize, Serialize};

/// Vertical text flow of a column within a row block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Lines are drawn top-anchored within the row (long, wrapped prose).
    #[default]
    Top,
    /// Lines are vertically centered as a single block (short labels).
    Centered,
}

/// Configuration for a single table column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Header title, redrawn on every page.
    pub title: String,
    /// Width in display cells; cell content wraps to this width.
    pub width: usize,
    /// Vertical placement of the cell's lines within the row.
    pub flow: Flow,
}

impl ColumnSpec {
    /// Create a top-anchored, wrapped column.
    pub fn wrapped(title: impl Into<String>, width: usize) -> Self {
        ColumnSpec {
            title: title.into(),
            width,
            flow: Flow::Top,
        }
    }

    /// Create a vertically centered label column.
    pub fn centered(title: impl Into<String>, width: usize) -> Self {
        ColumnSpec {
            title: title.into(),
            width,
            flow: Flow::Centered,
        }
    }
}

/// Complete column specification for a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Column specifications, left to right.
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Create a spec from columns.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        TableSpec { columns }
    }

    /// Create a spec builder.
    pub fn builder() -> TableSpecBuilder {
        TableSpecBuilder::default()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Total width of all columns in display cells (no separators).
    pub fn total_width(&self) -> usize {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Header titles, left to right.
    pub fn titles(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.title.as_str()).collect()
    }
}

/// Builder for [`TableSpec`].
#[derive(Clone, Debug, Default)]
pub struct TableSpecBuilder {
    columns: Vec<ColumnSpec>,
}

impl TableSpecBuilder {
    /// Add a column.
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Build the spec.
    pub fn build(self) -> TableSpec {
        TableSpec {
            columns: self.columns,
        }
    }
}

/// Vertical page geometry in backend units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageMetrics {
    /// Height of one text line.
    pub line_height: f32,
    /// Fixed padding added to every row block's height.
    pub row_padding: f32,
    /// Usable content height of one page (excludes header and footer bands).
    pub content_height: f32,
}

impl PageMetrics {
    /// Metrics for line-based backends: one unit per line, no padding.
    pub fn lines(per_page: usize) -> Self {
        PageMetrics {
            line_height: 1.0,
            row_padding: 0.0,
            content_height: per_page as f32,
        }
    }
}

/// Fixed per-page chrome: the header redrawn on every page and the footer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChrome {
    /// Document title, centered at the top of every page.
    pub title: String,
    /// Optional second header line (e.g. the event date).
    pub subtitle: Option<String>,
    /// When true, the 1-based page number is printed in the footer.
    pub page_numbers: bool,
}

impl PageChrome {
    /// Chrome with a title and page numbers on.
    pub fn titled(title: impl Into<String>) -> Self {
        PageChrome {
            title: title.into(),
            subtitle: None,
            page_numbers: true,
        }
    }

    /// Set the subtitle line.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}
