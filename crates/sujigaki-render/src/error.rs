//! Error types for layout, drawing, and export operations.
//!
//! This module provides [`RenderError`], the primary error type for everything
//! this crate does. It abstracts over the underlying backends (printpdf,
//! rust_xlsxwriter, csv) so callers see one stable error surface.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for rendering and export operations.
///
/// A failed render never returns partial bytes: every drawing function either
/// produces a complete document or one of these.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The font resource required by a backend is missing or unreadable.
    ///
    /// For an all-CJK document a glyph fallback would produce garbled but
    /// plausible-looking output, which is worse than failing hard. Callers
    /// should offer the spreadsheet export path instead.
    #[error("font resource unavailable: {} ({reason})", path.display())]
    FontUnavailable {
        /// Path of the font file that could not be used.
        path: PathBuf,
        /// Why the font could not be loaded.
        reason: String,
    },

    /// PDF backend failure (document assembly or serialization).
    #[error("pdf backend error: {0}")]
    Pdf(String),

    /// Workbook serialization failure in the XLSX export path.
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// CSV serialization failure in the CSV export path.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (e.g., reading the font file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for RenderError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        RenderError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            err.to_string(),
        ))
    }
}
