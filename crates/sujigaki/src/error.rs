//! Error taxonomy for scenario generation.
//!
//! Each CLI action (inspect, build, export) catches errors at its own
//! boundary: a failed merge does not poison a later export, and a failed
//! render returns no bytes. The variants map one-to-one to the operator-visible
//! failure classes.

use thiserror::Error;

pub use sujigaki_render::RenderError;

/// Error type for roster loading, classification, merging, and rendering.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A required column role (the attendee name) could not be resolved.
    ///
    /// Fatal to the merge step only; the operator is asked to fix the column
    /// mapping. Optional roles never produce this, they degrade to empty
    /// facts.
    #[error("column mapping incomplete: {0}")]
    Configuration(String),

    /// The template source is missing or cannot be parsed into four-field
    /// rows. Fatal to the merge step only; manually entered rows still work.
    #[error("template could not be loaded: {0}")]
    TemplateLoad(String),

    /// The roster file could not be read or parsed.
    #[error("roster could not be read: {0}")]
    Roster(String),

    /// The marker/keyword configuration file is malformed.
    #[error("config file error: {0}")]
    ConfigFile(String),

    /// Rendering or export failure, including the missing-font case that
    /// should steer the operator to the spreadsheet export path.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// I/O error outside the more specific cases above.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
