//! # sujigaki — meeting scenario generator
//!
//! `sujigaki` turns two CSV files — an attendee roster and a script
//! template — into the printed run-of-show (進行シナリオ) for a business
//! networking meeting. The pipeline has three stages:
//!
//! 1. **Classify** ([`classify`]): roster columns are matched to semantic
//!    roles by keyword, then attendees are partitioned into table leads,
//!    guests, after-party attendees, representative, and flag bearer by
//!    marker glyphs in their status cell.
//! 2. **Merge** ([`merge`]): role facts flow into the four-column script
//!    template through `{placeholder}` substitution, and the `[GUESTS]`
//!    marker row expands into one numbered introduction row per guest.
//! 3. **Render**: the resolved rows become a paginated PDF or text table
//!    (via `sujigaki-render`), or an XLSX/CSV spreadsheet.
//!
//! [`session::Session`] ties the stages together and holds the editable row
//! list between merge and render. The `sujigaki` binary exposes the whole
//! pipeline as `inspect` / `build` / `export` subcommands.

pub mod classify;
pub mod cli;
pub mod config;
mod error;
pub mod merge;
pub mod roster;
pub mod session;
pub mod template;

pub use classify::{
    classify, AfterPartyRecord, ColumnKeywords, ColumnRoleMap, GuestRecord, Markers, RoleFactSet,
};
pub use config::ScenarioConfig;
pub use error::{RenderError, ScenarioError};
pub use merge::{merge, ResolvedRow, SubstitutionMap};
pub use roster::{resolve_column, Roster, RosterRow};
pub use session::{ColumnRole, FactSummary, Session};
pub use template::{load_template, load_template_path, TemplateRow, FIELD_TITLES, GUEST_MARKER};
