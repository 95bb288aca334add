//! Session state: one roster, one role mapping, one editable row list.
//!
//! The session is the seam between the data pipeline (load, classify, merge)
//! and the interactive surface (override a column role, tweak a row, then
//! render). Facts are recomputed whenever the roster or the role map changes,
//! never patched incrementally.

use std::io::Read;
use std::path::Path;

use crate::classify::{classify, ColumnKeywords, ColumnRoleMap, Markers, RoleFactSet};
use crate::error::ScenarioError;
use crate::merge::{merge, ResolvedRow, SubstitutionMap};
use crate::roster::Roster;
use crate::template::TemplateRow;

/// Semantic column roles the operator can override.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    /// Attendee name (required downstream).
    Name,
    /// Status tag carrying the marker glyphs.
    Status,
    /// Introducer of a guest.
    Introducer,
    /// Company/affiliation.
    Company,
    /// After-party opt-in.
    AfterParty,
}

/// Classification counts for operator feedback. Reporting only; an empty
/// count is not an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FactSummary {
    /// Number of table leads.
    pub leads: usize,
    /// Number of guests.
    pub guests: usize,
    /// Number of after-party attendees.
    pub after_party: usize,
    /// Whether a representative row was found (vs. the fallback).
    pub representative_resolved: bool,
    /// Whether a flag-bearer row was found (vs. the fallback).
    pub flag_bearer_resolved: bool,
}

/// All mutable state of one scenario-building session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    markers: Markers,
    keywords: ColumnKeywords,
    roster: Roster,
    roles: ColumnRoleMap,
    facts: RoleFactSet,
    rows: Vec<ResolvedRow>,
}

impl Session {
    /// A session with default Japanese markers and keywords.
    pub fn new() -> Self {
        Session::default()
    }

    /// A session with operator-supplied markers and keyword lists.
    pub fn with_config(markers: Markers, keywords: ColumnKeywords) -> Self {
        Session {
            markers,
            keywords,
            ..Session::default()
        }
    }

    /// Load a roster file, suggest column roles, and classify.
    pub fn load_roster_path(&mut self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let roster = Roster::from_csv_path(path)?;
        self.adopt_roster(roster)
    }

    /// Load a roster from CSV bytes, suggest column roles, and classify.
    pub fn load_roster<R: Read>(&mut self, reader: R) -> Result<(), ScenarioError> {
        let roster = Roster::from_csv_reader(reader)?;
        self.adopt_roster(roster)
    }

    fn adopt_roster(&mut self, roster: Roster) -> Result<(), ScenarioError> {
        self.roles = ColumnRoleMap::suggest(&roster, &self.keywords);
        self.roster = roster;
        self.reclassify()
    }

    /// Override one column role and reclassify.
    ///
    /// `column: None` clears the role. Clearing the name role makes the next
    /// classification fail, which is the honest outcome.
    pub fn set_role(
        &mut self,
        role: ColumnRole,
        column: Option<String>,
    ) -> Result<(), ScenarioError> {
        match role {
            ColumnRole::Name => self.roles.name = column,
            ColumnRole::Status => self.roles.status = column,
            ColumnRole::Introducer => self.roles.introducer = column,
            ColumnRole::Company => self.roles.company = column,
            ColumnRole::AfterParty => self.roles.after_party = column,
        }
        self.reclassify()
    }

    /// Recompute the fact set from the current roster and role map.
    pub fn reclassify(&mut self) -> Result<(), ScenarioError> {
        self.facts = classify(&self.roster, &self.roles, &self.markers)?;
        Ok(())
    }

    /// The loaded roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The current role mapping.
    pub fn roles(&self) -> &ColumnRoleMap {
        &self.roles
    }

    /// The current fact set.
    pub fn facts(&self) -> &RoleFactSet {
        &self.facts
    }

    /// The active marker configuration.
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Counts for operator feedback after classification.
    pub fn summary(&self) -> FactSummary {
        FactSummary {
            leads: self.facts.leads.len(),
            guests: self.facts.guests.len(),
            after_party: self.facts.after_party.len(),
            representative_resolved: self.facts.representative
                != self.markers.representative_fallback,
            flag_bearer_resolved: self.facts.flag_bearer != self.markers.flag_bearer_fallback,
        }
    }

    /// Merge a template against the current facts, replacing the row list.
    ///
    /// Manual edits made before this call are discarded; merge is the start
    /// of the editing phase, not a patch on top of it.
    pub fn merge_template(&mut self, template: &[TemplateRow], subs: &SubstitutionMap) {
        self.rows = merge(template, &self.facts, subs);
    }

    /// The editable resolved rows, in script order.
    pub fn rows(&self) -> &[ResolvedRow] {
        &self.rows
    }

    /// Insert a row before `index`; an index past the end appends.
    pub fn insert_row(&mut self, index: usize, row: ResolvedRow) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
    }

    /// Replace the row at `index`. Returns false when the index is out of
    /// range, leaving the list untouched.
    pub fn update_row(&mut self, index: usize, row: ResolvedRow) -> bool {
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Remove the row at `index`. Returns false when the index is out of
    /// range.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index < self.rows.len() {
            self.rows.remove(index);
            true
        } else {
            false
        }
    }
}
