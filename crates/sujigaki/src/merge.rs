//! Template merge engine: placeholder substitution and guest expansion.
//!
//! Substitution is deliberately lenient: a `{token}` with no mapping is left
//! verbatim so a drifted template still produces a reviewable document
//! instead of an error. The guest marker row is replaced in place by one
//! numbered row per guest, preserving roster order.

use serde::{Deserialize, Serialize};

use crate::classify::{GuestRecord, RoleFactSet};
use crate::template::TemplateRow;

/// At most this many table-lead names are joined into `{leads}`; the cap is
/// a physical seating constraint, not a data limit.
pub const MAX_JOINED_LEADS: usize = 12;

/// Separator for joined name lists (full-width comma).
pub const LEAD_SEPARATOR: &str = "、";

/// Rendered in place of a missing guest field.
pub const MISSING_FIELD: &str = "－";

/// A template row after substitution and expansion: the unit the renderer,
/// the editor, and the export adapter all operate on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRow {
    /// Time label.
    pub time: String,
    /// Owner label.
    pub owner: String,
    /// Preparation note.
    pub prep: String,
    /// Fully substituted script content.
    pub content: String,
}

impl ResolvedRow {
    /// Construct a row from its four fields.
    pub fn new(
        time: impl Into<String>,
        owner: impl Into<String>,
        prep: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        ResolvedRow {
            time: time.into(),
            owner: owner.into(),
            prep: prep.into(),
            content: content.into(),
        }
    }

    /// The row as renderer/export cells, in column order.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.time.clone(),
            self.owner.clone(),
            self.prep.clone(),
            self.content.clone(),
        ]
    }
}

/// Recognized placeholder keys mapped to replacement strings.
///
/// Keys are matched as whole `{key}` tokens. Insertion order is irrelevant;
/// lookups are by key and later inserts replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionMap {
    entries: Vec<(String, String)>,
}

impl SubstitutionMap {
    /// An empty map.
    pub fn new() -> Self {
        SubstitutionMap::default()
    }

    /// Map derived from classified facts: `{leads}` (capped join),
    /// `{representative}`, `{flag_bearer}`, and `{guest_count}`.
    ///
    /// Caller-supplied values (`{hosts}`, `{timekeeper}`) are added on top
    /// with [`set`](Self::set).
    pub fn from_facts(facts: &RoleFactSet) -> Self {
        let mut map = SubstitutionMap::new();
        map.set("leads", joined_leads(facts));
        map.set("representative", facts.representative.clone());
        map.set("flag_bearer", facts.flag_bearer.clone());
        map.set("guest_count", facts.guests.len().to_string());
        map
    }

    /// Insert or replace a key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Replacement for a key, if recognized.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of recognized keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are recognized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First [`MAX_JOINED_LEADS`] table-lead names joined with the full-width
/// comma, in roster order.
pub fn joined_leads(facts: &RoleFactSet) -> String {
    facts
        .leads
        .iter()
        .take(MAX_JOINED_LEADS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(LEAD_SEPARATOR)
}

/// Substitute recognized `{key}` tokens in a single string.
///
/// Single pass, left to right. Unrecognized tokens and stray braces are
/// emitted verbatim; replacement values are never rescanned.
fn substitute(content: &str, subs: &SubstitutionMap) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            out.push(ch);
            continue;
        }

        let mut token = String::new();
        let mut closed = false;
        for inner in chars.by_ref() {
            if inner == '}' {
                closed = true;
                break;
            }
            token.push(inner);
        }

        if !closed {
            // Unterminated token at end of content: keep it as written.
            out.push('{');
            out.push_str(&token);
        } else {
            match subs.get(token.trim()) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(&token);
                    out.push('}');
                }
            }
        }
    }
    out
}

fn guest_row(index: usize, guest: &GuestRecord) -> ResolvedRow {
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING_FIELD.to_string());
    ResolvedRow::new(
        "",
        "",
        "",
        format!(
            "{}) 紹介者：{} / ゲスト：{} {}",
            index,
            field(&guest.introducer),
            field(&guest.company),
            field(&guest.name),
        ),
    )
}

/// Merge a template with facts and a substitution map.
///
/// Row order is preserved; each guest-marker row is replaced in place by one
/// row per guest numbered from 1, and every other row has its content
/// substituted. Never fails: template loading catches malformed sources
/// upstream, and an empty guest list simply expands to nothing.
pub fn merge(
    template: &[TemplateRow],
    facts: &RoleFactSet,
    subs: &SubstitutionMap,
) -> Vec<ResolvedRow> {
    let mut resolved = Vec::with_capacity(template.len() + facts.guests.len());
    for row in template {
        if row.is_guest_marker() {
            for (i, guest) in facts.guests.iter().enumerate() {
                resolved.push(guest_row(i + 1, guest));
            }
        } else {
            resolved.push(ResolvedRow {
                time: row.time.clone(),
                owner: row.owner.clone(),
                prep: row.prep.clone(),
                content: substitute(&row.content, subs),
            });
        }
    }
    resolved
}
