//! Role classification: from roster rows to scenario facts.
//!
//! Attendees are partitioned by marker glyphs and words found in their
//! status cell (a `★` marks a table lead, the word `ゲスト` marks a guest,
//! and so on) plus an after-party opt-in column. Everything is substring or
//! equality matching over configurable markers; the only hard requirement is
//! a resolvable name column.

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::roster::{resolve_column, Roster};

/// Marker glyphs and words used to classify status cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Glyph marking a table lead (substring match).
    pub lead_glyph: String,
    /// Word marking a guest (exact match on the trimmed cell).
    pub guest_word: String,
    /// Word marking the venue representative (substring match).
    pub representative_word: String,
    /// Word marking the flag bearer (substring match).
    pub flag_bearer_word: String,
    /// Phrase marking an after-party attendee (substring match).
    pub attend_phrase: String,
    /// Shown when no representative row exists.
    pub representative_fallback: String,
    /// Shown when no flag bearer row exists.
    pub flag_bearer_fallback: String,
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            lead_glyph: "★".to_string(),
            guest_word: "ゲスト".to_string(),
            representative_word: "代表".to_string(),
            flag_bearer_word: "旗手".to_string(),
            attend_phrase: "参加予定".to_string(),
            representative_fallback: "（未定）".to_string(),
            flag_bearer_fallback: "（未定）".to_string(),
        }
    }
}

/// Keyword lists for suggesting a column per semantic role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnKeywords {
    /// Attendee name column candidates.
    pub name: Vec<String>,
    /// Status/kind column candidates.
    pub status: Vec<String>,
    /// Introducer column candidates.
    pub introducer: Vec<String>,
    /// Company/affiliation column candidates.
    pub company: Vec<String>,
    /// After-party opt-in column candidates.
    pub after_party: Vec<String>,
}

impl Default for ColumnKeywords {
    fn default() -> Self {
        let list = |words: &[&str]| words.iter().map(|s| s.to_string()).collect();
        ColumnKeywords {
            name: list(&["氏名", "名前", "お名前"]),
            status: list(&["区分", "ステータス", "属性", "種別"]),
            introducer: list(&["紹介者", "紹介"]),
            company: list(&["会社", "社名", "企業", "屋号"]),
            after_party: list(&["懇親会", "二次会", "懇親"]),
        }
    }
}

/// Resolved mapping from semantic role to a physical roster column.
///
/// Every field may be unresolved; only the name role is required downstream,
/// and that is enforced by [`classify`], not here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    /// Attendee name column.
    pub name: Option<String>,
    /// Status-tag column.
    pub status: Option<String>,
    /// Introducer column.
    pub introducer: Option<String>,
    /// Company column.
    pub company: Option<String>,
    /// After-party opt-in column.
    pub after_party: Option<String>,
}

impl ColumnRoleMap {
    /// Suggest a mapping from the roster's column names.
    ///
    /// Pure keyword heuristics; the operator may override any field before
    /// classification.
    pub fn suggest(roster: &Roster, keywords: &ColumnKeywords) -> Self {
        let own = |c: Option<&str>| c.map(str::to_string);
        ColumnRoleMap {
            name: own(resolve_column(roster.headers(), &keywords.name)),
            status: own(resolve_column(roster.headers(), &keywords.status)),
            introducer: own(resolve_column(roster.headers(), &keywords.introducer)),
            company: own(resolve_column(roster.headers(), &keywords.company)),
            after_party: own(resolve_column(roster.headers(), &keywords.after_party)),
        }
    }
}

/// A guest awaiting formal introduction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Guest name.
    pub name: Option<String>,
    /// Affiliated company.
    pub company: Option<String>,
    /// Member who introduced the guest.
    pub introducer: Option<String>,
}

/// An attendee who opted into the after-party.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterPartyRecord {
    /// Attendee name.
    pub name: String,
    /// Affiliated company, when a company column resolved.
    pub company: Option<String>,
}

/// Read-only snapshot of role-derived facts, recomputed whenever the roster
/// or the role map changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFactSet {
    /// Table-lead names in roster order.
    pub leads: Vec<String>,
    /// Guests in roster order.
    pub guests: Vec<GuestRecord>,
    /// After-party attendees in roster order.
    pub after_party: Vec<AfterPartyRecord>,
    /// Venue representative name, or the configured fallback.
    pub representative: String,
    /// Flag bearer name, or the configured fallback.
    pub flag_bearer: String,
}

impl RoleFactSet {
    /// True when nothing was classified (typical for an empty roster).
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty() && self.guests.is_empty() && self.after_party.is_empty()
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Partition the roster into role facts.
///
/// Pure function of roster, role map, and markers. Absent optional roles
/// degrade to empty lists or fallback strings; only an unresolved name
/// column is an error, because every downstream row needs a name and a
/// silent wrong guess would produce a plausible but incorrect program.
pub fn classify(
    roster: &Roster,
    roles: &ColumnRoleMap,
    markers: &Markers,
) -> Result<RoleFactSet, ScenarioError> {
    let name_col = roles.name.as_deref().ok_or_else(|| {
        ScenarioError::Configuration(
            "no roster column matched the attendee-name role; select one explicitly".to_string(),
        )
    })?;
    if !roster.headers().iter().any(|h| h == name_col) {
        return Err(ScenarioError::Configuration(format!(
            "selected name column '{name_col}' does not exist in the roster"
        )));
    }

    let status_col = roles.status.as_deref();
    let mut facts = RoleFactSet {
        representative: markers.representative_fallback.clone(),
        flag_bearer: markers.flag_bearer_fallback.clone(),
        ..RoleFactSet::default()
    };
    let mut representative_found = false;
    let mut flag_bearer_found = false;

    for row in roster.rows() {
        let name = row.get_trimmed(Some(name_col));
        let status = row.get_trimmed(status_col);

        if status.contains(&markers.lead_glyph) {
            if let Some(lead) = non_empty(name) {
                facts.leads.push(lead);
            }
        }

        if status == markers.guest_word {
            facts.guests.push(GuestRecord {
                name: non_empty(name),
                company: non_empty(row.get_trimmed(roles.company.as_deref())),
                introducer: non_empty(row.get_trimmed(roles.introducer.as_deref())),
            });
        }

        if !representative_found && status.contains(&markers.representative_word) {
            if let Some(rep) = non_empty(name) {
                facts.representative = rep;
                representative_found = true;
            }
        }
        if !flag_bearer_found && status.contains(&markers.flag_bearer_word) {
            if let Some(bearer) = non_empty(name) {
                facts.flag_bearer = bearer;
                flag_bearer_found = true;
            }
        }

        let attend = row.get_trimmed(roles.after_party.as_deref());
        if attend.contains(&markers.attend_phrase) {
            if let Some(attendee) = non_empty(name) {
                facts.after_party.push(AfterPartyRecord {
                    name: attendee,
                    company: non_empty(row.get_trimmed(roles.company.as_deref())),
                });
            }
        }
    }

    Ok(facts)
}
