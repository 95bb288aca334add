//! Roster table and keyword-based column resolution.
//!
//! A roster is loosely structured: each venue exports its own spreadsheet
//! with its own column names, so nothing here assumes a schema. Columns are
//! matched to semantic roles by substring keywords; see [`resolve_column`].

use std::io::Read;
use std::path::Path;

use crate::error::ScenarioError;

/// An attendee roster: named columns, one record per attendee.
///
/// Immutable for the duration of a session once loaded; classification reads
/// it, nothing writes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl Roster {
    /// An empty roster with the given column names.
    pub fn new(headers: Vec<String>) -> Self {
        Roster {
            headers,
            records: Vec::new(),
        }
    }

    /// Append one attendee record. Short records read as empty cells.
    pub fn push(&mut self, cells: Vec<String>) {
        self.records.push(cells);
    }

    /// Load a roster from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| ScenarioError::Roster(format!("{}: {e}", path.display())))?;
        Self::from_csv_reader(file)
    }

    /// Load a roster from CSV bytes; the first record is the header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ScenarioError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| ScenarioError::Roster(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut roster = Roster::new(headers);
        for record in csv_reader.records() {
            let record = record.map_err(|e| ScenarioError::Roster(e.to_string()))?;
            roster.push(record.iter().map(|c| c.to_string()).collect());
        }
        Ok(roster)
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of attendee records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the roster holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in original order.
    pub fn rows(&self) -> impl Iterator<Item = RosterRow<'_>> {
        self.records.iter().map(move |cells| RosterRow {
            headers: &self.headers,
            cells,
        })
    }
}

/// A borrowed view of one roster record, addressable by column name.
#[derive(Clone, Copy, Debug)]
pub struct RosterRow<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> RosterRow<'a> {
    /// Cell value for a column name; `None` when the column does not exist,
    /// `Some("")` when the cell is merely empty.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        Some(self.cells.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Trimmed cell value, with absent columns reading as empty.
    pub fn get_trimmed(&self, column: Option<&str>) -> &'a str {
        column
            .and_then(|c| self.get(c))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Resolve a semantic role to a physical column by keyword containment.
///
/// Returns the first roster column (in original order) whose name contains
/// any of the candidate keywords. `None` when nothing matches; resolution
/// never fails harder than that.
pub fn resolve_column<'a>(columns: &'a [String], keywords: &[String]) -> Option<&'a str> {
    columns
        .iter()
        .find(|col| keywords.iter().any(|kw| !kw.is_empty() && col.contains(kw.as_str())))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_first_matching_column() {
        let cols = columns(&["№", "会員氏名", "紹介者氏名"]);
        assert_eq!(resolve_column(&cols, &keywords(&["氏名", "名前"])), Some("会員氏名"));
    }

    #[test]
    fn unmatched_keywords_resolve_to_none() {
        let cols = columns(&["№", "会社名"]);
        assert_eq!(resolve_column(&cols, &keywords(&["氏名"])), None);
    }

    #[test]
    fn empty_inputs_resolve_to_none() {
        assert_eq!(resolve_column(&[], &keywords(&["氏名"])), None);
        assert_eq!(resolve_column(&columns(&["氏名"]), &[]), None);
        // An empty keyword must not match everything.
        assert_eq!(resolve_column(&columns(&["氏名"]), &keywords(&[""])), None);
    }

    #[test]
    fn csv_roundtrip_preserves_order() {
        let csv = "氏名,区分,会社名\n赤間 勇介,ゲスト,勇和工業\n中島 啓吾,★,中島工務店\n";
        let roster = Roster::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(roster.headers(), &["氏名", "区分", "会社名"]);
        assert_eq!(roster.len(), 2);
        let names: Vec<&str> = roster.rows().filter_map(|r| r.get("氏名")).collect();
        assert_eq!(names, vec!["赤間 勇介", "中島 啓吾"]);
    }

    #[test]
    fn short_records_read_as_empty_cells() {
        let csv = "氏名,区分\nのみ\n";
        let roster = Roster::from_csv_reader(csv.as_bytes()).unwrap();
        let row = roster.rows().next().unwrap();
        assert_eq!(row.get("区分"), Some(""));
    }

    #[test]
    fn missing_column_is_none() {
        let csv = "氏名\nA\n";
        let roster = Roster::from_csv_reader(csv.as_bytes()).unwrap();
        let row = roster.rows().next().unwrap();
        assert_eq!(row.get("区分"), None);
        assert_eq!(row.get_trimmed(Some("区分")), "");
        assert_eq!(row.get_trimmed(None), "");
    }

    #[test]
    fn missing_file_is_roster_error() {
        let err = Roster::from_csv_path("/nonexistent/roster.csv").unwrap_err();
        assert!(matches!(err, ScenarioError::Roster(_)));
    }
}
