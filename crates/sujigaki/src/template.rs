//! Script template loading.
//!
//! A template is a four-column table (time, owner, preparation, content),
//! read from a CSV file that ships next to the application. Content cells
//! may carry `{placeholder}` tokens for the merge engine, and a row whose
//! time field is the literal [`GUEST_MARKER`] requests guest expansion.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;

/// Sentinel in the time field meaning "replace this row with one row per
/// guest".
pub const GUEST_MARKER: &str = "[GUESTS]";

/// Column titles of the script table, also used as export headers.
pub const FIELD_TITLES: [&str; 4] = ["時間", "担当", "準備・動き", "進行内容"];

/// One row of the script template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRow {
    /// Time label, possibly empty, possibly the guest marker.
    pub time: String,
    /// Owner label (who acts), possibly empty.
    pub owner: String,
    /// Preparation note (lighting, microphone, movement).
    pub prep: String,
    /// Script content, possibly containing `{placeholder}` tokens.
    pub content: String,
}

impl TemplateRow {
    /// Construct a row from its four fields.
    pub fn new(
        time: impl Into<String>,
        owner: impl Into<String>,
        prep: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        TemplateRow {
            time: time.into(),
            owner: owner.into(),
            prep: prep.into(),
            content: content.into(),
        }
    }

    /// True when this row requests guest expansion.
    pub fn is_guest_marker(&self) -> bool {
        self.time.trim() == GUEST_MARKER
    }
}

/// Load a template from a CSV file; the first record is the header row.
pub fn load_template_path(path: impl AsRef<Path>) -> Result<Vec<TemplateRow>, ScenarioError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| ScenarioError::TemplateLoad(format!("{}: {e}", path.display())))?;
    load_template(file)
}

/// Parse template rows from CSV bytes.
///
/// Every record must carry exactly the four fields; anything else is a
/// malformed template and fails the load (the merge step is the only thing
/// affected, manual row entry remains possible for the caller).
pub fn load_template<R: Read>(reader: R) -> Result<Vec<TemplateRow>, ScenarioError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| ScenarioError::TemplateLoad(e.to_string()))?;
        if record.len() != 4 {
            return Err(ScenarioError::TemplateLoad(format!(
                "row {}: expected 4 fields (time, owner, prep, content), found {}",
                i + 1,
                record.len()
            )));
        }
        rows.push(TemplateRow::new(&record[0], &record[1], &record[2], &record[3]));
    }
    Ok(rows)
}
