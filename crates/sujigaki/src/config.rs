//! Optional YAML configuration for markers and column keywords.
//!
//! Venues that tag their rosters differently can override the defaults
//! without touching code. Every field is optional; an empty file is a valid
//! config meaning "all defaults".

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{ColumnKeywords, Markers};
use crate::error::ScenarioError;

/// Top-level configuration file shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Marker glyphs and words for status-cell classification.
    pub markers: Markers,
    /// Keyword lists for column-role suggestion.
    pub keywords: ColumnKeywords,
}

impl ScenarioConfig {
    /// Load a config file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ScenarioError> {
        match path {
            None => Ok(ScenarioConfig::default()),
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ScenarioError::ConfigFile(format!("{}: {e}", path.display())))?;
                Self::from_yaml(&text)
            }
        }
    }

    /// Parse a config from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ScenarioError> {
        if text.trim().is_empty() {
            return Ok(ScenarioConfig::default());
        }
        serde_yaml::from_str(text).map_err(|e| ScenarioError::ConfigFile(e.to_string()))
    }
}
