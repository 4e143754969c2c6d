//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Suffix appended to a duplicated sheet's name.
pub const DEFAULT_SHEET_COPY_SUFFIX: &str = "_copy";

/// Options controlling how a pipeline runs. Every field has a default, so
/// `{}` is a valid configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    /// Appended to the source name by `copy_sheet`.
    pub sheet_copy_suffix: String,
    /// Apply against a staged copy and commit only if every operation
    /// succeeds. Off by default: a failing operation leaves earlier
    /// operations applied.
    pub atomic: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sheet_copy_suffix: DEFAULT_SHEET_COPY_SUFFIX.to_string(),
            atomic: false,
        }
    }
}

impl Options {
    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
