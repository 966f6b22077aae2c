//! Search candidates.

use account_lookup_net::Record;
use serde_json::Value;

/// Display name used when a record has no value in the filter column.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Identifier used when a record has no value in the identifier column.
pub const MISSING_ID: &str = "No ID";

/// One record returned by a search, reduced to what the dropdown shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Value of the filter column.
    pub name: String,
    /// Value of the identifier column.
    pub id: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Map a search record using the configured column names.
    ///
    /// Absent or `null` columns fall back to [`UNKNOWN_NAME`] and
    /// [`MISSING_ID`].
    pub fn from_record(record: &Record, name_column: &str, id_column: &str) -> Self {
        Self {
            name: column_text(record, name_column).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            id: column_text(record, id_column).unwrap_or_else(|| MISSING_ID.to_string()),
        }
    }

    /// Case-insensitive comparison of the name with typed text.
    pub fn matches(&self, text: &str) -> bool {
        self.name.to_lowercase() == text.to_lowercase()
    }
}

fn column_text(record: &Record, column: &str) -> Option<String> {
    match record.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
