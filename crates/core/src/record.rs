//! Record domain rules: status lifecycle and field normalization.
//!
//! The server owns normalization. Clients send fields as typed; every
//! write path must run `code` and `person_name` through the helpers
//! here before they reach the database, so the stored form (trimmed,
//! uppercased) is the only form that exists at rest.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Viewing status of a tracked record.
///
/// Serialized uppercase on the wire (`"ONLINE"`); parsed
/// case-insensitively so `"online"` and `"Online"` are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "record_status", rename_all = "UPPERCASE")]
pub enum RecordStatus {
    #[default]
    Online,
    Downloaded,
    Watched,
}

impl RecordStatus {
    /// The canonical wire/storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Online => "ONLINE",
            RecordStatus::Downloaded => "DOWNLOADED",
            RecordStatus::Watched => "WATCHED",
        }
    }
}

impl FromStr for RecordStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ONLINE" => Ok(RecordStatus::Online),
            "DOWNLOADED" => Ok(RecordStatus::Downloaded),
            "WATCHED" => Ok(RecordStatus::Watched),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: ONLINE, DOWNLOADED, WATCHED"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalize a record code: trim whitespace and uppercase.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize a person name: trim whitespace and uppercase.
pub fn normalize_person_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize an optional free-text field: trim, mapping blank to `None`.
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reject a blank required field with a validation error naming it.
pub fn require_nonblank(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}
