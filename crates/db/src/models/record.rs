//! Record model and DTOs.
//!
//! Wire names are camelCase (`personName`, `createdAt`); columns stay
//! snake_case and are mapped by `FromRow` on the field names.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use codetrack_core::record::RecordStatus;
use codetrack_core::types::{DbId, Timestamp};

/// A row from the `records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: DbId,
    /// Business key, stored trimmed and uppercased.
    pub code: String,
    /// Stored trimmed and uppercased.
    pub person_name: String,
    pub link: Option<String>,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /records`. Fields arrive as typed by the user; the
/// server normalizes before persisting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecord {
    pub code: String,
    pub person_name: String,
    pub link: Option<String>,
    pub description: Option<String>,
    /// Defaults to ONLINE when omitted.
    #[serde(default)]
    pub status: RecordStatus,
}

/// DTO for `PUT /records/{code}`. Overwrites every mutable field;
/// `code` itself is immutable and addressed by the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    pub person_name: String,
    pub link: Option<String>,
    pub description: Option<String>,
    pub status: RecordStatus,
}
