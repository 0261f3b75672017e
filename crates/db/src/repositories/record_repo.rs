//! Repository for the `records` table.
//!
//! All lookups key on the normalized (trimmed, uppercased) code, so
//! callers may pass codes in any case. Substring search is
//! case-insensitive via ILIKE, sorted by the searched field then code,
//! and capped at [`SEARCH_LIMIT`] results.

use sqlx::PgPool;

use codetrack_core::record::{normalize_code, normalize_optional, normalize_person_name};

use crate::models::record::{CreateRecord, Record, UpdateRecord};

/// Column list for `records` queries.
const RECORD_COLUMNS: &str = "\
    id, code, person_name, link, description, status, created_at, updated_at";

/// Result cap for substring search.
pub const SEARCH_LIMIT: i64 = 10;

/// Provides CRUD and search operations for records.
pub struct RecordRepo;

impl RecordRepo {
    /// Insert a new record with normalized fields.
    ///
    /// The caller is expected to have checked for an existing code; the
    /// `uq_records_code` constraint still backstops the race where two
    /// creates pass that check simultaneously.
    pub async fn create(pool: &PgPool, input: &CreateRecord) -> Result<Record, sqlx::Error> {
        let query = format!(
            "INSERT INTO records (code, person_name, link, description, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(normalize_code(&input.code))
            .bind(normalize_person_name(&input.person_name))
            .bind(normalize_optional(input.link.as_deref()))
            .bind(normalize_optional(input.description.as_deref()))
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a record by code (any case).
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM records WHERE code = $1");
        sqlx::query_as::<_, Record>(&query)
            .bind(normalize_code(code))
            .fetch_optional(pool)
            .await
    }

    /// Substring search on `person_name`, sorted by name then code.
    pub async fn search_by_name(pool: &PgPool, fragment: &str) -> Result<Vec<Record>, sqlx::Error> {
        let pattern = format!("%{}%", fragment.trim());
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM records \
             WHERE person_name ILIKE $1 \
             ORDER BY person_name, code \
             LIMIT $2"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(&pattern)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Substring search on `code`, sorted by code.
    pub async fn search_by_code(pool: &PgPool, fragment: &str) -> Result<Vec<Record>, sqlx::Error> {
        let pattern = format!("%{}%", fragment.trim());
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM records \
             WHERE code ILIKE $1 \
             ORDER BY code \
             LIMIT $2"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(&pattern)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the mutable fields of the record with the given code
    /// and refresh `updated_at`.
    ///
    /// Returns `None` if no record with that code exists.
    pub async fn update(
        pool: &PgPool,
        code: &str,
        input: &UpdateRecord,
    ) -> Result<Option<Record>, sqlx::Error> {
        let query = format!(
            "UPDATE records SET \
                 person_name = $2, \
                 link = $3, \
                 description = $4, \
                 status = $5, \
                 updated_at = NOW() \
             WHERE code = $1 \
             RETURNING {RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(normalize_code(code))
            .bind(normalize_person_name(&input.person_name))
            .bind(normalize_optional(input.link.as_deref()))
            .bind(normalize_optional(input.description.as_deref()))
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record by code (any case).
    ///
    /// Returns `true` if a record was deleted.
    pub async fn delete(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM records WHERE code = $1")
            .bind(normalize_code(code))
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
