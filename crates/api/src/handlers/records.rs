//! Handlers for the `/records` resource.
//!
//! Records are addressed by their business code, not the surrogate id.
//! Path codes are accepted in any case; every write normalizes `code`
//! and `personName` server-side before touching the store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codetrack_core::error::CoreError;
use codetrack_core::record::{normalize_code, require_nonblank};
use codetrack_db::models::record::{CreateRecord, UpdateRecord};
use codetrack_db::repositories::RecordRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/records/{code}
///
/// Fetch a single record by its (normalized) code.
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = RecordRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Record",
                key: normalize_code(&code),
            })
        })?;

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/records
///
/// Create a record. Rejects duplicate codes with a validation error;
/// the database unique constraint backstops the check under races.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRecord>,
) -> AppResult<impl IntoResponse> {
    require_nonblank("code", &input.code)?;
    require_nonblank("personName", &input.person_name)?;

    let code = normalize_code(&input.code);
    if RecordRepo::find_by_code(&state.pool, &code).await?.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "Code already exists".into(),
        )));
    }

    let record = RecordRepo::create(&state.pool, &input).await?;

    tracing::info!(code = %record.code, "Record created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/records/{code}
///
/// Overwrite the mutable fields of an existing record. The code itself
/// is immutable; `updatedAt` is refreshed on success.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<UpdateRecord>,
) -> AppResult<impl IntoResponse> {
    require_nonblank("personName", &input.person_name)?;

    let record = RecordRepo::update(&state.pool, &code, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Record",
                key: normalize_code(&code),
            })
        })?;

    tracing::info!(code = %record.code, "Record updated");

    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/records/{code}
///
/// Remove a record outright. No soft delete.
pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let code = normalize_code(&code);
    let deleted = RecordRepo::delete(&state.pool, &code).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Record",
            key: code,
        }));
    }

    tracing::info!(code = %code, "Record deleted");

    Ok(StatusCode::NO_CONTENT)
}
