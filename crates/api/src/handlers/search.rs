//! Handlers for substring search over records.
//!
//! Both endpoints are case-insensitive, sort by the searched field
//! (then code), and cap results server-side. The cap lives in the
//! repository so the API and any future callers agree on it.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use codetrack_db::repositories::RecordRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/search/name/{name}
///
/// Records whose person name contains the fragment, sorted by name
/// then code.
pub async fn by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let results = RecordRepo::search_by_name(&state.pool, &name).await?;

    tracing::debug!(fragment = %name, results = results.len(), "Name search executed");

    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/search/code/{code}
///
/// Records whose code contains the fragment, sorted by code.
pub async fn by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let results = RecordRepo::search_by_code(&state.pool, &code).await?;

    tracing::debug!(fragment = %code, results = results.len(), "Code search executed");

    Ok(Json(DataResponse { data: results }))
}
