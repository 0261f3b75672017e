pub mod health;
pub mod records;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /records                     create
/// /records/{code}              get, update, delete
///
/// /search/name/{name}          substring search on person name
/// /search/code/{code}          substring search on code
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/records", records::router())
        .nest("/search", search::router())
}
