//! Route definitions for record search.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Routes mounted at `/search`.
///
/// ```text
/// GET /name/{name}   -> by_name
/// GET /code/{code}   -> by_code
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/name/{name}", get(search::by_name))
        .route("/code/{code}", get(search::by_code))
}
