//! Route definitions for the `/records` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// ```text
/// POST   /            -> create
/// GET    /{code}      -> get_by_code
/// PUT    /{code}      -> update
/// DELETE /{code}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(records::create)).route(
        "/{code}",
        get(records::get_by_code)
            .put(records::update)
            .delete(records::delete),
    )
}
