//! Route definitions for the `/recipes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recipes;
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// GET  /            -> list (public)
/// GET  /checklist   -> checklist (requires auth)
/// POST /checklist   -> toggle_known (requires auth)
/// POST /import      -> import (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::list))
        .route(
            "/checklist",
            get(recipes::checklist).post(recipes::toggle_known),
        )
        .route("/import", post(recipes::import))
}
