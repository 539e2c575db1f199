//! Route definitions for the `/characters` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Routes mounted at `/characters`. All require auth.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /import   -> import_candidates
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(characters::list).post(characters::create))
        .route("/import", get(characters::import_candidates))
        .route("/{id}", delete(characters::delete))
}
