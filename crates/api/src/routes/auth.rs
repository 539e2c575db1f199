//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /login     -> login (redirects to Battle.net)
/// GET  /callback  -> callback (OAuth redirect target)
/// GET  /me        -> me (requires auth)
/// POST /logout    -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}
