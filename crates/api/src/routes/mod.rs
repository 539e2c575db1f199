pub mod auth;
pub mod characters;
pub mod health;
pub mod professions;
pub mod recipes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     Battle.net login redirect (public)
/// /auth/callback                  OAuth callback (public)
/// /auth/me                        current user (auth)
/// /auth/logout                    end session (auth)
///
/// /professions                    list (public)
///
/// /recipes                        catalog with crafters (public)
/// /recipes/checklist              per-character checklist, toggle (auth)
/// /recipes/import                 addon import (auth)
///
/// /characters                     list, create (auth)
/// /characters/import              guild characters from Battle.net (auth)
/// /characters/{id}                delete (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/professions", professions::router())
        .nest("/recipes", recipes::router())
        .nest("/characters", characters::router())
}
