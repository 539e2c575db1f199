//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use guildbook_db::repositories::RecipeRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Guild whose roster filters the character import list.
    pub guild: String,
    /// Active catalog size; `None` when the database is down. Zero means the
    /// catalog has not been seeded yet.
    pub catalog_recipes: Option<i64>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_recipes = match RecipeRepo::count_active(&state.pool).await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = catalog_recipes.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        guild: state.config.guild_name.clone(),
        catalog_recipes,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
