//! Handlers for the `/professions` resource.

use axum::extract::State;
use axum::Json;
use guildbook_db::models::profession::Profession;
use guildbook_db::repositories::ProfessionRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/professions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Profession>>> {
    let professions = ProfessionRepo::list(&state.pool).await?;
    Ok(Json(professions))
}
