//! Handlers for the `/recipes` resource: catalog browsing, per-character
//! checklists, single-recipe toggles, and addon imports.

use axum::extract::{Query, State};
use axum::Json;
use guildbook_core::error::CoreError;
use guildbook_core::types::DbId;
use guildbook_db::import::{reconcile_import, ImportReport, RecipeImport};
use guildbook_db::models::known_recipe::ChecklistEntry;
use guildbook_db::models::recipe::RecipeWithCrafters;
use guildbook_db::repositories::{CharacterRepo, KnownRecipeRepo, RecipeRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extractors::json::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /recipes`.
#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub profession_id: Option<String>,
}

/// Query parameters for `GET /recipes/checklist`.
#[derive(Debug, Deserialize)]
pub struct ChecklistParams {
    pub character_id: Option<String>,
}

/// Request body for `POST /recipes/checklist`.
#[derive(Debug, Deserialize)]
pub struct ToggleKnownRequest {
    pub character_id: DbId,
    pub recipe_id: DbId,
    pub known: bool,
}

/// Request body for `POST /recipes/import`: one addon export.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub character: String,
    pub realm: String,
    pub profession: String,
    pub recipes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/recipes?profession_id=
///
/// Active catalog of one profession with the characters that know each recipe.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<Vec<RecipeWithCrafters>>> {
    let profession_id = require_id(params.profession_id.as_deref(), "profession_id")?;
    let recipes = RecipeRepo::list_with_crafters(&state.pool, profession_id).await?;
    Ok(Json(recipes))
}

/// GET /api/v1/recipes/checklist?character_id=
pub async fn checklist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ChecklistParams>,
) -> AppResult<Json<Vec<ChecklistEntry>>> {
    let character_id = require_id(params.character_id.as_deref(), "character_id")?;
    let character = CharacterRepo::find_owned(&state.pool, character_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: character_id,
        }))?;

    let profession_id = character
        .profession_id
        .ok_or_else(|| AppError::BadRequest("Character has no profession assigned".into()))?;

    let entries = KnownRecipeRepo::checklist(&state.pool, character.id, profession_id).await?;
    Ok(Json(entries))
}

/// POST /api/v1/recipes/checklist
///
/// Mark one recipe known or unknown for an owned character. Marking known
/// requires the recipe to be active in the character's profession.
pub async fn toggle_known(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<ToggleKnownRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let character = CharacterRepo::find_owned(&state.pool, input.character_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: input.character_id,
        }))?;

    if input.known {
        let profession_id = character
            .profession_id
            .ok_or_else(|| AppError::BadRequest("Character has no profession assigned".into()))?;

        if !RecipeRepo::is_active_in_profession(&state.pool, input.recipe_id, profession_id)
            .await?
        {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Recipe",
                id: input.recipe_id,
            }));
        }
        KnownRecipeRepo::mark_known(&state.pool, character.id, input.recipe_id).await?;
    } else {
        KnownRecipeRepo::mark_unknown(&state.pool, character.id, input.recipe_id).await?;
    }

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/recipes/import
pub async fn import(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<ImportRequest>,
) -> AppResult<Json<ImportReport>> {
    let request = RecipeImport {
        character: input.character,
        realm: input.realm,
        profession: input.profession,
        recipes: input.recipes,
    };
    let report = reconcile_import(&state.pool, user.user_id, &request).await?;
    Ok(Json(report))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a required numeric id from the query string.
fn require_id(raw: Option<&str>, name: &str) -> AppResult<DbId> {
    raw.and_then(|v| v.trim().parse::<DbId>().ok())
        .ok_or_else(|| AppError::BadRequest(format!("{name} query parameter is required")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn require_id_parses_numbers() {
        assert_eq!(require_id(Some("42"), "profession_id").unwrap(), 42);
        assert_eq!(require_id(Some(" 7 "), "profession_id").unwrap(), 7);
    }

    #[test]
    fn require_id_rejects_missing_or_non_numeric() {
        assert_matches!(
            require_id(None, "profession_id"),
            Err(AppError::BadRequest(msg)) if msg == "profession_id query parameter is required"
        );
        assert_matches!(require_id(Some("abc"), "character_id"), Err(AppError::BadRequest(_)));
    }
}
