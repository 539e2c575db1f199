//! Handlers for the `/characters` resource.
//!
//! Every route is scoped to the authenticated owner; another user's
//! character behaves as if it does not exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use guildbook_bnet::WowCharacter;
use guildbook_core::error::CoreError;
use guildbook_core::types::DbId;
use guildbook_db::models::character::{Character, CharacterWithProfession, CreateCharacter};
use guildbook_db::repositories::{CharacterRepo, SessionRepo};

use crate::error::{AppError, AppResult};
use crate::extractors::json::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/v1/characters
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<CharacterWithProfession>>> {
    let characters = CharacterRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(characters))
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    if input.name.trim().is_empty() || input.realm.trim().is_empty() {
        return Err(AppError::BadRequest("name and realm are required".into()));
    }
    let character = CharacterRepo::create(&state.pool, user.user_id, &input)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .and_then(|db| db.constraint())
                .is_some_and(|c| c == "uq_characters_owner_name_realm_profession");
            if duplicate {
                AppError::Core(CoreError::Conflict(format!(
                    "{} on {} is already tracked for this profession",
                    input.name.trim(),
                    input.realm.trim()
                )))
            } else {
                AppError::Database(e)
            }
        })?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// DELETE /api/v1/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if CharacterRepo::delete_owned(&state.pool, id, user.user_id).await? {
        Ok(Json(SuccessResponse::ok()))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
    }
}

/// GET /api/v1/characters/import
///
/// Account characters that belong to the configured guild. Battle.net
/// failures degrade to an empty list.
pub async fn import_candidates(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<WowCharacter>>> {
    let Some(session) =
        SessionRepo::find_active(&state.pool, user.session_id, user.user_id).await?
    else {
        return Ok(Json(Vec::new()));
    };

    match state
        .bnet
        .fetch_guild_characters(&session.access_token, &state.config.guild_name)
        .await
    {
        Ok(characters) => Ok(Json(characters)),
        Err(e) => {
            tracing::warn!(
                user_id = user.user_id,
                guild = %state.config.guild_name,
                error = %e,
                "Guild character lookup failed"
            );
            Ok(Json(Vec::new()))
        }
    }
}
