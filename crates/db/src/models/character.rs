//! Character entity model and DTOs.

use guildbook_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A character row as returned by create.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub realm: String,
    pub profession_id: Option<DbId>,
}

/// A character joined with its profession name, for the owner's list view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterWithProfession {
    pub id: DbId,
    pub name: String,
    pub realm: String,
    pub profession_id: Option<DbId>,
    pub profession_name: Option<String>,
}

/// DTO for creating a character owned by the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub realm: String,
    pub profession_id: Option<DbId>,
}
