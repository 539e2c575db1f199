//! Recipe entity models.

use guildbook_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A character that knows a recipe, shown alongside catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crafter {
    pub name: String,
    pub realm: String,
}

/// An active catalog recipe with the characters that know it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeWithCrafters {
    pub id: DbId,
    pub name: String,
    pub source: String,
    pub zone: Option<String>,
    pub reputation_requirement: Option<String>,
    pub dropped_by: Option<Vec<String>>,
    pub url: Option<String>,
    pub rarity: Option<String>,
    pub crafters: Json<Vec<Crafter>>,
}

/// Minimal `(id, name)` projection of an active recipe used for matching.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeName {
    pub id: DbId,
    pub name: String,
}

/// Per-profession counts reported by a catalog sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSyncSummary {
    pub upserted: u64,
    pub restored: u64,
    pub soft_deleted: u64,
}
