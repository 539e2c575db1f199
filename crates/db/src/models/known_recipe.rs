//! Character checklist rows.

use guildbook_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A catalog recipe annotated with whether one character knows it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistEntry {
    pub id: DbId,
    pub name: String,
    pub source: String,
    pub zone: Option<String>,
    pub reputation_requirement: Option<String>,
    pub dropped_by: Option<Vec<String>>,
    pub url: Option<String>,
    pub rarity: Option<String>,
    pub known: bool,
}
