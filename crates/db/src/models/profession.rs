//! Profession reference data.

use guildbook_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `professions` table, as listed to clients.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profession {
    pub id: DbId,
    pub name: String,
    pub icon_url: Option<String>,
}
