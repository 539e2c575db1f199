//! User entity model.

use guildbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table. One per Battle.net account.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    /// Stable OAuth subject id.
    pub battle_net_id: String,
    pub battletag: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
