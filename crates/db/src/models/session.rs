//! Login session model and DTOs.

use guildbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `sessions` table.
///
/// Holds the Battle.net bearer token server-side so it never travels inside
/// the client's JWT.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub access_token: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub access_token: String,
    pub expires_at: Timestamp,
}
