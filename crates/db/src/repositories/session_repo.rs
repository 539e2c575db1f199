//! Repository for the `sessions` table.

use guildbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

const COLUMNS: &str = "id, user_id, access_token, expires_at, revoked_at, created_at";

/// Login sessions backing issued JWTs.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, access_token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.access_token)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session of `user_id` that is neither revoked nor expired.
    pub async fn find_active(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE id = $1 AND user_id = $2
               AND revoked_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Revoke an active session, returning its provider access token so the
    /// caller can revoke that too. `None` if nothing was active.
    pub async fn revoke(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "UPDATE sessions SET revoked_at = NOW()
             WHERE id = $1 AND user_id = $2 AND revoked_at IS NULL
             RETURNING access_token",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
