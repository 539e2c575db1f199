//! Repository for the `users` table.

use guildbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

const COLUMNS: &str = "id, battle_net_id, battletag, created_at, updated_at";

/// Provides lookup and login-time upsert for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user for a Battle.net subject, or refresh the battletag of the
    /// existing one. Returns the stored row either way.
    pub async fn upsert_by_battle_net_id(
        pool: &PgPool,
        battle_net_id: &str,
        battletag: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (battle_net_id, battletag)
             VALUES ($1, $2)
             ON CONFLICT (battle_net_id)
             DO UPDATE SET battletag = EXCLUDED.battletag, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(battle_net_id)
            .bind(battletag)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
