//! Repository for the `oauth_states` table.
//!
//! Each login attempt stores a random `state` value that the OAuth callback
//! must present exactly once within [`STATE_TTL_MINS`].

use sqlx::PgPool;

/// Minutes a login `state` stays redeemable.
pub const STATE_TTL_MINS: i32 = 10;

/// Single-use OAuth CSRF states.
pub struct OAuthStateRepo;

impl OAuthStateRepo {
    /// Store a new state, purging ones that can no longer be redeemed.
    pub async fn create(pool: &PgPool, state: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM oauth_states WHERE created_at <= NOW() - make_interval(mins => $1)",
        )
        .bind(STATE_TTL_MINS)
        .execute(pool)
        .await?;

        sqlx::query("INSERT INTO oauth_states (state) VALUES ($1)")
            .bind(state)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Redeem a state. Returns `true` only the first time a fresh state is
    /// presented.
    pub async fn consume(pool: &PgPool, state: &str) -> Result<bool, sqlx::Error> {
        let consumed = sqlx::query_scalar::<_, String>(
            "DELETE FROM oauth_states
             WHERE state = $1 AND created_at > NOW() - make_interval(mins => $2)
             RETURNING state",
        )
        .bind(state)
        .bind(STATE_TTL_MINS)
        .fetch_optional(pool)
        .await?;
        Ok(consumed.is_some())
    }
}
