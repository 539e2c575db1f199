//! Repository for the `professions` table.

use guildbook_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::profession::Profession;

/// Read-only access to the seeded professions.
pub struct ProfessionRepo;

impl ProfessionRepo {
    /// List all professions ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Profession>, sqlx::Error> {
        sqlx::query_as::<_, Profession>("SELECT id, name, icon_url FROM professions ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Resolve a profession name case-insensitively.
    pub async fn find_id_by_name<'e, E>(executor: E, name: &str) -> Result<Option<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM professions WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(executor)
            .await
    }
}
