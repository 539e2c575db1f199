//! Repository for the `recipes` table.

use guildbook_core::catalog::RecipeEntry;
use guildbook_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::recipe::{CatalogSyncSummary, RecipeName, RecipeWithCrafters};

/// Catalog reads and the seed-time catalog sync.
///
/// Soft-deleted recipes (`deleted_at IS NOT NULL`) are invisible to every read
/// here.
pub struct RecipeRepo;

impl RecipeRepo {
    /// List a profession's active recipes ordered by name, each with the
    /// characters (any owner) that know it.
    pub async fn list_with_crafters(
        pool: &PgPool,
        profession_id: DbId,
    ) -> Result<Vec<RecipeWithCrafters>, sqlx::Error> {
        sqlx::query_as::<_, RecipeWithCrafters>(
            "SELECT
                r.id, r.name, r.source, r.zone, r.reputation_requirement,
                r.dropped_by, r.url, r.rarity,
                COALESCE(
                    json_agg(json_build_object('name', c.name, 'realm', c.realm)
                             ORDER BY c.name)
                        FILTER (WHERE c.id IS NOT NULL),
                    '[]'::json
                ) AS crafters
             FROM recipes r
             LEFT JOIN character_recipes cr ON cr.recipe_id = r.id
             LEFT JOIN characters c ON c.id = cr.character_id
             WHERE r.profession_id = $1 AND r.deleted_at IS NULL
             GROUP BY r.id
             ORDER BY r.name",
        )
        .bind(profession_id)
        .fetch_all(pool)
        .await
    }

    /// The active catalog of a profession as `(id, name)` pairs, ordered by id.
    pub async fn list_active_names(
        conn: &mut PgConnection,
        profession_id: DbId,
    ) -> Result<Vec<RecipeName>, sqlx::Error> {
        sqlx::query_as::<_, RecipeName>(
            "SELECT id, name FROM recipes
             WHERE profession_id = $1 AND deleted_at IS NULL
             ORDER BY id",
        )
        .bind(profession_id)
        .fetch_all(conn)
        .await
    }

    /// Number of active recipes across all professions.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }

    /// Whether `recipe_id` is an active recipe of `profession_id`.
    pub async fn is_active_in_profession(
        pool: &PgPool,
        recipe_id: DbId,
        profession_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM recipes
                WHERE id = $1 AND profession_id = $2 AND deleted_at IS NULL
             )",
        )
        .bind(recipe_id)
        .bind(profession_id)
        .fetch_one(pool)
        .await
    }

    /// Make a profession's catalog match `entries`.
    ///
    /// Each entry updates the row with the same `(profession_id, name)`
    /// (restoring it if soft-deleted) or inserts a new one. Active rows whose
    /// names are absent from `entries` are soft-deleted. Known-recipe rows are
    /// never touched.
    pub async fn sync_catalog(
        conn: &mut PgConnection,
        profession_id: DbId,
        entries: &[RecipeEntry],
    ) -> Result<CatalogSyncSummary, sqlx::Error> {
        let mut summary = CatalogSyncSummary::default();

        for entry in entries {
            let was_deleted = Self::update_entry(conn, profession_id, entry).await?;
            match was_deleted {
                Some(true) => summary.restored += 1,
                Some(false) => {}
                None => Self::insert_entry(conn, profession_id, entry).await?,
            }
            summary.upserted += 1;
        }

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        let result = sqlx::query(
            "UPDATE recipes
                SET deleted_at = NOW(), updated_at = NOW()
              WHERE profession_id = $1
                AND deleted_at IS NULL
                AND NOT (name = ANY($2))",
        )
        .bind(profession_id)
        .bind(&names)
        .execute(&mut *conn)
        .await?;
        summary.soft_deleted = result.rows_affected();

        Ok(summary)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Update the row for `entry`, preferring an active row over soft-deleted
    /// ones. Returns whether the updated row had been soft-deleted, or `None`
    /// if no row carries this name.
    async fn update_entry(
        conn: &mut PgConnection,
        profession_id: DbId,
        entry: &RecipeEntry,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "WITH target AS (
                SELECT id, deleted_at IS NOT NULL AS was_deleted
                FROM recipes
                WHERE profession_id = $1 AND name = $2
                ORDER BY deleted_at IS NOT NULL, id DESC
                LIMIT 1
             )
             UPDATE recipes r
                SET source = $3,
                    zone = $4,
                    reputation_requirement = $5,
                    dropped_by = $6,
                    url = $7,
                    rarity = $8,
                    updated_at = NOW(),
                    deleted_at = NULL
               FROM target
              WHERE r.id = target.id
             RETURNING target.was_deleted",
        )
        .bind(profession_id)
        .bind(&entry.name)
        .bind(&entry.source)
        .bind(&entry.zone)
        .bind(&entry.reputation_requirement)
        .bind(&entry.dropped_by)
        .bind(&entry.url)
        .bind(&entry.rarity)
        .fetch_optional(&mut *conn)
        .await
    }

    async fn insert_entry(
        conn: &mut PgConnection,
        profession_id: DbId,
        entry: &RecipeEntry,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO recipes
                (profession_id, name, source, zone, reputation_requirement, dropped_by, url, rarity)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(profession_id)
        .bind(&entry.name)
        .bind(&entry.source)
        .bind(&entry.zone)
        .bind(&entry.reputation_requirement)
        .bind(&entry.dropped_by)
        .bind(&entry.url)
        .bind(&entry.rarity)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
