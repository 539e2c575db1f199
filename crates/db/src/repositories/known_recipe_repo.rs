//! Repository for the `character_recipes` join table.

use guildbook_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::known_recipe::ChecklistEntry;

/// Known-recipe associations between characters and recipes.
///
/// Presence of a `(character_id, recipe_id)` row means the character knows
/// the recipe. Callers are responsible for the ownership check.
pub struct KnownRecipeRepo;

impl KnownRecipeRepo {
    /// The active catalog of `profession_id` with a `known` flag for one character.
    pub async fn checklist(
        pool: &PgPool,
        character_id: DbId,
        profession_id: DbId,
    ) -> Result<Vec<ChecklistEntry>, sqlx::Error> {
        sqlx::query_as::<_, ChecklistEntry>(
            "SELECT
                r.id, r.name, r.source, r.zone, r.reputation_requirement,
                r.dropped_by, r.url, r.rarity,
                (cr.character_id IS NOT NULL) AS known
             FROM recipes r
             LEFT JOIN character_recipes cr
               ON cr.recipe_id = r.id AND cr.character_id = $1
             WHERE r.profession_id = $2 AND r.deleted_at IS NULL
             ORDER BY r.name",
        )
        .bind(character_id)
        .bind(profession_id)
        .fetch_all(pool)
        .await
    }

    /// Record that a character knows a recipe. Idempotent; returns `true` if a
    /// row was inserted.
    pub async fn mark_known(
        pool: &PgPool,
        character_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO character_recipes (character_id, recipe_id)
             VALUES ($1, $2)
             ON CONFLICT (character_id, recipe_id) DO NOTHING",
        )
        .bind(character_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Forget a known recipe. Returns `true` if a row was removed.
    pub async fn mark_unknown(
        pool: &PgPool,
        character_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM character_recipes WHERE character_id = $1 AND recipe_id = $2")
                .bind(character_id)
                .bind(recipe_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All recipe ids a character knows, ascending.
    pub async fn list_recipe_ids(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT recipe_id FROM character_recipes WHERE character_id = $1 ORDER BY recipe_id",
        )
        .bind(character_id)
        .fetch_all(pool)
        .await
    }

    /// The subset of `recipe_ids` the character already knows.
    pub async fn list_known_among(
        conn: &mut PgConnection,
        character_id: DbId,
        recipe_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT recipe_id FROM character_recipes
             WHERE character_id = $1 AND recipe_id = ANY($2)",
        )
        .bind(character_id)
        .bind(recipe_ids)
        .fetch_all(conn)
        .await
    }

    /// Delete the character's known recipes that belong to the active catalog
    /// of `profession_id` and are not in `keep_ids`.
    ///
    /// An empty `keep_ids` clears every such row. Rows pointing at
    /// soft-deleted recipes or other professions are left alone.
    pub async fn delete_not_in(
        conn: &mut PgConnection,
        character_id: DbId,
        profession_id: DbId,
        keep_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM character_recipes cr
             USING recipes r
             WHERE cr.recipe_id = r.id
               AND cr.character_id = $1
               AND r.profession_id = $2
               AND r.deleted_at IS NULL
               AND NOT (cr.recipe_id = ANY($3))",
        )
        .bind(character_id)
        .bind(profession_id)
        .bind(keep_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Insert a known-recipe row for every id in `recipe_ids` that is not
    /// already present. Returns the number of rows inserted.
    pub async fn insert_missing(
        conn: &mut PgConnection,
        character_id: DbId,
        recipe_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if recipe_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO character_recipes (character_id, recipe_id)
             SELECT $1, UNNEST($2::bigint[])
             ON CONFLICT (character_id, recipe_id) DO NOTHING",
        )
        .bind(character_id)
        .bind(recipe_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
