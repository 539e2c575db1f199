//! Repository for the `characters` table.

use guildbook_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::character::{Character, CharacterWithProfession, CreateCharacter};

const COLUMNS: &str = "id, name, realm, profession_id";

/// Owner-scoped CRUD for characters plus the import find-or-create helpers.
///
/// Every public lookup takes the owning `user_id`; a character belonging to
/// someone else is indistinguishable from a missing one.
pub struct CharacterRepo;

impl CharacterRepo {
    /// List a user's characters with their profession names, ordered by name.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CharacterWithProfession>, sqlx::Error> {
        sqlx::query_as::<_, CharacterWithProfession>(
            "SELECT c.id, c.name, c.realm, c.profession_id, p.name AS profession_name
             FROM characters c
             LEFT JOIN professions p ON p.id = c.profession_id
             WHERE c.user_id = $1
             ORDER BY c.name, c.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Insert a character for `user_id`. Name and realm are stored trimmed.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (user_id, name, realm, profession_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(input.realm.trim())
            .bind(input.profession_id)
            .fetch_one(pool)
            .await
    }

    /// Find a character by id if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a character owned by `user_id`. Returns `true` if a row was removed.
    ///
    /// Known-recipe rows go with it via `ON DELETE CASCADE`.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the character row an import targets: same owner, name and realm
    /// compared case-insensitively, and exactly this profession.
    pub async fn find_import_target(
        conn: &mut PgConnection,
        user_id: DbId,
        name: &str,
        realm: &str,
        profession_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM characters
             WHERE user_id = $1
               AND LOWER(name) = LOWER($2)
               AND LOWER(realm) = LOWER($3)
               AND profession_id = $4
             ORDER BY id
             LIMIT 1",
        )
        .bind(user_id)
        .bind(name)
        .bind(realm)
        .bind(profession_id)
        .fetch_optional(conn)
        .await
    }

    /// Insert an import target unless a concurrent import already did.
    ///
    /// Returns `None` when the unique index
    /// `uq_characters_owner_name_realm_profession` absorbed the insert; the
    /// caller then re-reads with [`Self::find_import_target`].
    pub async fn create_import_target(
        conn: &mut PgConnection,
        user_id: DbId,
        name: &str,
        realm: &str,
        profession_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO characters (user_id, name, realm, profession_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, LOWER(name), LOWER(realm), profession_id) DO NOTHING
             RETURNING id",
        )
        .bind(user_id)
        .bind(name)
        .bind(realm)
        .bind(profession_id)
        .fetch_optional(conn)
        .await
    }
}
