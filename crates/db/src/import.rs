//! Addon-export recipe import.
//!
//! [`reconcile_import`] makes one character's known-recipe set for one
//! profession equal to the catalog recipes named in an addon export:
//!
//! 1. Resolve the profession (case-insensitive). Unknown names fail before
//!    any write.
//! 2. Find or create the `(owner, name, realm, profession)` character row.
//! 3. Load the profession's active catalog and match the reported names.
//! 4. Count matched recipes the character already knows (`skipped`).
//! 5. Delete known recipes of this profession that were not matched, then
//!    insert the matched ones that are missing.
//!
//! Steps 2-5 run in a single transaction.

use guildbook_core::recipe_match::MatchIndex;
use guildbook_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

use crate::repositories::{CharacterRepo, KnownRecipeRepo, ProfessionRepo, RecipeRepo};

/// One addon export, already shape-validated by the caller.
#[derive(Debug, Clone)]
pub struct RecipeImport {
    pub character: String,
    pub realm: String,
    pub profession: String,
    pub recipes: Vec<String>,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub character_id: DbId,
    /// Number of distinct catalog recipes matched.
    pub matched: usize,
    /// Canonical names of matched recipes in first-reported order.
    pub matched_recipes: Vec<String>,
    /// Matched recipes the character already knew before this import.
    pub skipped: usize,
    /// Reported names with no catalog match, verbatim and in input order.
    pub unmatched: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Unknown profession: {0}")]
    UnknownProfession(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The unique index rejected our insert, yet the winning row is not visible.
    #[error("Import target character vanished after a concurrent insert")]
    TargetMissing,
}

/// Import an addon export for `user_id`. See the module docs for the steps.
///
/// Any database failure rolls back the whole transaction, so a failed import
/// leaves no trace (including no newly created character).
pub async fn reconcile_import(
    pool: &PgPool,
    user_id: DbId,
    input: &RecipeImport,
) -> Result<ImportReport, ImportError> {
    let profession_id = ProfessionRepo::find_id_by_name(pool, &input.profession)
        .await?
        .ok_or_else(|| ImportError::UnknownProfession(input.profession.clone()))?;

    let name = input.character.trim();
    let realm = input.realm.trim();

    let mut tx = pool.begin().await?;

    let character_id = match CharacterRepo::find_import_target(
        &mut tx,
        user_id,
        name,
        realm,
        profession_id,
    )
    .await?
    {
        Some(id) => id,
        None => {
            match CharacterRepo::create_import_target(&mut tx, user_id, name, realm, profession_id)
                .await?
            {
                Some(id) => id,
                // Lost a race with a concurrent import; its row is now visible.
                None => {
                    CharacterRepo::find_import_target(&mut tx, user_id, name, realm, profession_id)
                        .await?
                        .ok_or(ImportError::TargetMissing)?
                }
            }
        }
    };

    let catalog = RecipeRepo::list_active_names(&mut tx, profession_id).await?;
    let index = MatchIndex::build(catalog.iter().map(|r| (r.id, r.name.as_str())));
    let outcome = index.match_names(&input.recipes);

    let skipped =
        KnownRecipeRepo::list_known_among(&mut tx, character_id, &outcome.matched_ids)
            .await?
            .len();

    let removed =
        KnownRecipeRepo::delete_not_in(&mut tx, character_id, profession_id, &outcome.matched_ids)
            .await?;
    let added = KnownRecipeRepo::insert_missing(&mut tx, character_id, &outcome.matched_ids).await?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        character_id,
        profession_id,
        catalog_size = index.len(),
        matched = outcome.matched_ids.len(),
        skipped,
        unmatched = outcome.unmatched.len(),
        added,
        removed,
        "Recipe import reconciled"
    );

    Ok(ImportReport {
        character_id,
        matched: outcome.matched_ids.len(),
        matched_recipes: outcome.matched_names,
        skipped,
        unmatched: outcome.unmatched,
    })
}
