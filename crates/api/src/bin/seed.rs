//! Recipe catalog seeder.
//!
//! Reads every `*.json` file in `RECIPES_DIR` (default `data/recipes`) and
//! synchronizes the named profession's catalog in one transaction: entries
//! are inserted or updated (restoring soft-deleted rows), and active recipes
//! missing from the file are soft-deleted.

use std::path::{Path, PathBuf};

use anyhow::Context;
use guildbook_core::catalog::{parse_catalog, profession_display_name};
use guildbook_db::repositories::{ProfessionRepo, RecipeRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guildbook_seed=info,guildbook_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let recipes_dir =
        PathBuf::from(std::env::var("RECIPES_DIR").unwrap_or_else(|_| "data/recipes".into()));

    let pool = guildbook_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    guildbook_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let files = catalog_files(&recipes_dir)?;
    tracing::info!(dir = %recipes_dir.display(), files = files.len(), "Seeding recipe catalogs");

    let mut tx = pool.begin().await?;

    for path in &files {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Non UTF-8 file name: {}", path.display()))?;
        let profession = profession_display_name(stem);

        let Some(profession_id) = ProfessionRepo::find_id_by_name(&mut *tx, &profession).await?
        else {
            tracing::warn!(%profession, file = %path.display(), "Profession not found, skipping");
            continue;
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let entries =
            parse_catalog(&raw).with_context(|| format!("Invalid catalog {}", path.display()))?;

        let summary = RecipeRepo::sync_catalog(&mut tx, profession_id, &entries).await?;
        tracing::info!(
            %profession,
            entries = entries.len(),
            upserted = summary.upserted,
            restored = summary.restored,
            soft_deleted = summary.soft_deleted,
            "Catalog synchronized"
        );
    }

    tx.commit().await?;
    tracing::info!("Seeding complete");
    Ok(())
}

/// The `*.json` files directly inside `dir`, sorted by name.
fn catalog_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
