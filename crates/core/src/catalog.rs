//! Recipe catalog seed-file format.
//!
//! Each profession's catalog is shipped as `<profession>.json`, an array of
//! [`RecipeEntry`] objects. The file stem names the profession.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One recipe as it appears in a catalog seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub name: String,
    /// Acquisition kind, e.g. `"trainer"`, `"drop"`, `"vendor"`, `"quest"`.
    pub source: String,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub reputation_requirement: Option<String>,
    #[serde(default)]
    pub dropped_by: Option<Vec<String>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
}

/// Profession display name for a seed-file stem: first letter upper-cased.
///
/// ```
/// use guildbook_core::catalog::profession_display_name;
///
/// assert_eq!(profession_display_name("alchemy"), "Alchemy");
/// ```
pub fn profession_display_name(file_stem: &str) -> String {
    let mut chars = file_stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse and validate the contents of a seed file.
///
/// Rejects entries with a blank name or source and names repeated within the
/// file, since `(profession, name)` identifies a recipe.
pub fn parse_catalog(raw: &str) -> Result<Vec<RecipeEntry>, CoreError> {
    let entries: Vec<RecipeEntry> = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid catalog JSON: {e}")))?;

    let mut seen = std::collections::HashSet::new();
    for (i, entry) in entries.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Catalog entry {i} has an empty name"
            )));
        }
        if entry.source.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Catalog entry '{}' has an empty source",
                entry.name
            )));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(CoreError::Validation(format!(
                "Catalog entry '{}' appears more than once",
                entry.name
            )));
        }
    }

    Ok(entries)
}
