//! Name matching between addon-exported recipe names and the recipe catalog.
//!
//! In-game addons report recipe names either as the crafted item
//! (`"Haste Potion"`) or as the teaching item (`"Recipe: Haste Potion"`).
//! Both forms must resolve to the same catalog row, so every catalog recipe is
//! indexed under its full lower-cased name and under its prefix-stripped
//! lower-cased name.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// Acquisition-type prefixes recognised on recipe names, tried in order.
pub const RECIPE_PREFIXES: &[&str] = &[
    "Recipe: ",
    "Plans: ",
    "Formula: ",
    "Schematic: ",
    "Design: ",
    "Pattern: ",
];

/// Trim `name` and remove at most one leading acquisition prefix.
///
/// Prefixes match case-insensitively against the trimmed name. Only the first
/// matching prefix is removed; the remainder is trimmed again but never
/// stripped a second time.
///
/// ```
/// use guildbook_core::recipe_match::strip_recipe_prefix;
///
/// assert_eq!(strip_recipe_prefix("  Recipe: Haste Potion "), "Haste Potion");
/// assert_eq!(strip_recipe_prefix("plans: Arcanite Reaper"), "Arcanite Reaper");
/// assert_eq!(strip_recipe_prefix("Flask of the Titans"), "Flask of the Titans");
/// ```
pub fn strip_recipe_prefix(name: &str) -> &str {
    let trimmed = name.trim();
    for prefix in RECIPE_PREFIXES {
        let head = trimmed.get(..prefix.len());
        if head.is_some_and(|h| h.eq_ignore_ascii_case(prefix)) {
            return trimmed[prefix.len()..].trim();
        }
    }
    trimmed
}

/// Lookup key for a reported or catalog name: prefix stripped, lower-cased.
pub fn match_key(name: &str) -> String {
    strip_recipe_prefix(name).to_lowercase()
}

/// Result of matching a batch of reported names against a [`MatchIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    /// Distinct catalog ids in the order they were first reported.
    pub matched_ids: Vec<DbId>,
    /// Canonical catalog names, parallel to `matched_ids`.
    pub matched_names: Vec<String>,
    /// Reported strings with no catalog match, verbatim and in input order.
    pub unmatched: Vec<String>,
}

/// Case-insensitive name index over one profession's active catalog.
#[derive(Debug, Default)]
pub struct MatchIndex {
    by_key: HashMap<String, DbId>,
    names: HashMap<DbId, String>,
}

impl MatchIndex {
    /// Index the given `(id, name)` catalog rows.
    ///
    /// Each recipe is registered under its lower-cased full name and its
    /// lower-cased prefix-stripped name. When two recipes share a key, the
    /// one registered last wins.
    pub fn build<'a, I>(catalog: I) -> Self
    where
        I: IntoIterator<Item = (DbId, &'a str)>,
    {
        let mut index = Self::default();
        for (id, name) in catalog {
            index.by_key.insert(name.to_lowercase(), id);
            index.by_key.insert(match_key(name), id);
            index.names.insert(id, name.to_string());
        }
        index
    }

    /// Number of catalog recipes indexed.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve one reported name to a catalog id.
    pub fn lookup(&self, reported: &str) -> Option<DbId> {
        self.by_key.get(&match_key(reported)).copied()
    }

    /// Canonical catalog name for `id`.
    pub fn name_of(&self, id: DbId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Match every reported name, deduplicating hits by catalog id.
    pub fn match_names<S: AsRef<str>>(&self, reported: &[S]) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();
        let mut seen = HashSet::new();

        for name in reported {
            let name = name.as_ref();
            match self.lookup(name) {
                Some(id) => {
                    if seen.insert(id) {
                        outcome.matched_ids.push(id);
                        if let Some(canonical) = self.name_of(id) {
                            outcome.matched_names.push(canonical.to_string());
                        }
                    }
                }
                None => outcome.unmatched.push(name.to_string()),
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alchemy() -> MatchIndex {
        MatchIndex::build([(1, "Haste Potion"), (2, "Destruction Potion")])
    }

    #[test]
    fn strips_each_known_prefix() {
        for (input, expected) in [
            ("Recipe: Haste Potion", "Haste Potion"),
            ("Plans: Arcanite Reaper", "Arcanite Reaper"),
            ("Formula: Enchant Weapon - Crusader", "Enchant Weapon - Crusader"),
            ("Schematic: Gnomish Battle Chicken", "Gnomish Battle Chicken"),
            ("Design: Figurine - Jade Owl", "Figurine - Jade Owl"),
            ("Pattern: Robe of the Archmage", "Robe of the Archmage"),
        ] {
            assert_eq!(strip_recipe_prefix(input), expected, "input: {input}");
        }
    }

    #[test]
    fn prefix_match_ignores_case_and_surrounding_whitespace() {
        assert_eq!(strip_recipe_prefix("  RECIPE: Haste Potion  "), "Haste Potion");
        assert_eq!(strip_recipe_prefix("pattern:   Mooncloth"), "Mooncloth");
    }

    #[test]
    fn strips_only_one_prefix() {
        assert_eq!(
            strip_recipe_prefix("Recipe: Pattern: Odd Name"),
            "Pattern: Odd Name"
        );
    }

    #[test]
    fn prefix_without_following_space_is_kept() {
        assert_eq!(strip_recipe_prefix("Recipe:Haste Potion"), "Recipe:Haste Potion");
    }

    #[test]
    fn non_ascii_names_do_not_panic() {
        assert_eq!(strip_recipe_prefix("Élixir"), "Élixir");
        assert_eq!(match_key("Recipe: Élixir"), "élixir");
    }

    #[test]
    fn matches_full_and_prefixed_names_to_same_id() {
        let index = alchemy();
        assert_eq!(index.lookup("Haste Potion"), Some(1));
        assert_eq!(index.lookup("Recipe: Haste Potion"), Some(1));
        assert_eq!(index.lookup("haste potion"), Some(1));
    }

    #[test]
    fn prefixed_catalog_name_matches_bare_report() {
        let index = MatchIndex::build([(7, "Recipe: Elixir of Giants")]);
        assert_eq!(index.lookup("Elixir of Giants"), Some(7));
        assert_eq!(index.lookup("recipe: elixir of giants"), Some(7));
        assert_eq!(index.name_of(7), Some("Recipe: Elixir of Giants"));
    }

    #[test]
    fn scenario_matches_two_and_reports_unknown() {
        let outcome =
            alchemy().match_names(&["Haste Potion", "Destruction Potion", "Unknown Recipe"]);
        assert_eq!(outcome.matched_ids, vec![1, 2]);
        assert_eq!(outcome.matched_names, vec!["Haste Potion", "Destruction Potion"]);
        assert_eq!(outcome.unmatched, vec!["Unknown Recipe"]);
    }

    #[test]
    fn duplicates_are_counted_once_in_first_seen_order() {
        let outcome = alchemy().match_names(&[
            "Destruction Potion",
            "Haste Potion",
            "Recipe: Destruction Potion",
            "destruction potion",
        ]);
        assert_eq!(outcome.matched_ids, vec![2, 1]);
        assert_eq!(outcome.matched_names, vec!["Destruction Potion", "Haste Potion"]);
        assert!(outcome.unmatched.is_empty());
    }

    #[test]
    fn unmatched_names_are_passed_through_verbatim() {
        let outcome = alchemy().match_names(&["  Mystery BREW ", "  Mystery BREW "]);
        assert!(outcome.matched_ids.is_empty());
        assert_eq!(outcome.unmatched, vec!["  Mystery BREW ", "  Mystery BREW "]);
    }

    #[test]
    fn empty_catalog_matches_nothing() {
        let index = MatchIndex::build(std::iter::empty());
        assert!(index.is_empty());
        let outcome = index.match_names(&["Haste Potion"]);
        assert_eq!(outcome.unmatched, vec!["Haste Potion"]);
    }
}
