//! Guild membership filtering.

use std::collections::HashSet;

use crate::types::{GuildRoster, WowCharacter};

/// URL slug for a guild name: trimmed, lower-cased, whitespace runs joined
/// with `-`.
pub fn guild_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Distinct realm slugs of `characters`, in first-seen order.
pub fn realm_slugs(characters: &[WowCharacter]) -> Vec<&str> {
    let mut seen = HashSet::new();
    characters
        .iter()
        .map(|c| c.realm_slug.as_str())
        .filter(|slug| seen.insert(*slug))
        .collect()
}

/// Keep the characters listed in any of `rosters`, comparing name and realm
/// name case-insensitively.
pub fn filter_members(characters: Vec<WowCharacter>, rosters: &[GuildRoster]) -> Vec<WowCharacter> {
    let members: HashSet<(String, String)> = rosters
        .iter()
        .flat_map(|roster| &roster.members)
        .map(|m| {
            (
                m.character.name.to_lowercase(),
                m.character.realm.name.to_lowercase(),
            )
        })
        .collect();

    characters
        .into_iter()
        .filter(|c| members.contains(&(c.name.to_lowercase(), c.realm.to_lowercase())))
        .collect()
}
