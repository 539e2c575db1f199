//! Wire types for the Battle.net OAuth and profile endpoints.

use serde::{Deserialize, Serialize};

/// Response of `POST /token` for the authorization-code grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response of `GET /userinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    /// Stable account subject id.
    pub sub: String,
    pub battletag: String,
}

/// An account character as offered to the client for import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WowCharacter {
    pub name: String,
    /// Realm display name.
    pub realm: String,
    #[serde(skip)]
    pub realm_slug: String,
}

// ---------------------------------------------------------------------------
// Profile API payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AccountProfile {
    #[serde(default)]
    pub wow_accounts: Vec<WowAccount>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WowAccount {
    #[serde(default)]
    pub characters: Vec<AccountCharacter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountCharacter {
    pub name: String,
    pub realm: AccountRealm,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountRealm {
    pub slug: String,
    pub name: String,
}

impl AccountProfile {
    /// Flatten every account's characters, skipping accounts without any.
    pub(crate) fn into_characters(self) -> Vec<WowCharacter> {
        self.wow_accounts
            .into_iter()
            .flat_map(|account| account.characters)
            .map(|c| WowCharacter {
                name: c.name,
                realm: c.realm.name,
                realm_slug: c.realm.slug,
            })
            .collect()
    }
}

/// Response of the guild roster endpoint. Only the fields used for
/// membership checks are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuildRoster {
    #[serde(default)]
    pub members: Vec<RosterMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterMember {
    pub character: RosterCharacter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterCharacter {
    pub name: String,
    pub realm: RosterRealm,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterRealm {
    pub name: String,
}
