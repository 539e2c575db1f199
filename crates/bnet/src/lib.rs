//! Battle.net OAuth and profile API client.
//!
//! Covers the login flow (authorize URL, code exchange, userinfo, token
//! revocation) and the account/guild lookups used to suggest characters for
//! import.

pub mod client;
pub mod guild;
pub mod types;

pub use client::{BattleNetClient, BnetConfig, BnetError};
pub use types::{TokenResponse, UserInfo, WowCharacter};
