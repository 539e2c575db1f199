//! HTTP client for the Battle.net OAuth and profile APIs.

use serde::de::DeserializeOwned;

use crate::guild::{filter_members, guild_slug, realm_slugs};
use crate::types::{AccountProfile, GuildRoster, TokenResponse, UserInfo, WowCharacter};

/// OAuth scopes requested at login.
pub const LOGIN_SCOPE: &str = "openid wow.profile";

/// Battle.net client settings. Endpoints default to the US region.
#[derive(Debug, Clone)]
pub struct BnetConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Fixed OAuth redirect URI. When `None` the caller derives one from the
    /// incoming request.
    pub redirect_uri: Option<String>,
    /// Authorization server base, e.g. `https://oauth.battle.net`.
    pub oauth_url: String,
    /// Profile/game-data API base, e.g. `https://us.api.blizzard.com`.
    pub api_url: String,
    /// Profile namespace used for account and roster lookups.
    pub namespace: String,
}

impl Default for BnetConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            oauth_url: "https://oauth.battle.net".to_string(),
            api_url: "https://us.api.blizzard.com".to_string(),
            namespace: "profile-classic1x-us".to_string(),
        }
    }
}

/// Errors from the Battle.net client.
#[derive(Debug, thiserror::Error)]
pub enum BnetError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Battle.net answered with a non-2xx status.
    #[error("Battle.net API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Client credentials are not configured.
    #[error("Battle.net client credentials are not configured")]
    NotConfigured,
}

/// Battle.net API client. Cheap to clone; shares one connection pool.
#[derive(Debug, Clone)]
pub struct BattleNetClient {
    client: reqwest::Client,
    config: BnetConfig,
}

impl BattleNetClient {
    pub fn new(config: BnetConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: BnetConfig) -> Self {
        Self { client, config }
    }

    /// Build the authorization URL the browser is redirected to at login.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> Result<String, BnetError> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or(BnetError::NotConfigured)?;

        // Built but never sent; reqwest does the query encoding.
        let request = self
            .client
            .get(format!("{}/authorize", self.config.oauth_url))
            .query(&[
                ("client_id", client_id),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", LOGIN_SCOPE),
                ("state", state),
            ])
            .build()?;
        Ok(request.url().to_string())
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Sends `POST /token` with client credentials as HTTP Basic auth and a
    /// form-encoded body.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, BnetError> {
        let (client_id, client_secret) = self.credentials()?;
        let response = self
            .client
            .post(format!("{}/token", self.config.oauth_url))
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the account subject id and battletag for a bearer token.
    pub async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, BnetError> {
        let response = self
            .client
            .get(format!("{}/userinfo", self.config.oauth_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Revoke an access token at the authorization server.
    pub async fn revoke_token(&self, token: &str) -> Result<(), BnetError> {
        let (client_id, client_secret) = self.credentials()?;
        let response = self
            .client
            .post(format!("{}/revoke", self.config.oauth_url))
            .basic_auth(client_id, Some(client_secret))
            .form(&[("token", token)])
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// All characters on the account's game licenses.
    pub async fn fetch_wow_characters(
        &self,
        access_token: &str,
    ) -> Result<Vec<WowCharacter>, BnetError> {
        let response = self
            .client
            .get(format!("{}/profile/user/wow", self.config.api_url))
            .query(&[
                ("namespace", self.config.namespace.as_str()),
                ("locale", "en_US"),
            ])
            .bearer_auth(access_token)
            .send()
            .await?;

        let profile: AccountProfile = Self::parse_response(response).await?;
        Ok(profile.into_characters())
    }

    /// Roster of one guild on one realm.
    pub async fn fetch_guild_roster(
        &self,
        access_token: &str,
        realm_slug: &str,
        guild_slug: &str,
    ) -> Result<GuildRoster, BnetError> {
        let response = self
            .client
            .get(format!(
                "{}/data/wow/guild/{}/{}/roster",
                self.config.api_url, realm_slug, guild_slug
            ))
            .query(&[
                ("namespace", self.config.namespace.as_str()),
                ("locale", "en_US"),
            ])
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Account characters that are members of `guild_name`.
    ///
    /// Looks up the guild's roster once per distinct realm the account has
    /// characters on. Any failed lookup fails the whole call.
    pub async fn fetch_guild_characters(
        &self,
        access_token: &str,
        guild_name: &str,
    ) -> Result<Vec<WowCharacter>, BnetError> {
        let characters = self.fetch_wow_characters(access_token).await?;
        let slug = guild_slug(guild_name);

        let mut rosters = Vec::new();
        for realm_slug in realm_slugs(&characters) {
            rosters.push(self.fetch_guild_roster(access_token, realm_slug, &slug).await?);
        }

        let members = filter_members(characters, &rosters);
        tracing::debug!(guild = %slug, realms = rosters.len(), members = members.len(), "Guild characters resolved");
        Ok(members)
    }

    // ---- private helpers ----

    fn credentials(&self) -> Result<(&str, &str), BnetError> {
        match (&self.config.client_id, &self.config.client_secret) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(BnetError::NotConfigured),
        }
    }

    /// Turn a non-2xx response into [`BnetError::Api`] carrying its body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BnetError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BnetError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BnetError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
