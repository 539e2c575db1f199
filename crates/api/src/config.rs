use guildbook_bnet::BnetConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Browser app origin, without trailing slash. Login redirects back here.
    pub frontend_url: String,
    /// Guild whose roster filters the character import list.
    pub guild_name: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Battle.net OAuth client settings.
    pub bnet: BnetConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `FRONTEND_URL`         | `http://localhost:5173`          |
    /// | `CORS_ORIGINS`         | value of `FRONTEND_URL`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `GUILD`                | `Red Sun`                        |
    /// | `BNET_CLIENT_ID`       | unset                            |
    /// | `BNET_CLIENT_SECRET`   | unset                            |
    /// | `BNET_REDIRECT_URI`    | derived from the request `Host`  |
    /// | `BNET_OAUTH_URL`       | `https://oauth.battle.net`       |
    /// | `BNET_API_URL`         | `https://us.api.blizzard.com`    |
    /// | `BNET_NAMESPACE`       | `profile-classic1x-us`           |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let frontend_url = normalize_url(
            &std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| frontend_url.clone())
            .split(',')
            .map(normalize_url)
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let guild_name = std::env::var("GUILD").unwrap_or_else(|_| "Red Sun".into());

        let jwt = JwtConfig::from_env();
        let bnet = bnet_from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            frontend_url,
            guild_name,
            jwt,
            bnet,
        }
    }
}

fn bnet_from_env() -> BnetConfig {
    let defaults = BnetConfig::default();
    let optional = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    BnetConfig {
        client_id: optional("BNET_CLIENT_ID"),
        client_secret: optional("BNET_CLIENT_SECRET"),
        redirect_uri: optional("BNET_REDIRECT_URI"),
        oauth_url: optional("BNET_OAUTH_URL")
            .map(|u| normalize_url(&u))
            .unwrap_or(defaults.oauth_url),
        api_url: optional("BNET_API_URL")
            .map(|u| normalize_url(&u))
            .unwrap_or(defaults.api_url),
        namespace: optional("BNET_NAMESPACE").unwrap_or(defaults.namespace),
    }
}

/// Trim whitespace and trailing slashes so paths can be appended with `/`.
fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
