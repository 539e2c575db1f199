use std::sync::Arc;

use guildbook_bnet::BattleNetClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: guildbook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Battle.net OAuth and profile API client.
    pub bnet: Arc<BattleNetClient>,
}

impl AppState {
    pub fn new(pool: guildbook_db::DbPool, config: ServerConfig) -> Self {
        let bnet = BattleNetClient::new(config.bnet.clone());
        Self {
            pool,
            config: Arc::new(config),
            bnet: Arc::new(bnet),
        }
    }
}
