// Application state shared across all modules

use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::config::Config;

/// Application state containing the database pool, the outbound HTTP client
/// and the immutable configuration loaded at startup.
///
/// Nothing in here mutates after startup, so the state is cloned freely into
/// handlers instead of being wrapped in a lock.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub http: Client,
    pub config: Arc<Config>,
}
