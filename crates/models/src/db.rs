use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Build the long-lived connection pool shared by every request.
///
/// In-memory SQLite lives and dies with its single connection, so the pool is
/// pinned to exactly one connection for `sqlite::memory:` URLs.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    let (min, max) = if cfg.is_sqlite() && cfg.url.contains(":memory:") {
        (1, 1)
    } else {
        (cfg.min_connections, cfg.max_connections)
    };
    opt.max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), max_connections = max, "database connected");
    Ok(db)
}
