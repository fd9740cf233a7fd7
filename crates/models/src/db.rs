use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::sqlx::ConnectOptions as _;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, SqlxSqliteConnector};
use std::time::Duration;
use tracing::info;

use configs::DatabaseConfig;

/// Open a pooled connection using the pool settings in `cfg`.
///
/// An in-memory SQLite database lives only as long as its connection, so
/// such URLs get a single connection that is never retired by idle or
/// lifetime limits.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = if is_memory_sqlite(&cfg.url) {
        let mut sqlite: SqliteConnectOptions = cfg.url.parse()?;
        if !cfg.sqlx_logging {
            sqlite = sqlite.disable_statement_logging();
        }
        let pool = memory_pool_options(cfg).connect_with(sqlite).await?;
        SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)
    } else {
        Database::connect(connect_options(cfg)).await?
    };
    info!(backend = ?db.get_database_backend(), max_connections = cfg.max_connections, "database_connected");
    Ok(db)
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    opt
}

// sqlx applies its own idle/lifetime defaults unless they are cleared here.
fn memory_pool_options(cfg: &DatabaseConfig) -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(None)
        .max_lifetime(None)
}

fn is_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}
