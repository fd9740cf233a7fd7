#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::contact::ContactBase;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// PostgreSQL migrations run only once across the entire test process
static PG_MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Fresh in-memory SQLite database with the schema applied.
///
/// Every call returns an isolated database, so tests never share rows.
pub async fn memory_db() -> Result<DatabaseConnection, anyhow::Error> {
    common::utils::logging::init_test_logging();
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// PostgreSQL connection when `CONTACTS_PG_URL` is set, otherwise `None`.
pub async fn postgres_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(url) = common::env::non_empty_var("CONTACTS_PG_URL") else {
        return Ok(None);
    };
    common::utils::logging::init_test_logging();
    let mut cfg = DatabaseConfig { url, ..Default::default() };
    cfg.min_connections = 1;
    cfg.validate()?;

    PG_MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    Ok(Some(connect_with_config(&cfg).await?))
}

pub fn sample(first: &str, last: &str, email: &str) -> ContactBase {
    ContactBase {
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone_number: "+380501234567".into(),
        birth_date: None,
        additional_info: None,
    }
}
