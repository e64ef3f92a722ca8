use std::time::Duration;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

const IN_MEMORY_KEEPALIVE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if cfg.is_in_memory() {
        // every pooled sqlite memory connection is its own database, so the
        // single connection must never be recycled
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_KEEPALIVE)
            .max_lifetime(IN_MEMORY_KEEPALIVE);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

/// Apply all pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    migration::Migrator::up(db, None).await?;
    Ok(())
}

/// Fresh in-memory sqlite database with the schema applied.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
