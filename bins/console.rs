use std::{io, sync::Arc};

use anyhow::Context;
use cli::ConsoleMenu;
use common::utils::logging::{init_logging_stderr, DEFAULT_FILTER};
use dotenvy::dotenv;
use service::user::{repo::seaorm::SeaOrmUserRepository, validator::ValidationPolicy, UserService};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = configs::AppConfig::load_or_env().context("loading configuration")?;
    init_logging_stderr(cfg.logging.filter.as_deref().unwrap_or(DEFAULT_FILTER));

    // composition point: db -> repository -> service -> menu
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        models::db::migrate(&db).await?;
    }
    let repo = Arc::new(SeaOrmUserRepository::new(db));
    let users = Arc::new(UserService::new(repo, ValidationPolicy::from(&cfg.validation)));
    let menu = ConsoleMenu::new(users);

    info!(service = "user-console", event = "start", "console ready");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    menu.run(&mut input, &mut out).await?;
    Ok(())
}
