#![cfg(test)]
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::user::{repo::seaorm::SeaOrmUserRepository, validator::ValidationPolicy, UserService};

/// Fresh in-memory database per test; nothing is shared between tests.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn seaorm_service() -> Result<UserService<SeaOrmUserRepository>, anyhow::Error> {
    let db = get_db().await?;
    let repo = Arc::new(SeaOrmUserRepository::new(db));
    Ok(UserService::new(repo, ValidationPolicy::default()))
}
