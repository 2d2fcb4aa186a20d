use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Get database engine name for logging
fn db_engine(profile: &DbProfile) -> &'static str {
    if profile.is_sqlite() {
        "sqlite"
    } else {
        "postgresql"
    }
}

/// Unified database connector that supports different profiles and owners.
/// This function does NOT run any migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, DomainError> {
    let database_url = db_url(profile.clone(), owner)?;

    let mut opt = ConnectOptions::new(database_url);
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    if profile.is_sqlite() {
        // every pooled connection to sqlite::memory: is its own database
        opt.min_connections(1).max_connections(1);
    }

    let conn = Database::connect(opt).await.map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DbUnavailable,
            format!("failed to connect to {}: {e}", db_engine(&profile)),
        )
    })?;

    info!(engine = db_engine(&profile), "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, DomainError> {
    let conn = connect_db(profile, owner).await?;
    migration::migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
