pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250301_000001_league_init; // keep filename + module name in sync

/// Table whose presence tells a league schema apart from an empty database.
const LEAGUE_MARKER_TABLE: &str = "match_results";

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_league_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl MigrationCommand {
    fn changes_schema(self) -> bool {
        !matches!(self, MigrationCommand::Status)
    }
}

/// Run a migration command against an already-open connection.
/// Used by the migration CLI and by `bootstrap_db` in the league crate.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = SchemaReport::collect(db).await?;
    tracing::info!(
        command = ?command,
        backend = ?before.backend,
        location = %before.location,
        applied = before.applied,
        pending = before.pending(),
        league_tables = before.league_tables,
        "league schema migration starting"
    );

    let outcome = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = outcome {
        tracing::error!(command = ?command, location = %before.location, error = %e, "league schema migration failed");
        return Err(e);
    }

    if command.changes_schema() {
        let after = SchemaReport::collect(db).await?;
        tracing::info!(
            command = ?command,
            applied = after.applied,
            pending = after.pending(),
            league_tables = after.league_tables,
            "league schema migration finished"
        );
    }
    Ok(())
}

/// Snapshot of where the league schema stands on one connection.
#[derive(Debug)]
struct SchemaReport {
    backend: DatabaseBackend,
    location: String,
    applied: usize,
    defined: usize,
    league_tables: bool,
}

impl SchemaReport {
    async fn collect(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let backend = db.get_database_backend();
        let location = database_location(db, backend).await?;
        let applied = count_applied_migrations(db).await.unwrap_or_default();
        let league_tables = SchemaManager::new(db).has_table(LEAGUE_MARKER_TABLE).await?;

        Ok(Self {
            backend,
            location,
            applied,
            defined: Migrator::migrations().len(),
            league_tables,
        })
    }

    fn pending(&self) -> usize {
        self.defined.saturating_sub(self.applied)
    }
}

/// Database name on Postgres, file path (or `:memory:`) on SQLite.
async fn database_location(
    db: &DatabaseConnection,
    backend: DatabaseBackend,
) -> Result<String, DbErr> {
    let sql = match backend {
        DatabaseBackend::Postgres => "SELECT current_database() AS location",
        DatabaseBackend::Sqlite => {
            "SELECT file AS location FROM pragma_database_list WHERE name = 'main'"
        }
        _ => return Ok("<unsupported>".to_string()),
    };

    let row = db
        .query_one(Statement::from_string(backend, sql.to_string()))
        .await?;
    let location = row
        .and_then(|r| r.try_get::<String>("", "location").ok())
        .map(|loc| if loc.is_empty() { ":memory:".to_string() } else { loc })
        .unwrap_or_else(|| "<unknown>".to_string());
    Ok(location)
}

/// Number of applied migrations; 0 while the migration table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(applied) => Ok(applied.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
