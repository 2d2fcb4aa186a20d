use std::env;

use crate::errors::domain::DomainError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production Postgres database
    Prod,
    /// Test Postgres database - enforces the `_test` suffix
    Test,
    /// Private in-memory SQLite database (one per connection pool)
    InMemory,
    /// SQLite file; falls back to `LEAGUE_SQLITE_FILE`, then `league.sqlite`
    SqliteFile { file: Option<String> },
}

impl DbProfile {
    pub fn is_sqlite(&self) -> bool {
        matches!(self, DbProfile::InMemory | DbProfile::SqliteFile { .. })
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, PartialEq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Builds a database URL from environment variables based on profile and owner
pub fn db_url(profile: DbProfile, owner: DbOwner) -> Result<String, DomainError> {
    match profile {
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile { file } => {
            let file = match file {
                Some(file) => file,
                None => env::var("LEAGUE_SQLITE_FILE").unwrap_or_else(|_| "league.sqlite".into()),
            };
            Ok(format!("sqlite://{file}?mode=rwc"))
        }
        DbProfile::Prod | DbProfile::Test => {
            let host = host();
            let port = port();
            let db_name = db_name(&profile)?;
            let (username, password) = credentials(owner)?;

            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get database name based on profile
fn db_name(profile: &DbProfile) -> Result<String, DomainError> {
    match profile {
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(DomainError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
        _ => must_var("PROD_DB"),
    }
}

/// Get database credentials based on owner
fn credentials(owner: DbOwner) -> Result<(String, String), DomainError> {
    match owner {
        DbOwner::App => Ok((
            must_var("LEAGUE_APP_DB_USER")?,
            must_var("LEAGUE_APP_DB_PASSWORD")?,
        )),
        DbOwner::Owner => Ok((
            must_var("LEAGUE_OWNER_USER")?,
            must_var("LEAGUE_OWNER_PASSWORD")?,
        )),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, DomainError> {
    env::var(name).map_err(|_| {
        DomainError::config(format!("Required environment variable '{name}' is not set"))
    })
}
