//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert into `DomainError` through
//! `From<DbErr>`, which lands here.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Prefix for structured optimistic lock failures raised by adapters.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract the first `table.column` from SQLite "UNIQUE constraint failed: ..." messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == ',' || c == '"')
        .find(|s| !s.is_empty())
}

/// Map SQLite table.column format to domain-specific conflict errors.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column.split('.').next() {
        Some("match_pairings") => Some((
            ConflictKind::DuplicatePairing,
            "These two people already have a match recorded in this stage",
        )),
        Some("standings") => Some((
            ConflictKind::Other("Standing".into()),
            "Standing row was written concurrently",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_match_pairings_stage_pair") {
        return Some((
            ConflictKind::DuplicatePairing,
            "These two people already have a match recorded in this stage",
        ));
    }
    if error_msg.contains("ux_standings_stage_entry") {
        return Some((
            ConflictKind::Other("Standing".into()),
            "Standing row was written concurrently",
        ));
    }
    None
}

#[derive(serde::Deserialize)]
struct LockInfo {
    entity: String,
    id: i64,
    expected: i32,
    actual: i32,
}

/// Build the structured payload adapters use to report a stale lock version.
pub fn optimistic_lock_err(entity: &str, id: i64, expected: i32, actual: i32) -> sea_orm::DbErr {
    let payload = serde_json::json!({
        "entity": entity,
        "id": id,
        "expected": expected,
        "actual": actual,
    });
    sea_orm::DbErr::Custom(format!("{OPTIMISTIC_LOCK_PREFIX}{payload}"))
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), what.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            if let Some(json_str) = msg.strip_prefix(OPTIMISTIC_LOCK_PREFIX) {
                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        entity = %info.entity,
                        id = info.id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );

                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "{} {} was modified concurrently (expected version {}, actual version {}); please retry",
                            info.entity, info.id, info.expected, info.actual
                        ),
                    );
                }
            }

            warn!("Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Resource was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "40001")
        || mentions_sqlstate(&error_msg, "40P01")
        || error_msg.contains("could not serialize access")
        || error_msg.contains("database is locked")
    {
        warn!(raw_error = %error_msg, "Serialization failure");
        return DomainError::conflict(
            ConflictKind::Serialization,
            "Concurrent update detected; please retry",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
