use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, IsolationLevel,
    TransactionTrait,
};
use tracing::debug;

use super::txn_policy::{self, TxnPolicy};
use crate::errors::domain::DomainError;

/// Open a transaction for one unit of league work.
///
/// Postgres runs at SERIALIZABLE so two workflows that read the same entry
/// handicap or the same stage pairing cannot both commit. SQLite already
/// serialises writers and rejects explicit isolation levels.
pub async fn begin_txn(conn: &DatabaseConnection) -> Result<DatabaseTransaction, DomainError> {
    let txn = match conn.get_database_backend() {
        DatabaseBackend::Postgres => {
            conn.begin_with_config(Some(IsolationLevel::Serializable), None)
                .await?
        }
        _ => conn.begin().await?,
    };
    Ok(txn)
}

/// Close a transaction opened by [`begin_txn`].
///
/// On `Ok` the process-wide [`TxnPolicy`] decides between commit and rollback;
/// on `Err` the transaction is rolled back and the original error is returned.
pub async fn finish_txn<R>(
    txn: DatabaseTransaction,
    out: Result<R, DomainError>,
) -> Result<R, DomainError> {
    match out {
        Ok(val) => match txn_policy::current() {
            TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            TxnPolicy::RollbackOnOk => {
                debug!("rolling back successful transaction per policy");
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
