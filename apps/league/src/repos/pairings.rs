//! Stage pairing guard rows.

use sea_orm::ConnectionTrait;

use crate::adapters::pairings_sea as pairings_adapter;
use crate::domain::PairKey;
use crate::errors::domain::DomainError;

/// Claim `pair` in `stage_id` for `match_id`.
///
/// A concurrent claim for the same pair surfaces as `Conflict(DuplicatePairing)`.
pub async fn claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
    pair: PairKey,
    match_id: i64,
) -> Result<(), DomainError> {
    let dto = pairings_adapter::PairingCreate {
        stage_id,
        low_entry_id: pair.low,
        high_entry_id: pair.high,
        match_result_id: match_id,
    };
    pairings_adapter::insert_pairing(conn, dto).await?;
    Ok(())
}

pub async fn release_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<(), DomainError> {
    pairings_adapter::delete_for_match(conn, match_id).await?;
    Ok(())
}

/// The pair and stage currently claimed by a match, if any.
pub async fn find_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<(i64, PairKey)>, DomainError> {
    let row = pairings_adapter::find_for_match(conn, match_id).await?;
    Ok(row.map(|r| {
        (
            r.stage_id,
            PairKey {
                low: r.low_entry_id,
                high: r.high_entry_id,
            },
        )
    }))
}
