//! SeaORM adapter for the stage pairing guard.
//!
//! One row per live match; the unique index on
//! `(stage_id, low_entry_id, high_entry_id)` makes a second concurrent
//! commit for the same pair fail at the store.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::match_pairings;

#[derive(Debug, Clone, Copy)]
pub struct PairingCreate {
    pub stage_id: i64,
    pub low_entry_id: i64,
    pub high_entry_id: i64,
    pub match_result_id: i64,
}

pub async fn insert_pairing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PairingCreate,
) -> Result<match_pairings::Model, sea_orm::DbErr> {
    match_pairings::ActiveModel {
        id: NotSet,
        stage_id: Set(dto.stage_id),
        low_entry_id: Set(dto.low_entry_id),
        high_entry_id: Set(dto.high_entry_id),
        match_result_id: Set(dto.match_result_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn delete_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = match_pairings::Entity::delete_many()
        .filter(match_pairings::Column::MatchResultId.eq(match_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn find_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<match_pairings::Model>, sea_orm::DbErr> {
    match_pairings::Entity::find()
        .filter(match_pairings::Column::MatchResultId.eq(match_id))
        .one(conn)
        .await
}
