//! SeaORM adapter for rounds.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::Date;

use crate::entities::rounds;

pub mod dto;

pub use dto::RoundCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id)
        .filter(rounds::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

/// Stage of a round, tombstoned rounds included.
pub async fn find_stage_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<i64>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id)
        .select_only()
        .column(rounds::Column::StageId)
        .into_tuple::<i64>()
        .one(conn)
        .await
}

/// First round of the stage (by sequence) whose inclusive window contains `on`.
pub async fn find_covering<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
    on: Date,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::StageId.eq(stage_id))
        .filter(rounds::Column::DeletedAt.is_null())
        .filter(rounds::Column::StartsOn.lte(on))
        .filter(rounds::Column::EndsOn.gte(on))
        .order_by(rounds::Column::Sequence, Order::Asc)
        .order_by(rounds::Column::Id, Order::Asc)
        .one(conn)
        .await
}

pub async fn find_all_by_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::StageId.eq(stage_id))
        .filter(rounds::Column::DeletedAt.is_null())
        .order_by(rounds::Column::Sequence, Order::Asc)
        .order_by(rounds::Column::Id, Order::Asc)
        .all(conn)
        .await
}

/// Ids of every round in the given stages, tombstoned rounds included so that
/// their matches stay reachable.
pub async fn find_ids_for_stages<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_ids: &[i64],
) -> Result<Vec<i64>, sea_orm::DbErr> {
    if stage_ids.is_empty() {
        return Ok(Vec::new());
    }
    rounds::Entity::find()
        .select_only()
        .column(rounds::Column::Id)
        .filter(rounds::Column::StageId.is_in(stage_ids.iter().copied()))
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    rounds::ActiveModel {
        id: NotSet,
        stage_id: Set(dto.stage_id),
        name: Set(dto.name),
        starts_on: Set(dto.starts_on),
        ends_on: Set(dto.ends_on),
        sequence: Set(dto.sequence),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
}
