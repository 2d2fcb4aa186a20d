//! SeaORM adapter for match results - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::entities::match_results;

pub mod dto;

pub use dto::{MatchResultCreate, MatchResultUpdate};

fn live() -> Select<match_results::Entity> {
    match_results::Entity::find().filter(match_results::Column::DeletedAt.is_null())
}

fn in_rounds(round_ids: &[i64]) -> Select<match_results::Entity> {
    live().filter(match_results::Column::RoundId.is_in(round_ids.iter().copied()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<match_results::Model>, sea_orm::DbErr> {
    live()
        .filter(match_results::Column::Id.eq(match_id))
        .one(conn)
        .await
}

/// Like [`find_by_id`] but also returns tombstoned rows.
pub async fn find_by_id_with_tombstoned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<match_results::Model>, sea_orm::DbErr> {
    match_results::Entity::find_by_id(match_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: &[i64],
) -> Result<Vec<match_results::Model>, sea_orm::DbErr> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }
    live()
        .filter(match_results::Column::Id.is_in(match_ids.iter().copied()))
        .order_by(match_results::Column::ShotAt, Order::Asc)
        .order_by(match_results::Column::Id, Order::Asc)
        .all(conn)
        .await
}

/// Live matches in the given rounds, ordered `(shot_at, id)` ascending.
pub async fn find_all_in_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<Vec<match_results::Model>, sea_orm::DbErr> {
    if round_ids.is_empty() {
        return Ok(Vec::new());
    }
    in_rounds(round_ids)
        .order_by(match_results::Column::ShotAt, Order::Asc)
        .order_by(match_results::Column::Id, Order::Asc)
        .all(conn)
        .await
}

/// Most recently shot live matches, `shot_at` descending then `id` ascending.
pub async fn find_recent_in_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
    limit: u64,
) -> Result<Vec<match_results::Model>, sea_orm::DbErr> {
    if round_ids.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }
    in_rounds(round_ids)
        .order_by(match_results::Column::ShotAt, Order::Desc)
        .order_by(match_results::Column::Id, Order::Asc)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_in_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if round_ids.is_empty() {
        return Ok(0);
    }
    in_rounds(round_ids).count(conn).await
}

/// Ids of the live matches among `match_ids` that belong to the given rounds.
pub async fn filter_ids_in_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: &[i64],
    round_ids: &[i64],
) -> Result<Vec<i64>, sea_orm::DbErr> {
    if match_ids.is_empty() || round_ids.is_empty() {
        return Ok(Vec::new());
    }
    in_rounds(round_ids)
        .select_only()
        .column(match_results::Column::Id)
        .filter(match_results::Column::Id.is_in(match_ids.iter().copied()))
        .order_by(match_results::Column::Id, Order::Asc)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn find_shot_times<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: &[i64],
) -> Result<Vec<(i64, time::OffsetDateTime)>, sea_orm::DbErr> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }
    live()
        .select_only()
        .column(match_results::Column::Id)
        .column(match_results::Column::ShotAt)
        .filter(match_results::Column::Id.is_in(match_ids.iter().copied()))
        .into_tuple::<(i64, time::OffsetDateTime)>()
        .all(conn)
        .await
}

pub async fn create_match_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchResultCreate,
) -> Result<match_results::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    match_results::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        winner_id: Set(None),
        next_match_result_id: Set(dto.next_match_result_id),
        format: Set(dto.format),
        shot_at: Set(dto.shot_at),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
}

/// Apply the fields set on `dto` to a live match, then refetch it.
pub async fn update_match_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchResultUpdate,
) -> Result<match_results::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let mut update = match_results::Entity::update_many()
        .col_expr(match_results::Column::UpdatedAt, Expr::value(now));
    if let Some(round_id) = dto.round_id {
        update = update.col_expr(match_results::Column::RoundId, Expr::value(round_id));
    }
    if let Some(shot_at) = dto.shot_at {
        update = update.col_expr(match_results::Column::ShotAt, Expr::value(shot_at));
    }
    if let Some(winner_id) = dto.winner_id {
        update = update.col_expr(match_results::Column::WinnerId, Expr::value(winner_id));
    }

    let result = update
        .filter(match_results::Column::Id.eq(dto.id))
        .filter(match_results::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Match result {} not found",
            dto.id
        )));
    }

    find_by_id(conn, dto.id).await?.ok_or_else(|| {
        sea_orm::DbErr::RecordNotFound(format!("Match result {} not found", dto.id))
    })
}

/// Mark a live match deleted. Returns the number of rows touched (0 or 1).
pub async fn tombstone<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = match_results::Entity::update_many()
        .col_expr(match_results::Column::DeletedAt, Expr::value(Some(now)))
        .col_expr(match_results::Column::UpdatedAt, Expr::value(now))
        .filter(match_results::Column::Id.eq(match_id))
        .filter(match_results::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
