//! SeaORM adapter for scores.
//!
//! Scores hang off either a match or a set through `(result_type, result_id)`;
//! every query here is keyed by that pair.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::entities::{scores, ResultType};

pub mod dto;

pub use dto::{ScoreCreate, ScorePoints, ScoreUpdate};

fn live() -> Select<scores::Entity> {
    scores::Entity::find().filter(scores::Column::DeletedAt.is_null())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    score_id: i64,
) -> Result<Option<scores::Model>, sea_orm::DbErr> {
    live().filter(scores::Column::Id.eq(score_id)).one(conn).await
}

/// Live scores of one result, left side first.
pub async fn find_all_by_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result_type: ResultType,
    result_id: i64,
) -> Result<Vec<scores::Model>, sea_orm::DbErr> {
    live()
        .filter(scores::Column::ResultType.eq(result_type))
        .filter(scores::Column::ResultId.eq(result_id))
        .order_by(scores::Column::Side, Order::Asc)
        .order_by(scores::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_all_by_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result_type: ResultType,
    result_ids: &[i64],
) -> Result<Vec<scores::Model>, sea_orm::DbErr> {
    if result_ids.is_empty() {
        return Ok(Vec::new());
    }
    live()
        .filter(scores::Column::ResultType.eq(result_type))
        .filter(scores::Column::ResultId.is_in(result_ids.iter().copied()))
        .order_by(scores::Column::ResultId, Order::Asc)
        .order_by(scores::Column::Side, Order::Asc)
        .all(conn)
        .await
}

/// Live scores an entry holds of the given parent kind.
pub async fn find_all_by_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result_type: ResultType,
    entry_id: i64,
) -> Result<Vec<scores::Model>, sea_orm::DbErr> {
    live()
        .filter(scores::Column::ResultType.eq(result_type))
        .filter(scores::Column::EntryId.eq(entry_id))
        .order_by(scores::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_result_ids_for_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result_type: ResultType,
    entry_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    live()
        .select_only()
        .column(scores::Column::ResultId)
        .filter(scores::Column::ResultType.eq(result_type))
        .filter(scores::Column::EntryId.eq(entry_id))
        .distinct()
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn create_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ScoreCreate,
) -> Result<scores::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    scores::ActiveModel {
        id: NotSet,
        result_type: Set(dto.result_type),
        result_id: Set(dto.result_id),
        entry_id: Set(dto.entry_id),
        side: Set(dto.side),
        handicap_before: Set(dto.handicap_before),
        handicap_after: Set(dto.handicap_after),
        allowance: Set(dto.allowance),
        match_points: Set(dto.match_points),
        match_points_adjusted: Set(dto.match_points_adjusted),
        bonus_points: Set(dto.bonus_points),
        league_points: Set(dto.league_points),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
}

/// Rewrite a live score in place, keeping its id, parent and side.
pub async fn update_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ScoreUpdate,
) -> Result<scores::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = scores::Entity::update_many()
        .col_expr(scores::Column::EntryId, Expr::value(dto.entry_id))
        .col_expr(scores::Column::HandicapBefore, Expr::value(dto.handicap_before))
        .col_expr(scores::Column::HandicapAfter, Expr::value(dto.handicap_after))
        .col_expr(scores::Column::Allowance, Expr::value(dto.allowance))
        .col_expr(scores::Column::MatchPoints, Expr::value(dto.match_points))
        .col_expr(
            scores::Column::MatchPointsAdjusted,
            Expr::value(dto.match_points_adjusted),
        )
        .col_expr(scores::Column::BonusPoints, Expr::value(dto.bonus_points))
        .col_expr(scores::Column::LeaguePoints, Expr::value(dto.league_points))
        .col_expr(scores::Column::UpdatedAt, Expr::value(now))
        .filter(scores::Column::Id.eq(dto.id))
        .filter(scores::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Score {} not found",
            dto.id
        )));
    }

    find_by_id(conn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Score {} not found", dto.id)))
}

/// Store the outcome-resolved league and bonus points.
pub async fn update_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ScorePoints,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = scores::Entity::update_many()
        .col_expr(scores::Column::LeaguePoints, Expr::value(dto.league_points))
        .col_expr(scores::Column::BonusPoints, Expr::value(dto.bonus_points))
        .col_expr(scores::Column::UpdatedAt, Expr::value(now))
        .filter(scores::Column::Id.eq(dto.id))
        .filter(scores::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Score {} not found",
            dto.id
        )));
    }
    Ok(())
}

pub async fn tombstone_by_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result_type: ResultType,
    result_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if result_ids.is_empty() {
        return Ok(0);
    }
    let now = time::OffsetDateTime::now_utc();
    let result = scores::Entity::update_many()
        .col_expr(scores::Column::DeletedAt, Expr::value(Some(now)))
        .col_expr(scores::Column::UpdatedAt, Expr::value(now))
        .filter(scores::Column::ResultType.eq(result_type))
        .filter(scores::Column::ResultId.is_in(result_ids.iter().copied()))
        .filter(scores::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
