//! SeaORM adapter for set results.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::entities::set_results;

pub mod dto;

pub use dto::SetResultCreate;

fn live() -> Select<set_results::Entity> {
    set_results::Entity::find().filter(set_results::Column::DeletedAt.is_null())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Option<set_results::Model>, sea_orm::DbErr> {
    live()
        .filter(set_results::Column::Id.eq(set_id))
        .one(conn)
        .await
}

/// Live sets of a match in `sequence` order.
pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<set_results::Model>, sea_orm::DbErr> {
    live()
        .filter(set_results::Column::MatchResultId.eq(match_id))
        .order_by(set_results::Column::Sequence, Order::Asc)
        .order_by(set_results::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_ids_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    live()
        .select_only()
        .column(set_results::Column::Id)
        .filter(set_results::Column::MatchResultId.eq(match_id))
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn create_set_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SetResultCreate,
) -> Result<set_results::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    set_results::ActiveModel {
        id: NotSet,
        match_result_id: Set(dto.match_result_id),
        winner_id: Set(dto.winner_id),
        sequence: Set(dto.sequence),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
}

pub async fn tombstone_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = set_results::Entity::update_many()
        .col_expr(set_results::Column::DeletedAt, Expr::value(Some(now)))
        .col_expr(set_results::Column::UpdatedAt, Expr::value(now))
        .filter(set_results::Column::MatchResultId.eq(match_id))
        .filter(set_results::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
