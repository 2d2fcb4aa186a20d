//! SeaORM adapter for entries - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::entries;
use crate::infra::db_errors::optimistic_lock_err;

pub mod dto;

pub use dto::{EntryCreate, EntryHandicapUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
) -> Result<Option<entries::Model>, sea_orm::DbErr> {
    entries::Entity::find_by_id(entry_id).one(conn).await
}

pub async fn find_all_by_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<Vec<entries::Model>, sea_orm::DbErr> {
    entries::Entity::find()
        .filter(entries::Column::CompetitionId.eq(competition_id))
        .order_by(entries::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn create_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EntryCreate,
) -> Result<entries::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    entries::ActiveModel {
        id: NotSet,
        competition_id: Set(dto.competition_id),
        name: Set(dto.name),
        bow_style: Set(dto.bow_style),
        initial_handicap: Set(dto.handicap),
        current_handicap: Set(dto.handicap),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Write a new current handicap if the row still carries `expected_version`.
///
/// Distinguishes a missing entry (`RecordNotFound`) from a stale version
/// (structured optimistic lock error), then refetches the updated row.
pub async fn update_current_handicap<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EntryHandicapUpdate,
) -> Result<entries::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = entries::Entity::update_many()
        .col_expr(
            entries::Column::CurrentHandicap,
            Expr::value(dto.current_handicap),
        )
        .col_expr(entries::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            entries::Column::LockVersion,
            Expr::col(entries::Column::LockVersion).add(1),
        )
        .filter(entries::Column::Id.eq(dto.id))
        .filter(entries::Column::LockVersion.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(entry) => Err(optimistic_lock_err(
                "Entry",
                dto.id,
                dto.expected_version,
                entry.lock_version,
            )),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "Entry {} not found",
                dto.id
            ))),
        };
    }

    find_by_id(conn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Entry {} not found", dto.id)))
}
