//! SeaORM adapter for the handicap reference table.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter, QueryOrder, Set};

use crate::entities::{handicaps, BowStyle};

pub mod dto;

pub use dto::HandicapUpsert;

pub async fn find_all_by_bow_style<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bow_style: BowStyle,
) -> Result<Vec<handicaps::Model>, sea_orm::DbErr> {
    handicaps::Entity::find()
        .filter(handicaps::Column::BowStyle.eq(bow_style))
        .order_by(handicaps::Column::Number, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bow_style: BowStyle,
    number: i16,
) -> Result<Option<handicaps::Model>, sea_orm::DbErr> {
    handicaps::Entity::find()
        .filter(handicaps::Column::BowStyle.eq(bow_style))
        .filter(handicaps::Column::Number.eq(number))
        .one(conn)
        .await
}

/// Insert or refresh reference rows, keyed by `(bow_style, number)`.
pub async fn upsert_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: Vec<HandicapUpsert>,
) -> Result<u64, sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(0);
    }
    let count = rows.len() as u64;

    let models = rows.into_iter().map(|row| handicaps::ActiveModel {
        id: NotSet,
        bow_style: Set(row.bow_style),
        number: Set(row.number),
        match_allowance: Set(row.match_allowance),
    });

    handicaps::Entity::insert_many(models)
        .on_conflict(
            OnConflict::columns([handicaps::Column::BowStyle, handicaps::Column::Number])
                .update_column(handicaps::Column::MatchAllowance)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(count)
}
