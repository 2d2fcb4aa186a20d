//! SeaORM adapter for per-stage standings rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet, Order,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::standings;

/// Totals for one entry in one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandingUpsert {
    pub stage_id: i64,
    pub entry_id: i64,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub league_points: i32,
    pub bonus_points: i32,
    pub match_points_adjusted: i64,
}

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
    entry_id: i64,
) -> Result<Option<standings::Model>, sea_orm::DbErr> {
    standings::Entity::find()
        .filter(standings::Column::StageId.eq(stage_id))
        .filter(standings::Column::EntryId.eq(entry_id))
        .one(conn)
        .await
}

/// Stage table: total points, then adjusted match points, descending.
pub async fn find_all_by_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
) -> Result<Vec<standings::Model>, sea_orm::DbErr> {
    standings::Entity::find()
        .filter(standings::Column::StageId.eq(stage_id))
        .order_by(standings::Column::TotalPoints, Order::Desc)
        .order_by(standings::Column::MatchPointsAdjusted, Order::Desc)
        .order_by(standings::Column::EntryId, Order::Asc)
        .all(conn)
        .await
}

/// Overwrite the row for `(stage_id, entry_id)`, creating it if absent.
pub async fn upsert_standing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StandingUpsert,
) -> Result<standings::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let total_points = dto.league_points + dto.bonus_points;

    match find_one(conn, dto.stage_id, dto.entry_id).await? {
        Some(existing) => {
            let mut active = existing.into_active_model();
            active.played = Set(dto.played);
            active.won = Set(dto.won);
            active.drawn = Set(dto.drawn);
            active.lost = Set(dto.lost);
            active.league_points = Set(dto.league_points);
            active.bonus_points = Set(dto.bonus_points);
            active.total_points = Set(total_points);
            active.match_points_adjusted = Set(dto.match_points_adjusted);
            active.updated_at = Set(now);
            active.update(conn).await
        }
        None => {
            standings::ActiveModel {
                id: NotSet,
                stage_id: Set(dto.stage_id),
                entry_id: Set(dto.entry_id),
                played: Set(dto.played),
                won: Set(dto.won),
                drawn: Set(dto.drawn),
                lost: Set(dto.lost),
                league_points: Set(dto.league_points),
                bonus_points: Set(dto.bonus_points),
                total_points: Set(total_points),
                match_points_adjusted: Set(dto.match_points_adjusted),
                updated_at: Set(now),
            }
            .insert(conn)
            .await
        }
    }
}
