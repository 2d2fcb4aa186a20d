//! SeaORM adapter for stages.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::stages;

pub mod dto;

pub use dto::StageCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
) -> Result<Option<stages::Model>, sea_orm::DbErr> {
    stages::Entity::find_by_id(stage_id).one(conn).await
}

pub async fn find_ids_for_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    stages::Entity::find()
        .select_only()
        .column(stages::Column::Id)
        .filter(stages::Column::CompetitionId.eq(competition_id))
        .order_by(stages::Column::Sequence, Order::Asc)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn create_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StageCreate,
) -> Result<stages::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    stages::ActiveModel {
        id: NotSet,
        competition_id: Set(dto.competition_id),
        name: Set(dto.name),
        sequence: Set(dto.sequence),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}
