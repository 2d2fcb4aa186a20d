use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "standings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "stage_id")]
    pub stage_id: i64,
    #[sea_orm(column_name = "entry_id")]
    pub entry_id: i64,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    #[sea_orm(column_name = "league_points")]
    pub league_points: i32,
    #[sea_orm(column_name = "bonus_points")]
    pub bonus_points: i32,
    #[sea_orm(column_name = "total_points")]
    pub total_points: i32,
    #[sea_orm(column_name = "match_points_adjusted")]
    pub match_points_adjusted: i64,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stages::Entity",
        from = "Column::StageId",
        to = "super::stages::Column::Id"
    )]
    Stage,
    #[sea_orm(
        belongs_to = "super::entries::Entity",
        from = "Column::EntryId",
        to = "super::entries::Column::Id"
    )]
    Entry,
}

impl Related<super::stages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stage.def()
    }
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
