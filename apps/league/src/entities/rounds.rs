use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "stage_id")]
    pub stage_id: i64,
    pub name: String,
    #[sea_orm(column_name = "starts_on")]
    pub starts_on: Date,
    #[sea_orm(column_name = "ends_on")]
    pub ends_on: Date,
    pub sequence: i16,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "deleted_at")]
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stages::Entity",
        from = "Column::StageId",
        to = "super::stages::Column::Id"
    )]
    Stage,
    #[sea_orm(has_many = "super::match_results::Entity")]
    MatchResults,
}

impl Related<super::stages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stage.def()
    }
}

impl Related<super::match_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
