use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "set_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_result_id")]
    pub match_result_id: i64,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
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
        belongs_to = "super::match_results::Entity",
        from = "Column::MatchResultId",
        to = "super::match_results::Column::Id"
    )]
    MatchResult,
}

impl Related<super::match_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
