use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Guard row: at most one live match per unordered entry pair per stage.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_pairings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "stage_id")]
    pub stage_id: i64,
    #[sea_orm(column_name = "low_entry_id")]
    pub low_entry_id: i64,
    #[sea_orm(column_name = "high_entry_id")]
    pub high_entry_id: i64,
    #[sea_orm(column_name = "match_result_id")]
    pub match_result_id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
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
