use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(5))")]
pub enum Side {
    #[sea_orm(string_value = "left")]
    Left,
    #[sea_orm(string_value = "right")]
    Right,
}

/// Discriminator for the polymorphic `result_type`/`result_id` parent reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ResultType {
    #[sea_orm(string_value = "match")]
    Match,
    #[sea_orm(string_value = "set")]
    Set,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "result_type")]
    pub result_type: ResultType,
    #[sea_orm(column_name = "result_id")]
    pub result_id: i64,
    #[sea_orm(column_name = "entry_id")]
    pub entry_id: i64,
    pub side: Side,
    #[sea_orm(column_name = "handicap_before")]
    pub handicap_before: i16,
    #[sea_orm(column_name = "handicap_after")]
    pub handicap_after: i16,
    pub allowance: i32,
    #[sea_orm(column_name = "match_points")]
    pub match_points: i32,
    #[sea_orm(column_name = "match_points_adjusted")]
    pub match_points_adjusted: i32,
    #[sea_orm(column_name = "bonus_points")]
    pub bonus_points: i32,
    #[sea_orm(column_name = "league_points")]
    pub league_points: i32,
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
        belongs_to = "super::entries::Entity",
        from = "Column::EntryId",
        to = "super::entries::Column::Id"
    )]
    Entry,
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
