use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::entries::BowStyle;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "handicaps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "bow_style")]
    pub bow_style: BowStyle,
    pub number: i16,
    #[sea_orm(column_name = "match_allowance")]
    pub match_allowance: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
