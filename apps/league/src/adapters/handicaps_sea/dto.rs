//! DTOs for handicaps_sea adapter.

use crate::entities::BowStyle;

#[derive(Debug, Clone, Copy)]
pub struct HandicapUpsert {
    pub bow_style: BowStyle,
    pub number: i16,
    pub match_allowance: i32,
}
