//! DTOs for rounds_sea adapter.

use time::Date;

#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub stage_id: i64,
    pub name: String,
    pub starts_on: Date,
    pub ends_on: Date,
    pub sequence: i16,
}
