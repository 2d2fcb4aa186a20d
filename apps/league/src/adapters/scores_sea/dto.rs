//! DTOs for scores_sea adapter.

use crate::entities::{ResultType, Side};

/// DTO for creating a score under a match or set.
#[derive(Debug, Clone)]
pub struct ScoreCreate {
    pub result_type: ResultType,
    pub result_id: i64,
    pub entry_id: i64,
    pub side: Side,
    pub handicap_before: i16,
    pub handicap_after: i16,
    pub allowance: i32,
    pub match_points: i32,
    pub match_points_adjusted: i32,
    pub bonus_points: i32,
    pub league_points: i32,
}

/// DTO for recomputing an existing score in place.
#[derive(Debug, Clone)]
pub struct ScoreUpdate {
    pub id: i64,
    pub entry_id: i64,
    pub handicap_before: i16,
    pub handicap_after: i16,
    pub allowance: i32,
    pub match_points: i32,
    pub match_points_adjusted: i32,
    pub bonus_points: i32,
    pub league_points: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct ScorePoints {
    pub id: i64,
    pub league_points: i32,
    pub bonus_points: i32,
}
