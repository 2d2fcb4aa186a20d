//! DTOs for match_results_sea adapter.

use time::OffsetDateTime;

use crate::entities::MatchFormat;

/// DTO for creating the match shell; the winner is filled in once both scores exist.
#[derive(Debug, Clone)]
pub struct MatchResultCreate {
    pub round_id: i64,
    pub format: MatchFormat,
    pub shot_at: OffsetDateTime,
    pub next_match_result_id: Option<i64>,
}

/// Partial update of a match result.
///
/// `winner_id` is three-state: None = no change, Some(Some(id)) = set, Some(None) = clear.
#[derive(Debug, Clone)]
pub struct MatchResultUpdate {
    pub id: i64,
    pub round_id: Option<i64>,
    pub shot_at: Option<OffsetDateTime>,
    pub winner_id: Option<Option<i64>>,
}

impl MatchResultUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            round_id: None,
            shot_at: None,
            winner_id: None,
        }
    }

    pub fn with_round(mut self, round_id: i64) -> Self {
        self.round_id = Some(round_id);
        self
    }

    pub fn with_shot_at(mut self, shot_at: OffsetDateTime) -> Self {
        self.shot_at = Some(shot_at);
        self
    }

    pub fn with_winner(mut self, winner_id: Option<i64>) -> Self {
        self.winner_id = Some(winner_id);
        self
    }
}
