//! Match result workflow: record, update and remove a match as one unit of work.
//!
//! Each public operation opens its own transaction. The `_in_txn` variants run
//! the same steps inside a transaction owned by the caller.

mod queries;
mod sides;
mod workflow;

use sea_orm::DatabaseConnection;
use time::{OffsetDateTime, UtcOffset};

use super::entries::EntryService;
use super::handicaps::HandicapService;
use super::standings::{StandingService, StandingsAggregator};
use crate::db::{begin_txn, finish_txn};
use crate::entities::MatchFormat;
use crate::errors::domain::DomainError;
use crate::repos::match_results::MatchResult;

/// Number of matches shown by the "recent results" view.
pub const RECENT_MATCH_LIMIT: u64 = 6;

/// One side's submission: who shot and their raw points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideScore {
    pub entry_id: i64,
    pub match_points: i32,
}

impl SideScore {
    pub fn new(entry_id: i64, match_points: i32) -> Self {
        Self {
            entry_id,
            match_points,
        }
    }
}

/// A submitted match result.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResultData {
    pub shot_at: OffsetDateTime,
    pub format: MatchFormat,
    pub next_match_result_id: Option<i64>,
    pub left_score: SideScore,
    pub right_score: SideScore,
}

impl MatchResultData {
    pub fn new(shot_at: OffsetDateTime, left_score: SideScore, right_score: SideScore) -> Self {
        Self {
            shot_at,
            format: MatchFormat::Scores,
            next_match_result_id: None,
            left_score,
            right_score,
        }
    }

    pub fn with_format(mut self, format: MatchFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_next_match(mut self, next_match_result_id: i64) -> Self {
        self.next_match_result_id = Some(next_match_result_id);
        self
    }
}

/// Shot times are stored in UTC at whole-second precision.
fn stored_shot_at(shot_at: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    shot_at
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| DomainError::validation_other(format!("Invalid shot time: {e}")))
}

pub struct MatchResultService<A = StandingService> {
    entries: EntryService,
    handicaps: HandicapService,
    standings: A,
}

impl MatchResultService<StandingService> {
    pub fn new() -> Self {
        Self::with_aggregator(StandingService::new())
    }
}

impl Default for MatchResultService<StandingService> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: StandingsAggregator> MatchResultService<A> {
    /// Use a different standings aggregator.
    pub fn with_aggregator(standings: A) -> Self {
        Self {
            entries: EntryService::new(),
            handicaps: HandicapService::new(),
            standings,
        }
    }

    pub fn aggregator(&self) -> &A {
        &self.standings
    }

    /// Record a new match result in `stage_id`.
    ///
    /// The round is the stage's round whose dates cover the UTC calendar day of
    /// `data.shot_at`, the same instant that is stored. Each entry's allowance
    /// comes from its current handicap, and an improved handicap is written
    /// back to the entry.
    pub async fn record_match_result(
        &self,
        conn: &DatabaseConnection,
        stage_id: i64,
        data: MatchResultData,
    ) -> Result<MatchResult, DomainError> {
        let txn = begin_txn(conn).await?;
        let out = self.record_match_result_in_txn(&txn, stage_id, data).await;
        finish_txn(txn, out).await
    }

    /// Re-score an existing match from new data, keeping its score rows.
    ///
    /// Each side's allowance comes from the handicap the entry held before the
    /// new `shot_at`. Entry handicaps are not changed.
    pub async fn update_match_result(
        &self,
        conn: &DatabaseConnection,
        match_id: i64,
        stage_id: i64,
        data: MatchResultData,
    ) -> Result<MatchResult, DomainError> {
        let txn = begin_txn(conn).await?;
        let out = self
            .update_match_result_in_txn(&txn, match_id, stage_id, data)
            .await;
        finish_txn(txn, out).await
    }

    /// Tombstone a match with its scores and sets.
    ///
    /// Returns `false` if the match was already removed.
    pub async fn remove_match_result(
        &self,
        conn: &DatabaseConnection,
        match_id: i64,
    ) -> Result<bool, DomainError> {
        let txn = begin_txn(conn).await?;
        let out = self.remove_match_result_in_txn(&txn, match_id).await;
        finish_txn(txn, out).await
    }
}
