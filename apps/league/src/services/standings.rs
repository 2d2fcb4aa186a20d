//! Stage standings kept in step with match results.
//!
//! Every call recomputes the touched entries' rows from the live match scores
//! of the stage, so applying or retracting the same match twice is harmless.

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::debug;

use crate::domain::scoring::{LEAGUE_POINTS_FOR_DRAW, LEAGUE_POINTS_FOR_WIN};
use crate::entities::ResultType;
use crate::errors::domain::DomainError;
use crate::repos::match_results::{self, MatchResult};
use crate::repos::rounds;
use crate::repos::scores::{self, Score};
use crate::repos::standings::{self, Standing};

/// Receives every match change made by the result workflow, inside its transaction.
#[async_trait]
pub trait StandingsAggregator: Send + Sync {
    /// Called after a match has been recorded or updated.
    async fn apply_match_result(
        &self,
        txn: &DatabaseTransaction,
        match_result: &MatchResult,
    ) -> Result<(), DomainError>;

    /// Called with the previous state of a match that was updated or removed.
    async fn retract_match_result(
        &self,
        txn: &DatabaseTransaction,
        match_result: &MatchResult,
    ) -> Result<(), DomainError>;
}

/// Fold an entry's match scores into a standing.
pub fn tally<'a>(
    stage_id: i64,
    entry_id: i64,
    scores: impl IntoIterator<Item = &'a Score>,
) -> Standing {
    let mut standing = Standing::empty(stage_id, entry_id);
    for score in scores {
        standing.played += 1;
        match score.league_points {
            LEAGUE_POINTS_FOR_WIN => standing.won += 1,
            LEAGUE_POINTS_FOR_DRAW => standing.drawn += 1,
            _ => standing.lost += 1,
        }
        standing.league_points += score.league_points;
        standing.bonus_points += score.bonus_points;
        standing.match_points_adjusted += i64::from(score.match_points_adjusted);
    }
    standing.total_points = standing.league_points + standing.bonus_points;
    standing
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StandingService;

impl StandingService {
    pub fn new() -> Self {
        Self
    }

    /// Rebuild one entry's row for a stage from its live match scores.
    pub async fn recompute<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        stage_id: i64,
        entry_id: i64,
    ) -> Result<Standing, DomainError> {
        let history = scores::find_all_by_entry(conn, ResultType::Match, entry_id).await?;
        let match_ids: Vec<i64> = history.iter().map(|s| s.result.id).collect();
        let in_stage: HashSet<i64> = match_results::filter_ids_in_stage(conn, &match_ids, stage_id)
            .await?
            .into_iter()
            .collect();

        let standing = tally(
            stage_id,
            entry_id,
            history.iter().filter(|s| in_stage.contains(&s.result.id)),
        );
        debug!(
            stage_id,
            entry_id,
            played = standing.played,
            total_points = standing.total_points,
            "Standing recomputed"
        );
        standings::save(conn, &standing).await
    }

    /// Stage table, best first.
    pub async fn standings_for_stage<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        stage_id: i64,
    ) -> Result<Vec<Standing>, DomainError> {
        standings::find_all_by_stage(conn, stage_id).await
    }

    async fn recompute_match(
        &self,
        txn: &DatabaseTransaction,
        match_result: &MatchResult,
    ) -> Result<(), DomainError> {
        let stage_id = rounds::stage_id_of(txn, match_result.round_id).await?;
        for entry_id in match_result.entry_ids() {
            self.recompute(txn, stage_id, entry_id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StandingsAggregator for StandingService {
    async fn apply_match_result(
        &self,
        txn: &DatabaseTransaction,
        match_result: &MatchResult,
    ) -> Result<(), DomainError> {
        self.recompute_match(txn, match_result).await
    }

    async fn retract_match_result(
        &self,
        txn: &DatabaseTransaction,
        match_result: &MatchResult,
    ) -> Result<(), DomainError> {
        self.recompute_match(txn, match_result).await
    }
}
