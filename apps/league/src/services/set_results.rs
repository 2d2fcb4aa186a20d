//! Set-by-set results within a match.

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction};
use tracing::info;

use crate::db::{begin_txn, finish_txn};
use crate::domain::ResultRef;
use crate::entities::Side;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::match_results;
use crate::repos::scores::{self, Score, ScoreData};
use crate::repos::set_results::{self, SetResult};

/// Raw points each side shot in one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetResultData {
    pub sequence: i16,
    pub left_points: i32,
    pub right_points: i32,
}

/// Winning side of a set by raw points; `None` when level.
pub fn set_winner(left_points: i32, right_points: i32) -> Option<Side> {
    match left_points.cmp(&right_points) {
        std::cmp::Ordering::Greater => Some(Side::Left),
        std::cmp::Ordering::Less => Some(Side::Right),
        std::cmp::Ordering::Equal => None,
    }
}

fn set_score(set_id: i64, match_score: &Score, points: i32) -> ScoreData {
    ScoreData {
        result: ResultRef::set_result(set_id),
        entry_id: match_score.entry_id,
        side: match_score.side,
        handicap_before: match_score.handicap_before,
        handicap_after: match_score.handicap_before,
        allowance: 0,
        match_points: points,
        match_points_adjusted: points,
        bonus_points: 0,
        league_points: 0,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SetResultService;

impl SetResultService {
    pub fn new() -> Self {
        Self
    }

    /// Record one set of a scored match; the set's entries are the match's sides.
    pub async fn record_set_result(
        &self,
        conn: &DatabaseConnection,
        match_id: i64,
        data: SetResultData,
    ) -> Result<SetResult, DomainError> {
        let txn = begin_txn(conn).await?;
        let out = self.record_set_result_in_txn(&txn, match_id, data).await;
        finish_txn(txn, out).await
    }

    pub async fn record_set_result_in_txn(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        data: SetResultData,
    ) -> Result<SetResult, DomainError> {
        if data.left_points < 0 || data.right_points < 0 {
            return Err(DomainError::validation(
                ValidationKind::NegativeMatchPoints,
                "Match points cannot be negative",
            ));
        }

        let parent = match_results::require_match_result(txn, match_id).await?;
        let (left, right) = match (parent.left(), parent.right()) {
            (Some(left), Some(right)) => (left.clone(), right.clone()),
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::MatchNotScored,
                    format!("Match result {match_id} has no scores to attach sets to"),
                ))
            }
        };

        let winner_id = set_winner(data.left_points, data.right_points).map(|side| match side {
            Side::Left => left.entry_id,
            Side::Right => right.entry_id,
        });

        let mut set =
            set_results::create_set_result(txn, match_id, data.sequence, winner_id).await?;
        for (match_score, points) in [(&left, data.left_points), (&right, data.right_points)] {
            let score = scores::create_score(txn, set_score(set.id, match_score, points)).await?;
            set.scores.push(score);
        }

        info!(
            match_id,
            set_id = set.id,
            sequence = data.sequence,
            winner_id = ?winner_id,
            "Set result recorded"
        );
        Ok(set)
    }

    /// Live sets of a match in `sequence` order.
    pub async fn sets_for_match<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        match_id: i64,
    ) -> Result<Vec<SetResult>, DomainError> {
        set_results::find_all_by_match(conn, match_id).await
    }
}
