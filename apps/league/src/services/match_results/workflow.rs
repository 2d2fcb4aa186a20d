//! The record, update and remove workflows, run inside a caller's transaction.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::{stored_shot_at, MatchResultData, MatchResultService};
use crate::adapters::match_results_sea::MatchResultUpdate;
use crate::domain::resolve_outcome;
use crate::entities::{ResultType, Side};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::match_results::{self, MatchResult};
use crate::repos::{pairings, rounds, scores, set_results, stages};
use crate::services::standings::StandingsAggregator;

impl<A: StandingsAggregator> MatchResultService<A> {
    pub async fn record_match_result_in_txn(
        &self,
        txn: &DatabaseTransaction,
        stage_id: i64,
        data: MatchResultData,
    ) -> Result<MatchResult, DomainError> {
        let stage = stages::require_stage(txn, stage_id).await?;
        // the round is chosen by the stored instant so shot_at stays inside it
        let shot_at = stored_shot_at(data.shot_at)?;
        let round = rounds::find_round_covering(txn, stage.id, shot_at.date()).await?;

        let shell = match_results::create_shell(
            txn,
            round.id,
            data.format,
            shot_at,
            data.next_match_result_id,
        )
        .await?;
        debug!(match_id = shell.id, round_id = round.id, stage_id, "Match shell created");

        let mut left = self
            .record_score(txn, shell.id, Side::Left, data.left_score)
            .await?;
        let mut right = self
            .record_score(txn, shell.id, Side::Right, data.right_score)
            .await?;

        let pair = self
            .check_pairing(txn, stage.id, &left.card, &right.card, shell.id)
            .await?;

        let outcome = resolve_outcome(&mut left.card, &mut right.card);
        let saved = self
            .settle(txn, MatchResultUpdate::new(shell.id), &left, &right, outcome)
            .await?;

        self.claim_pairing(txn, stage.id, pair, saved.id).await?;
        self.standings.apply_match_result(txn, &saved).await?;

        info!(
            match_id = saved.id,
            stage_id,
            round_id = round.id,
            winner_id = ?saved.winner_id,
            "Match result recorded"
        );
        Ok(saved)
    }

    pub async fn update_match_result_in_txn(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        stage_id: i64,
        data: MatchResultData,
    ) -> Result<MatchResult, DomainError> {
        let existing = match_results::require_match_result(txn, match_id).await?;
        let (left_score_id, right_score_id) = match (existing.left(), existing.right()) {
            (Some(left), Some(right)) => (left.id, right.id),
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::MatchNotScored,
                    format!("Match result {match_id} has no scores to update"),
                ))
            }
        };

        let stage = stages::require_stage(txn, stage_id).await?;
        let shot_at = stored_shot_at(data.shot_at)?;
        let round = rounds::find_round_covering(txn, stage.id, shot_at.date()).await?;

        let mut left = self
            .rescore(txn, match_id, left_score_id, Side::Left, data.left_score, shot_at)
            .await?;
        let mut right = self
            .rescore(txn, match_id, right_score_id, Side::Right, data.right_score, shot_at)
            .await?;

        let pair = self
            .check_pairing(txn, stage.id, &left.card, &right.card, match_id)
            .await?;

        let outcome = resolve_outcome(&mut left.card, &mut right.card);
        let update = MatchResultUpdate::new(match_id)
            .with_round(round.id)
            .with_shot_at(shot_at);
        let saved = self.settle(txn, update, &left, &right, outcome).await?;

        self.claim_pairing(txn, stage.id, pair, match_id).await?;
        self.standings.retract_match_result(txn, &existing).await?;
        self.standings.apply_match_result(txn, &saved).await?;

        info!(
            match_id,
            stage_id,
            round_id = round.id,
            winner_id = ?saved.winner_id,
            "Match result updated"
        );
        Ok(saved)
    }

    pub async fn remove_match_result_in_txn(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<bool, DomainError> {
        let existing = match_results::find_by_id_with_tombstoned(txn, match_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::MatchResult,
                    format!("Match result {match_id} not found"),
                )
            })?;

        if existing.is_deleted() {
            debug!(match_id, "Match result already removed");
            return Ok(false);
        }

        scores::tombstone_by_results(txn, ResultType::Match, &[match_id]).await?;
        let sets = set_results::tombstone_for_match(txn, match_id).await?;
        let removed = match_results::tombstone(txn, match_id).await?;
        pairings::release_for_match(txn, match_id).await?;
        self.standings.retract_match_result(txn, &existing).await?;

        info!(match_id, sets, "Match result removed");
        Ok(removed)
    }
}
