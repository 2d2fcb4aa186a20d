//! Per-side scoring and the pairing rules shared by record and update.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::{MatchResultService, SideScore};
use crate::adapters::match_results_sea::MatchResultUpdate;
use crate::domain::pairing::duplicate_pairing;
use crate::domain::{MatchOutcome, PairKey, ResultRef, ScoreCard};
use crate::entities::Side;
use crate::errors::domain::DomainError;
use crate::repos::match_results::{self, MatchResult};
use crate::repos::scores::{self, ScoreData};
use crate::repos::{entries, pairings};
use crate::services::standings::StandingsAggregator;

/// A persisted score and the card it was computed from.
#[derive(Debug, Clone, Copy)]
pub(super) struct ScoredSide {
    pub score_id: i64,
    pub card: ScoreCard,
}

impl<A: StandingsAggregator> MatchResultService<A> {
    /// Score one side of a new match off the entry's current handicap.
    pub(super) async fn record_score(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        side: Side,
        input: SideScore,
    ) -> Result<ScoredSide, DomainError> {
        let entry = entries::require_entry(txn, input.entry_id).await?;
        let table = self.handicaps.table_for(txn, entry.bow_style).await?;
        let card = ScoreCard::compute(
            side,
            entry.id,
            &table,
            entry.current_handicap,
            input.match_points,
        )?;

        let score = scores::create_score(
            txn,
            ScoreData::from_card(ResultRef::match_result(match_id), &card),
        )
        .await?;
        debug!(
            match_id,
            entry_id = entry.id,
            ?side,
            handicap_before = card.handicap_before,
            handicap_after = card.handicap_after,
            adjusted = card.match_points_adjusted,
            "Score recorded"
        );

        if card.improves_handicap() {
            self.entries
                .improve_entry_handicap(txn, &entry, card.handicap_after)
                .await?;
        }

        Ok(ScoredSide {
            score_id: score.id,
            card,
        })
    }

    /// Recompute an existing score as of `shot_at`, leaving the entry untouched.
    pub(super) async fn rescore(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        score_id: i64,
        side: Side,
        input: SideScore,
        shot_at: OffsetDateTime,
    ) -> Result<ScoredSide, DomainError> {
        let entry = entries::require_entry(txn, input.entry_id).await?;
        let handicap_before = self
            .entries
            .handicap_at(txn, &entry, shot_at, Some(match_id))
            .await?;
        let table = self.handicaps.table_for(txn, entry.bow_style).await?;
        let card = ScoreCard::compute(side, entry.id, &table, handicap_before, input.match_points)?;

        scores::rewrite_score(txn, score_id, &card).await?;
        debug!(
            match_id,
            entry_id = entry.id,
            ?side,
            handicap_before,
            adjusted = card.match_points_adjusted,
            "Score rewritten"
        );

        Ok(ScoredSide { score_id, card })
    }

    /// Enforce the solo-match and once-per-stage rules for `match_id`.
    pub(super) async fn check_pairing(
        &self,
        txn: &DatabaseTransaction,
        stage_id: i64,
        left: &ScoreCard,
        right: &ScoreCard,
        match_id: i64,
    ) -> Result<PairKey, DomainError> {
        let pair = match PairKey::new(left.entry_id, right.entry_id) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(match_id, entry_id = left.entry_id, "Rejected solo match");
                return Err(e);
            }
        };

        let clashes =
            match_results::find_ids_shot_by_both(txn, stage_id, pair.low, pair.high).await?;
        if let Some(existing) = clashes.into_iter().find(|id| *id != match_id) {
            warn!(
                match_id,
                existing_match_id = existing,
                stage_id,
                low_entry_id = pair.low,
                high_entry_id = pair.high,
                "Rejected duplicate pairing"
            );
            return Err(duplicate_pairing());
        }
        Ok(pair)
    }

    /// Store resolved points on both scores and the winner on the match.
    pub(super) async fn settle(
        &self,
        txn: &DatabaseTransaction,
        update: MatchResultUpdate,
        left: &ScoredSide,
        right: &ScoredSide,
        outcome: MatchOutcome,
    ) -> Result<MatchResult, DomainError> {
        for side in [left, right] {
            scores::update_points(
                txn,
                side.score_id,
                side.card.league_points,
                side.card.bonus_points,
            )
            .await?;
        }

        let winner_id = outcome.winner_side().map(|winner| match winner {
            Side::Left => left.card.entry_id,
            Side::Right => right.card.entry_id,
        });

        match_results::update_match_result(txn, update.with_winner(winner_id)).await
    }

    /// Move the stage pairing guard to `pair` for this match.
    pub(super) async fn claim_pairing(
        &self,
        txn: &DatabaseTransaction,
        stage_id: i64,
        pair: PairKey,
        match_id: i64,
    ) -> Result<(), DomainError> {
        pairings::release_for_match(txn, match_id).await?;
        pairings::claim(txn, stage_id, pair, match_id).await
    }
}
