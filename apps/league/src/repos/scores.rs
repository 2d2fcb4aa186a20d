//! Score repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::scores_sea as scores_adapter;
use crate::domain::{ResultRef, ScoreCard};
use crate::entities::{scores, ResultType, Side};
use crate::errors::domain::DomainError;

/// One competitor's result within a match or set.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub id: i64,
    pub result: ResultRef,
    pub entry_id: i64,
    pub side: Side,
    pub handicap_before: i16,
    pub handicap_after: i16,
    pub allowance: i32,
    pub match_points: i32,
    pub match_points_adjusted: i32,
    pub bonus_points: i32,
    pub league_points: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Score {
    /// How many numbers the handicap improved by; never negative.
    pub fn handicap_change(&self) -> i16 {
        self.handicap_before - self.handicap_after
    }

    pub fn total_points(&self) -> i32 {
        self.league_points + self.bonus_points
    }
}

/// Raw inputs for a score that is not derived from a handicap table.
#[derive(Debug, Clone)]
pub struct ScoreData {
    pub result: ResultRef,
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

impl ScoreData {
    pub fn from_card(result: ResultRef, card: &ScoreCard) -> Self {
        Self {
            result,
            entry_id: card.entry_id,
            side: card.side,
            handicap_before: card.handicap_before,
            handicap_after: card.handicap_after,
            allowance: card.allowance,
            match_points: card.match_points,
            match_points_adjusted: card.match_points_adjusted,
            bonus_points: card.bonus_points,
            league_points: card.league_points,
        }
    }
}

pub async fn create_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    data: ScoreData,
) -> Result<Score, DomainError> {
    let dto = scores_adapter::ScoreCreate {
        result_type: data.result.kind,
        result_id: data.result.id,
        entry_id: data.entry_id,
        side: data.side,
        handicap_before: data.handicap_before,
        handicap_after: data.handicap_after,
        allowance: data.allowance,
        match_points: data.match_points,
        match_points_adjusted: data.match_points_adjusted,
        bonus_points: data.bonus_points,
        league_points: data.league_points,
    };
    let score = scores_adapter::create_score(conn, dto).await?;
    Ok(Score::from(score))
}

/// Recompute an existing score in place from a fresh card.
pub async fn rewrite_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    score_id: i64,
    card: &ScoreCard,
) -> Result<Score, DomainError> {
    let dto = scores_adapter::ScoreUpdate {
        id: score_id,
        entry_id: card.entry_id,
        handicap_before: card.handicap_before,
        handicap_after: card.handicap_after,
        allowance: card.allowance,
        match_points: card.match_points,
        match_points_adjusted: card.match_points_adjusted,
        bonus_points: card.bonus_points,
        league_points: card.league_points,
    };
    let score = scores_adapter::update_score(conn, dto).await?;
    Ok(Score::from(score))
}

pub async fn update_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    score_id: i64,
    league_points: i32,
    bonus_points: i32,
) -> Result<(), DomainError> {
    let dto = scores_adapter::ScorePoints {
        id: score_id,
        league_points,
        bonus_points,
    };
    Ok(scores_adapter::update_points(conn, dto).await?)
}

/// Live scores of one result, left side first.
pub async fn find_all_by_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result: ResultRef,
) -> Result<Vec<Score>, DomainError> {
    let scores = scores_adapter::find_all_by_result(conn, result.kind, result.id).await?;
    Ok(scores.into_iter().map(Score::from).collect())
}

pub async fn find_all_by_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: ResultType,
    result_ids: &[i64],
) -> Result<Vec<Score>, DomainError> {
    let scores = scores_adapter::find_all_by_results(conn, kind, result_ids).await?;
    Ok(scores.into_iter().map(Score::from).collect())
}

pub async fn find_all_by_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: ResultType,
    entry_id: i64,
) -> Result<Vec<Score>, DomainError> {
    let scores = scores_adapter::find_all_by_entry(conn, kind, entry_id).await?;
    Ok(scores.into_iter().map(Score::from).collect())
}

/// Ids of live matches (or sets) an entry has a score in.
pub async fn find_result_ids_for_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: ResultType,
    entry_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(scores_adapter::find_result_ids_for_entry(conn, kind, entry_id).await?)
}

pub async fn tombstone_by_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kind: ResultType,
    result_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(scores_adapter::tombstone_by_results(conn, kind, result_ids).await?)
}

impl From<scores::Model> for Score {
    fn from(model: scores::Model) -> Self {
        Self {
            id: model.id,
            result: ResultRef {
                kind: model.result_type,
                id: model.result_id,
            },
            entry_id: model.entry_id,
            side: model.side,
            handicap_before: model.handicap_before,
            handicap_after: model.handicap_after,
            allowance: model.allowance,
            match_points: model.match_points,
            match_points_adjusted: model.match_points_adjusted,
            bonus_points: model.bonus_points,
            league_points: model.league_points,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
