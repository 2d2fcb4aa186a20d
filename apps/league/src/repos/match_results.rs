//! Match result repository functions.
//!
//! Matches are always returned hydrated with their live scores so the
//! computed accessors below work without another round trip.

use std::collections::{BTreeSet, HashMap};

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::match_results_sea as match_results_adapter;
use crate::adapters::match_results_sea::{MatchResultCreate, MatchResultUpdate};
use crate::domain::ResultRef;
use crate::entities::{match_results, MatchFormat, ResultType, Side};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::scores::{self, Score};
use crate::repos::{rounds, stages};

/// One contest between two sides.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub id: i64,
    pub round_id: i64,
    pub winner_id: Option<i64>,
    pub next_match_result_id: Option<i64>,
    pub format: MatchFormat,
    pub shot_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
    pub scores: Vec<Score>,
}

impl MatchResult {
    pub fn has_winner(&self) -> bool {
        self.winner_id.is_some()
    }

    /// A scored match with no winner.
    pub fn is_draw(&self) -> bool {
        self.winner_id.is_none() && self.left().is_some() && self.right().is_some()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn side(&self, side: Side) -> Option<&Score> {
        self.scores.iter().find(|s| s.side == side)
    }

    pub fn left(&self) -> Option<&Score> {
        self.side(Side::Left)
    }

    pub fn right(&self) -> Option<&Score> {
        self.side(Side::Right)
    }

    pub fn score_for(&self, entry_id: i64) -> Option<&Score> {
        self.scores.iter().find(|s| s.entry_id == entry_id)
    }

    pub fn winner(&self) -> Option<&Score> {
        self.winner_id.and_then(|id| self.score_for(id))
    }

    pub fn entry_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.scores.iter().map(|s| s.entry_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

fn assemble(model: match_results::Model, scores: Vec<Score>) -> MatchResult {
    MatchResult {
        id: model.id,
        round_id: model.round_id,
        winner_id: model.winner_id,
        next_match_result_id: model.next_match_result_id,
        format: model.format,
        shot_at: model.shot_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
        scores,
    }
}

async fn hydrate_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    model: match_results::Model,
) -> Result<MatchResult, DomainError> {
    let scores = scores::find_all_by_result(conn, ResultRef::match_result(model.id)).await?;
    Ok(assemble(model, scores))
}

async fn hydrate_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    models: Vec<match_results::Model>,
) -> Result<Vec<MatchResult>, DomainError> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut by_match: HashMap<i64, Vec<Score>> = HashMap::new();
    for score in scores::find_all_by_results(conn, ResultType::Match, &ids).await? {
        by_match.entry(score.result.id).or_default().push(score);
    }
    Ok(models
        .into_iter()
        .map(|m| {
            let scores = by_match.remove(&m.id).unwrap_or_default();
            assemble(m, scores)
        })
        .collect())
}

/// Create the match shell; scores and the winner are attached afterwards.
pub async fn create_shell<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    format: MatchFormat,
    shot_at: OffsetDateTime,
    next_match_result_id: Option<i64>,
) -> Result<MatchResult, DomainError> {
    let dto = MatchResultCreate {
        round_id,
        format,
        shot_at,
        next_match_result_id,
    };
    let model = match_results_adapter::create_match_result(conn, dto).await?;
    Ok(assemble(model, Vec::new()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<MatchResult>, DomainError> {
    match match_results_adapter::find_by_id(conn, match_id).await? {
        Some(model) => Ok(Some(hydrate_one(conn, model).await?)),
        None => Ok(None),
    }
}

pub async fn require_match_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<MatchResult, DomainError> {
    find_by_id(conn, match_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::MatchResult,
            format!("Match result {match_id} not found"),
        )
    })
}

/// Like [`find_by_id`] but also returns a tombstoned match (with its live
/// scores, which are normally none).
pub async fn find_by_id_with_tombstoned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<MatchResult>, DomainError> {
    match match_results_adapter::find_by_id_with_tombstoned(conn, match_id).await? {
        Some(model) => Ok(Some(hydrate_one(conn, model).await?)),
        None => Ok(None),
    }
}

pub async fn update_match_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchResultUpdate,
) -> Result<MatchResult, DomainError> {
    let model = match_results_adapter::update_match_result(conn, dto).await?;
    hydrate_one(conn, model).await
}

/// Returns false if the match was already tombstoned.
pub async fn tombstone<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<bool, DomainError> {
    Ok(match_results_adapter::tombstone(conn, match_id).await? > 0)
}

/// Live matches in the stage that both entries have a score in.
pub async fn find_ids_shot_by_both<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
    first_entry_id: i64,
    second_entry_id: i64,
) -> Result<Vec<i64>, DomainError> {
    let first: BTreeSet<i64> =
        scores::find_result_ids_for_entry(conn, ResultType::Match, first_entry_id)
            .await?
            .into_iter()
            .collect();
    let shared: Vec<i64> =
        scores::find_result_ids_for_entry(conn, ResultType::Match, second_entry_id)
            .await?
            .into_iter()
            .filter(|id| first.contains(id))
            .collect();
    filter_ids_in_stage(conn, &shared, stage_id).await
}

/// The subset of `match_ids` that are live matches in `stage_id`.
pub async fn filter_ids_in_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: &[i64],
    stage_id: i64,
) -> Result<Vec<i64>, DomainError> {
    let round_ids = rounds::find_ids_for_stages(conn, &[stage_id]).await?;
    Ok(match_results_adapter::filter_ids_in_rounds(conn, match_ids, &round_ids).await?)
}

/// `shot_at` of each live match among `match_ids`.
pub async fn shot_times<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: &[i64],
) -> Result<HashMap<i64, OffsetDateTime>, DomainError> {
    let rows = match_results_adapter::find_shot_times(conn, match_ids).await?;
    Ok(rows.into_iter().collect())
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: &[i64],
) -> Result<Vec<MatchResult>, DomainError> {
    let models = match_results_adapter::find_by_ids(conn, match_ids).await?;
    hydrate_many(conn, models).await
}

// Scoped queries. All ordered (shot_at, id) ascending unless noted.

async fn round_ids_for_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<Vec<i64>, DomainError> {
    let stage_ids = stages::find_ids_for_competition(conn, competition_id).await?;
    rounds::find_ids_for_stages(conn, &stage_ids).await
}

pub async fn count_for_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<u64, DomainError> {
    let round_ids = round_ids_for_competition(conn, competition_id).await?;
    Ok(match_results_adapter::count_in_rounds(conn, &round_ids).await?)
}

pub async fn list_for_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<Vec<MatchResult>, DomainError> {
    let round_ids = round_ids_for_competition(conn, competition_id).await?;
    let models = match_results_adapter::find_all_in_rounds(conn, &round_ids).await?;
    hydrate_many(conn, models).await
}

/// Most recent first: `shot_at` descending, then `id` ascending.
pub async fn recent_for_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
    limit: u64,
) -> Result<Vec<MatchResult>, DomainError> {
    let round_ids = round_ids_for_competition(conn, competition_id).await?;
    let models = match_results_adapter::find_recent_in_rounds(conn, &round_ids, limit).await?;
    hydrate_many(conn, models).await
}

pub async fn list_for_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
) -> Result<Vec<MatchResult>, DomainError> {
    let round_ids = rounds::find_ids_for_stages(conn, &[stage_id]).await?;
    let models = match_results_adapter::find_all_in_rounds(conn, &round_ids).await?;
    hydrate_many(conn, models).await
}

pub async fn list_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<MatchResult>, DomainError> {
    let models = match_results_adapter::find_all_in_rounds(conn, &[round_id]).await?;
    hydrate_many(conn, models).await
}
