//! Set result repository functions.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::set_results_sea as set_results_adapter;
use crate::domain::ResultRef;
use crate::entities::{set_results, ResultType, Side};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::scores::{self, Score};

/// Sub-contest within a match, hydrated with its scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SetResult {
    pub id: i64,
    pub match_result_id: i64,
    pub winner_id: Option<i64>,
    pub sequence: i16,
    pub created_at: OffsetDateTime,
    pub scores: Vec<Score>,
}

impl SetResult {
    pub fn has_winner(&self) -> bool {
        self.winner_id.is_some()
    }

    pub fn side(&self, side: Side) -> Option<&Score> {
        self.scores.iter().find(|s| s.side == side)
    }
}

fn assemble(model: set_results::Model, scores: Vec<Score>) -> SetResult {
    SetResult {
        id: model.id,
        match_result_id: model.match_result_id,
        winner_id: model.winner_id,
        sequence: model.sequence,
        created_at: model.created_at,
        scores,
    }
}

pub async fn create_set_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_result_id: i64,
    sequence: i16,
    winner_id: Option<i64>,
) -> Result<SetResult, DomainError> {
    let dto = set_results_adapter::SetResultCreate {
        match_result_id,
        winner_id,
        sequence,
    };
    let model = set_results_adapter::create_set_result(conn, dto).await?;
    Ok(assemble(model, Vec::new()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Option<SetResult>, DomainError> {
    match set_results_adapter::find_by_id(conn, set_id).await? {
        Some(model) => {
            let scores = scores::find_all_by_result(conn, ResultRef::set_result(model.id)).await?;
            Ok(Some(assemble(model, scores)))
        }
        None => Ok(None),
    }
}

pub async fn require_set_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<SetResult, DomainError> {
    find_by_id(conn, set_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::SetResult, format!("Set result {set_id} not found"))
    })
}

/// Live sets of a match in `sequence` order.
pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<SetResult>, DomainError> {
    let models = set_results_adapter::find_all_by_match(conn, match_id).await?;
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut by_set: HashMap<i64, Vec<Score>> = HashMap::new();
    for score in scores::find_all_by_results(conn, ResultType::Set, &ids).await? {
        by_set.entry(score.result.id).or_default().push(score);
    }
    Ok(models
        .into_iter()
        .map(|m| {
            let scores = by_set.remove(&m.id).unwrap_or_default();
            assemble(m, scores)
        })
        .collect())
}

/// Tombstone every set of a match together with the sets' scores.
pub async fn tombstone_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, DomainError> {
    let set_ids = set_results_adapter::find_ids_by_match(conn, match_id).await?;
    scores::tombstone_by_results(conn, ResultType::Set, &set_ids).await?;
    Ok(set_results_adapter::tombstone_by_match(conn, match_id).await?)
}
