//! Read-only match result queries. Tombstoned matches are never returned.

use sea_orm::ConnectionTrait;

use super::MatchResultService;
use crate::errors::domain::DomainError;
use crate::repos::match_results::{self, MatchResult};

impl<A> MatchResultService<A> {
    pub async fn find_match_result<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        match_id: i64,
    ) -> Result<MatchResult, DomainError> {
        match_results::require_match_result(conn, match_id).await
    }

    pub async fn count_for_competition<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        competition_id: i64,
    ) -> Result<u64, DomainError> {
        match_results::count_for_competition(conn, competition_id).await
    }

    /// Ordered `(shot_at, id)` ascending.
    pub async fn list_for_competition<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        competition_id: i64,
    ) -> Result<Vec<MatchResult>, DomainError> {
        match_results::list_for_competition(conn, competition_id).await
    }

    /// Latest `limit` matches, `shot_at` descending then `id` ascending.
    /// See [`super::RECENT_MATCH_LIMIT`] for the usual limit.
    pub async fn recent_for_competition<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        competition_id: i64,
        limit: u64,
    ) -> Result<Vec<MatchResult>, DomainError> {
        match_results::recent_for_competition(conn, competition_id, limit).await
    }

    /// Ordered `(shot_at, id)` ascending.
    pub async fn list_for_stage<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        stage_id: i64,
    ) -> Result<Vec<MatchResult>, DomainError> {
        match_results::list_for_stage(conn, stage_id).await
    }

    /// Ordered `(shot_at, id)` ascending.
    pub async fn list_for_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<Vec<MatchResult>, DomainError> {
        match_results::list_for_round(conn, round_id).await
    }
}
