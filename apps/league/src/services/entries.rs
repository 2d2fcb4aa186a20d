//! Entry lookups and handicap bookkeeping.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::entities::ResultType;
use crate::errors::domain::DomainError;
use crate::repos::entries::{self, Entry};
use crate::repos::{match_results, scores};

#[derive(Debug, Default, Clone, Copy)]
pub struct EntryService;

impl EntryService {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_entry<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        entry_id: i64,
    ) -> Result<Entry, DomainError> {
        entries::require_entry(conn, entry_id).await
    }

    /// Lower the entry's current handicap to `new_handicap`.
    ///
    /// A number that is not an improvement leaves the entry untouched. The write
    /// is checked against the lock version `entry` was read with.
    pub async fn improve_entry_handicap<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        entry: &Entry,
        new_handicap: i16,
    ) -> Result<Entry, DomainError> {
        if new_handicap >= entry.current_handicap {
            return Ok(entry.clone());
        }

        let updated =
            entries::update_current_handicap(conn, entry.id, new_handicap, entry.lock_version)
                .await?;

        info!(
            entry_id = entry.id,
            from = entry.current_handicap,
            to = new_handicap,
            "Entry handicap improved"
        );
        Ok(updated)
    }

    /// The handicap `entry` held strictly before `at`.
    ///
    /// Taken from the entry's latest live match score shot before `at` (by
    /// `shot_at`, then match id), ignoring `excluding_match`. Falls back to the
    /// entry's initial handicap when there is no earlier score.
    pub async fn handicap_at<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        entry: &Entry,
        at: OffsetDateTime,
        excluding_match: Option<i64>,
    ) -> Result<i16, DomainError> {
        let history = scores::find_all_by_entry(conn, ResultType::Match, entry.id).await?;
        let match_ids: Vec<i64> = history.iter().map(|s| s.result.id).collect();
        let shot_times = match_results::shot_times(conn, &match_ids).await?;

        let previous = history
            .iter()
            .filter(|s| Some(s.result.id) != excluding_match)
            .filter_map(|s| {
                shot_times
                    .get(&s.result.id)
                    .map(|shot_at| ((*shot_at, s.result.id), s.handicap_after))
            })
            .filter(|((shot_at, _), _)| *shot_at < at)
            .max_by_key(|(key, _)| *key);

        let handicap = match previous {
            Some(((_, match_id), handicap_after)) => {
                debug!(entry_id = entry.id, match_id, handicap_after, "Handicap from history");
                handicap_after
            }
            None => entry.initial_handicap,
        };
        Ok(handicap)
    }
}
