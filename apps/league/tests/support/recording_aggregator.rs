//! A standings aggregator that only records what it was asked to do.

use std::sync::Mutex;

use async_trait::async_trait;
use league::repos::match_results::MatchResult;
use league::{DomainError, StandingsAggregator};
use sea_orm::DatabaseTransaction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Apply { match_id: i64, entry_ids: Vec<i64> },
    Retract { match_id: i64, entry_ids: Vec<i64> },
}

#[derive(Default)]
pub struct RecordingAggregator {
    calls: Mutex<Vec<Call>>,
}

impl RecordingAggregator {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl StandingsAggregator for RecordingAggregator {
    async fn apply_match_result(
        &self,
        _txn: &DatabaseTransaction,
        match_result: &MatchResult,
    ) -> Result<(), DomainError> {
        self.calls.lock().expect("calls lock").push(Call::Apply {
            match_id: match_result.id,
            entry_ids: match_result.entry_ids(),
        });
        Ok(())
    }

    async fn retract_match_result(
        &self,
        _txn: &DatabaseTransaction,
        match_result: &MatchResult,
    ) -> Result<(), DomainError> {
        self.calls.lock().expect("calls lock").push(Call::Retract {
            match_id: match_result.id,
            entry_ids: match_result.entry_ids(),
        });
        Ok(())
    }
}
