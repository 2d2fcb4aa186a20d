//! Resolution of a score's polymorphic parent.

use sea_orm::ConnectionTrait;

use crate::domain::ResultRef;
use crate::entities::ResultType;
use crate::errors::domain::DomainError;
use crate::repos::match_results::{self, MatchResult};
use crate::repos::set_results::{self, SetResult};

/// The loaded parent a score belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultParent {
    Match(MatchResult),
    Set(SetResult),
}

impl ResultParent {
    pub fn result_ref(&self) -> ResultRef {
        match self {
            ResultParent::Match(m) => ResultRef::match_result(m.id),
            ResultParent::Set(s) => ResultRef::set_result(s.id),
        }
    }

    /// Id of the match the parent belongs to (itself for a match).
    pub fn match_result_id(&self) -> i64 {
        match self {
            ResultParent::Match(m) => m.id,
            ResultParent::Set(s) => s.match_result_id,
        }
    }
}

pub async fn find_parent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result: ResultRef,
) -> Result<ResultParent, DomainError> {
    match result.kind {
        ResultType::Match => Ok(ResultParent::Match(
            match_results::require_match_result(conn, result.id).await?,
        )),
        ResultType::Set => Ok(ResultParent::Set(
            set_results::require_set_result(conn, result.id).await?,
        )),
    }
}
