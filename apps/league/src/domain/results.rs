//! Typed reference to the parent of a score row.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::entities::ResultType;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultRef {
    pub kind: ResultType,
    pub id: i64,
}

impl ResultRef {
    pub fn match_result(id: i64) -> Self {
        Self {
            kind: ResultType::Match,
            id,
        }
    }

    pub fn set_result(id: i64) -> Self {
        Self {
            kind: ResultType::Set,
            id,
        }
    }
}

pub fn result_type_tag(kind: ResultType) -> &'static str {
    match kind {
        ResultType::Match => "match",
        ResultType::Set => "set",
    }
}

impl Display for ResultRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", result_type_tag(self.kind), self.id)
    }
}

impl FromStr for ResultRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, id) = s
            .split_once(':')
            .ok_or_else(|| DomainError::validation_other(format!("malformed result ref '{s}'")))?;
        let id = id
            .parse::<i64>()
            .map_err(|_| DomainError::validation_other(format!("malformed result id '{id}'")))?;
        match tag {
            "match" => Ok(Self::match_result(id)),
            "set" => Ok(Self::set_result(id)),
            other => Err(DomainError::validation_other(format!(
                "unknown result type '{other}'"
            ))),
        }
    }
}
