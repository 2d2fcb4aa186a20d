//! Domain-level error type used across services, repos and adapters.
//!
//! This error type is store-agnostic. Adapters return `sea_orm::DbErr`; repos
//! convert it through `From<DbErr>` (see `infra::db_errors::map_db_err`) so that
//! callers only ever see one of four families: a rule violation, a missing
//! reference, a retryable conflict, or an infrastructure failure.

use thiserror::Error;

/// Business rule and input validation kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    SoloMatch,
    DuplicatePairing,
    NegativeMatchPoints,
    MatchPointsOutOfRange,
    MatchNotScored,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Competition,
    Stage,
    Round,
    Entry,
    Handicap,
    MatchResult,
    SetResult,
    Other(String),
}

/// Domain-level conflict kinds; all of them are safe to retry from scratch
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    OptimisticLock,
    DuplicatePairing,
    Serialization,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Config,
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Business rule violation or invalid input; the detail is user-facing
    #[error("{1}")]
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Concurrent write detected by the store
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::Config, detail.into())
    }

    /// Whether the caller may re-run the whole workflow.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Conflict(..))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(..))
    }

    pub fn is_rule_violation(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
