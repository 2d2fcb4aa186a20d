//! Who may shoot against whom.

use crate::errors::domain::{DomainError, ValidationKind};

pub const SOLO_MATCH_MESSAGE: &str = "A match must involve two different people";
pub const DUPLICATE_PAIRING_MESSAGE: &str =
    "Two people may only compete against each other once per stage";

/// Unordered pair of distinct entries, stored low id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub low: i64,
    pub high: i64,
}

impl PairKey {
    pub fn new(a: i64, b: i64) -> Result<Self, DomainError> {
        ensure_distinct(a, b)?;
        Ok(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn contains(&self, entry_id: i64) -> bool {
        self.low == entry_id || self.high == entry_id
    }

    pub fn entry_ids(&self) -> [i64; 2] {
        [self.low, self.high]
    }
}

pub fn ensure_distinct(left_entry_id: i64, right_entry_id: i64) -> Result<(), DomainError> {
    if left_entry_id == right_entry_id {
        return Err(DomainError::validation(
            ValidationKind::SoloMatch,
            SOLO_MATCH_MESSAGE,
        ));
    }
    Ok(())
}

pub fn duplicate_pairing() -> DomainError {
    DomainError::validation(ValidationKind::DuplicatePairing, DUPLICATE_PAIRING_MESSAGE)
}
