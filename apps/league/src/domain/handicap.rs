//! Handicap reference table and the progression rule applied after each match.
//!
//! Numbers are "lower is better". Each bow style has its own table mapping a
//! handicap number to the allowance added to a raw match score. A handicap only
//! ever improves, and only when the shooter reaches [`MAX_MATCH_SCORE`] off
//! their current allowance.

use crate::entities::BowStyle;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Maximum possible adjusted match score; reaching it is a "handicap hit".
pub const MAX_MATCH_SCORE: i32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandicapRow {
    pub number: i16,
    pub match_allowance: i32,
}

/// All handicap rows for one bow style, sorted by number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandicapTable {
    bow_style: BowStyle,
    rows: Vec<HandicapRow>,
}

impl HandicapTable {
    pub fn new(bow_style: BowStyle, rows: impl IntoIterator<Item = HandicapRow>) -> Self {
        let mut rows: Vec<HandicapRow> = rows.into_iter().collect();
        rows.sort_by_key(|r| r.number);
        rows.dedup_by_key(|r| r.number);
        Self { bow_style, rows }
    }

    pub fn bow_style(&self) -> BowStyle {
        self.bow_style
    }

    pub fn rows(&self) -> &[HandicapRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn min_number(&self) -> Option<i16> {
        self.rows.first().map(|r| r.number)
    }

    pub fn max_number(&self) -> Option<i16> {
        self.rows.last().map(|r| r.number)
    }

    pub fn row(&self, number: i16) -> Option<HandicapRow> {
        self.rows
            .binary_search_by_key(&number, |r| r.number)
            .ok()
            .map(|idx| self.rows[idx])
    }

    /// Look up a row, failing the way a missing reference row should.
    pub fn require(&self, number: i16) -> Result<HandicapRow, DomainError> {
        self.row(number).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Handicap,
                format!("No {:?} handicap numbered {number}", self.bow_style),
            )
        })
    }

    pub fn allowance(&self, number: i16) -> Result<i32, DomainError> {
        self.require(number).map(|r| r.match_allowance)
    }

    /// Best (lowest) handicap whose allowance would lift `raw` to the maximum score.
    pub fn performance_handicap(&self, raw: i32) -> Option<i16> {
        self.rows
            .iter()
            .find(|r| raw.saturating_add(r.match_allowance) >= MAX_MATCH_SCORE)
            .map(|r| r.number)
    }

    fn smallest_at_or_above(&self, number: i32) -> Option<i16> {
        self.rows
            .iter()
            .find(|r| i32::from(r.number) >= number)
            .map(|r| r.number)
    }
}

/// Compute the handicap an entry holds after shooting `raw` points off `current`.
///
/// The new number is the midpoint (rounded towards the worse handicap) between
/// `current` and the handicap the score was worth, snapped onto the table, and
/// never worse than `current`.
pub fn recalculate(table: &HandicapTable, current: i16, raw: i32) -> Result<i16, DomainError> {
    if raw < 0 {
        return Err(DomainError::validation(
            ValidationKind::NegativeMatchPoints,
            "Match points cannot be negative",
        ));
    }

    table.require(current)?;

    // current is in the table, so the table is not empty
    let worst = table.max_number().unwrap_or(current);
    let performance = table.performance_handicap(raw).unwrap_or(worst);

    let candidate = (i32::from(current) + i32::from(performance) + 1).div_euclid(2);
    let snapped = table.smallest_at_or_above(candidate).unwrap_or(worst);

    Ok(snapped.min(current))
}
