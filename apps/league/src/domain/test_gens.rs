//! Generators and fixtures shared by the domain tests.

use proptest::prelude::*;

use super::handicap::{HandicapRow, HandicapTable};
use crate::entities::BowStyle;

pub const MAX_HANDICAP: i16 = 100;

/// Allowance curve used across the tests: flat zero up to 10, then 8 per step.
/// Gives 15 -> 40 and 20 -> 80.
pub fn allowance_for(number: i16) -> i32 {
    (8 * i32::from(number) - 80).max(0)
}

pub fn recurve_table() -> HandicapTable {
    HandicapTable::new(
        BowStyle::Recurve,
        (0..=MAX_HANDICAP).map(|number| HandicapRow {
            number,
            match_allowance: allowance_for(number),
        }),
    )
}

pub fn handicap() -> impl Strategy<Value = i16> {
    0..=MAX_HANDICAP
}

pub fn raw_points() -> impl Strategy<Value = i32> {
    0..=1600i32
}
