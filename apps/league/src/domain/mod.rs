//! Domain layer: pure league scoring logic, no I/O.

pub mod handicap;
pub mod pairing;
pub mod results;
pub mod scoring;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use handicap::{recalculate, HandicapRow, HandicapTable, MAX_MATCH_SCORE};
pub use pairing::{ensure_distinct, PairKey};
pub use results::ResultRef;
pub use scoring::{resolve_outcome, MatchOutcome, ScoreCard};
