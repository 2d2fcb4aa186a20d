//! Repository functions for the domain layer.
//!
//! Each module wraps an adapter, converts entity models into domain models and
//! maps `DbErr` into `DomainError`.

pub mod competitions;
pub mod entries;
pub mod handicaps;
pub mod match_results;
pub mod pairings;
pub mod results;
pub mod rounds;
pub mod scores;
pub mod set_results;
pub mod stages;
pub mod standings;
