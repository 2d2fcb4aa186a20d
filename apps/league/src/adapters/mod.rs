//! SeaORM adapters. Every function returns `DbErr`; repos map it to `DomainError`.
//!
//! Tombstoned rows (`deleted_at IS NOT NULL`) are excluded unless a function
//! says otherwise.

pub mod competitions_sea;
pub mod entries_sea;
pub mod handicaps_sea;
pub mod match_results_sea;
pub mod pairings_sea;
pub mod rounds_sea;
pub mod scores_sea;
pub mod set_results_sea;
pub mod stages_sea;
pub mod standings_sea;
