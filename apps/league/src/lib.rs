#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::db::{db_url, DbOwner, DbProfile};
pub use errors::domain::DomainError;
pub use infra::db::{bootstrap_db, connect_db};
pub use services::{
    EntryService, HandicapService, MatchResultData, MatchResultService, SetResultData,
    SetResultService, SideScore, StandingService, StandingsAggregator, RECENT_MATCH_LIMIT,
};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    league_test_support::logging::init();
}
