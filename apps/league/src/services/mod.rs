//! Transactional orchestration over repos and the pure domain layer.

pub mod entries;
pub mod handicaps;
pub mod match_results;
pub mod set_results;
pub mod standings;

pub use entries::EntryService;
pub use handicaps::HandicapService;
pub use match_results::{MatchResultData, MatchResultService, SideScore, RECENT_MATCH_LIMIT};
pub use set_results::{SetResultData, SetResultService};
pub use standings::{StandingService, StandingsAggregator};
