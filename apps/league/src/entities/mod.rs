pub mod competitions;
pub mod entries;
pub mod handicaps;
pub mod match_pairings;
pub mod match_results;
pub mod rounds;
pub mod scores;
pub mod set_results;
pub mod stages;
pub mod standings;

pub use entries::BowStyle;
pub use match_results::MatchFormat;
pub use scores::{ResultType, Side};
