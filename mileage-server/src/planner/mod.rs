//! Route planning: search, ranking, and result assembly.
//!
//! The planner runs in two phases. A build searches the flight catalog
//! for qualifying round trips and ranks them with entropy-derived
//! weights; a re-rank re-scores the cached candidates with user weights
//! without searching again. [`RouteSession`] ties the phases together.

mod assemble;
mod config;
mod rank;
mod search;
mod session;

pub use assemble::{ItineraryRecord, assemble};
pub use config::SearchConfig;
pub use rank::{LegDetail, MetricWeights, RankError, ScoredRoute};
pub use search::{RouteFinder, SearchError, SearchOutcome, SearchRequest};
pub use session::RouteSession;
