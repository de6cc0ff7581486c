//! Search configuration for the route planner.

use chrono::Duration;

/// Configuration parameters for route search and result assembly.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of ranked itineraries to return.
    pub max_results: usize,

    /// Maximum number of partial-route expansions before the search is
    /// aborted with a budget error. Search cost is exponential in the
    /// branching factor and stop cap, so this is the safety valve.
    pub max_expansions: usize,

    /// Minimum layover applied when a request doesn't specify one
    /// (minutes).
    pub default_min_layover_mins: i64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_results: usize, max_expansions: usize, default_min_layover_mins: i64) -> Self {
        Self {
            max_results,
            max_expansions,
            default_min_layover_mins,
        }
    }

    /// Returns the default minimum layover as a Duration.
    pub fn default_min_layover(&self) -> Duration {
        Duration::minutes(self.default_min_layover_mins)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            max_expansions: 250_000,
            default_min_layover_mins: 60, // 1 hour
        }
    }
}
