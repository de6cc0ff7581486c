//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::{ItineraryRecord, MetricWeights};

/// Request to search for mileage-run itineraries.
#[derive(Debug, Deserialize)]
pub struct BuildRoutesRequest {
    /// Origin airport code (e.g. "ATL")
    pub origin: String,

    /// Spend target the itinerary total must meet or exceed
    pub target_amount: f64,

    /// First departure date, "YYYY-MM-DD"
    pub start_date: String,

    /// Last departure date, "YYYY-MM-DD"
    pub end_date: String,

    /// Maximum number of connections
    pub max_stops: usize,

    /// Minimum layover in minutes (defaults to the server configuration)
    pub min_layover_mins: Option<i64>,
}

/// Response for an itinerary search.
#[derive(Debug, Serialize)]
pub struct BuildRoutesResponse {
    /// Session handle for subsequent re-ranking
    pub session_id: u64,

    /// Number of qualifying routes found (before the result cap)
    pub routes_found: usize,

    /// Partial-route expansions spent by the search
    pub expansions: usize,

    /// Entropy-derived weights used for the initial ranking
    pub weights: MetricWeights,

    /// Ranked itineraries, best first, capped at the result limit
    pub routes: Vec<ItineraryRecord>,
}

/// Request to re-rank a previous search with user weights.
#[derive(Debug, Deserialize)]
pub struct RerankRequest {
    /// Session handle from a previous search
    pub session_id: u64,

    /// Preference weight on total trip duration
    pub time_weight: f64,

    /// Preference weight on total price
    pub cost_weight: f64,

    /// Preference weight on connection count (defaults to 0)
    pub connection_weight: Option<f64>,
}

/// Response for a re-rank.
#[derive(Debug, Serialize)]
pub struct RerankResponse {
    /// Session handle, unchanged
    pub session_id: u64,

    /// Re-ranked itineraries, best first, capped at the result limit
    pub routes: Vec<ItineraryRecord>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
