//! Result assembly.
//!
//! Flattens ranked routes into presentation records: one flat row per
//! itinerary with the per-leg details packed into a JSON string, ready
//! for a results table. Assembly truncates to the configured result cap
//! and never reorders what the ranker produced.

use serde::Serialize;

use super::rank::ScoredRoute;

/// One row of the results table.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryRecord {
    /// Formatted first departure.
    pub departure_time: String,

    /// Formatted last arrival.
    pub arrival_time: String,

    /// Sum of per-leg in-flight hours.
    pub total_inflight_hours: f64,

    /// Door-to-door span in hours.
    pub total_duration_hours: f64,

    /// Total price across all legs.
    pub price: f64,

    /// Number of connections.
    pub connections: usize,

    /// Ranking score; lower is better.
    pub weighted_score: f64,

    /// Airport codes in visit order.
    pub itinerary: Vec<String>,

    /// Detail-row toggle for the results table; rows start collapsed.
    pub expand_details: bool,

    /// Per-leg details as a JSON string, for lazy expansion client-side.
    pub flights: String,
}

impl ItineraryRecord {
    fn from_scored(route: &ScoredRoute) -> Self {
        let flights =
            serde_json::to_string(&route.legs).unwrap_or_else(|_| String::from("[]"));

        Self {
            departure_time: route.departure_time.clone(),
            arrival_time: route.arrival_time.clone(),
            total_inflight_hours: route.total_inflight_hours,
            total_duration_hours: route.total_duration_hours,
            price: route.total_price,
            connections: route.connections,
            weighted_score: route.weighted_score,
            itinerary: route.itinerary.iter().map(|a| a.to_string()).collect(),
            expand_details: false,
            flights,
        }
    }
}

/// Flatten the best `top_n` ranked routes into table records.
///
/// The input is assumed already sorted best-first; records keep that
/// order.
pub fn assemble(ranked: &[ScoredRoute], top_n: usize) -> Vec<ItineraryRecord> {
    ranked
        .iter()
        .take(top_n)
        .map(ItineraryRecord::from_scored)
        .collect()
}
