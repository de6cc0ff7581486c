//! Route scoring and ranking.
//!
//! Ranks candidate routes by a weighted blend of three cost metrics
//! (total route duration, total price, connection count), normalized
//! across the batch. Weights are derived from information entropy on the
//! first build and supplied by the user on re-rank. A diversity discount
//! then pushes near-duplicate itineraries down the list.
//!
//! Scores are oriented so that **lower is better**: callers sort
//! ascending on `weighted_score`, and sorting is stable so that ties
//! keep discovery order.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{Airport, FlightLeg, Route};

/// Additive epsilon inside the entropy logarithm, avoiding ln(0).
const ENTROPY_EPSILON: f64 = 1e-9;

/// Error from ranking.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RankError {
    /// User-supplied weights are unusable
    #[error("invalid ranking weights: {0}")]
    InvalidWeights(&'static str),
}

/// Objective weights over the three route metrics.
///
/// Always normalized: components are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricWeights {
    /// Weight on total route duration.
    pub duration: f64,

    /// Weight on total price.
    pub price: f64,

    /// Weight on connection count.
    pub connections: f64,
}

impl MetricWeights {
    /// Build weights from user preferences, normalizing them to sum 1.
    ///
    /// # Errors
    ///
    /// Rejects non-finite or negative components, and the all-zero set
    /// (which would make every route score identically).
    pub fn user(duration: f64, price: f64, connections: f64) -> Result<Self, RankError> {
        for w in [duration, price, connections] {
            if !w.is_finite() {
                return Err(RankError::InvalidWeights("weights must be finite"));
            }
            if w < 0.0 {
                return Err(RankError::InvalidWeights("weights must be non-negative"));
            }
        }

        let sum = duration + price + connections;
        if sum <= 0.0 {
            return Err(RankError::InvalidWeights(
                "at least one weight must be positive",
            ));
        }

        Ok(Self {
            duration: duration / sum,
            price: price / sum,
            connections: connections / sum,
        })
    }

    /// Equal weight on every metric. Fallback for batches too small or
    /// too uniform for entropy derivation.
    pub fn equal() -> Self {
        Self {
            duration: 1.0 / 3.0,
            price: 1.0 / 3.0,
            connections: 1.0 / 3.0,
        }
    }
}

/// Presentation copy of one leg, with formatted timestamps and
/// hour-converted duration.
#[derive(Debug, Clone, Serialize)]
pub struct LegDetail {
    pub origin: String,
    pub destination: String,
    pub departs: String,
    pub arrives: String,
    pub price: f64,
    pub duration_hours: f64,
}

impl LegDetail {
    fn from_leg(leg: &FlightLeg) -> Self {
        Self {
            origin: leg.origin().to_string(),
            destination: leg.destination().to_string(),
            departs: leg.departs_display(),
            arrives: leg.arrives_display(),
            price: leg.price(),
            duration_hours: leg.duration_hours(),
        }
    }
}

/// A route plus its computed ranking fields.
///
/// The score depends on the whole batch the route was ranked with (both
/// through normalization and through the diversity pass), so a
/// `ScoredRoute` is only meaningful next to its siblings.
#[derive(Debug, Clone)]
pub struct ScoredRoute {
    /// Formatted departure of the first leg.
    pub departure_time: String,

    /// Formatted arrival of the last leg.
    pub arrival_time: String,

    /// Sum of per-leg in-flight hours.
    pub total_inflight_hours: f64,

    /// Last arrival minus first departure, in seconds.
    pub total_duration_seconds: i64,

    /// Same span in hours, rounded to 2 decimal places.
    pub total_duration_hours: f64,

    /// Sum of leg prices.
    pub total_price: f64,

    /// Legs minus one.
    pub connections: usize,

    /// Ranking score; lower is better.
    pub weighted_score: f64,

    /// Ordered airport sequence, repeating the origin at both ends.
    pub itinerary: Vec<Airport>,

    /// Per-leg presentation details.
    pub legs: Vec<LegDetail>,
}

/// Rank a fresh candidate batch with entropy-derived weights.
///
/// Returns the scored routes sorted best-first along with the derived
/// weights, for display alongside the results.
pub fn rank_initial(routes: &[Route]) -> (Vec<ScoredRoute>, MetricWeights) {
    let normalized = normalized_metrics(routes);
    let weights = entropy_weights(&normalized);
    (score_batch(routes, &normalized, &weights), weights)
}

/// Re-rank an existing candidate batch with the given weights.
///
/// Runs the same scoring pipeline as [`rank_initial`] but skips weight
/// derivation. Never re-runs the route search.
pub fn rerank(routes: &[Route], weights: &MetricWeights) -> Vec<ScoredRoute> {
    let normalized = normalized_metrics(routes);
    score_batch(routes, &normalized, weights)
}

/// Min-max normalize values to [0, 1].
///
/// A constant batch (max == min) normalizes to all zeros rather than
/// dividing by zero; a metric that doesn't vary can't discriminate
/// between routes anyway.
fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max > min {
        values.iter().map(|v| (v - min) / (max - min)).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// Per-route raw metrics, normalized per metric across the batch.
/// Index order: duration, price, connections.
fn normalized_metrics(routes: &[Route]) -> [Vec<f64>; 3] {
    let durations: Vec<f64> = routes
        .iter()
        .map(|r| r.total_duration().num_seconds() as f64)
        .collect();
    let prices: Vec<f64> = routes.iter().map(Route::total_price).collect();
    let connections: Vec<f64> = routes.iter().map(|r| r.connections() as f64).collect();

    [
        min_max_normalize(&durations),
        min_max_normalize(&prices),
        min_max_normalize(&connections),
    ]
}

/// Derive objective weights from the Shannon entropy of each normalized
/// metric's distribution across the batch.
///
/// A metric whose values are more differentiated across routes (lower
/// entropy) receives higher weight; a metric that fails to discriminate
/// is not useful for ranking. Degenerate batches (fewer than two routes,
/// or no metric carrying any variation) fall back to equal weights.
fn entropy_weights(normalized: &[Vec<f64>; 3]) -> MetricWeights {
    let n = normalized[0].len();
    if n < 2 {
        return MetricWeights::equal();
    }
    let ln_n = (n as f64).ln();

    let mut retained = [0.0f64; 3];
    for (j, values) in normalized.iter().enumerate() {
        let total: f64 = values.iter().sum();
        let entropy = if total <= 0.0 {
            // Constant metric: treat as maximally undiscriminating.
            1.0
        } else {
            let weighted_log: f64 = values
                .iter()
                .map(|v| {
                    let p = v / total;
                    p * (p + ENTROPY_EPSILON).ln()
                })
                .sum();
            -(1.0 / ln_n) * weighted_log
        };
        // The epsilon can nudge entropy a hair past 1; clamp so weights
        // stay non-negative.
        retained[j] = (1.0 - entropy).max(0.0);
    }

    let denom: f64 = retained.iter().sum();
    if denom <= 0.0 {
        return MetricWeights::equal();
    }

    MetricWeights {
        duration: retained[0] / denom,
        price: retained[1] / denom,
        connections: retained[2] / denom,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score a batch and sort it best-first.
///
/// The weighted metric sum is a cost in [0, 1]. The diversity pass runs
/// left-to-right in discovery order: each route's preference
/// (1 - cost) is discounted by `1 / (1 + shared stops)` against the
/// stops of previously processed routes, and the exported score is
/// 1 - discounted preference. Processing in discovery order rather than
/// best-first means an early mediocre route can claim the low-penalty
/// slot for its stops; that order is deliberate and deterministic.
fn score_batch(
    routes: &[Route],
    normalized: &[Vec<f64>; 3],
    weights: &MetricWeights,
) -> Vec<ScoredRoute> {
    let mut seen_stops: HashSet<Airport> = HashSet::new();
    let mut scored = Vec::with_capacity(routes.len());

    for (i, route) in routes.iter().enumerate() {
        let cost = normalized[0][i] * weights.duration
            + normalized[1][i] * weights.price
            + normalized[2][i] * weights.connections;

        let stops = route.stops();
        let common = stops.intersection(&seen_stops).count();
        let diversity = 1.0 / (1.0 + common as f64);
        let final_score = (1.0 - cost) * diversity;
        let weighted_score = 1.0 - final_score;

        seen_stops.extend(stops);

        scored.push(ScoredRoute {
            departure_time: route.legs()[0].departs_display(),
            arrival_time: route.legs()[route.leg_count() - 1].arrives_display(),
            total_inflight_hours: round2(
                route.legs().iter().map(|leg| leg.duration_hours()).sum(),
            ),
            total_duration_seconds: route.total_duration().num_seconds(),
            total_duration_hours: round2(route.total_duration().num_seconds() as f64 / 3600.0),
            total_price: route.total_price(),
            connections: route.connections(),
            weighted_score,
            itinerary: route.itinerary(),
            legs: route.legs().iter().map(|leg| LegDetail::from_leg(leg)).collect(),
        });
    }

    // Stable: equal scores keep discovery order.
    scored.sort_by(|a, b| a.weighted_score.total_cmp(&b.weighted_score));
    scored
}
