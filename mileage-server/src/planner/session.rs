//! Search sessions.
//!
//! A session captures one completed route search: the qualifying routes
//! in discovery order, the entropy-derived weights, and the initial
//! ranking. Re-ranking with user weights re-scores the cached routes and
//! never re-runs the search, so it stays cheap no matter how expensive
//! the original search was.

use crate::catalog::FlightCatalog;
use crate::domain::Route;

use super::config::SearchConfig;
use super::rank::{self, MetricWeights, RankError, ScoredRoute};
use super::search::{RouteFinder, SearchError, SearchOutcome, SearchRequest};

/// One completed search and its ranked results.
#[derive(Debug, Clone)]
pub struct RouteSession {
    routes: Vec<Route>,
    derived_weights: MetricWeights,
    ranking: Vec<ScoredRoute>,
    expansions: usize,
}

impl RouteSession {
    /// Run a search over the request's date window and rank the results.
    ///
    /// The catalog is narrowed to legs departing within the request's
    /// date window before the search runs. A window that excludes the
    /// origin entirely is an empty result, not an error.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for contract violations against the full
    /// catalog, `BudgetExceeded` if the search runs out of budget.
    pub fn build(
        catalog: &FlightCatalog,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        request.validate(catalog)?;

        let window = catalog.filter_by_date_window(request.start_date, request.end_date);
        let outcome = if window.contains_airport(request.origin) {
            RouteFinder::new(&window, request, config).find_routes()?
        } else {
            SearchOutcome::empty()
        };

        let (ranking, derived_weights) = rank::rank_initial(&outcome.routes);

        tracing::info!(
            origin = %request.origin,
            routes = outcome.routes.len(),
            expansions = outcome.expansions,
            "search session built"
        );

        Ok(Self {
            routes: outcome.routes,
            derived_weights,
            ranking,
            expansions: outcome.expansions,
        })
    }

    /// Re-rank the cached routes with user-supplied weights.
    ///
    /// Weights are normalized to sum 1 before scoring. Operates purely
    /// on the cached candidate set; an empty session re-ranks to an
    /// empty list.
    ///
    /// # Errors
    ///
    /// `InvalidWeights` if the weights are non-finite, negative, or all
    /// zero.
    pub fn rerank(
        &self,
        duration_weight: f64,
        price_weight: f64,
        connection_weight: f64,
    ) -> Result<Vec<ScoredRoute>, RankError> {
        let weights = MetricWeights::user(duration_weight, price_weight, connection_weight)?;
        Ok(rank::rerank(&self.routes, &weights))
    }

    /// The initial ranking, best-first.
    pub fn ranking(&self) -> &[ScoredRoute] {
        &self.ranking
    }

    /// Weights derived from the candidate batch at build time.
    pub fn derived_weights(&self) -> MetricWeights {
        self.derived_weights
    }

    /// Number of qualifying routes found.
    pub fn routes_found(&self) -> usize {
        self.routes.len()
    }

    /// Partial-route expansions spent by the search.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
}
