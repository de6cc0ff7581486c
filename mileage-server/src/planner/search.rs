//! DFS route search algorithm.
//!
//! Enumerates round-trip itineraries from an origin airport whose
//! cumulative price meets a spend target, expanding leg-by-leg under a
//! minimum-layover rule and a stop cap.

use chrono::{Duration, NaiveDate};

use crate::catalog::FlightCatalog;
use crate::domain::{Airport, Route};

use super::config::SearchConfig;

/// Error from route search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// The expansion budget ran out before the search finished
    #[error("search budget exhausted after {expansions} expansions")]
    BudgetExceeded { expansions: usize },
}

/// One user-issued search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Airport the itinerary must start and end at.
    pub origin: Airport,

    /// Spend threshold the route's total price must meet or exceed.
    pub target_amount: f64,

    /// Minimum gap between one leg's arrival and the next's departure.
    pub min_layover: Duration,

    /// Upper bound on connections (legs minus one).
    pub max_stops: usize,

    /// First calendar day of the departure window (inclusive).
    pub start_date: NaiveDate,

    /// Last calendar day of the departure window (inclusive).
    pub end_date: NaiveDate,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        origin: Airport,
        target_amount: f64,
        min_layover: Duration,
        max_stops: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            origin,
            target_amount,
            min_layover,
            max_stops,
            start_date,
            end_date,
        }
    }

    /// Validate the request against the catalog the search will run over.
    ///
    /// Contract violations are rejected here, before any search work;
    /// they are never coerced into an empty result.
    pub fn validate(&self, catalog: &FlightCatalog) -> Result<(), SearchError> {
        if !self.target_amount.is_finite() || self.target_amount < 0.0 {
            return Err(SearchError::InvalidRequest(
                "target amount must be a non-negative number".to_string(),
            ));
        }

        if self.end_date < self.start_date {
            return Err(SearchError::InvalidRequest(
                "end date is before start date".to_string(),
            ));
        }

        if self.min_layover < Duration::zero() {
            return Err(SearchError::InvalidRequest(
                "minimum layover must not be negative".to_string(),
            ));
        }

        if !catalog.contains_airport(self.origin) {
            return Err(SearchError::InvalidRequest(format!(
                "origin {} is not present in the catalog",
                self.origin
            )));
        }

        Ok(())
    }
}

/// Result of route search.
///
/// An empty `routes` list is a legitimate terminal outcome ("no
/// qualifying routes"), not an error.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Qualifying routes, in discovery order.
    pub routes: Vec<Route>,

    /// Number of partial routes expanded during search.
    pub expansions: usize,
}

impl SearchOutcome {
    /// Create an empty outcome.
    pub fn empty() -> Self {
        Self {
            routes: Vec::new(),
            expansions: 0,
        }
    }
}

/// Route finder using depth-first search.
///
/// The search is a pure function of (catalog, request): sibling branches
/// are explored in catalog order, so the discovery order of qualifying
/// routes is deterministic for a fixed catalog ordering.
pub struct RouteFinder<'a> {
    catalog: &'a FlightCatalog,
    request: &'a SearchRequest,
    config: &'a SearchConfig,
}

impl<'a> RouteFinder<'a> {
    /// Create a new route finder.
    pub fn new(
        catalog: &'a FlightCatalog,
        request: &'a SearchRequest,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            catalog,
            request,
            config,
        }
    }

    /// Search for qualifying round-trip routes.
    ///
    /// A route qualifies when it starts and ends at the request origin,
    /// has at least 2 legs and at most `max_stops` connections, meets the
    /// price target, and every consecutive leg pair satisfies the minimum
    /// layover. The catalog is expected to be date-window filtered by the
    /// caller; the finder applies no date filtering of its own.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for contract violations, `BudgetExceeded` when
    /// the expansion cap runs out. "No qualifying routes" is an `Ok`
    /// outcome with an empty route list.
    pub fn find_routes(&self) -> Result<SearchOutcome, SearchError> {
        self.request.validate(self.catalog)?;

        let origin = self.request.origin;
        let mut routes = Vec::new();
        let mut expansions = 0usize;

        // Explicit DFS stack of partial routes. Seeds and children are
        // pushed in reverse so popping visits them in catalog order.
        let mut stack: Vec<Route> = Vec::new();
        let seeds: Vec<Route> = self
            .catalog
            .departures_from(origin)
            .cloned()
            .filter_map(|leg| Route::new(vec![leg]).ok())
            .collect();
        stack.extend(seeds.into_iter().rev());

        while let Some(partial) = stack.pop() {
            expansions += 1;
            if expansions > self.config.max_expansions {
                return Err(SearchError::BudgetExceeded { expansions });
            }

            let earliest_departure = partial.arrival_time() + self.request.min_layover;
            let mut children = Vec::new();

            for next in self.catalog.departures_from(partial.last_destination()) {
                if next.departs() < earliest_departure {
                    continue;
                }

                let Ok(extended) = partial.extended(next.clone()) else {
                    continue;
                };

                let back_at_origin = extended.last_destination() == origin;
                let qualifies = back_at_origin
                    && extended.leg_count() > 1
                    && extended.total_price() >= self.request.target_amount;

                if qualifies {
                    // Leaf: never expanded further. The stop cap binds
                    // qualifying routes too.
                    if extended.connections() <= self.request.max_stops {
                        routes.push(extended);
                    }
                } else if !back_at_origin && extended.leg_count() <= self.request.max_stops {
                    // Below target with stops to spare: keep exploring.
                    children.push(extended);
                }
                // Otherwise pruned: returned to origin short of the
                // target, or out of stops.
            }

            stack.extend(children.into_iter().rev());
        }

        tracing::debug!(
            routes = routes.len(),
            expansions,
            origin = %origin,
            "route search complete"
        );

        Ok(SearchOutcome { routes, expansions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightLeg;
    use chrono::NaiveDateTime;
    use std::sync::Arc;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn leg(origin: &str, dest: &str, departs: &str, arrives: &str, price: f64) -> FlightLeg {
        FlightLeg::new(
            airport(origin),
            airport(dest),
            ts(departs),
            ts(arrives),
            price,
            120,
        )
        .unwrap()
    }

    fn request(origin: &str, target: f64, max_stops: usize) -> SearchRequest {
        SearchRequest::new(
            airport(origin),
            target,
            Duration::hours(1),
            max_stops,
            date("2024-11-14"),
            date("2024-11-20"),
        )
    }

    fn find(catalog: &FlightCatalog, request: &SearchRequest) -> SearchOutcome {
        let config = SearchConfig::default();
        RouteFinder::new(catalog, request, &config)
            .find_routes()
            .unwrap()
    }

    /// One out-and-back pair over the target.
    fn atl_jfk_catalog() -> FlightCatalog {
        FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("JFK", "ATL", "2024-11-14 13:00", "2024-11-14 16:00", 150.0),
        ])
    }

    #[test]
    fn finds_single_qualifying_round_trip() {
        let outcome = find(&atl_jfk_catalog(), &request("ATL", 300.0, 1));

        assert_eq!(outcome.routes.len(), 1);
        let route = &outcome.routes[0];
        assert_eq!(
            route.itinerary(),
            vec![airport("ATL"), airport("JFK"), airport("ATL")]
        );
        assert_eq!(route.total_price(), 350.0);
        assert_eq!(route.connections(), 1);
    }

    #[test]
    fn target_above_total_yields_empty_result() {
        let outcome = find(&atl_jfk_catalog(), &request("ATL", 500.0, 1));
        assert!(outcome.routes.is_empty());

        // Regardless of stop cap
        let outcome = find(&atl_jfk_catalog(), &request("ATL", 500.0, 5));
        assert!(outcome.routes.is_empty());
    }

    #[test]
    fn layover_below_minimum_is_rejected() {
        // Return departs 30 minutes after arrival; minimum is 1 hour.
        let catalog = FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("JFK", "ATL", "2024-11-14 11:30", "2024-11-14 14:30", 150.0),
        ]);
        let outcome = find(&catalog, &request("ATL", 300.0, 1));
        assert!(outcome.routes.is_empty());
    }

    #[test]
    fn layover_exactly_at_minimum_is_allowed() {
        let catalog = FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("JFK", "ATL", "2024-11-14 12:00", "2024-11-14 15:00", 150.0),
        ]);
        let outcome = find(&catalog, &request("ATL", 300.0, 1));
        assert_eq!(outcome.routes.len(), 1);
    }

    fn two_hop_catalog() -> FlightCatalog {
        // ATL -> JFK -> LAX -> ATL: only qualifies with 2 connections.
        FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("JFK", "LAX", "2024-11-14 13:00", "2024-11-14 19:00", 250.0),
            leg("LAX", "ATL", "2024-11-15 09:00", "2024-11-15 16:00", 220.0),
        ])
    }

    #[test]
    fn below_target_branch_keeps_expanding() {
        // After ATL->JFK the total (200) is below target (600); the branch
        // must continue through LAX rather than being dropped.
        let outcome = find(&two_hop_catalog(), &request("ATL", 600.0, 2));

        assert_eq!(outcome.routes.len(), 1);
        let route = &outcome.routes[0];
        assert_eq!(route.connections(), 2);
        assert_eq!(route.total_price(), 670.0);
        assert_eq!(
            route.itinerary(),
            vec![
                airport("ATL"),
                airport("JFK"),
                airport("LAX"),
                airport("ATL")
            ]
        );
    }

    #[test]
    fn stop_cap_prunes_longer_routes() {
        let outcome = find(&two_hop_catalog(), &request("ATL", 600.0, 1));
        assert!(outcome.routes.is_empty());
    }

    #[test]
    fn routes_not_returning_to_origin_are_not_collected() {
        // ATL -> JFK -> LAX exceeds the target but never returns.
        let catalog = FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("JFK", "LAX", "2024-11-14 13:00", "2024-11-14 19:00", 250.0),
        ]);
        let outcome = find(&catalog, &request("ATL", 300.0, 3));
        assert!(outcome.routes.is_empty());
    }

    #[test]
    fn return_below_target_is_pruned_not_reexpanded() {
        // The round trip totals 250 against a 300 target: the route
        // returns to ATL without qualifying and must be dropped, not
        // expanded onward from ATL.
        let catalog = FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 150.0),
            leg("JFK", "ATL", "2024-11-14 13:00", "2024-11-14 16:00", 100.0),
            leg("ATL", "LAX", "2024-11-15 09:00", "2024-11-15 11:30", 400.0),
        ]);
        let outcome = find(&catalog, &request("ATL", 300.0, 4));
        assert!(outcome.routes.is_empty());
    }

    #[test]
    fn discovery_order_follows_catalog_order() {
        // Two independent qualifying round trips; seeds in catalog order.
        let catalog = FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("ATL", "LAX", "2024-11-14 09:00", "2024-11-14 11:30", 300.0),
            leg("JFK", "ATL", "2024-11-14 13:00", "2024-11-14 16:00", 150.0),
            leg("LAX", "ATL", "2024-11-14 14:00", "2024-11-14 21:00", 180.0),
        ]);
        let outcome = find(&catalog, &request("ATL", 300.0, 1));

        assert_eq!(outcome.routes.len(), 2);
        assert_eq!(outcome.routes[0].itinerary()[1], airport("JFK"));
        assert_eq!(outcome.routes[1].itinerary()[1], airport("LAX"));
    }

    #[test]
    fn budget_exhaustion_is_an_error_not_empty() {
        let config = SearchConfig::new(20, 1, 60);
        let catalog = two_hop_catalog();
        let req = request("ATL", 600.0, 2);

        let result = RouteFinder::new(&catalog, &req, &config).find_routes();
        assert!(matches!(
            result,
            Err(SearchError::BudgetExceeded { expansions: 2 })
        ));
    }

    #[test]
    fn rejects_negative_target() {
        let result = RouteFinder::new(
            &atl_jfk_catalog(),
            &request("ATL", -1.0, 1),
            &SearchConfig::default(),
        )
        .find_routes();
        assert!(matches!(result, Err(SearchError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_nan_target() {
        let result = RouteFinder::new(
            &atl_jfk_catalog(),
            &request("ATL", f64::NAN, 1),
            &SearchConfig::default(),
        )
        .find_routes();
        assert!(matches!(result, Err(SearchError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_reversed_date_window() {
        let mut req = request("ATL", 300.0, 1);
        req.start_date = date("2024-11-20");
        req.end_date = date("2024-11-14");

        let result =
            RouteFinder::new(&atl_jfk_catalog(), &req, &SearchConfig::default()).find_routes();
        assert!(matches!(result, Err(SearchError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_negative_layover() {
        let mut req = request("ATL", 300.0, 1);
        req.min_layover = Duration::minutes(-5);

        let result =
            RouteFinder::new(&atl_jfk_catalog(), &req, &SearchConfig::default()).find_routes();
        assert!(matches!(result, Err(SearchError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_origin_missing_from_catalog() {
        let result = RouteFinder::new(
            &atl_jfk_catalog(),
            &request("SEA", 300.0, 1),
            &SearchConfig::default(),
        )
        .find_routes();
        assert!(matches!(result, Err(SearchError::InvalidRequest(_))));
    }

    #[test]
    fn distinct_leg_rows_yield_distinct_routes() {
        // Two identical-looking outbound rows are distinct catalog rows,
        // so both round trips are kept.
        let catalog = FlightCatalog::new(vec![
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("ATL", "JFK", "2024-11-14 08:00", "2024-11-14 11:00", 200.0),
            leg("JFK", "ATL", "2024-11-14 13:00", "2024-11-14 16:00", 150.0),
        ]);
        let outcome = find(&catalog, &request("ATL", 300.0, 1));
        assert_eq!(outcome.routes.len(), 2);
    }

    #[test]
    fn empty_catalog_origin_is_invalid_request() {
        let catalog = FlightCatalog::new(vec![]);
        let result = RouteFinder::new(
            &catalog,
            &request("ATL", 300.0, 1),
            &SearchConfig::default(),
        )
        .find_routes();
        assert!(matches!(result, Err(SearchError::InvalidRequest(_))));
    }

    #[test]
    fn arc_legs_are_shared_not_copied() {
        let catalog = atl_jfk_catalog();
        let outcome = find(&catalog, &request("ATL", 300.0, 1));
        assert!(Arc::ptr_eq(
            &outcome.routes[0].legs()[0],
            &catalog.legs()[0]
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::FlightLeg;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const AIRPORTS: [&str; 4] = ["ATL", "JFK", "LAX", "SEA"];

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 14).unwrap()
    }

    /// Strategy for one leg: endpoint indices, schedule slot, price.
    fn leg_strategy() -> impl Strategy<Value = FlightLeg> {
        (0usize..4, 0usize..4, 0i64..3, 0i64..24, 60i64..300, 0u32..500)
            .prop_filter("endpoints must differ", |(o, d, ..)| o != d)
            .prop_map(|(o, d, day, hour, dur_mins, price)| {
                let departs = base_date()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + Duration::days(day)
                    + Duration::hours(hour);
                let arrives = departs + Duration::minutes(dur_mins);
                FlightLeg::new(
                    Airport::parse(AIRPORTS[o]).unwrap(),
                    Airport::parse(AIRPORTS[d]).unwrap(),
                    departs,
                    arrives,
                    f64::from(price),
                    dur_mins as u32,
                )
                .unwrap()
            })
    }

    fn catalog_strategy() -> impl Strategy<Value = FlightCatalog> {
        prop::collection::vec(leg_strategy(), 1..10).prop_map(FlightCatalog::new)
    }

    proptest! {
        /// Every route the finder emits satisfies the full qualification
        /// contract.
        #[test]
        fn outputs_satisfy_route_invariants(
            catalog in catalog_strategy(),
            target in 0u32..800,
            max_stops in 0usize..3,
            layover_mins in 30i64..120,
        ) {
            let origin = Airport::parse("ATL").unwrap();
            prop_assume!(catalog.contains_airport(origin));

            let request = SearchRequest::new(
                origin,
                f64::from(target),
                Duration::minutes(layover_mins),
                max_stops,
                NaiveDate::from_ymd_opt(2024, 11, 14).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
            );
            let config = SearchConfig::default();

            let outcome = match RouteFinder::new(&catalog, &request, &config).find_routes() {
                Ok(outcome) => outcome,
                Err(SearchError::BudgetExceeded { .. }) => return Ok(()),
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            };

            for route in &outcome.routes {
                prop_assert_eq!(route.first_origin(), origin);
                prop_assert_eq!(route.last_destination(), origin);
                prop_assert!(route.leg_count() >= 2);
                prop_assert!(route.connections() <= max_stops);
                prop_assert!(route.total_price() >= f64::from(target));

                for pair in route.legs().windows(2) {
                    prop_assert!(pair[0].destination() == pair[1].origin());
                    prop_assert!(
                        pair[1].departs() - pair[0].arrives()
                            >= Duration::minutes(layover_mins)
                    );
                }
            }
        }

        /// Same catalog and request always discover the same routes in
        /// the same order.
        #[test]
        fn search_is_deterministic(catalog in catalog_strategy()) {
            let origin = Airport::parse("ATL").unwrap();
            prop_assume!(catalog.contains_airport(origin));

            let request = SearchRequest::new(
                origin,
                300.0,
                Duration::hours(1),
                2,
                NaiveDate::from_ymd_opt(2024, 11, 14).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
            );
            let config = SearchConfig::default();

            let a = RouteFinder::new(&catalog, &request, &config).find_routes();
            let b = RouteFinder::new(&catalog, &request, &config).find_routes();

            match (a, b) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a.routes.len(), b.routes.len());
                    prop_assert_eq!(a.expansions, b.expansions);
                    for (ra, rb) in a.routes.iter().zip(b.routes.iter()) {
                        prop_assert_eq!(ra.itinerary(), rb.itinerary());
                        prop_assert_eq!(ra.departure_time(), rb.departure_time());
                    }
                }
                (Err(_), Err(_)) => {}
                _ => return Err(TestCaseError::fail("one run errored, the other didn't")),
            }
        }
    }
}
