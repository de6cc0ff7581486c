//! Route type.
//!
//! A `Route` is an ordered chain of flight legs forming one itinerary.
//! Routes are produced by the route finder and consumed read-only by the
//! scorer; they are never mutated after construction.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};

use super::{Airport, DomainError, FlightLeg};

/// An ordered sequence of flight legs forming one itinerary.
///
/// # Invariants
///
/// - Non-empty
/// - Consecutive legs chain: `leg[i].destination == leg[i+1].origin`
///
/// Layover and qualification rules (price target, returning to the
/// origin) are enforced by the route finder, not here: a `Route` is any
/// well-formed chain.
#[derive(Debug, Clone)]
pub struct Route {
    legs: Vec<Arc<FlightLeg>>,
}

impl Route {
    /// Constructs a route from legs, validating the chaining invariant.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the leg list is empty or consecutive legs don't
    /// connect.
    pub fn new(legs: Vec<Arc<FlightLeg>>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for window in legs.windows(2) {
            let prev_dest = window[0].destination();
            let next_origin = window[1].origin();
            if prev_dest != next_origin {
                return Err(DomainError::DisconnectedLegs(prev_dest, next_origin));
            }
        }

        Ok(Route { legs })
    }

    /// Returns the legs in order.
    pub fn legs(&self) -> &[Arc<FlightLeg>] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the number of connections (legs minus one).
    pub fn connections(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns the airport the route departs from.
    pub fn first_origin(&self) -> Airport {
        self.legs[0].origin()
    }

    /// Returns the airport the route finally arrives at.
    pub fn last_destination(&self) -> Airport {
        self.legs[self.legs.len() - 1].destination()
    }

    /// Returns the departure time of the first leg.
    pub fn departure_time(&self) -> NaiveDateTime {
        self.legs[0].departs()
    }

    /// Returns the arrival time of the last leg.
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.legs[self.legs.len() - 1].arrives()
    }

    /// Returns the total route duration: last arrival minus first departure.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time() - self.departure_time()
    }

    /// Returns the sum of leg prices.
    pub fn total_price(&self) -> f64 {
        self.legs.iter().map(|leg| leg.price()).sum()
    }

    /// Returns the total scheduled in-flight minutes (excluding layovers).
    pub fn total_inflight_minutes(&self) -> u32 {
        self.legs.iter().map(|leg| leg.duration_minutes()).sum()
    }

    /// Returns the set of distinct airports touched by the route.
    pub fn stops(&self) -> HashSet<Airport> {
        let mut stops = HashSet::with_capacity(self.legs.len() + 1);
        for leg in &self.legs {
            stops.insert(leg.origin());
            stops.insert(leg.destination());
        }
        stops
    }

    /// Returns the ordered airport sequence: the first origin followed by
    /// each leg's destination. A qualifying round trip repeats the origin
    /// at both ends.
    pub fn itinerary(&self) -> Vec<Airport> {
        let mut codes = Vec::with_capacity(self.legs.len() + 1);
        codes.push(self.first_origin());
        for leg in &self.legs {
            codes.push(leg.destination());
        }
        codes
    }

    /// Constructs the extension of this route by one more leg.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the new leg doesn't depart from this route's last
    /// destination.
    pub fn extended(&self, leg: Arc<FlightLeg>) -> Result<Self, DomainError> {
        if leg.origin() != self.last_destination() {
            return Err(DomainError::DisconnectedLegs(
                self.last_destination(),
                leg.origin(),
            ));
        }
        let mut legs = Vec::with_capacity(self.legs.len() + 1);
        legs.extend(self.legs.iter().cloned());
        legs.push(leg);
        Ok(Route { legs })
    }
}
