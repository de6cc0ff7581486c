//! Flight leg type.
//!
//! A `FlightLeg` represents one scheduled flight segment between two
//! airports. Legs are immutable once constructed and are shared via
//! `Arc<FlightLeg>` for cheap cloning during route search.

use chrono::{Duration, NaiveDateTime};

use super::{Airport, DomainError};

/// Display format for leg timestamps, e.g. "11/14/2024 08:00".
pub const TIMESTAMP_DISPLAY: &str = "%m/%d/%Y %H:%M";

/// One scheduled flight segment.
///
/// Times are validated at construction so `departs()` and `arrives()`
/// always describe a well-formed interval.
///
/// # Invariants
///
/// - `arrives > departs`
/// - `price >= 0` and finite
/// - `origin != destination`
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLeg {
    origin: Airport,
    destination: Airport,
    departs: NaiveDateTime,
    arrives: NaiveDateTime,
    price: f64,
    duration_minutes: u32,
}

impl FlightLeg {
    /// Construct a leg, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `arrives <= departs`
    /// - `price` is negative or not finite
    /// - `origin == destination`
    pub fn new(
        origin: Airport,
        destination: Airport,
        departs: NaiveDateTime,
        arrives: NaiveDateTime,
        price: f64,
        duration_minutes: u32,
    ) -> Result<Self, DomainError> {
        if origin == destination {
            return Err(DomainError::InvalidLeg(
                "origin and destination must differ",
            ));
        }
        if arrives <= departs {
            return Err(DomainError::InvalidLeg("arrival must be after departure"));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidLeg("price must be non-negative"));
        }

        Ok(FlightLeg {
            origin,
            destination,
            departs,
            arrives,
            price,
            duration_minutes,
        })
    }

    /// Returns the origin airport.
    pub fn origin(&self) -> Airport {
        self.origin
    }

    /// Returns the destination airport.
    pub fn destination(&self) -> Airport {
        self.destination
    }

    /// Returns the departure timestamp.
    pub fn departs(&self) -> NaiveDateTime {
        self.departs
    }

    /// Returns the arrival timestamp.
    pub fn arrives(&self) -> NaiveDateTime {
        self.arrives
    }

    /// Returns the ticket price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the scheduled in-flight duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the in-flight duration in hours, rounded to 2 decimal places.
    pub fn duration_hours(&self) -> f64 {
        (f64::from(self.duration_minutes) / 60.0 * 100.0).round() / 100.0
    }

    /// Returns the layover gap between this leg's arrival and a later departure.
    pub fn layover_until(&self, next_departure: NaiveDateTime) -> Duration {
        next_departure - self.arrives
    }

    /// Formats the departure timestamp for display.
    pub fn departs_display(&self) -> String {
        self.departs.format(TIMESTAMP_DISPLAY).to_string()
    }

    /// Formats the arrival timestamp for display.
    pub fn arrives_display(&self) -> String {
        self.arrives.format(TIMESTAMP_DISPLAY).to_string()
    }
}
