//! Flight catalog.
//!
//! An in-memory, immutable-per-search table of flight legs. The catalog
//! is loaded once (from the cached flight CSV) and handed to the planner;
//! filters produce new catalogs over shared legs so they compose freely.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::domain::{Airport, FlightLeg};

/// Errors from loading the flight catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read or parse the CSV file
    #[error("failed to read catalog: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed as CSV but failed domain validation
    #[error("invalid catalog row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// One row of the flight CSV, in the export's column layout.
#[derive(Debug, Deserialize)]
struct RawLeg {
    #[serde(rename = "CarrierName")]
    carrier: String,
    #[serde(rename = "Origin")]
    origin: String,
    #[serde(rename = "Destination")]
    destination: String,
    #[serde(rename = "Departs")]
    departs: String,
    #[serde(rename = "Arrives")]
    arrives: String,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Duration")]
    duration_minutes: u32,
}

/// Parse a catalog timestamp, with or without seconds.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
}

/// An immutable table of flight legs.
#[derive(Debug, Clone, Default)]
pub struct FlightCatalog {
    legs: Vec<Arc<FlightLeg>>,
}

impl FlightCatalog {
    /// Creates a catalog from owned legs.
    pub fn new(legs: Vec<FlightLeg>) -> Self {
        Self {
            legs: legs.into_iter().map(Arc::new).collect(),
        }
    }

    /// Loads a catalog from the flight CSV, retaining only rows for
    /// `carrier`.
    ///
    /// The table layout is
    /// `CarrierName,Origin,Destination,Departs,Arrives,Price,Duration`
    /// with timestamps as `YYYY-MM-DD HH:MM[:SS]` and `Duration` in
    /// minutes. Single-carrier pre-filtering happens here, before the
    /// catalog reaches the route finder.
    ///
    /// # Errors
    ///
    /// Malformed rows are an error, not silently dropped.
    pub fn load_csv(path: impl AsRef<Path>, carrier: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut legs = Vec::new();

        for (idx, result) in reader.deserialize::<RawLeg>().enumerate() {
            // Header is line 1, first record line 2
            let row = idx + 2;
            let raw = result?;

            if raw.carrier != carrier {
                continue;
            }

            let origin =
                Airport::parse_normalized(&raw.origin).map_err(|e| CatalogError::InvalidRow {
                    row,
                    message: e.to_string(),
                })?;
            let destination = Airport::parse_normalized(&raw.destination).map_err(|e| {
                CatalogError::InvalidRow {
                    row,
                    message: e.to_string(),
                }
            })?;
            let departs = parse_timestamp(&raw.departs).ok_or_else(|| CatalogError::InvalidRow {
                row,
                message: format!("unparseable departure time {:?}", raw.departs),
            })?;
            let arrives = parse_timestamp(&raw.arrives).ok_or_else(|| CatalogError::InvalidRow {
                row,
                message: format!("unparseable arrival time {:?}", raw.arrives),
            })?;

            let leg = FlightLeg::new(
                origin,
                destination,
                departs,
                arrives,
                raw.price,
                raw.duration_minutes,
            )
            .map_err(|e| CatalogError::InvalidRow {
                row,
                message: e.to_string(),
            })?;

            legs.push(Arc::new(leg));
        }

        tracing::info!(legs = legs.len(), carrier, "loaded flight catalog");

        Ok(Self { legs })
    }

    /// Returns a catalog containing only legs whose origin and destination
    /// are both in `airports`. An empty result is not an error.
    pub fn filter_by_airports(&self, airports: &HashSet<Airport>) -> Self {
        Self {
            legs: self
                .legs
                .iter()
                .filter(|leg| {
                    airports.contains(&leg.origin()) && airports.contains(&leg.destination())
                })
                .cloned()
                .collect(),
        }
    }

    /// Returns a catalog containing only legs departing within
    /// `[start 00:00:00, end 23:59:59]` inclusive.
    pub fn filter_by_date_window(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let window_start = start.and_hms_opt(0, 0, 0);
        let window_end = end.and_hms_opt(23, 59, 59);
        let (Some(window_start), Some(window_end)) = (window_start, window_end) else {
            return Self { legs: Vec::new() };
        };

        Self {
            legs: self
                .legs
                .iter()
                .filter(|leg| leg.departs() >= window_start && leg.departs() <= window_end)
                .cloned()
                .collect(),
        }
    }

    /// Iterates over legs departing from `origin`, in catalog order.
    pub fn departures_from(&self, origin: Airport) -> impl Iterator<Item = &Arc<FlightLeg>> {
        self.legs.iter().filter(move |leg| leg.origin() == origin)
    }

    /// Returns true if any leg departs from or arrives at `airport`.
    pub fn contains_airport(&self, airport: Airport) -> bool {
        self.legs
            .iter()
            .any(|leg| leg.origin() == airport || leg.destination() == airport)
    }

    /// Returns all legs in catalog order.
    pub fn legs(&self) -> &[Arc<FlightLeg>] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Returns true if the catalog has no legs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}
