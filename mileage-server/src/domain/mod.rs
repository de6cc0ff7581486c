//! Domain types for the mileage-run planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod airport;
mod error;
mod leg;
mod route;

pub use airport::{Airport, InvalidAirport};
pub use error::DomainError;
pub use leg::{FlightLeg, TIMESTAMP_DISPLAY};
pub use route::Route;
