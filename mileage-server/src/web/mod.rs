//! Web layer for the mileage-run planner.
//!
//! Provides HTTP endpoints for searching itineraries and re-ranking a
//! previous search's results.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, SessionConfig, SessionStore};
