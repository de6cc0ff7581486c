//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from search, ranking, and IO errors.

use super::Airport;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Invalid flight leg construction (e.g., arrival before departure)
    #[error("invalid flight leg: {0}")]
    InvalidLeg(&'static str),

    /// Route has no legs
    #[error("route must contain at least one leg")]
    EmptyRoute,

    /// Consecutive legs don't chain (destination != next origin)
    #[error("legs do not connect: arrived at {0} but next leg departs from {1}")]
    DisconnectedLegs(Airport, Airport),
}
