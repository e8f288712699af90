//! Error types for MixDispatch problem instances

use thiserror::Error;

/// Structural problems detected while building a [`ProblemInstance`](crate::ProblemInstance).
///
/// Semantic infeasibility (no vehicles, unreachable yards, incompatible
/// pumps) is not an error; it surfaces as a solve without any solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// A travel table does not have one entry per station
    #[error("order '{order}' has {actual} {direction} travel entries, expected {expected}")]
    TravelTableLength {
        order: String,
        direction: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Preferred station index is not a known station
    #[error("order '{order}' prefers station {station}, but only {num_stations} stations exist")]
    UnknownPreferredStation {
        order: String,
        station: usize,
        num_stations: usize,
    },

    /// A quantity that must be non-negative is negative
    #[error("{entity} '{name}' has negative {field}: {value}")]
    Negative {
        entity: &'static str,
        name: String,
        field: &'static str,
        value: i64,
    },
}

/// Result type alias for problem instance construction
pub type Result<T> = std::result::Result<T, ProblemError>;
