//! Route planning errors.

use crate::domain::{InvalidIdentifier, StationId};
use crate::network::StoreError;

/// Error from route planning.
///
/// Every variant except `Storage` is deterministic given the same request and
/// graph, so none are worth retrying.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouteError {
    /// A station id was not a positive integer
    #[error("invalid station identifier {value:?}: must be a positive integer")]
    InvalidIdentifier { value: String },

    /// Start and end are the same station
    #[error("start and end stations cannot be the same (station {station})")]
    SameStation { station: StationId },

    /// The station does not exist in the network
    #[error("station {station} not found")]
    UnknownStation { station: StationId },

    /// The stations are in disconnected parts of the network
    #[error("no route found between stations {start} and {end}")]
    NoRouteFound { start: StationId, end: StationId },

    /// The storage layer could not answer a lookup
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl RouteError {
    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            RouteError::InvalidIdentifier { .. } => "invalid_identifier",
            RouteError::SameStation { .. } => "same_station",
            RouteError::UnknownStation { .. } => "unknown_station",
            RouteError::NoRouteFound { .. } => "no_route_found",
            RouteError::Storage(_) => "storage_error",
        }
    }

    /// Build an `InvalidIdentifier` from raw request text.
    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        RouteError::InvalidIdentifier {
            value: value.into(),
        }
    }
}

impl From<InvalidIdentifier> for RouteError {
    fn from(e: InvalidIdentifier) -> Self {
        RouteError::invalid_identifier(e.value.to_string())
    }
}
