//! Route request validation.

use serde::Deserialize;

use crate::domain::StationId;
use crate::network::NetworkStore;

use super::error::RouteError;

/// A route request as received from a caller.
///
/// Identifiers are kept as raw integers so that zero and negative values reach
/// [`validate`] and are reported as `InvalidIdentifier` rather than as a
/// deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RouteRequest {
    pub start_station_id: i64,
    pub end_station_id: i64,
}

impl RouteRequest {
    pub fn new(start_station_id: i64, end_station_id: i64) -> Self {
        Self {
            start_station_id,
            end_station_id,
        }
    }
}

/// A request whose endpoints are distinct, known stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedRequest {
    pub start: StationId,
    pub end: StationId,
}

/// Check a request before resolution.
///
/// Checks run in a fixed order: identifier shape for start then end, equal
/// endpoints, then existence of start then end.
pub fn validate(
    request: &RouteRequest,
    store: &dyn NetworkStore,
) -> Result<ValidatedRequest, RouteError> {
    let start = StationId::new(request.start_station_id)?;
    let end = StationId::new(request.end_station_id)?;

    if start == end {
        return Err(RouteError::SameStation { station: start });
    }

    for station in [start, end] {
        if !store.station_exists(station)? {
            return Err(RouteError::UnknownStation { station });
        }
    }

    Ok(ValidatedRequest { start, end })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Coordinates, Line, LineId, LineStop, Station};
    use crate::network::{InMemoryStore, LineRecord, NetworkData, StoreError};

    fn store() -> InMemoryStore {
        let at = Coordinates::new(30.0, 31.0).unwrap();
        let sid = |n| StationId::new(n).unwrap();
        InMemoryStore::new(NetworkData {
            stations: (1..=3).map(|n| Station::new(sid(n), format!("S{n}"), at)).collect(),
            lines: vec![LineRecord {
                line: Line::new(LineId::new(1).unwrap(), "L1", None),
                stops: vec![LineStop::new(sid(1), 1), LineStop::new(sid(2), 2)],
            }],
        })
    }

    struct FailingStore;

    impl NetworkStore for FailingStore {
        fn snapshot(&self) -> Result<Arc<NetworkData>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn valid_request() {
        let validated = validate(&RouteRequest::new(1, 2), &store()).unwrap();
        assert_eq!(validated.start.get(), 1);
        assert_eq!(validated.end.get(), 2);
    }

    #[test]
    fn non_positive_ids_rejected() {
        for (start, end) in [(0, 1), (1, 0), (-3, 2), (2, -1)] {
            let err = validate(&RouteRequest::new(start, end), &store()).unwrap_err();
            assert!(
                matches!(err, RouteError::InvalidIdentifier { .. }),
                "({start}, {end}) gave {err:?}"
            );
        }
    }

    #[test]
    fn identifier_checked_before_same_station() {
        let err = validate(&RouteRequest::new(0, 0), &store()).unwrap_err();
        assert!(matches!(err, RouteError::InvalidIdentifier { .. }));
    }

    #[test]
    fn same_station_rejected() {
        let err = validate(&RouteRequest::new(2, 2), &store()).unwrap_err();
        assert!(matches!(err, RouteError::SameStation { station } if station.get() == 2));
    }

    #[test]
    fn same_station_checked_before_existence() {
        let err = validate(&RouteRequest::new(42, 42), &store()).unwrap_err();
        assert!(matches!(err, RouteError::SameStation { .. }));
    }

    #[test]
    fn unknown_station_rejected() {
        let err = validate(&RouteRequest::new(1, 42), &store()).unwrap_err();
        assert!(matches!(err, RouteError::UnknownStation { station } if station.get() == 42));

        let err = validate(&RouteRequest::new(41, 42), &store()).unwrap_err();
        assert!(matches!(err, RouteError::UnknownStation { station } if station.get() == 41));
    }

    #[test]
    fn store_failure_propagates() {
        let err = validate(&RouteRequest::new(1, 2), &FailingStore).unwrap_err();
        assert!(matches!(err, RouteError::Storage(_)));
    }

    #[test]
    fn request_json_shape() {
        let request: RouteRequest =
            serde_json::from_str(r#"{"start_station_id": 5, "end_station_id": -1}"#).unwrap();
        assert_eq!(request, RouteRequest::new(5, -1));
    }
}
