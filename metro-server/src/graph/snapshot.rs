//! Point-in-time reads of the network used to build a graph.

use crate::domain::{Line, LineStop, Station};
use crate::network::{NetworkData, NetworkStore, StoreError};

/// One line and its stops, sorted by order.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine {
    pub line: Line,
    pub stops: Vec<LineStop>,
}

/// Every line with its ordered stops, plus the station records they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub lines: Vec<SnapshotLine>,
    pub stations: Vec<Station>,
}

impl Snapshot {
    /// Read a snapshot of the document a store currently serves.
    pub fn load(store: &dyn NetworkStore) -> Result<Self, StoreError> {
        Ok(Self::from_data(&*store.snapshot()?))
    }

    /// Take a snapshot of a network document, sorting each line's stops.
    pub fn from_data(data: &NetworkData) -> Self {
        let lines = data
            .lines
            .iter()
            .map(|record| {
                let mut stops = record.stops.clone();
                stops.sort_by_key(|s| s.order);
                SnapshotLine {
                    line: record.line.clone(),
                    stops,
                }
            })
            .collect();

        Self {
            lines,
            stations: data.stations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, LineId, StationId};
    use crate::network::{InMemoryStore, LineRecord};

    fn sid(n: i64) -> StationId {
        StationId::new(n).unwrap()
    }

    fn data() -> NetworkData {
        let at = Coordinates::new(30.0, 31.0).unwrap();
        NetworkData {
            stations: vec![Station::new(sid(1), "A", at), Station::new(sid(2), "B", at)],
            lines: vec![LineRecord {
                line: Line::new(LineId::new(1).unwrap(), "Line", None),
                stops: vec![LineStop::new(sid(2), 5), LineStop::new(sid(1), 2)],
            }],
        }
    }

    #[test]
    fn load_matches_from_data() {
        let store = InMemoryStore::new(data());
        let loaded = Snapshot::load(&store).unwrap();
        assert_eq!(loaded, Snapshot::from_data(&data()));
    }

    #[test]
    fn stops_are_ordered() {
        let snapshot = Snapshot::from_data(&data());
        let order: Vec<_> = snapshot.lines[0].stops.iter().map(|s| s.station).collect();
        assert_eq!(order, vec![sid(1), sid(2)]);
    }
}
