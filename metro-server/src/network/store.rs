//! Storage collaborator interface and the in-memory store.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::domain::{Line, LineId, LineStop, Station, StationId};

use super::error::StoreError;

/// A line together with its stops, as held in a network document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    #[serde(flatten)]
    pub line: Line,
    #[serde(default)]
    pub stops: Vec<LineStop>,
}

/// A complete network document: every station and every line with its stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

impl NetworkData {
    /// The stops of `line`, sorted by their `order` field.
    pub fn line_stops(&self, line: LineId) -> Result<Vec<LineStop>, StoreError> {
        let record = self
            .lines
            .iter()
            .find(|r| r.line.id == line)
            .ok_or(StoreError::UnknownLine(line))?;

        let mut stops = record.stops.clone();
        stops.sort_by_key(|s| s.order);
        Ok(stops)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }
}

/// Access to persisted lines and stations.
///
/// A store serves one committed document at a time. [`NetworkStore::snapshot`]
/// hands out that document whole, so anything built from a single snapshot
/// sees one point in time. Refreshing is two-phase: [`NetworkStore::fetch`]
/// reads the backing storage without changing what is served, and
/// [`NetworkStore::commit`] switches readers over once the caller has accepted
/// the fetched document.
pub trait NetworkStore: Send + Sync {
    /// The document currently served.
    fn snapshot(&self) -> Result<Arc<NetworkData>, StoreError>;

    /// Read the backing storage again, leaving the served document alone.
    ///
    /// Stores with no separate backing storage return the served document.
    fn fetch(&self) -> Result<Arc<NetworkData>, StoreError> {
        self.snapshot()
    }

    /// Serve `data` from now on.
    fn commit(&self, _data: Arc<NetworkData>) -> Result<(), StoreError> {
        Ok(())
    }

    /// All lines, in storage order.
    fn list_lines(&self) -> Result<Vec<Line>, StoreError> {
        Ok(self.snapshot()?.lines.iter().map(|r| r.line.clone()).collect())
    }

    /// The stops of `line`, sorted by their `order` field.
    fn list_stations_for_line(&self, line: LineId) -> Result<Vec<LineStop>, StoreError> {
        self.snapshot()?.line_stops(line)
    }

    /// Whether a station with this id exists.
    fn station_exists(&self, id: StationId) -> Result<bool, StoreError> {
        Ok(self.snapshot()?.station(id).is_some())
    }

    /// Look up a single station.
    fn get_station(&self, id: StationId) -> Result<Option<Station>, StoreError> {
        Ok(self.snapshot()?.station(id).cloned())
    }

    /// All stations, sorted by id.
    fn list_stations(&self) -> Result<Vec<Station>, StoreError> {
        let mut stations = self.snapshot()?.stations.clone();
        stations.sort_by_key(|s| s.id);
        Ok(stations)
    }
}

/// A store backed by in-memory documents.
///
/// [`InMemoryStore::replace`] stands in for an external write to the backing
/// storage: the new document is what the next [`NetworkStore::fetch`] returns,
/// and readers keep seeing the committed one until it is committed.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    source: RwLock<Arc<NetworkData>>,
    served: RwLock<Arc<NetworkData>>,
}

impl InMemoryStore {
    pub fn new(data: NetworkData) -> Self {
        let data = Arc::new(data);
        Self {
            source: RwLock::new(Arc::clone(&data)),
            served: RwLock::new(data),
        }
    }

    /// Replace the backing document.
    pub fn replace(&self, data: NetworkData) -> Result<(), StoreError> {
        swap(&self.source, Arc::new(data))
    }

    /// The served document.
    pub fn data(&self) -> Result<Arc<NetworkData>, StoreError> {
        read(&self.served)
    }
}

impl NetworkStore for InMemoryStore {
    fn snapshot(&self) -> Result<Arc<NetworkData>, StoreError> {
        read(&self.served)
    }

    fn fetch(&self) -> Result<Arc<NetworkData>, StoreError> {
        read(&self.source)
    }

    fn commit(&self, data: Arc<NetworkData>) -> Result<(), StoreError> {
        swap(&self.served, data)
    }
}

fn read(slot: &RwLock<Arc<NetworkData>>) -> Result<Arc<NetworkData>, StoreError> {
    slot.read()
        .map(|guard| Arc::clone(&guard))
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
}

fn swap(slot: &RwLock<Arc<NetworkData>>, data: Arc<NetworkData>) -> Result<(), StoreError> {
    let mut guard = slot
        .write()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
    *guard = data;
    Ok(())
}
