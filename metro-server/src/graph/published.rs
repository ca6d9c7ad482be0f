//! The currently served graph and its atomic replacement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::network::NetworkStore;

use super::builder::build;
use super::error::GraphError;
use super::network_graph::Graph;
use super::snapshot::Snapshot;

/// A built graph together with its publication metadata.
#[derive(Debug)]
pub struct LiveGraph {
    pub graph: Graph,
    /// Increases by one with every successful refresh.
    pub generation: u64,
    pub built_at: DateTime<Utc>,
}

/// Thread-safe handle to the graph currently used for routing.
///
/// Readers take an `Arc` to the current [`LiveGraph`] and resolve against it
/// without holding any lock. A refresh builds a complete new graph first and
/// then swaps the pointer, so in-flight resolutions keep a consistent view.
#[derive(Clone)]
pub struct PublishedGraph {
    inner: Arc<RwLock<Arc<LiveGraph>>>,
}

impl PublishedGraph {
    /// Publish an already-built graph as generation 1.
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(LiveGraph {
                graph,
                generation: 1,
                built_at: Utc::now(),
            }))),
        }
    }

    /// Build the initial graph from a store.
    ///
    /// This will fail if the snapshot cannot be read or is malformed.
    pub fn load(store: &dyn NetworkStore) -> Result<Self, GraphError> {
        let snapshot = Snapshot::load(store)?;
        Ok(Self::new(build(&snapshot)?))
    }

    /// The graph to use for the next resolution.
    pub async fn current(&self) -> Arc<LiveGraph> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    /// Publish `graph` as the next generation.
    pub async fn publish(&self, graph: Graph) -> Arc<LiveGraph> {
        let mut guard = self.inner.write().await;
        let live = Arc::new(LiveGraph {
            graph,
            generation: guard.generation + 1,
            built_at: Utc::now(),
        });
        *guard = Arc::clone(&live);
        drop(guard);

        info!(
            generation = live.generation,
            stations = live.graph.station_count(),
            lines = live.graph.line_count(),
            "Published route graph"
        );

        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Line, LineId, LineStop, Station, StationId};
    use crate::network::{InMemoryStore, LineRecord, NetworkData};

    fn sid(n: i64) -> StationId {
        StationId::new(n).unwrap()
    }

    fn network(stops: &[(i64, u32)]) -> NetworkData {
        let at = Coordinates::new(30.0, 31.0).unwrap();
        NetworkData {
            stations: (1..=4).map(|n| Station::new(sid(n), format!("S{n}"), at)).collect(),
            lines: vec![LineRecord {
                line: Line::new(LineId::new(1).unwrap(), "L1", None),
                stops: stops
                    .iter()
                    .map(|&(s, o)| LineStop::new(sid(s), o))
                    .collect(),
            }],
        }
    }

    #[tokio::test]
    async fn load_publishes_generation_one() {
        let store = InMemoryStore::new(network(&[(1, 1), (2, 2)]));
        let published = PublishedGraph::load(&store).unwrap();
        let live = published.current().await;
        assert_eq!(live.generation, 1);
        assert_eq!(live.graph.station_count(), 2);
    }

    #[tokio::test]
    async fn publish_swaps_in_new_graph() {
        let store = InMemoryStore::new(network(&[(1, 1), (2, 2)]));
        let published = PublishedGraph::load(&store).unwrap();
        let before = published.current().await;

        let snapshot = Snapshot::from_data(&network(&[(1, 1), (2, 2), (3, 3)]));
        let after = published.publish(build(&snapshot).unwrap()).await;

        assert_eq!(after.generation, 2);
        assert_eq!(published.current().await.graph.station_count(), 3);
        // Readers holding the old graph still see it unchanged
        assert_eq!(before.graph.station_count(), 2);
        assert!(before.graph.are_adjacent(sid(1), sid(2), LineId::new(1).unwrap()));
    }

    #[test]
    fn load_rejects_malformed_snapshot() {
        let store = InMemoryStore::new(network(&[(1, 1), (9, 2)]));
        assert!(matches!(
            PublishedGraph::load(&store),
            Err(GraphError::UnknownStation { .. })
        ));
    }
}
