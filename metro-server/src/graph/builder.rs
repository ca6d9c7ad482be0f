//! Builds a [`Graph`] from a [`Snapshot`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::domain::{LineId, StationId};

use super::error::GraphError;
use super::network_graph::{Edge, EdgeKind, Graph, Node, NodeIndex};
use super::snapshot::Snapshot;

/// Build the route graph.
///
/// Consecutive stops on a line (by `order`) get a ride edge. Every station on
/// two or more lines gets interchange edges between all of its line nodes.
/// Single-station lines produce an isolated node; disconnected lines produce
/// separate components.
pub fn build(snapshot: &Snapshot) -> Result<Graph, GraphError> {
    let mut stations = BTreeMap::new();
    for station in &snapshot.stations {
        if stations.insert(station.id, station.clone()).is_some() {
            return Err(GraphError::DuplicateStation(station.id));
        }
    }

    let mut lines = BTreeMap::new();
    let mut names: HashMap<&str, LineId> = HashMap::new();
    let mut line_stops: BTreeMap<LineId, Vec<StationId>> = BTreeMap::new();
    let mut nodes = BTreeSet::new();
    let mut rides = Vec::new();

    for entry in &snapshot.lines {
        let line = entry.line.id;
        if lines.insert(line, entry.line.clone()).is_some() {
            return Err(GraphError::DuplicateLine(line));
        }
        if let Some(&first) = names.get(entry.line.name.as_str()) {
            // Lower id first, whatever the input order
            let (first, second) = (first.min(line), first.max(line));
            return Err(GraphError::DuplicateLineName {
                name: entry.line.name.clone(),
                first,
                second,
            });
        }
        names.insert(entry.line.name.as_str(), line);

        let mut stops = entry.stops.clone();
        stops.sort_by_key(|s| s.order);

        let mut seen = HashSet::new();
        for pair in stops.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(GraphError::DuplicateOrder {
                    line,
                    order: pair[0].order,
                });
            }
        }
        for stop in &stops {
            if !stations.contains_key(&stop.station) {
                return Err(GraphError::UnknownStation {
                    line,
                    station: stop.station,
                });
            }
            if !seen.insert(stop.station) {
                return Err(GraphError::RepeatedStop {
                    line,
                    station: stop.station,
                });
            }
            nodes.insert(Node::new(stop.station, line));
        }

        for pair in stops.windows(2) {
            rides.push((
                Node::new(pair[0].station, line),
                Node::new(pair[1].station, line),
            ));
        }
        line_stops.insert(line, stops.iter().map(|s| s.station).collect());
    }

    let nodes: Vec<Node> = nodes.into_iter().collect();
    let index_of = |node: Node| NodeIndex(nodes.partition_point(|n| *n < node));

    let mut adjacency = vec![Vec::new(); nodes.len()];
    for (a, b) in rides {
        let (ia, ib) = (index_of(a), index_of(b));
        adjacency[ia.0].push(Edge {
            to: ib,
            kind: EdgeKind::Ride,
        });
        adjacency[ib.0].push(Edge {
            to: ia,
            kind: EdgeKind::Ride,
        });
    }

    let mut by_station: BTreeMap<StationId, Vec<NodeIndex>> = BTreeMap::new();
    for (i, node) in nodes.iter().enumerate() {
        by_station.entry(node.station).or_default().push(NodeIndex(i));
    }

    for at_station in by_station.values().filter(|v| v.len() > 1) {
        for &from in at_station {
            for &to in at_station {
                if from != to {
                    adjacency[from.0].push(Edge {
                        to,
                        kind: EdgeKind::Interchange,
                    });
                }
            }
        }
    }

    for edges in &mut adjacency {
        edges.sort();
    }

    let graph = Graph {
        nodes,
        adjacency,
        by_station,
        line_stops,
        stations,
        lines,
    };

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        stations = graph.station_count(),
        lines = graph.line_count(),
        "Built route graph"
    );

    Ok(graph)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Coordinates, Line, LineStop, Station};
    use crate::graph::SnapshotLine;
    use proptest::prelude::*;

    /// Random networks: up to 5 lines over up to 12 stations, each line a
    /// distinct subset of stations with random gapped orders.
    fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
        prop::collection::vec(
            prop::collection::btree_set(1i64..=12, 1..6).prop_flat_map(|set| {
                let ids: Vec<i64> = set.into_iter().collect();
                let n = ids.len();
                (Just(ids).prop_shuffle(), prop::collection::btree_set(1u32..1000, n))
            }),
            1..5,
        )
        .prop_map(|lines| {
            let lines = lines
                .into_iter()
                .enumerate()
                .map(|(i, (ids, orders))| SnapshotLine {
                    line: Line::new(LineId::new(i as i64 + 1).unwrap(), format!("L{i}"), None),
                    stops: ids
                        .into_iter()
                        .zip(orders)
                        .map(|(s, o)| LineStop::new(StationId::new(s).unwrap(), o))
                        .collect(),
                })
                .collect();
            let stations = (1..=12)
                .map(|n| {
                    Station::new(
                        StationId::new(n).unwrap(),
                        format!("S{n}"),
                        Coordinates::new(30.0, 31.0 + n as f64 * 0.01).unwrap(),
                    )
                })
                .collect();
            Snapshot { lines, stations }
        })
    }

    proptest! {
        /// Graph is invariant under reordering of the input line list
        #[test]
        fn invariant_under_line_reordering(
            snapshot in snapshot_strategy(),
            seed in any::<u64>(),
        ) {
            let mut shuffled = snapshot.clone();
            let len = shuffled.lines.len();
            shuffled.lines.rotate_left((seed as usize) % len);
            if seed % 2 == 0 {
                shuffled.lines.reverse();
            }
            for line in &mut shuffled.lines {
                line.stops.reverse();
            }

            prop_assert_eq!(build(&snapshot).unwrap(), build(&shuffled).unwrap());
        }

        /// Every edge has a matching reverse edge of the same kind
        #[test]
        fn edges_are_symmetric(snapshot in snapshot_strategy()) {
            let graph = build(&snapshot).unwrap();
            for i in 0..graph.node_count() {
                for e in graph.edges(NodeIndex(i)) {
                    let back = Edge { to: NodeIndex(i), kind: e.kind };
                    prop_assert!(graph.edges(e.to).contains(&back));
                }
            }
        }

        /// Ride edges stay on one line, interchange edges stay at one station
        #[test]
        fn edge_kinds_respect_tags(snapshot in snapshot_strategy()) {
            let graph = build(&snapshot).unwrap();
            for i in 0..graph.node_count() {
                let from = graph.node(NodeIndex(i));
                for e in graph.edges(NodeIndex(i)) {
                    let to = graph.node(e.to);
                    match e.kind {
                        EdgeKind::Ride => {
                            prop_assert_eq!(from.line, to.line);
                            prop_assert_ne!(from.station, to.station);
                        }
                        EdgeKind::Interchange => {
                            prop_assert_eq!(from.station, to.station);
                            prop_assert_ne!(from.line, to.line);
                        }
                    }
                }
            }
        }
    }
}
