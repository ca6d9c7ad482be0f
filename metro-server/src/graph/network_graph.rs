//! The line-tagged route graph.
//!
//! Nodes are `(station, line)` pairs so every edge knows which line it belongs
//! to. Stations served by several lines get zero-stop interchange edges between
//! all of their nodes.

use std::collections::BTreeMap;

use crate::domain::{Line, LineId, Station, StationId};

/// A station as served by one particular line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    pub station: StationId,
    pub line: LineId,
}

impl Node {
    pub fn new(station: StationId, line: LineId) -> Self {
        Self { station, line }
    }
}

/// Index of a node in [`Graph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// How an edge is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    /// Travel to the adjacent station on the same line
    Ride,
    /// Change line without leaving the station
    Interchange,
}

/// A directed half of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub to: NodeIndex,
    pub kind: EdgeKind,
}

/// Immutable adjacency graph over a network snapshot.
///
/// Nodes are stored sorted by `(station, line)` and each adjacency list is
/// sorted by target, so two graphs built from equivalent snapshots compare
/// equal regardless of the order lines were supplied in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub(super) nodes: Vec<Node>,
    pub(super) adjacency: Vec<Vec<Edge>>,
    pub(super) by_station: BTreeMap<StationId, Vec<NodeIndex>>,
    pub(super) line_stops: BTreeMap<LineId, Vec<StationId>>,
    pub(super) stations: BTreeMap<StationId, Station>,
    pub(super) lines: BTreeMap<LineId, Line>,
}

impl Graph {
    /// All nodes, sorted by `(station, line)`.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: NodeIndex) -> Node {
        self.nodes[index.0]
    }

    pub fn node_index(&self, node: Node) -> Option<NodeIndex> {
        self.nodes.binary_search(&node).ok().map(NodeIndex)
    }

    /// Outgoing edges of a node, sorted by target.
    pub fn edges(&self, index: NodeIndex) -> &[Edge] {
        &self.adjacency[index.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Whether the station has at least one node.
    pub fn contains_station(&self, station: StationId) -> bool {
        self.by_station.contains_key(&station)
    }

    /// Nodes at a station, sorted by line.
    pub fn nodes_at(&self, station: StationId) -> &[NodeIndex] {
        self.by_station
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Lines serving a station, ascending.
    pub fn lines_at(&self, station: StationId) -> Vec<LineId> {
        self.nodes_at(station)
            .iter()
            .map(|&i| self.node(i).line)
            .collect()
    }

    /// Whether `a` and `b` are consecutive stations on `line`.
    pub fn are_adjacent(&self, a: StationId, b: StationId, line: LineId) -> bool {
        let (Some(from), Some(to)) = (
            self.node_index(Node::new(a, line)),
            self.node_index(Node::new(b, line)),
        ) else {
            return false;
        };
        self.edges(from)
            .iter()
            .any(|e| e.to == to && e.kind == EdgeKind::Ride)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Every station in the snapshot, by id, including ones no line serves.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Number of stations served by at least one line.
    pub fn station_count(&self) -> usize {
        self.by_station.len()
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Every line, by id.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// A line's stations in traversal order.
    pub fn line_stations(&self, id: LineId) -> &[StationId] {
        self.line_stops.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stations served by two or more lines.
    pub fn interchange_stations(&self) -> impl Iterator<Item = StationId> + '_ {
        self.by_station
            .iter()
            .filter(|(_, nodes)| nodes.len() > 1)
            .map(|(station, _)| *station)
    }
}
