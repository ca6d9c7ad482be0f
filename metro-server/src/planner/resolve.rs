//! Route resolution over the line-tagged graph.
//!
//! Routes minimise the number of stops first and the number of line changes
//! second. A ride between adjacent stations costs one stop, and an interchange
//! at a station costs one transfer and no stops, so the stop count of a
//! resolved route always equals the breadth-first distance between the two
//! physical stations.
//!
//! Among equally good routes the one with the lexicographically smallest
//! sequence of `(station, line)` nodes wins. Distances are computed backwards
//! from the destination, then the route is read off by walking forwards from
//! the origin and always taking the smallest neighbour that stays optimal.
//! Nothing depends on the order lines were inserted in.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::ops::Add;

use tracing::debug;

use crate::domain::StationId;
use crate::graph::{EdgeKind, Graph, NodeIndex};

use super::error::RouteError;
use super::path::{Hop, RoutePath};

/// Lexicographic route cost: stops, then transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost {
    pub stops: u32,
    pub transfers: u32,
}

impl Cost {
    pub const ZERO: Cost = Cost {
        stops: 0,
        transfers: 0,
    };

    fn of(kind: EdgeKind) -> Cost {
        match kind {
            EdgeKind::Ride => Cost {
                stops: 1,
                transfers: 0,
            },
            EdgeKind::Interchange => Cost {
                stops: 0,
                transfers: 1,
            },
        }
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost {
            stops: self.stops + rhs.stops,
            transfers: self.transfers + rhs.transfers,
        }
    }
}

/// Find the best route from `start` to `end`.
///
/// The graph is only read, so any number of resolutions may run against the
/// same graph at once.
pub fn resolve(graph: &Graph, start: StationId, end: StationId) -> Result<RoutePath, RouteError> {
    if start == end {
        return Err(RouteError::SameStation { station: start });
    }
    for station in [start, end] {
        if !graph.contains_station(station) {
            return Err(RouteError::UnknownStation { station });
        }
    }

    let dist = distances_to(graph, end);

    // Nodes at a station are sorted by line, so `min` also breaks ties by line
    let Some((remaining, origin)) = graph
        .nodes_at(start)
        .iter()
        .filter_map(|&i| dist[i.0].map(|d| (d, i)))
        .min()
    else {
        return Err(RouteError::NoRouteFound { start, end });
    };

    let no_route = || RouteError::NoRouteFound { start, end };

    let mut current = origin;
    let mut remaining = remaining;
    let mut hops = vec![hop_at(graph, current)];

    while remaining != Cost::ZERO {
        // Adjacency lists are sorted, so the first optimal edge is the smallest
        let step = graph.edges(current).iter().find(|e| {
            dist[e.to.0].is_some_and(|d| Cost::of(e.kind) + d == remaining)
        });
        let Some(edge) = step else {
            // Unreachable for a consistent distance table
            return Err(no_route());
        };

        remaining = remaining_after(remaining, Cost::of(edge.kind));
        current = edge.to;
        if edge.kind == EdgeKind::Ride {
            hops.push(hop_at(graph, current));
        }
    }

    let path = RoutePath::new(hops).map_err(|_| no_route())?;
    debug!(
        start = %start,
        end = %end,
        stops = path.stops(),
        transfers = path.transfer_count(),
        "Resolved route"
    );
    Ok(path)
}

/// Cheapest cost from every node to any node at `end`.
///
/// `None` marks nodes that cannot reach `end`. Edges are undirected, so a
/// search outwards from the destination gives distances towards it.
fn distances_to(graph: &Graph, end: StationId) -> Vec<Option<Cost>> {
    let mut dist: Vec<Option<Cost>> = vec![None; graph.node_count()];
    let mut heap: BinaryHeap<Reverse<(Cost, NodeIndex)>> = BinaryHeap::new();

    for &target in graph.nodes_at(end) {
        dist[target.0] = Some(Cost::ZERO);
        heap.push(Reverse((Cost::ZERO, target)));
    }

    while let Some(Reverse((cost, node))) = heap.pop() {
        if dist[node.0].is_some_and(|d| d < cost) {
            continue;
        }
        for edge in graph.edges(node) {
            let next = cost + Cost::of(edge.kind);
            if dist[edge.to.0].is_none_or(|d| next < d) {
                dist[edge.to.0] = Some(next);
                heap.push(Reverse((next, edge.to)));
            }
        }
    }

    dist
}

fn remaining_after(remaining: Cost, step: Cost) -> Cost {
    Cost {
        stops: remaining.stops - step.stops,
        transfers: remaining.transfers - step.transfers,
    }
}

fn hop_at(graph: &Graph, index: NodeIndex) -> Hop {
    let node = graph.node(index);
    Hop::new(node.station, node.line)
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
