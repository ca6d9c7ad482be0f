//! Rendering resolved routes into response payloads.

use serde::{Deserialize, Serialize};

use crate::domain::{ColorCode, LineId, StationId};
use crate::graph::Graph;

use super::fare::{ticket_price, travel_minutes};
use super::path::{Hop, RoutePath};

/// One station on a rendered route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStation {
    pub station_id: StationId,
    pub station_name: String,
    /// The line used to reach this station (or boarded at the origin).
    pub line_id: LineId,
    pub line_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<ColorCode>,
}

/// A line change on a rendered route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterchangePoint {
    pub station_id: StationId,
    pub station_name: String,
    pub from_line: LineId,
    pub to_line: LineId,
}

/// Response payload for a resolved route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePayload {
    pub path: Vec<PathStation>,
    pub stops: usize,
    pub transfers: usize,
    pub interchanges: Vec<InterchangePoint>,
    /// Sum of straight-line distances between consecutive stations, in metres.
    pub distance_m: u64,
    pub ticket_price: u32,
    pub estimated_travel_minutes: u32,
}

impl RoutePayload {
    pub fn origin(&self) -> Option<&PathStation> {
        self.path.first()
    }

    pub fn destination(&self) -> Option<&PathStation> {
        self.path.last()
    }
}

/// Render a path resolved against `graph`.
pub fn format_route(graph: &Graph, path: &RoutePath) -> RoutePayload {
    let hops = path.hops();

    let stations = hops.iter().map(|hop| path_station(graph, hop)).collect();

    let interchanges = path
        .transfers()
        .into_iter()
        .map(|t| InterchangePoint {
            station_id: t.station,
            station_name: station_name(graph, t.station),
            from_line: t.from,
            to_line: t.to,
        })
        .collect();

    let distance: f64 = hops
        .windows(2)
        .filter_map(|w| {
            let a = graph.station(w[0].station)?;
            let b = graph.station(w[1].station)?;
            Some(a.distance_to(b))
        })
        .sum();

    let station_count = hops.len();
    let transfers = path.transfer_count();

    RoutePayload {
        path: stations,
        stops: path.stops(),
        transfers,
        interchanges,
        distance_m: distance.round() as u64,
        ticket_price: ticket_price(station_count, transfers),
        estimated_travel_minutes: travel_minutes(station_count),
    }
}

fn path_station(graph: &Graph, hop: &Hop) -> PathStation {
    let line = graph.line(hop.line);
    PathStation {
        station_id: hop.station,
        station_name: station_name(graph, hop.station),
        line_id: hop.line,
        line_name: line
            .map(|l| l.name.clone())
            .unwrap_or_else(|| format!("Line {}", hop.line)),
        line_color: line.and_then(|l| l.color),
    }
}

fn station_name(graph: &Graph, station: StationId) -> String {
    graph
        .station(station)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Station {station}"))
}
