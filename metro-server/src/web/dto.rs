//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ColorCode, LineId, Station, StationId};
use crate::graph::{Graph, LiveGraph};
use crate::planner::{RouteError, RouteRequest};

/// Query string for `GET /api/routes`.
///
/// Kept as text so that non-numeric input is reported as an invalid
/// identifier rather than a generic parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
}

impl RouteQuery {
    pub fn to_request(&self) -> Result<RouteRequest, RouteInputError> {
        Ok(RouteRequest::new(
            parse_text_id("start_station_id", self.start_station_id.as_deref())?,
            parse_text_id("end_station_id", self.end_station_id.as_deref())?,
        ))
    }
}

/// JSON body for `POST /api/routes`.
#[derive(Debug, Default, Deserialize)]
pub struct RouteBody {
    #[serde(default)]
    pub start_station_id: serde_json::Value,
    #[serde(default)]
    pub end_station_id: serde_json::Value,
}

impl RouteBody {
    pub fn to_request(&self) -> Result<RouteRequest, RouteInputError> {
        Ok(RouteRequest::new(
            parse_json_id("start_station_id", &self.start_station_id)?,
            parse_json_id("end_station_id", &self.end_station_id)?,
        ))
    }
}

/// Why a route request could not be turned into a [`RouteRequest`].
#[derive(Debug)]
pub enum RouteInputError {
    /// A required field was absent
    Missing(&'static str),
    /// A field was present but not an integer
    Invalid(RouteError),
}

fn parse_text_id(field: &'static str, raw: Option<&str>) -> Result<i64, RouteInputError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(RouteInputError::Missing(field));
    };
    raw.parse()
        .map_err(|_| RouteInputError::Invalid(RouteError::invalid_identifier(raw)))
}

fn parse_json_id(field: &'static str, value: &serde_json::Value) -> Result<i64, RouteInputError> {
    match value {
        serde_json::Value::Null => Err(RouteInputError::Missing(field)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| RouteInputError::Invalid(RouteError::invalid_identifier(n.to_string()))),
        serde_json::Value::String(s) => parse_text_id(field, Some(s)),
        other => Err(RouteInputError::Invalid(RouteError::invalid_identifier(
            other.to_string(),
        ))),
    }
}

/// A station in listings.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: StationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Lines serving the station, ascending. Empty if no line serves it.
    pub lines: Vec<LineId>,
}

impl StationResult {
    pub fn from_station(station: &Station, graph: &Graph) -> Self {
        Self {
            id: station.id,
            name: station.name.clone(),
            latitude: station.coordinates.latitude(),
            longitude: station.coordinates.longitude(),
            lines: graph.lines_at(station.id),
        }
    }
}

/// Response for `GET /api/stations`.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Query string for `GET /api/stations/nearest`.
#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lon: f64,
    /// When given, every station within this many kilometres is returned.
    pub radius_km: Option<f64>,
}

/// A station with its distance from the query point.
#[derive(Debug, Serialize)]
pub struct NearbyStation {
    pub id: StationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_m: u64,
}

impl NearbyStation {
    pub fn new(station: &Station, distance_m: f64) -> Self {
        Self {
            id: station.id,
            name: station.name.clone(),
            latitude: station.coordinates.latitude(),
            longitude: station.coordinates.longitude(),
            distance_m: distance_m.round() as u64,
        }
    }
}

/// Response for `GET /api/stations/nearest`.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub stations: Vec<NearbyStation>,
}

/// A line with its stations in traversal order.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub id: LineId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorCode>,
    pub stations: Vec<StationId>,
}

/// Response for `GET /api/lines`.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

impl LinesResponse {
    pub fn from_graph(graph: &Graph) -> Self {
        let lines = graph
            .lines()
            .map(|line| LineResult {
                id: line.id,
                name: line.name.clone(),
                color: line.color,
                stations: graph.line_stations(line.id).to_vec(),
            })
            .collect();
        Self { lines }
    }
}

/// Summary of the published graph.
#[derive(Debug, Serialize)]
pub struct NetworkStatus {
    pub generation: u64,
    pub built_at: DateTime<Utc>,
    pub stations: usize,
    pub lines: usize,
    pub nodes: usize,
    pub edges: usize,
    pub interchanges: usize,
    pub cached_routes: u64,
}

impl NetworkStatus {
    pub fn new(live: &LiveGraph, cached_routes: u64) -> Self {
        let graph = &live.graph;
        Self {
            generation: live.generation,
            built_at: live.built_at,
            stations: graph.station_count(),
            lines: graph.line_count(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            interchanges: graph.interchange_stations().count(),
            cached_routes,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code
    pub error_code: String,

    /// Human-readable message
    pub message: String,
}
