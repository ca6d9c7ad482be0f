//! Askama templates for the web frontend.

use askama::Template;

use crate::graph::Graph;
use crate::planner::RoutePayload;

/// Colour used for lines that have none recorded.
const DEFAULT_LINE_COLOR: &str = "#777777";

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<StationOption>,
    pub lines: Vec<LineView>,
}

impl IndexTemplate {
    pub fn from_graph(graph: &Graph) -> Self {
        // Only stations some line serves can be routed between
        let stations = graph
            .stations()
            .filter(|s| graph.contains_station(s.id))
            .map(|s| StationOption {
                id: s.id.get(),
                name: s.name.clone(),
            })
            .collect();

        let lines = graph
            .lines()
            .map(|line| LineView {
                name: line.name.clone(),
                color: line
                    .color
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| DEFAULT_LINE_COLOR.to_string()),
                station_count: graph.line_stations(line.id).len(),
            })
            .collect();

        Self { stations, lines }
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route result fragment.
#[derive(Template)]
#[template(path = "route_result.html")]
pub struct RouteResultTemplate {
    pub route: RouteView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A station in the route form's drop-downs.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub id: u32,
    pub name: String,
}

/// A line in the network legend.
#[derive(Debug, Clone)]
pub struct LineView {
    pub name: String,
    pub color: String,
    pub station_count: usize,
}

/// One row of a rendered route.
#[derive(Debug, Clone)]
pub struct RouteStopView {
    pub station_name: String,
    pub line_name: String,
    pub line_color: String,
    /// Set on the first station after a change of line.
    pub changed_line: bool,
}

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub origin: String,
    pub destination: String,
    pub stops: usize,
    pub transfers: usize,
    pub distance_km: String,
    pub ticket_price: u32,
    pub travel_minutes: u32,
    pub rows: Vec<RouteStopView>,
}

impl RouteView {
    /// "1 stop" / "4 stops".
    pub fn stops_label(&self) -> String {
        plural(self.stops, "stop", "stops")
    }

    /// "No changes" / "1 change" / "2 changes".
    pub fn transfers_label(&self) -> String {
        match self.transfers {
            0 => "No changes".to_string(),
            n => plural(n, "change", "changes"),
        }
    }

    pub fn from_payload(payload: &RoutePayload) -> Self {
        let rows = payload
            .path
            .iter()
            .enumerate()
            .map(|(i, stop)| RouteStopView {
                station_name: stop.station_name.clone(),
                line_name: stop.line_name.clone(),
                line_color: stop
                    .line_color
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| DEFAULT_LINE_COLOR.to_string()),
                changed_line: i > 0 && payload.path[i - 1].line_id != stop.line_id,
            })
            .collect();

        Self {
            origin: payload
                .origin()
                .map(|s| s.station_name.clone())
                .unwrap_or_default(),
            destination: payload
                .destination()
                .map(|s| s.station_name.clone())
                .unwrap_or_default(),
            stops: payload.stops,
            transfers: payload.transfers,
            distance_km: format!("{:.1}", payload.distance_m as f64 / 1000.0),
            ticket_price: payload.ticket_price,
            travel_minutes: payload.estimated_travel_minutes,
            rows,
        }
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {one}")
    } else {
        format!("{n} {many}")
    }
}
