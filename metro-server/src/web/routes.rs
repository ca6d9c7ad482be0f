//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::domain::{Coordinates, Station};
use crate::graph::GraphError;
use crate::network::{StoreError, nearest_station, stations_within, verify};
use crate::planner::{RouteError, RouteRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/routes", get(get_route).post(post_route))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/nearest", get(nearest_stations))
        .route("/api/lines", get(list_lines))
        .route("/api/network/status", get(network_status))
        .route("/api/network/verify", get(verify_network))
        .route("/api/network/refresh", post(refresh_network))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> Response {
    let live = state.planner.graph().current().await;
    askama_axum::into_response(&IndexTemplate::from_graph(&live.graph))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Find a route from query parameters.
async fn get_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let request = query.to_request()?;
    route_response(&state, &headers, &request).await
}

/// Find a route from a JSON body.
async fn post_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RouteBody>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let request = body.to_request()?;
    route_response(&state, &headers, &request).await
}

async fn route_response(
    state: &AppState,
    headers: &HeaderMap,
    request: &RouteRequest,
) -> Result<Response, AppError> {
    let payload = state.planner.find_route(request).await?;

    // Return HTML or JSON based on Accept header
    if accepts_html(headers) {
        let template = RouteResultTemplate {
            route: RouteView::from_payload(&payload),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            code: "internal_error",
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(payload.as_ref()).into_response())
    }
}

/// List every station in the published graph.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let live = state.planner.graph().current().await;
    let stations = live
        .graph
        .stations()
        .map(|s| StationResult::from_station(s, &live.graph))
        .collect();
    Json(StationsResponse { stations })
}

/// Nearest station to a point, or every station within a radius.
async fn nearest_stations(
    State(state): State<AppState>,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Result<Json<NearestResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let at = Coordinates::new(query.lat, query.lon)
        .map_err(|e| AppError::invalid_request(e.to_string()))?;

    let live = state.planner.graph().current().await;
    let stations: Vec<Station> = live.graph.stations().cloned().collect();

    let found = match query.radius_km {
        Some(radius) if !(radius.is_finite() && radius >= 0.0) => {
            return Err(AppError::invalid_request(format!(
                "radius_km must be a non-negative number, got {radius}"
            )));
        }
        Some(radius) => stations_within(&stations, &at, radius),
        None => nearest_station(&stations, &at).into_iter().collect(),
    };

    let stations = found
        .into_iter()
        .map(|(s, d)| NearbyStation::new(s, d))
        .collect();
    Ok(Json(NearestResponse { stations }))
}

/// List every line with its stations in order.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let live = state.planner.graph().current().await;
    Json(LinesResponse::from_graph(&live.graph))
}

/// Summary of the published graph.
async fn network_status(State(state): State<AppState>) -> Json<NetworkStatus> {
    let live = state.planner.graph().current().await;
    Json(NetworkStatus::new(
        &live,
        state.planner.cache().entry_count(),
    ))
}

/// Consistency report over the stored network.
async fn verify_network(State(state): State<AppState>) -> Result<Response, AppError> {
    let data = state.planner.store().snapshot()?;
    Ok(Json(verify(&data)).into_response())
}

/// Reload the network and publish a new graph.
async fn refresh_network(State(state): State<AppState>) -> Result<Json<NetworkStatus>, AppError> {
    let live = state.planner.refresh().await?;
    Ok(Json(NetworkStatus::new(
        &live,
        state.planner.cache().entry_count(),
    )))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { code: &'static str, message: String },
    NotFound { code: &'static str, message: String },
    Internal { code: &'static str, message: String },
}

impl AppError {
    fn invalid_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            code: "invalid_request",
            message: message.into(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let code = e.error_code();
        let message = e.to_string();
        match e {
            RouteError::InvalidIdentifier { .. } | RouteError::SameStation { .. } => {
                AppError::BadRequest { code, message }
            }
            RouteError::UnknownStation { .. } | RouteError::NoRouteFound { .. } => {
                AppError::NotFound { code, message }
            }
            RouteError::Storage(_) => AppError::Internal { code, message },
        }
    }
}

impl From<RouteInputError> for AppError {
    fn from(e: RouteInputError) -> Self {
        match e {
            RouteInputError::Missing(field) => {
                AppError::invalid_request(format!("missing required field {field}"))
            }
            RouteInputError::Invalid(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            code: "storage_error",
            message: e.to_string(),
        }
    }
}

impl From<GraphError> for AppError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::Store(e) => e.into(),
            e => AppError::Internal {
                code: "graph_error",
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message),
            AppError::Internal { code, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
        };

        if status.is_server_error() {
            error!(%status, error_code = code, %message, "Request failed");
        } else {
            debug!(%status, error_code = code, %message, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error_code: code.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
