//! Application state for the web layer.

use crate::planner::Planner;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route planner over the published graph
    pub planner: Planner,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: Planner) -> Self {
        Self { planner }
    }
}
