//! Web layer for the metro route planner.
//!
//! Provides HTTP endpoints for finding routes and browsing the network.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
