//! Route planning between two stations.
//!
//! A request is checked by [`validate`], resolved against the published graph
//! by [`resolve`] and rendered by [`format_route`]. [`Planner`] ties the three
//! together with the route cache.

mod error;
mod fare;
mod format;
mod path;
mod resolve;
mod service;
mod validate;

pub use error::RouteError;
pub use fare::{ticket_price, travel_minutes};
pub use format::{InterchangePoint, PathStation, RoutePayload, format_route};
pub use path::{EmptyPath, Hop, RoutePath, Transfer};
pub use resolve::{Cost, resolve};
pub use service::Planner;
pub use validate::{RouteRequest, ValidatedRequest, validate};
