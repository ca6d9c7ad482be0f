//! Domain types for the metro route planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod color;
mod coordinates;
mod ids;
mod station;

pub use color::{ColorCode, InvalidColorCode};
pub use coordinates::{Coordinates, InvalidCoordinates};
pub use ids::{InvalidIdentifier, LineId, StationId};
pub use station::{Line, LineStop, Station};
