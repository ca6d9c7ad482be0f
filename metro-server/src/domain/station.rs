//! Station and line entities.
//!
//! These mirror the records held by the storage layer. The routing core only
//! ever reads them.

use serde::{Deserialize, Serialize};

use super::{ColorCode, Coordinates, LineId, StationId};

/// A physical stop, potentially served by several lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates,
        }
    }

    /// Distance to another station in metres.
    pub fn distance_to(&self, other: &Station) -> f64 {
        self.coordinates.distance_to(&other.coordinates)
    }
}

/// A metro line. Its stations are stored separately as [`LineStop`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorCode>,
}

impl Line {
    pub fn new(id: LineId, name: impl Into<String>, color: Option<ColorCode>) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }
}

/// A station's position on a line.
///
/// `order` is line-scoped: only its relative value matters, so gaps are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineStop {
    pub station: StationId,
    pub order: u32,
}

impl LineStop {
    pub fn new(station: StationId, order: u32) -> Self {
        Self { station, order }
    }
}
