//! Station and line identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when an identifier is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier {value}: must be a positive integer")]
pub struct InvalidIdentifier {
    pub value: i64,
}

fn positive_u32(value: i64) -> Result<u32, InvalidIdentifier> {
    if value <= 0 {
        return Err(InvalidIdentifier { value });
    }
    u32::try_from(value).map_err(|_| InvalidIdentifier { value })
}

/// A validated station identifier.
///
/// Station identifiers are positive integers assigned by the storage layer.
/// Any `StationId` value is non-zero by construction.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationId;
///
/// let id = StationId::new(42).unwrap();
/// assert_eq!(id.get(), 42);
///
/// assert!(StationId::new(0).is_err());
/// assert!(StationId::new(-3).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct StationId(u32);

impl StationId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, InvalidIdentifier> {
        positive_u32(value).map(StationId)
    }

    /// Returns the raw identifier.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for StationId {
    type Error = InvalidIdentifier;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        StationId::new(value)
    }
}

impl From<StationId> for u32 {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated line identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct LineId(u32);

impl LineId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, InvalidIdentifier> {
        positive_u32(value).map(LineId)
    }

    /// Returns the raw identifier.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for LineId {
    type Error = InvalidIdentifier;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        LineId::new(value)
    }
}

impl From<LineId> for u32 {
    fn from(id: LineId) -> Self {
        id.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
