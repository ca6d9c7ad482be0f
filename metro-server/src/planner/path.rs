//! Resolved routes.

use crate::domain::{LineId, StationId};

/// One station on a route and the line used to reach it.
///
/// For the first station, `line` is the line boarded there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    pub station: StationId,
    pub line: LineId,
}

impl Hop {
    pub fn new(station: StationId, line: LineId) -> Self {
        Self { station, line }
    }
}

/// A line change made at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub station: StationId,
    pub from: LineId,
    pub to: LineId,
}

/// Error constructing a [`RoutePath`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("route path must have at least one station")]
pub struct EmptyPath;

/// An ordered route from an origin to a destination station.
///
/// Guaranteed non-empty. Consecutive hops are adjacent in the graph the path
/// was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    hops: Vec<Hop>,
}

impl RoutePath {
    pub fn new(hops: Vec<Hop>) -> Result<Self, EmptyPath> {
        if hops.is_empty() {
            return Err(EmptyPath);
        }
        Ok(Self { hops })
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn origin(&self) -> StationId {
        self.hops[0].station
    }

    pub fn destination(&self) -> StationId {
        self.hops[self.hops.len() - 1].station
    }

    /// Number of station-to-station moves.
    pub fn stops(&self) -> usize {
        self.hops.len() - 1
    }

    /// Line changes along the route, in order.
    pub fn transfers(&self) -> Vec<Transfer> {
        self.hops
            .windows(2)
            .filter(|w| w[0].line != w[1].line)
            .map(|w| Transfer {
                station: w[0].station,
                from: w[0].line,
                to: w[1].line,
            })
            .collect()
    }

    pub fn transfer_count(&self) -> usize {
        self.hops.windows(2).filter(|w| w[0].line != w[1].line).count()
    }
}
