//! Graph build errors.

use crate::domain::{LineId, StationId};
use crate::network::StoreError;

/// Errors that abort a graph build.
///
/// A failed build never replaces the currently published graph.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GraphError {
    /// The snapshot could not be read from storage
    #[error("failed to load network snapshot: {0}")]
    Store(#[from] StoreError),

    /// Two lines share an id
    #[error("line {0} appears more than once in the snapshot")]
    DuplicateLine(LineId),

    /// Two stations share an id
    #[error("station {0} appears more than once in the snapshot")]
    DuplicateStation(StationId),

    /// Two lines share a name
    #[error("lines {first} and {second} are both named {name:?}")]
    DuplicateLineName {
        name: String,
        first: LineId,
        second: LineId,
    },

    /// Two stops on one line share an order value
    #[error("line {line} has more than one stop with order {order}")]
    DuplicateOrder { line: LineId, order: u32 },

    /// A station is listed twice on the same line
    #[error("station {station} appears more than once on line {line}")]
    RepeatedStop { line: LineId, station: StationId },

    /// A stop references a station missing from the snapshot
    #[error("line {line} references unknown station {station}")]
    UnknownStation { line: LineId, station: StationId },
}
