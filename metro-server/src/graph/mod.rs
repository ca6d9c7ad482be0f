//! Route graph construction and publication.
//!
//! A [`Snapshot`] of the network is turned into an immutable [`Graph`] by
//! [`build`]. The graph in use is held by [`PublishedGraph`], which replaces it
//! atomically when the network changes.

mod builder;
mod error;
mod network_graph;
mod published;
mod snapshot;

pub use builder::build;
pub use error::GraphError;
pub use network_graph::{Edge, EdgeKind, Graph, Node, NodeIndex};
pub use published::{LiveGraph, PublishedGraph};
pub use snapshot::{Snapshot, SnapshotLine};
