//! Access to persisted lines and stations.
//!
//! The routing core reads the network through the [`NetworkStore`] trait.
//! [`JsonFileStore`] is the production implementation, backed by a JSON
//! document on disk that can be reloaded while the server runs.

mod error;
mod file;
mod locate;
mod store;
mod verify;

pub use error::StoreError;
pub use file::{JsonFileStore, load_network_file};
pub use locate::{nearest_station, stations_within};
pub use store::{InMemoryStore, LineRecord, NetworkData, NetworkStore};
pub use verify::{InterchangeSummary, LineSummary, NetworkIssue, VerificationReport, verify};
