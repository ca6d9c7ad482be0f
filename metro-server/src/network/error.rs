//! Storage error types.

use std::path::PathBuf;

use crate::domain::LineId;

/// Errors that can occur when reading the network from storage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Reading the network file failed
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Network document could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A line id was requested that the store does not hold
    #[error("unknown line {0}")]
    UnknownLine(LineId),

    /// The store could not be read at all
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("data/network.json"),
            message: "not found".into(),
        };
        assert_eq!(err.to_string(), "failed to read data/network.json: not found");

        let err = StoreError::UnknownLine(LineId::new(4).unwrap());
        assert_eq!(err.to_string(), "unknown line 4");

        let err = StoreError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }
}
