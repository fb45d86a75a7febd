//! State store error types.

use thiserror::Error;

/// Errors that can occur while loading or saving the current state
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached
    #[error("State store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed
    #[error("State store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Stored record was written by an unknown format version
    #[error("Unsupported state record version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
