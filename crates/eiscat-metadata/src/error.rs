//! Error types for metadata synthesis.

use thiserror::Error;

/// Errors that can occur while assembling a metadata record.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// An antenna or station code outside the known closed set.
    ///
    /// This is a data-integrity failure, not a normal-flow branch: no
    /// default location is ever substituted.
    #[error("Unknown antenna code: {0}")]
    UnknownAntenna(String),
}

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
