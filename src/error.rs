//! Error types for schedule extraction

use thiserror::Error;

use crate::table::Column;

/// Structural failures that abort a run.
///
/// Per-cell noise (a truncated month, a missing am/pm suffix, an empty
/// invigilator cell) is never reported here; it is repaired or dropped by the
/// pipeline stages themselves.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The table source produced no header or no data rows
    #[error("malformed input: table source returned no rows")]
    EmptyTable,

    /// A required column is absent from the header
    #[error("malformed input: missing expected column `{0}`")]
    MissingColumn(Column),

    /// A data row does not carry a value for a required column
    #[error("malformed input: row {line} is missing column `{column}`")]
    MissingCell { line: usize, column: Column },

    /// The payload is neither JSON nor base64-encoded JSON
    #[error("malformed input: payload could not be decoded: {0}")]
    Decode(String),

    /// The payload is JSON but not one of the accepted table shapes
    #[error("malformed input: unexpected payload shape: {0}")]
    Payload(#[from] serde_json::Error),

    /// The result document could not be serialized
    #[error("failed to serialize output: {0}")]
    Output(serde_json::Error),

    /// A configured keyword could not be compiled into a matcher
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
