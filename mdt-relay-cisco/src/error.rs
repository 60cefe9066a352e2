//! Decode errors for dialout payloads.

use thiserror::Error;

/// A telemetry chunk or row that could not be turned into JSON.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The outer `Telemetry` message is malformed or truncated.
    #[error("Failed to decode telemetry envelope: {0}")]
    Envelope(#[source] prost::DecodeError),

    /// A row's content does not match the schema registered for its protocol.
    #[error("Failed to decode row content: {0}")]
    Nested(#[source] prost::DecodeError),

    /// The decoded message could not be represented as a JSON object.
    #[error("Failed to convert to JSON: {0}")]
    Json(#[from] serde_json::Error),
}
