use thiserror::Error;

/// Common error type for mdt-relay components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed peer address '{descriptor}': expected '<protocol>:<host>:<port>'")]
    MalformedPeerAddress { descriptor: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using mdt-relay's Error.
pub type Result<T> = std::result::Result<T, Error>;
