//! Error types for the bridge framework.

use thiserror::Error;

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur in a bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration validation error.
    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    /// Failed to bind a listening endpoint.
    #[error("Failed to bind {endpoint}: {message}")]
    Bind { endpoint: String, message: String },

    /// Message bus error.
    #[error("Message bus error: {0}")]
    Bus(String),

    /// Inbound transport error.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl BridgeError {
    /// Create a configuration validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ConfigValidation(msg.into())
    }

    /// Create a bind error for an endpoint.
    pub fn bind(endpoint: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Bind {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }
}

impl From<zmq::Error> for BridgeError {
    fn from(err: zmq::Error) -> Self {
        Self::Bus(err.to_string())
    }
}
