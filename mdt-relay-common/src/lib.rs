//! mdt-relay Common Library
//!
//! This crate provides shared types and utilities for mdt-relay telemetry bridges:
//!
//! - [`peer`] - Peer identity of the device pushing telemetry (`PeerIdentity`)
//! - [`config`] - Bus and logging configuration
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod peer;

// Re-export commonly used types at the crate root
pub use config::{BusConfig, DEFAULT_BUS_HOST, DEFAULT_BUS_PORT, LogFormat, LoggingConfig};
pub use error::{Error, Result};
pub use peer::{PeerIdentity, peer_descriptor};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level when set.
///
/// # Example
///
/// ```ignore
/// use mdt_relay_common::{LoggingConfig, LogFormat, init_tracing};
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Json,
/// };
/// init_tracing(&config)?;
/// ```
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
