//! Configuration traits and utilities.

use std::time::Duration;

use crate::error::{BridgeError, Result};
use crate::{BusConfig, LoggingConfig};

/// Trait for bridge configuration types.
///
/// Implement this trait for your bridge's configuration struct to give the
/// [`BridgeRunner`](crate::BridgeRunner) access to the common settings.
///
/// # Example
///
/// ```ignore
/// use mdt_relay_framework::{BridgeConfig, BusConfig, LoggingConfig};
///
/// pub struct MyBridgeConfig {
///     pub bus: BusConfig,
///     pub logging: LoggingConfig,
///     pub listen_port: u16,
/// }
///
/// impl BridgeConfig for MyBridgeConfig {
///     fn bus(&self) -> &BusConfig {
///         &self.bus
///     }
///
///     fn logging(&self) -> &LoggingConfig {
///         &self.logging
///     }
///
///     fn validate(&self) -> Result<()> {
///         self.bus().validate()?;
///         if self.listen_port == 0 {
///             return Err(BridgeError::validation("listen port must be non-zero"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait BridgeConfig: Send + Sync + 'static {
    /// Get the message bus configuration.
    fn bus(&self) -> &BusConfig;

    /// Get the logging configuration.
    fn logging(&self) -> &LoggingConfig;

    /// Interval between stats log lines, `None` to disable.
    fn stats_interval(&self) -> Option<Duration> {
        Some(Duration::from_secs(60))
    }

    /// Validate the configuration.
    ///
    /// Called by the runner before anything is bound. Override to add
    /// bridge-specific checks.
    fn validate(&self) -> Result<()> {
        self.bus()
            .validate()
            .map_err(|e| BridgeError::validation(e.to_string()))
    }
}
