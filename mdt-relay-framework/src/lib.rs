//! mdt-relay Bridge Framework
//!
//! Common abstractions for building bridges that republish device telemetry
//! on a ZeroMQ message bus.
//!
//! # Overview
//!
//! This framework provides:
//! - [`BridgeConfig`] trait for access to and validation of common settings
//! - [`BridgeRunner`] for managing bridge lifecycle (start, run, stop on Ctrl+C)
//! - [`Publisher`] for fire-and-forget two-frame JSON events over a PUSH socket
//! - [`BridgeArgs`] for common CLI argument parsing
//! - [`BridgeStats`] / [`PublishSnapshot`] for drop and decode counters
//!
//! # Example
//!
//! ```ignore
//! use mdt_relay_framework::BridgeRunner;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MyBridgeConfig::from_args(MyArgs::parse())?;
//!     let mut runner = BridgeRunner::start("mybridge", config)?;
//!
//!     // Spawn protocol-specific workers
//!     runner.spawn(my_worker(runner.publisher()));
//!
//!     // Run until Ctrl+C
//!     runner.run().await?;
//!     Ok(())
//! }
//! ```

mod args;
mod config;
mod error;
mod publisher;
mod runner;
mod stats;

pub use args::BridgeArgs;
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use publisher::Publisher;
pub use runner::{BridgeRunner, ShutdownSignal};
pub use stats::{BridgeStats, PublishSnapshot, PublishStats, StatsSnapshot};

// Re-export commonly used types from mdt-relay-common
pub use mdt_relay_common::{BusConfig, LogFormat, LoggingConfig, PeerIdentity};
