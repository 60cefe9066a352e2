//! Cisco dialout bridge configuration

use std::net::{Ipv6Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use tokio::sync::Semaphore;

use mdt_relay_framework::{BridgeArgs, BridgeConfig, BridgeError, BusConfig, LoggingConfig};

/// Default gRPC listening port for dialout connections.
pub const DEFAULT_GRPC_PORT: u16 = 10001;

/// Default number of dialout sessions processed concurrently.
pub const DEFAULT_MAX_SESSIONS: usize = 10;

/// Cisco IOS XR gRPC dialout to ZeroMQ bridge
#[derive(Parser, Debug, Clone)]
#[command(name = "mdt-relay-cisco", version)]
#[command(about = "Relay Cisco IOS XR gRPC dialout telemetry to a ZeroMQ PUSH socket")]
pub struct CiscoArgs {
    /// Set the gRPC port to listen on.
    #[arg(short = 'g', long = "grpc-port", default_value_t = DEFAULT_GRPC_PORT)]
    pub grpc_port: u16,

    /// Dialout sessions processed at once; further sessions wait.
    #[arg(long, default_value_t = DEFAULT_MAX_SESSIONS)]
    pub max_sessions: usize,

    #[command(flatten)]
    pub bridge: BridgeArgs,
}

/// Validated settings for the Cisco bridge.
#[derive(Debug, Clone)]
pub struct CiscoConfig {
    pub grpc_port: u16,
    pub max_sessions: usize,
    pub bus: BusConfig,
    pub logging: LoggingConfig,
    pub stats_interval: Option<Duration>,
}

impl Default for CiscoConfig {
    fn default() -> Self {
        Self::from(CiscoArgs {
            grpc_port: DEFAULT_GRPC_PORT,
            max_sessions: DEFAULT_MAX_SESSIONS,
            bridge: BridgeArgs::default(),
        })
    }
}

impl From<CiscoArgs> for CiscoConfig {
    fn from(args: CiscoArgs) -> Self {
        Self {
            grpc_port: args.grpc_port,
            max_sessions: args.max_sessions,
            bus: args.bridge.bus(),
            logging: args.bridge.logging(),
            stats_interval: args.bridge.stats_interval(),
        }
    }
}

impl CiscoConfig {
    /// Listening address: every interface, IPv4 and IPv6.
    pub fn grpc_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, self.grpc_port))
    }
}

impl BridgeConfig for CiscoConfig {
    fn bus(&self) -> &BusConfig {
        &self.bus
    }

    fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    fn stats_interval(&self) -> Option<Duration> {
        self.stats_interval
    }

    fn validate(&self) -> mdt_relay_framework::Result<()> {
        self.bus
            .validate()
            .map_err(|e| BridgeError::validation(e.to_string()))?;

        if self.grpc_port == 0 {
            return Err(BridgeError::validation("gRPC port must be non-zero"));
        }
        if self.max_sessions == 0 {
            return Err(BridgeError::validation("max sessions must be at least 1"));
        }
        if self.max_sessions > Semaphore::MAX_PERMITS {
            return Err(BridgeError::validation(format!(
                "max sessions must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }
}
