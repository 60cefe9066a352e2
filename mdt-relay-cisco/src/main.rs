//! Cisco IOS XR dialout bridge for mdt-relay
//!
//! Listens for gRPC dialout telemetry and republishes it on a ZeroMQ PUSH socket.

use clap::Parser;
use tracing::info;

use mdt_relay_cisco::{CiscoArgs, CiscoConfig, DialoutService, Pipeline, server};
use mdt_relay_common::init_tracing;
use mdt_relay_framework::{BridgeConfig, BridgeRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CiscoConfig::from(CiscoArgs::parse());

    init_tracing(config.logging())?;

    let grpc_addr = config.grpc_addr();
    let max_sessions = config.max_sessions;

    let mut runner = BridgeRunner::start("cisco", config)?;

    let pipeline = Pipeline::default();
    info!(
        bus = %runner.publisher().endpoint(),
        protocols = ?pipeline.registry().protocols(),
        max_sessions,
        "Cisco dialout bridge ready"
    );

    let service = DialoutService::new(
        pipeline,
        runner.publisher(),
        runner.stats(),
        max_sessions,
        runner.shutdown_signal(),
    );

    let listener = server::bind(grpc_addr).await?;
    let shutdown = runner.shutdown_signal();
    runner.spawn_with_error(
        "grpc-server".to_string(),
        server::serve(listener, service, shutdown),
    );

    runner.run().await?;

    Ok(())
}
