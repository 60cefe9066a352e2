//! gRPC listener for device dialout connections.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

use mdt_relay_framework::{BridgeError, ShutdownSignal};

use crate::handler::DialoutService;
use crate::proto::mdt_dialout::g_rpc_mdt_dialout_server::GRpcMdtDialoutServer;

/// Bind the dialout listener.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, BridgeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| BridgeError::bind(addr.to_string(), e))
}

/// Serve dialout sessions on `listener` until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    service: DialoutService,
    mut shutdown: ShutdownSignal,
) -> Result<(), BridgeError> {
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "Listening for dialout connections");
    }

    Server::builder()
        .add_service(GRpcMdtDialoutServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            shutdown.wait().await;
            info!("gRPC server shutdown signal received");
        })
        .await
        .map_err(|e| BridgeError::Transport(e.to_string()))
}
