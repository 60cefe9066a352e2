//! gRPC dialout service: one session per device stream.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};
use tracing::{debug, info, warn};

use mdt_relay_common::{PeerIdentity, peer_descriptor};
use mdt_relay_framework::{BridgeStats, Publisher, ShutdownSignal};

use crate::VENDOR;
use crate::pipeline::Pipeline;
use crate::proto::mdt_dialout::MdtDialoutArgs;
use crate::proto::mdt_dialout::g_rpc_mdt_dialout_server::GRpcMdtDialout;

/// Implements `gRPCMdtDialout/MdtDialout`.
///
/// Each inbound stream is handled by its own task. At most `max_sessions`
/// streams are processed at once; later ones wait for a free slot. Nothing
/// is ever sent back to the device.
#[derive(Clone)]
pub struct DialoutService {
    pipeline: Pipeline,
    publisher: Publisher,
    stats: Arc<BridgeStats>,
    sessions: Arc<Semaphore>,
    shutdown: ShutdownSignal,
}

impl DialoutService {
    pub fn new(
        pipeline: Pipeline,
        publisher: Publisher,
        stats: Arc<BridgeStats>,
        max_sessions: usize,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            pipeline,
            publisher,
            stats,
            sessions: Arc::new(Semaphore::new(max_sessions)),
            shutdown,
        }
    }
}

#[tonic::async_trait]
impl GRpcMdtDialout for DialoutService {
    type MdtDialoutStream = ReceiverStream<Result<MdtDialoutArgs, Status>>;

    async fn mdt_dialout(
        &self,
        request: Request<Streaming<MdtDialoutArgs>>,
    ) -> Result<Response<Self::MdtDialoutStream>, Status> {
        let descriptor = request
            .remote_addr()
            .map(|addr| peer_descriptor(&addr))
            .unwrap_or_default();

        let identity = PeerIdentity::parse(&descriptor, VENDOR).map_err(|e| {
            self.stats.session_rejected();
            warn!(peer = %descriptor, error = %e, "Refusing dialout session");
            Status::invalid_argument(e.to_string())
        })?;
        let identity_json = identity
            .to_json()
            .map_err(|e| Status::internal(e.to_string()))?;

        let session = Session {
            peer: descriptor,
            identity_json,
            pipeline: self.pipeline.clone(),
            publisher: self.publisher.clone(),
            stats: self.stats.clone(),
        };

        // Dropping the sender ends the (empty) response stream
        let (tx, rx) = mpsc::channel(1);
        let sessions = self.sessions.clone();
        let mut shutdown = self.shutdown.clone();
        let inbound = request.into_inner();

        tokio::spawn(async move {
            // Shutdown wins over a slot freed by a session that is stopping
            let permit = tokio::select! {
                biased;
                _ = shutdown.wait() => return,
                permit = sessions.acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return,
                },
            };
            session.run(inbound, tx, shutdown).await;
            drop(permit);
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}

/// State of one accepted dialout stream.
struct Session {
    peer: String,
    /// First frame of every event from this session.
    identity_json: String,
    pipeline: Pipeline,
    publisher: Publisher,
    stats: Arc<BridgeStats>,
}

impl Session {
    async fn run(
        self,
        mut inbound: Streaming<MdtDialoutArgs>,
        tx: mpsc::Sender<Result<MdtDialoutArgs, Status>>,
        mut shutdown: ShutdownSignal,
    ) {
        self.stats.session_opened();
        info!(peer = %self.peer, "Dialout session opened");

        loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                _ = tx.closed() => break,
                next = inbound.message() => next,
            };

            match next {
                Ok(Some(args)) => self.process_chunk(args),
                Ok(None) => break,
                Err(status) => {
                    debug!(peer = %self.peer, status = %status, "Dialout stream failed");
                    break;
                }
            }
        }

        self.stats.session_closed();
        info!(peer = %self.peer, "Dialout session closed");
    }

    fn process_chunk(&self, args: MdtDialoutArgs) {
        self.stats.chunk_received();

        if !args.errors.is_empty() {
            warn!(peer = %self.peer, req_id = args.req_id, errors = %args.errors, "Device reported errors");
        }

        let outcome = match self.pipeline.process(&args.data) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.stats.chunk_failed();
                warn!(peer = %self.peer, req_id = args.req_id, error = %e, "Skipping undecodable chunk");
                return;
            }
        };

        for row in &outcome.row_errors {
            self.stats.row_failed();
            warn!(
                peer = %self.peer,
                encoding_path = %outcome.encoding_path,
                row = row.index,
                timestamp = row.timestamp,
                error = %row.error,
                "Skipping undecodable row"
            );
        }

        for record in &outcome.records {
            match record.to_json() {
                Ok(json) => {
                    self.stats.record_assembled();
                    self.publisher.publish_frames(&self.identity_json, &json);
                }
                Err(e) => {
                    warn!(peer = %self.peer, error = %e, "Failed to serialize record");
                }
            }
        }

        debug!(
            peer = %self.peer,
            encoding_path = %outcome.encoding_path,
            records = outcome.records.len(),
            "Chunk processed"
        );
    }
}
