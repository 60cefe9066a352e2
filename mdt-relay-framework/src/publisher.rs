//! Fire-and-forget publisher over a ZeroMQ PUSH socket.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{BridgeError, Result};
use crate::stats::{PublishSnapshot, PublishStats};

/// Publisher for sending two-frame JSON events to the message bus.
///
/// Every event is `[key, payload]`, sent atomically as one multipart message.
/// Delivery is at-most-once: a closed channel skips the send and any
/// transport error (including a full send queue) drops the event. Neither is
/// reported to the caller; both are counted in [`PublishStats`].
///
/// The socket is shared by all session workers and is not safe for
/// unsynchronized concurrent use, so every send goes through one lock.
#[derive(Clone)]
pub struct Publisher {
    socket: Arc<Mutex<Option<zmq::Socket>>>,
    endpoint: String,
    stats: Arc<PublishStats>,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("endpoint", &self.endpoint)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Publisher {
    /// Create a PUSH socket and bind it to `endpoint` (e.g. `tcp://127.0.0.1:50001`).
    ///
    /// A wildcard port (`tcp://127.0.0.1:*`) is resolved to the port actually bound.
    pub fn bind(endpoint: &str) -> Result<Self> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::PUSH)?;

        // Pending messages are discarded on close rather than blocking shutdown.
        socket.set_linger(0)?;
        socket
            .bind(endpoint)
            .map_err(|e| BridgeError::bind(endpoint, e))?;

        let endpoint = socket
            .get_last_endpoint()?
            .unwrap_or_else(|_| endpoint.to_string());

        tracing::info!(endpoint = %endpoint, "Publisher bound");

        Ok(Self {
            socket: Arc::new(Mutex::new(Some(socket))),
            endpoint,
            stats: Arc::new(PublishStats::default()),
        })
    }

    /// Get the bound endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the publish counters.
    pub fn stats(&self) -> PublishSnapshot {
        self.stats.snapshot()
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    /// Send a pre-serialized `[key, payload]` event.
    pub fn publish_frames(&self, key: &str, payload: &str) {
        let guard = self.lock();

        let Some(socket) = guard.as_ref() else {
            self.stats.record_skipped_closed();
            tracing::trace!(endpoint = %self.endpoint, "Channel closed, skipping publish");
            return;
        };

        match socket.send_multipart([key.as_bytes(), payload.as_bytes()], zmq::DONTWAIT) {
            Ok(()) => self.stats.record_published(),
            Err(zmq::Error::EAGAIN) => {
                self.stats.record_dropped();
                tracing::trace!(endpoint = %self.endpoint, "Send queue full, dropping event");
            }
            Err(e) => {
                self.stats.record_dropped();
                tracing::debug!(endpoint = %self.endpoint, error = %e, "Publish failed, dropping event");
            }
        }
    }

    /// Close the socket. Later publishes are skipped.
    pub fn close(&self) {
        if self.lock().take().is_some() {
            tracing::info!(endpoint = %self.endpoint, "Publisher closed");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<zmq::Socket>> {
        self.socket
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
