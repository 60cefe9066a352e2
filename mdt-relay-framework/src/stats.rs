//! Bridge counters.
//!
//! Delivery is at-most-once, so every drop is counted here rather than
//! surfaced to the pipeline. Counters are lock-free and shared by all
//! session workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Outcome counters for the publisher.
#[derive(Debug, Default)]
pub struct PublishStats {
    published: AtomicU64,
    dropped: AtomicU64,
    skipped_closed: AtomicU64,
}

impl PublishStats {
    pub(crate) fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped_closed(&self) {
        self.skipped_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of the counters.
    pub fn snapshot(&self) -> PublishSnapshot {
        PublishSnapshot {
            published: self.published.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            skipped_closed: self.skipped_closed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time publisher counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSnapshot {
    /// Events handed to the bus.
    pub published: u64,
    /// Events lost to a transport error or a full send queue.
    pub dropped: u64,
    /// Events skipped because the channel was already closed.
    pub skipped_closed: u64,
}

/// Session and decode counters for a bridge.
#[derive(Debug)]
pub struct BridgeStats {
    start_time: Instant,
    sessions_opened: AtomicU64,
    sessions_closed: AtomicU64,
    sessions_rejected: AtomicU64,
    chunks_received: AtomicU64,
    chunks_failed: AtomicU64,
    rows_failed: AtomicU64,
    records_assembled: AtomicU64,
}

impl Default for BridgeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeStats {
    /// Create a zeroed set of counters.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            sessions_opened: AtomicU64::new(0),
            sessions_closed: AtomicU64::new(0),
            sessions_rejected: AtomicU64::new(0),
            chunks_received: AtomicU64::new(0),
            chunks_failed: AtomicU64::new(0),
            rows_failed: AtomicU64::new(0),
            records_assembled: AtomicU64::new(0),
        }
    }

    pub fn session_opened(&self) {
        self.sessions_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn session_closed(&self) {
        self.sessions_closed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn session_rejected(&self) {
        self.sessions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn chunk_received(&self) {
        self.chunks_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn chunk_failed(&self) {
        self.chunks_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn row_failed(&self) {
        self.rows_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_assembled(&self) {
        self.records_assembled.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy, folding in the publisher counters.
    pub fn snapshot(&self, bridge: &str, publish: PublishSnapshot) -> StatsSnapshot {
        let opened = self.sessions_opened.load(Ordering::Relaxed);
        let closed = self.sessions_closed.load(Ordering::Relaxed);

        StatsSnapshot {
            bridge: bridge.to_string(),
            uptime_secs: self.start_time.elapsed().as_secs(),
            sessions_active: opened.saturating_sub(closed),
            sessions_opened: opened,
            sessions_rejected: self.sessions_rejected.load(Ordering::Relaxed),
            chunks_received: self.chunks_received.load(Ordering::Relaxed),
            chunks_failed: self.chunks_failed.load(Ordering::Relaxed),
            rows_failed: self.rows_failed.load(Ordering::Relaxed),
            records_assembled: self.records_assembled.load(Ordering::Relaxed),
            publish,
        }
    }
}

/// Stats snapshot for logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub bridge: String,
    pub uptime_secs: u64,
    pub sessions_active: u64,
    pub sessions_opened: u64,
    pub sessions_rejected: u64,
    pub chunks_received: u64,
    pub chunks_failed: u64,
    pub rows_failed: u64,
    pub records_assembled: u64,
    pub publish: PublishSnapshot,
}

impl StatsSnapshot {
    /// Emit the snapshot as one structured log line.
    pub fn log(&self) {
        tracing::info!(
            bridge = %self.bridge,
            uptime_secs = self.uptime_secs,
            sessions_active = self.sessions_active,
            sessions_opened = self.sessions_opened,
            sessions_rejected = self.sessions_rejected,
            chunks_received = self.chunks_received,
            chunks_failed = self.chunks_failed,
            rows_failed = self.rows_failed,
            records_assembled = self.records_assembled,
            published = self.publish.published,
            dropped = self.publish.dropped,
            skipped_closed = self.publish.skipped_closed,
            "Bridge stats"
        );
    }
}
