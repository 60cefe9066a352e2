//! Decode and dispatch for one telemetry chunk.

use std::sync::Arc;

use tracing::debug;

use crate::envelope::Envelope;
use crate::error::DecodeError;
use crate::record::{DecodedRow, OutboundRecord, assemble};
use crate::registry::ProtocolRegistry;

/// A row whose content did not decode. Its siblings are unaffected.
#[derive(Debug)]
pub struct RowError {
    /// Position of the row in the chunk.
    pub index: usize,
    pub timestamp: u64,
    pub error: DecodeError,
}

/// Result of processing one chunk.
#[derive(Debug)]
pub struct ChunkOutcome {
    pub encoding_path: String,
    /// Records to publish, in row order.
    pub records: Vec<OutboundRecord>,
    /// Rows skipped because their content failed to decode.
    pub row_errors: Vec<RowError>,
}

/// Turns raw dialout payloads into outbound records.
///
/// Stateless apart from the registry: the same bytes always produce the
/// same records.
#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: Arc<ProtocolRegistry>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ProtocolRegistry::with_defaults())
    }
}

impl Pipeline {
    pub fn new(registry: ProtocolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    /// Decode one chunk and assemble its records.
    ///
    /// Fails only when the envelope itself is malformed.
    pub fn process(&self, data: &[u8]) -> Result<ChunkOutcome, DecodeError> {
        let envelope = Envelope::decode(data)?;
        let encoding_path = envelope.encoding_path().to_string();

        let Some(decoder) = self.registry.lookup(envelope.protocol()) else {
            debug!(encoding_path = %encoding_path, "No row decoder, publishing envelope as-is");
            return Ok(ChunkOutcome {
                encoding_path,
                records: vec![assemble(&envelope, None)],
                row_errors: Vec::new(),
            });
        };

        let rows = envelope.rows();
        let mut records = Vec::with_capacity(rows.len());
        let mut row_errors = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            match decoder.decode(&row.content) {
                Ok(content) => {
                    let decoded = DecodedRow {
                        content,
                        timestamp: row.timestamp,
                    };
                    records.push(assemble(&envelope, Some(decoded)));
                }
                Err(error) => row_errors.push(RowError {
                    index,
                    timestamp: row.timestamp,
                    error,
                }),
            }
        }

        Ok(ChunkOutcome {
            encoding_path,
            records,
            row_errors,
        })
    }
}
