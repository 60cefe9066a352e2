//! Cisco IOS XR gRPC dialout bridge for mdt-relay
//!
//! Accepts model-driven telemetry streams pushed by IOS XR devices, decodes
//! them to JSON and republishes each record as a two-frame
//! `[peer identity, record]` event on a ZeroMQ PUSH socket.
//!
//! Chunks whose encoding path names a protocol in the [`ProtocolRegistry`]
//! are fanned out to one record per row, with the row content decoded by
//! the registered [`RowDecoder`]. Anything else is published as one record
//! per chunk.

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod json;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod server;

/// Generated protobuf code.
pub mod proto {
    pub mod mdt_dialout {
        tonic::include_proto!("mdt_dialout");
    }

    pub mod telemetry {
        tonic::include_proto!("telemetry");
    }

    /// Interface generic counters, the row content of
    /// `Cisco-IOS-XR-infra-statsd-oper` chunks.
    pub mod ifstatsbag {
        tonic::include_proto!(
            "cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters"
        );
    }
}

/// Vendor reported in every peer identity.
pub const VENDOR: &str = "Cisco";

pub use config::{CiscoArgs, CiscoConfig};
pub use envelope::Envelope;
pub use error::DecodeError;
pub use handler::DialoutService;
pub use pipeline::{ChunkOutcome, Pipeline, RowError};
pub use record::{DecodedRow, OutboundRecord, assemble};
pub use registry::{ProstRowDecoder, ProtocolRegistry, RowDecoder};
