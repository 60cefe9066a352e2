//! Outer telemetry envelope of a dialout chunk.

use prost::Message;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::json;
use crate::proto::telemetry::{Telemetry, TelemetryRowGpb};
use crate::registry::schema_protocol;

/// One decoded `Telemetry` message.
///
/// Keeps both the typed message (for dispatch and rows) and its JSON form.
/// The JSON form uses proto field names. Scalar and repeated fields are
/// always present; unset messages and oneofs are left out.
#[derive(Debug, Clone)]
pub struct Envelope {
    message: Telemetry,
    fields: Map<String, Value>,
}

impl Envelope {
    /// Decode the `data` payload of one `MdtDialoutArgs`.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let message = Telemetry::decode(data).map_err(DecodeError::Envelope)?;
        let fields = json::to_object(&message)?;
        Ok(Self { message, fields })
    }

    /// Schema identifier, `"<protocol>:<path>"`.
    pub fn encoding_path(&self) -> &str {
        &self.message.encoding_path
    }

    /// Protocol component of the encoding path, used for decoder lookup.
    pub fn protocol(&self) -> &str {
        schema_protocol(&self.message.encoding_path)
    }

    /// Rows of the compact GPB table, in wire order.
    pub fn rows(&self) -> &[TelemetryRowGpb] {
        self.message
            .data_gpb
            .as_ref()
            .map(|table| table.row.as_slice())
            .unwrap_or_default()
    }

    /// JSON form of the envelope.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
