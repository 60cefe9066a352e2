//! Outbound record assembly.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::envelope::Envelope;

/// Envelope field replaced by the decoded row on the per-row path.
pub const ROW_COLLECTION_FIELD: &str = "data_gpb";

/// Decoded content of one row, with the row's own timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow {
    pub content: Value,
    pub timestamp: u64,
}

impl DecodedRow {
    fn into_json(self) -> Value {
        let mut row = Map::with_capacity(2);
        row.insert("content".to_string(), self.content);
        row.insert("timestamp".to_string(), Value::from(self.timestamp));

        let mut collection = Map::with_capacity(1);
        collection.insert("row".to_string(), Value::Object(row));
        Value::Object(collection)
    }
}

/// The JSON object published as the second frame of an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OutboundRecord(Map<String, Value>);

impl OutboundRecord {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }
}

/// Merge an envelope and, on the per-row path, one decoded row.
///
/// Without a row the envelope is returned verbatim. With one, the row
/// collection field becomes `{"row": {"content": .., "timestamp": ..}}`
/// and every other envelope field is kept as is.
pub fn assemble(envelope: &Envelope, row: Option<DecodedRow>) -> OutboundRecord {
    let mut fields = envelope.fields().clone();
    if let Some(row) = row {
        fields.insert(ROW_COLLECTION_FIELD.to_string(), row.into_json());
    }
    OutboundRecord(fields)
}
