//! JSON helpers for generated protobuf types.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Serialize `bytes` fields as base64 strings, as protobuf JSON does.
pub fn as_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Serialize 64-bit integers as decimal strings, as protobuf JSON does.
///
/// Consumers that read JSON numbers as doubles would lose precision above 2^53.
pub fn as_string<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Convert a decoded message into a JSON object with every field present.
pub fn to_object<T: Serialize>(message: &T) -> serde_json::Result<Map<String, Value>> {
    match serde_json::to_value(message)? {
        Value::Object(fields) => Ok(fields),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        #[serde(serialize_with = "as_base64")]
        content: Vec<u8>,
    }

    #[derive(Serialize)]
    struct Counter {
        #[serde(serialize_with = "as_string")]
        packets: u64,
        #[serde(serialize_with = "as_string")]
        delta: i64,
    }

    #[test]
    fn test_int64_as_string() {
        let counter = Counter {
            packets: 9_007_199_254_740_993,
            delta: -3,
        };
        assert_eq!(
            serde_json::to_value(&counter).unwrap(),
            serde_json::json!({ "packets": "9007199254740993", "delta": "-3" })
        );
    }

    #[test]
    fn test_bytes_as_base64() {
        let row = Row {
            content: b"hello".to_vec(),
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({ "content": "aGVsbG8=" })
        );
    }

    #[test]
    fn test_to_object_rejects_scalars() {
        assert!(to_object(&42).is_err());
        assert_eq!(to_object(&Row { content: vec![] }).unwrap()["content"], "");
    }
}
