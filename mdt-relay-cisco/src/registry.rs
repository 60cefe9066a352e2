//! Protocol registry: schema-specific decoders for row content.
//!
//! The envelope's encoding path is `"<protocol>:<path>"`. Rows of a chunk
//! whose protocol has a registered [`RowDecoder`] are decoded one by one;
//! chunks from any other protocol are published as-is.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::json;
use crate::proto::ifstatsbag::IfstatsbagGeneric;

/// Interface generic counters (`ifstatsbag_generic` rows).
pub const INFRA_STATSD_OPER: &str = "Cisco-IOS-XR-infra-statsd-oper";

/// Decodes the raw content bytes of one row.
pub trait RowDecoder: Send + Sync {
    /// Decode `content` into a JSON object with every field present.
    fn decode(&self, content: &[u8]) -> Result<Value, DecodeError>;
}

impl<F> RowDecoder for F
where
    F: Fn(&[u8]) -> Result<Value, DecodeError> + Send + Sync,
{
    fn decode(&self, content: &[u8]) -> Result<Value, DecodeError> {
        self(content)
    }
}

/// [`RowDecoder`] for any generated protobuf message.
///
/// Field names are the proto field names, enums stay integers, and unset
/// fields are emitted with their default value.
pub struct ProstRowDecoder<M> {
    _message: PhantomData<fn() -> M>,
}

impl<M> ProstRowDecoder<M> {
    pub fn new() -> Self {
        Self {
            _message: PhantomData,
        }
    }
}

impl<M> Default for ProstRowDecoder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> RowDecoder for ProstRowDecoder<M>
where
    M: prost::Message + Default + Serialize,
{
    fn decode(&self, content: &[u8]) -> Result<Value, DecodeError> {
        let message = M::decode(content).map_err(DecodeError::Nested)?;
        Ok(Value::Object(json::to_object(&message)?))
    }
}

/// Maps a protocol identifier to the decoder for its rows.
#[derive(Clone, Default)]
pub struct ProtocolRegistry {
    decoders: HashMap<String, Arc<dyn RowDecoder>>,
}

impl fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.protocols()).finish()
    }
}

impl ProtocolRegistry {
    /// An empty registry: every chunk is published unmodified.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the decoders shipped with this bridge.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            INFRA_STATSD_OPER,
            ProstRowDecoder::<IfstatsbagGeneric>::new(),
        );
        registry
    }

    /// Register `decoder` for `protocol`, returning the decoder it replaces.
    pub fn register<D>(
        &mut self,
        protocol: impl Into<String>,
        decoder: D,
    ) -> Option<Arc<dyn RowDecoder>>
    where
        D: RowDecoder + 'static,
    {
        self.decoders.insert(protocol.into(), Arc::new(decoder))
    }

    /// Exact-match lookup on the protocol component of an encoding path.
    pub fn lookup(&self, protocol: &str) -> Option<&dyn RowDecoder> {
        self.decoders.get(protocol).map(|decoder| decoder.as_ref())
    }

    /// Registered protocol identifiers, sorted.
    pub fn protocols(&self) -> Vec<&str> {
        let mut protocols: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        protocols.sort_unstable();
        protocols
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

/// Protocol component of an encoding path (`"<protocol>:<path>"`).
///
/// A path without a colon is all protocol.
pub fn schema_protocol(encoding_path: &str) -> &str {
    encoding_path
        .split_once(':')
        .map_or(encoding_path, |(protocol, _)| protocol)
}
