//! Identity of the device on the far end of a dialout session.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identity of a telemetry node, derived once per session from its peer descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerIdentity {
    /// Transport family of the peer (e.g. "ipv4", "ipv6").
    pub protocol: String,

    /// Host address of the node.
    pub telemetry_node: String,

    /// Source port of the session, kept as text.
    pub telemetry_node_port: String,

    /// Vendor the bridge is built for.
    pub telemetry_node_vendor: String,
}

impl PeerIdentity {
    /// Parse a `"<protocol>:<host>:<port>"` peer descriptor.
    ///
    /// A bracketed IPv6 host (`ipv6:[::1]:57344`) counts as a single segment.
    /// Anything other than exactly three non-empty segments is rejected with
    /// [`Error::MalformedPeerAddress`].
    pub fn parse(descriptor: &str, vendor: &str) -> Result<Self> {
        let malformed = || Error::MalformedPeerAddress {
            descriptor: descriptor.to_string(),
        };

        let (protocol, rest) = descriptor.split_once(':').ok_or_else(malformed)?;

        let (host, port) = if let Some(bracketed) = rest.strip_prefix('[') {
            let (host, tail) = bracketed.split_once(']').ok_or_else(malformed)?;
            (host, tail.strip_prefix(':').ok_or_else(malformed)?)
        } else {
            rest.split_once(':').ok_or_else(malformed)?
        };

        if protocol.is_empty() || host.is_empty() || port.is_empty() || port.contains(':') {
            return Err(malformed());
        }

        Ok(Self {
            protocol: protocol.to_string(),
            telemetry_node: host.to_string(),
            telemetry_node_port: port.to_string(),
            telemetry_node_vendor: vendor.to_string(),
        })
    }

    /// Serialize to the JSON frame sent ahead of every record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Render a socket address as a gRPC-style peer descriptor.
///
/// IPv4-mapped IPv6 addresses are reported as plain IPv4.
pub fn peer_descriptor(addr: &SocketAddr) -> String {
    match addr.ip().to_canonical() {
        std::net::IpAddr::V4(ip) => format!("ipv4:{}:{}", ip, addr.port()),
        std::net::IpAddr::V6(ip) => format!("ipv6:[{}]:{}", ip, addr.port()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_descriptor() {
        let peer = PeerIdentity::parse("ipv4:10.0.0.1:57344", "Cisco").unwrap();
        assert_eq!(peer.protocol, "ipv4");
        assert_eq!(peer.telemetry_node, "10.0.0.1");
        assert_eq!(peer.telemetry_node_port, "57344");
        assert_eq!(peer.telemetry_node_vendor, "Cisco");
    }

    #[test]
    fn test_parse_bracketed_ipv6_descriptor() {
        let peer = PeerIdentity::parse("ipv6:[2001:db8::1]:40000", "Cisco").unwrap();
        assert_eq!(peer.protocol, "ipv6");
        assert_eq!(peer.telemetry_node, "2001:db8::1");
        assert_eq!(peer.telemetry_node_port, "40000");
    }

    #[test]
    fn test_reject_malformed_descriptors() {
        for descriptor in [
            "badformat",
            "ipv4:10.0.0.1",
            "ipv4:10.0.0.1:1:2",
            "ipv6:::1:40000",
            ":10.0.0.1:1",
            "ipv4::57344",
            "ipv4:10.0.0.1:",
            "ipv6:[::1]40000",
        ] {
            let result = PeerIdentity::parse(descriptor, "Cisco");
            assert!(
                matches!(result, Err(Error::MalformedPeerAddress { .. })),
                "expected rejection of {descriptor}"
            );
        }
    }

    #[test]
    fn test_json_field_names() {
        let peer = PeerIdentity::parse("ipv4:10.0.0.1:57344", "Cisco").unwrap();
        let json: serde_json::Value = serde_json::from_str(&peer.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "protocol": "ipv4",
                "telemetry_node": "10.0.0.1",
                "telemetry_node_port": "57344",
                "telemetry_node_vendor": "Cisco",
            })
        );
    }

    #[test]
    fn test_peer_descriptor_round_trips_through_parse() {
        let v4: SocketAddr = "192.0.2.7:5000".parse().unwrap();
        assert_eq!(peer_descriptor(&v4), "ipv4:192.0.2.7:5000");

        let mapped: SocketAddr = "[::ffff:192.0.2.7]:5000".parse().unwrap();
        assert_eq!(peer_descriptor(&mapped), "ipv4:192.0.2.7:5000");

        let v6: SocketAddr = "[2001:db8::2]:6000".parse().unwrap();
        let peer = PeerIdentity::parse(&peer_descriptor(&v6), "Cisco").unwrap();
        assert_eq!(peer.telemetry_node, "2001:db8::2");
        assert_eq!(peer.telemetry_node_port, "6000");
    }
}
