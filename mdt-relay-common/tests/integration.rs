//! Integration tests for mdt-relay-common library.

use std::net::SocketAddr;

use mdt_relay_common::{BusConfig, Error, PeerIdentity, peer_descriptor};

#[test]
fn test_identity_from_socket_address() {
    let addr: SocketAddr = "10.0.0.1:57344".parse().unwrap();

    let descriptor = peer_descriptor(&addr);
    let peer = PeerIdentity::parse(&descriptor, "Cisco").expect("Parse failed");

    assert_eq!(
        peer,
        PeerIdentity {
            protocol: "ipv4".to_string(),
            telemetry_node: "10.0.0.1".to_string(),
            telemetry_node_port: "57344".to_string(),
            telemetry_node_vendor: "Cisco".to_string(),
        }
    );
}

#[test]
fn test_identity_frame_is_stable() {
    let peer = PeerIdentity::parse("ipv4:10.0.0.1:57344", "Cisco").unwrap();

    // The identity frame is computed once per session and reused for every record
    assert_eq!(peer.to_json().unwrap(), peer.to_json().unwrap());
    assert_eq!(
        peer.to_json().unwrap(),
        r#"{"protocol":"ipv4","telemetry_node":"10.0.0.1","telemetry_node_port":"57344","telemetry_node_vendor":"Cisco"}"#
    );
}

#[test]
fn test_malformed_descriptor_is_rejected() {
    let err = PeerIdentity::parse("badformat", "Cisco").unwrap_err();
    assert!(matches!(err, Error::MalformedPeerAddress { .. }));
    assert!(err.to_string().contains("badformat"));
}

#[test]
fn test_bus_endpoint_from_flags() {
    let bus = BusConfig {
        host: "0.0.0.0".to_string(),
        port: 50002,
    };
    assert!(bus.validate().is_ok());
    assert_eq!(bus.endpoint(), "tcp://0.0.0.0:50002");
}
