#![allow(dead_code)]

use std::fs;
use std::net::Ipv6Addr;

use dhcp6relay::ether::EtherAddr;
use dhcp6relay::relay::{ConnectPoint, DeviceId, Interface, PortNumber, ServerInfo};
use dhcp6relay::vlan::VlanId;

/// Load a frame stored as one line of hex digits under `tests/packet_examples`.
pub fn file_to_packet(fname: &str) -> Vec<u8> {
    // The test is executed under the crate root directory.
    let mut path = std::env::current_dir().unwrap();
    path.push("tests");
    path.push("packet_examples");
    path.push(fname);

    let content = fs::read_to_string(path).unwrap();
    let content = content.trim();
    assert!(content.len() % 2 == 0, "odd number of hex digits in {}", fname);

    (0..content.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&content[i..i + 2], 16).unwrap())
        .collect()
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const CLIENT_MAC: EtherAddr = EtherAddr([0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
pub const RELAY_AGENT_MAC: EtherAddr = EtherAddr([0x00, 0x00, 0x5e, 0x00, 0x53, 0x01]);
pub const CLIENT_IFACE_MAC: EtherAddr = EtherAddr([0x00, 0x00, 0x00, 0x00, 0xaa, 0x01]);
pub const SERVER_IFACE_MAC: EtherAddr = EtherAddr([0x00, 0x00, 0x00, 0x00, 0xbb, 0x01]);
pub const SERVER_MAC: EtherAddr = EtherAddr([0x00, 0x00, 0x00, 0x00, 0xcc, 0x01]);

pub fn addr(s: &str) -> Ipv6Addr {
    s.parse().unwrap()
}

pub fn device() -> DeviceId {
    DeviceId::new("of:0000000000000001")
}

pub fn client_port() -> ConnectPoint {
    ConnectPoint::new(device(), PortNumber(1))
}

pub fn server_port() -> ConnectPoint {
    ConnectPoint::new(device(), PortNumber(2))
}

/// Client-side interface with an IPv4 address ahead of its IPv6 one.
pub fn client_interface() -> Interface {
    let mut iface = Interface::new("client", client_port());
    iface.ip_addresses = vec!["10.0.1.254".parse().unwrap(), "2001:db8:1::254".parse().unwrap()];
    iface.mac = Some(CLIENT_IFACE_MAC);
    iface.vlan_untagged = VlanId::new(100).unwrap();
    iface
}

pub fn server_interface() -> Interface {
    let mut iface = Interface::new("server", server_port());
    iface.ip_addresses = vec!["2001:db8::254".parse().unwrap()];
    iface.mac = Some(SERVER_IFACE_MAC);
    iface.vlan_untagged = VlanId::new(200).unwrap();
    iface
}

/// A resolved server on the untagged server-facing link.
pub fn server_info() -> ServerInfo {
    ServerInfo {
        server_ip6: Some(addr("2001:db8::547")),
        connect_mac: Some(SERVER_MAC),
        connect_vlan: Some(VlanId::NONE),
        server_connect_point: Some(server_port()),
        ..Default::default()
    }
}
