use core::fmt;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv6Addr};

use crate::ether::EtherAddr;
use crate::vlan::VlanId;

/// Identifier of a switch in the topology, e.g. `of:0000000000000001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a device identifier.
    pub fn new(id: impl Into<String>) -> Self {
        DeviceId(id.into())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port number on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortNumber(pub u64);

impl fmt::Display for PortNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A port on a device, displayed as `device/port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectPoint {
    /// The device.
    pub device_id: DeviceId,
    /// The port on that device.
    pub port: PortNumber,
}

impl ConnectPoint {
    /// A connect point on `device_id` at `port`.
    pub fn new(device_id: DeviceId, port: PortNumber) -> Self {
        Self { device_id, port }
    }
}

impl fmt::Display for ConnectPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.device_id, self.port)
    }
}

/// A layer-3 interface configured on a connect point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Operator-assigned name.
    pub name: String,
    /// Where the interface lives.
    pub connect_point: ConnectPoint,
    /// Configured addresses, IPv4 and IPv6 mixed, in configuration order.
    pub ip_addresses: Vec<IpAddr>,
    /// Interface MAC, if configured.
    pub mac: Option<EtherAddr>,
    /// VLAN for untagged traffic, [`VlanId::NONE`] if unset.
    pub vlan_untagged: VlanId,
    /// Native VLAN, [`VlanId::NONE`] if unset.
    pub vlan_native: VlanId,
    /// VLANs accepted tagged.
    pub vlan_tagged: Vec<VlanId>,
}

impl Interface {
    /// An interface without addresses, MAC or VLANs.
    pub fn new(name: impl Into<String>, connect_point: ConnectPoint) -> Self {
        Self {
            name: name.into(),
            connect_point,
            ip_addresses: Vec::new(),
            mac: None,
            vlan_untagged: VlanId::NONE,
            vlan_native: VlanId::NONE,
            vlan_tagged: Vec::new(),
        }
    }

    /// The first IPv6 address of the interface.
    pub fn first_ipv6(&self) -> Option<Ipv6Addr> {
        self.ip_addresses.iter().find_map(|addr| match addr {
            IpAddr::V6(addr) => Some(*addr),
            IpAddr::V4(_) => None,
        })
    }
}

/// The relay agent address: the first IPv6 address across `interfaces`, in
/// order.
pub fn relay_agent_ipv6_address(interfaces: &[Interface]) -> Option<Ipv6Addr> {
    interfaces.iter().find_map(Interface::first_ipv6)
}

/// Whether `iface` carries traffic on `vlan`.
///
/// An untagged packet matches an interface with an untagged or native VLAN; a
/// tagged one must be in the tagged set.
pub fn interface_contains_vlan(iface: &Interface, vlan: VlanId) -> bool {
    if !vlan.is_tagged() {
        return iface.vlan_untagged.is_tagged() || iface.vlan_native.is_tagged();
    }
    iface.vlan_tagged.contains(&vlan)
}

/// What the relay knows about a DHCPv6 server, or the gateway in front of it.
///
/// Every fact is optional; the relay checks for the ones it needs before
/// forwarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server address.
    pub server_ip6: Option<Ipv6Addr>,
    /// Gateway toward an indirectly reachable server.
    pub gateway_ip6: Option<Ipv6Addr>,
    /// Resolved MAC of the server or gateway.
    pub connect_mac: Option<EtherAddr>,
    /// VLAN toward the server or gateway.
    pub connect_vlan: Option<VlanId>,
    /// Where the server or gateway is attached.
    pub server_connect_point: Option<ConnectPoint>,
    /// Statically configured relay agent addresses, by device.
    pub relay_agent_ips: HashMap<DeviceId, Ipv6Addr>,
}

impl ServerInfo {
    /// The statically configured relay agent address for `device`.
    pub fn relay_agent_ip6(&self, device: &DeviceId) -> Option<Ipv6Addr> {
        self.relay_agent_ips.get(device).copied()
    }

    /// The address the next hop was resolved for: the gateway if configured,
    /// otherwise the server. Used in diagnostics.
    pub fn next_hop_description(&self) -> String {
        match (self.gateway_ip6, self.server_ip6) {
            (Some(gw), _) => format!("gateway IP {}", gw),
            (None, Some(server)) => format!("server IP {}", server),
            (None, None) => "server IP (unset)".to_string(),
        }
    }
}

/// A frame ready to be sent, with the port it should leave on when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalPacket {
    /// The complete Ethernet frame.
    pub frame: Vec<u8>,
    /// Egress connect point.
    pub dest_location: Option<ConnectPoint>,
}
