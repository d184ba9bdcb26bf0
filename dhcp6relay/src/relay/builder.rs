use core::fmt;
use std::net::Ipv6Addr;

use bytes::{BufMut, BytesMut};

use crate::config::RelayConfig;
use crate::dhcpv6::{Dhcpv6Message, Dhcpv6Option, RelayEnvelope, SERVER_PORT};
use crate::ether::{EtherAddr, EtherPacket, EtherType, ETHER_HEADER_LEN, ETHER_HEADER_TEMPLATE};
use crate::error::{Error, MissingFact, Result};
use crate::ipv6::{Ipv6Packet, IPV6_HEADER_LEN, IPV6_HEADER_TEMPLATE};
use crate::udp::{UdpPacket, UDP_HEADER_LEN, UDP_HEADER_TEMPLATE};
use crate::vlan::{VlanId, VlanPacket, VLAN_HEADER_LEN, VLAN_HEADER_TEMPLATE};
use crate::{Buf, CursorMut};

use super::frame::ClientFrame;
use super::guards::{
    check_server_connect_point, has_connect_mac, has_server_ip, has_static_relay_agent_ip,
};
use super::topology::{relay_agent_ipv6_address, ConnectPoint, Interface, InternalPacket, ServerInfo};
use super::traversal::Traversal;

/// Something worth reporting about a relay-forward that was still built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The client is behind another relay but no server address is
    /// configured, so the destination was left as the client addressed it.
    ServerIpDefaulted,
    /// No relay agent address is configured for the receiving device; the
    /// first client interface address was used as link address.
    DynamicRelayAgentAddress(Ipv6Addr),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ServerIpDefaulted => {
                f.write_str("indirect client but no dhcp6 server ip configured, using default server")
            }
            Notice::DynamicRelayAgentAddress(addr) => write!(
                f,
                "indirect client but no relay agent ip configured, using dynamic {}",
                addr
            ),
        }
    }
}

/// A relay-forward built from a client frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayForward {
    /// The frame to send toward the server.
    pub packet: InternalPacket,
    /// The relay-forward carried by the frame.
    pub envelope: RelayEnvelope,
    /// Whether the client was found to be on the relay's own link.
    pub direct: bool,
    /// Non-fatal conditions met while building.
    pub notices: Vec<Notice>,
}

/// Wraps client messages into relay-forwards toward a DHCPv6 server.
#[derive(Debug, Clone, Default)]
pub struct RelayForwarder {
    config: RelayConfig,
    traversal: Traversal,
}

impl RelayForwarder {
    /// A forwarder using `config`.
    pub fn new(config: RelayConfig) -> Self {
        let traversal = Traversal::from_config(&config);
        Self { config, traversal }
    }

    /// The configuration in use.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// The traversal used to classify client messages.
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    /// Build the relay-forward frame for `client_frame`, received on
    /// `received_from`.
    ///
    /// `client_interfaces` are the relay's interfaces on the client side;
    /// the first IPv6 address among them is the relay agent address.
    /// `server_interface` is the interface the frame leaves on.
    pub fn try_build_forward(
        &self,
        received_from: &ConnectPoint,
        client_frame: &[u8],
        client_interfaces: &[Interface],
        server_info: &ServerInfo,
        server_interface: &Interface,
    ) -> Result<RelayForward> {
        let has_mac = client_interfaces
            .first()
            .map_or(false, |iface| iface.mac.is_some());
        let relay_agent_ip = match relay_agent_ipv6_address(client_interfaces) {
            Some(addr) if has_mac => addr,
            _ => {
                let cp = client_interfaces
                    .first()
                    .map_or_else(|| received_from.clone(), |iface| iface.connect_point.clone());
                return Err(MissingFact::RelayAgentAddress(cp).into());
            }
        };

        let client = ClientFrame::parse(client_frame)?;
        let client_msg = Dhcpv6Message::decode(client.payload.clone())?;
        let direct = self.traversal.is_directly_connected(&client_msg);

        let (server_facing_ip, server_facing_mac) =
            match (server_interface.first_ipv6(), server_interface.mac) {
                (Some(ip), Some(mac)) => (ip, mac),
                _ => return Err(MissingFact::ServerInterface(server_interface.name.clone()).into()),
            };

        // The connect values of the server, or gateway, win over what the
        // client addressed.
        let dst_mac = server_info.connect_mac.unwrap_or(client.dst_mac);
        let vlan = server_info.connect_vlan.unwrap_or(client.vlan);
        let dst_ip = server_info.server_ip6.unwrap_or(client.dst_ip);

        let mut notices = Vec::new();
        let link_address = if direct {
            relay_agent_ip
        } else {
            if !has_server_ip(server_info) {
                notices.push(Notice::ServerIpDefaulted);
            } else if !has_connect_mac(server_info) {
                return Err(MissingFact::ConnectMac(server_info.next_hop_description()).into());
            }

            let device = &received_from.device_id;
            match server_info.relay_agent_ip6(device) {
                Some(addr) if has_static_relay_agent_ip(server_info, device) => addr,
                _ => {
                    notices.push(Notice::DynamicRelayAgentAddress(relay_agent_ip));
                    relay_agent_ip
                }
            }
        };

        let hop_count = if direct {
            0
        } else {
            client_msg.hop_count().unwrap_or(0).saturating_add(1)
        };

        let options = vec![
            Dhcpv6Option::relay_message(client.payload.clone())?,
            interface_id_option(client.src_mac, received_from, client.vlan)?,
        ];
        let envelope = RelayEnvelope::forward(hop_count, link_address, client.src_ip, options);

        let frame = FrameSpec {
            src_mac: server_facing_mac,
            dst_mac,
            vlan,
            vlan_priority: client.vlan_priority,
            traffic_class: client.traffic_class,
            flow_label: client.flow_label,
            hop_limit: self.config.hop_limit,
            src_ip: server_facing_ip,
            dst_ip,
            dst_port: client.dst_port,
        }
        .assemble(&envelope)?;

        Ok(RelayForward {
            packet: InternalPacket {
                frame,
                dest_location: server_info.server_connect_point.clone(),
            },
            envelope,
            direct,
            notices,
        })
    }

    /// Like [`RelayForwarder::try_build_forward`], logging why nothing was
    /// built instead of returning it.
    pub fn build_forward(
        &self,
        received_from: &ConnectPoint,
        client_frame: &[u8],
        client_interfaces: &[Interface],
        server_info: &ServerInfo,
        server_interface: &Interface,
    ) -> Option<InternalPacket> {
        match self.try_build_forward(
            received_from,
            client_frame,
            client_interfaces,
            server_info,
            server_interface,
        ) {
            Ok(forward) => {
                for notice in &forward.notices {
                    log::warn!("{}", notice);
                }
                // Still handed back, the caller may know where to send it.
                check_server_connect_point(forward.direct, server_info);
                log::debug!(
                    "relay-forward from {} hop-count={} link-addr={} ({})",
                    received_from,
                    forward.envelope.hop_count,
                    forward.envelope.link_address,
                    if forward.direct { "direct" } else { "indirect" }
                );
                Some(forward.packet)
            }
            Err(e) if e.is_configuration() => {
                log::warn!("dropping dhcp6 packet from {}: {}", received_from, e);
                None
            }
            Err(e) => {
                log::debug!("dropping dhcp6 packet from {}: {}", received_from, e);
                None
            }
        }
    }
}

/// The interface-id option the relay attaches to a relay-forward: the
/// client MAC, then `-{in_port}:`, then the VLAN id low byte first.
///
/// An untagged client is recorded with VLAN `0xffff`.
pub fn interface_id_option(
    client_mac: EtherAddr,
    in_port: impl fmt::Display,
    vlan: VlanId,
) -> Result<Dhcpv6Option> {
    let port = format!("-{}:", in_port);
    let mut data = BytesMut::with_capacity(6 + port.len() + 2);
    data.put_slice(client_mac.as_bytes());
    data.put_slice(port.as_bytes());
    data.put_u16_le(vlan.raw());
    Dhcpv6Option::interface_id(data.freeze())
}

// Header fields of the outgoing frame.
struct FrameSpec {
    src_mac: EtherAddr,
    dst_mac: EtherAddr,
    vlan: VlanId,
    vlan_priority: u8,
    traffic_class: u8,
    flow_label: u32,
    hop_limit: u8,
    src_ip: Ipv6Addr,
    dst_ip: Ipv6Addr,
    dst_port: u16,
}

impl FrameSpec {
    fn assemble(&self, envelope: &RelayEnvelope) -> Result<Vec<u8>> {
        let payload_len = envelope.buffer_len();
        if UDP_HEADER_LEN + payload_len > usize::from(u16::MAX) {
            return Err(Error::DatagramTooLong {
                len: payload_len,
            });
        }

        let vlan_len = if self.vlan.is_tagged() {
            VLAN_HEADER_LEN
        } else {
            0
        };
        let headroom = ETHER_HEADER_LEN + vlan_len + IPV6_HEADER_LEN + UDP_HEADER_LEN;
        let mut frame = vec![0u8; headroom + payload_len];
        envelope.encode(&mut &mut frame[headroom..]);

        let mut buf = CursorMut::new(&mut frame[..]);
        buf.advance(headroom);

        let mut udppkt = UdpPacket::prepend_header(buf, &UDP_HEADER_TEMPLATE);
        udppkt.set_src_port(SERVER_PORT);
        udppkt.set_dst_port(self.dst_port);
        udppkt.adjust_ipv6_checksum(&self.src_ip, &self.dst_ip);

        let mut ippkt = Ipv6Packet::prepend_header(udppkt.release(), &IPV6_HEADER_TEMPLATE);
        ippkt.set_traffic_class(self.traffic_class);
        ippkt.set_flow_label(self.flow_label);
        ippkt.set_hop_limit(self.hop_limit);
        ippkt.set_src_addr(&self.src_ip);
        ippkt.set_dst_addr(&self.dst_ip);

        let mut buf = ippkt.release();
        if self.vlan.is_tagged() {
            let mut vlanpkt = VlanPacket::prepend_header(buf, &VLAN_HEADER_TEMPLATE);
            vlanpkt.set_priority(self.vlan_priority);
            vlanpkt.set_vlan_id(self.vlan.raw());
            buf = vlanpkt.release();
        }

        let mut ethpkt = EtherPacket::prepend_header(buf, &ETHER_HEADER_TEMPLATE);
        ethpkt.set_dst_addr(self.dst_mac);
        ethpkt.set_src_addr(self.src_mac);
        if self.vlan.is_tagged() {
            ethpkt.set_ethertype(EtherType::VLAN);
        }

        Ok(frame)
    }
}
