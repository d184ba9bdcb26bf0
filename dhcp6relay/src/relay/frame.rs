use std::net::Ipv6Addr;

use bytes::Bytes;

use crate::ether::{EtherAddr, EtherPacket, EtherType, ETHER_HEADER_LEN};
use crate::error::{Error, Result};
use crate::ipv6::{IpProtocol, Ipv6Packet, IPV6_HEADER_LEN};
use crate::udp::{UdpPacket, UDP_HEADER_LEN};
use crate::vlan::{VlanId, VlanPacket, VLAN_HEADER_LEN};
use crate::{Buf, Cursor};

/// The fields of a client frame that a relay-forward is built from.
///
/// The frame is Ethernet, an optional single 802.1Q tag, IPv6 without
/// extension headers, and UDP. The DHCPv6 message is copied out as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFrame {
    /// Ethernet destination.
    pub dst_mac: EtherAddr,
    /// Ethernet source, the client or the downstream relay agent.
    pub src_mac: EtherAddr,
    /// VLAN tag, [`VlanId::NONE`] for an untagged frame.
    pub vlan: VlanId,
    /// Priority code point of the tag, 0 when untagged.
    pub vlan_priority: u8,
    /// IPv6 traffic class.
    pub traffic_class: u8,
    /// IPv6 flow label.
    pub flow_label: u32,
    /// IPv6 source.
    pub src_ip: Ipv6Addr,
    /// IPv6 destination.
    pub dst_ip: Ipv6Addr,
    /// UDP source port.
    pub src_port: u16,
    /// UDP destination port.
    pub dst_port: u16,
    /// The DHCPv6 message.
    pub payload: Bytes,
}

impl ClientFrame {
    /// Parse `frame` down to its DHCPv6 payload.
    pub fn parse(frame: &[u8]) -> Result<Self> {
        let ethpkt = EtherPacket::parse(Cursor::new(frame))
            .map_err(|buf| truncated(ETHER_HEADER_LEN, buf.remaining()))?;
        let dst_mac = ethpkt.dst_addr();
        let src_mac = ethpkt.src_addr();

        let (vlan, vlan_priority, ethertype, buf) = if ethpkt.ethertype() == EtherType::VLAN {
            let vlanpkt = VlanPacket::parse(ethpkt.payload())
                .map_err(|buf| truncated(VLAN_HEADER_LEN, buf.remaining()))?;
            (
                VlanId::new(vlanpkt.vlan_id()).unwrap_or(VlanId::NONE),
                vlanpkt.priority(),
                vlanpkt.ethertype(),
                vlanpkt.payload(),
            )
        } else {
            (VlanId::NONE, 0, ethpkt.ethertype(), ethpkt.payload())
        };

        if ethertype != EtherType::IPV6 {
            return Err(Error::UnsupportedFrame("not an ipv6 frame"));
        }

        let ippkt = Ipv6Packet::parse(buf).map_err(|buf| {
            if buf.remaining() < IPV6_HEADER_LEN {
                truncated(IPV6_HEADER_LEN, buf.remaining())
            } else {
                let available = buf.remaining();
                let payload_len = usize::from(Ipv6Packet::parse_unchecked(buf).payload_len());
                truncated(IPV6_HEADER_LEN + payload_len, available)
            }
        })?;
        if ippkt.next_header() != IpProtocol::UDP {
            return Err(Error::UnsupportedFrame("not a udp datagram"));
        }
        let traffic_class = ippkt.traffic_class();
        let flow_label = ippkt.flow_label();
        let src_ip = ippkt.src_addr();
        let dst_ip = ippkt.dst_addr();

        let udppkt = UdpPacket::parse(ippkt.payload()).map_err(|buf| {
            let available = buf.remaining();
            if available < UDP_HEADER_LEN {
                return truncated(UDP_HEADER_LEN, available);
            }
            let packet_len = usize::from(UdpPacket::parse_unchecked(buf).packet_len());
            if packet_len < UDP_HEADER_LEN {
                Error::UnsupportedFrame("udp length shorter than its header")
            } else {
                truncated(packet_len, available)
            }
        })?;
        let src_port = udppkt.src_port();
        let dst_port = udppkt.dst_port();
        let payload = Bytes::copy_from_slice(udppkt.payload().chunk());

        Ok(Self {
            dst_mac,
            src_mac,
            vlan,
            vlan_priority,
            traffic_class,
            flow_label,
            src_ip,
            dst_ip,
            src_port,
            dst_port,
            payload,
        })
    }
}

fn truncated(needed: usize, available: usize) -> Error {
    Error::Truncated { needed, available }
}
