//! The fixed IPv6 header.
//!
//! Extension headers are not walked: the relay only deals with DHCPv6, whose
//! UDP datagrams follow the fixed header directly.

use std::net::Ipv6Addr;

use byteorder::{ByteOrder, NetworkEndian};

use crate::{Buf, PktBuf, PktBufMut};

enum_sim! {
    /// An enum-like type for the IPv6 next header field.
    pub struct IpProtocol (u8) {
        /// Hop-by-hop options extension header.
        HOPOPTS = 0,
        /// Transmission control protocol.
        TCP = 6,
        /// User datagram protocol.
        UDP = 17,
        /// ICMP for IPv6.
        ICMPV6 = 58,
    }
}

/// A constant that defines the fixed byte length of the Ipv6 protocol header.
pub const IPV6_HEADER_LEN: usize = 40;
/// A fixed Ipv6 header: version 6, UDP payload, hop limit 64.
pub const IPV6_HEADER_TEMPLATE: [u8; IPV6_HEADER_LEN] = [
    0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x11, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// A view of an IPv6 packet.
#[derive(Debug, Clone, Copy)]
pub struct Ipv6Packet<T> {
    buf: T,
}

impl<T: Buf> Ipv6Packet<T> {
    /// Wrap `buf` without checking its length.
    #[inline]
    pub fn parse_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// The underlying buffer.
    #[inline]
    pub fn buf(&self) -> &T {
        &self.buf
    }

    /// Release the underlying buffer, positioned at the header.
    #[inline]
    pub fn release(self) -> T {
        self.buf
    }

    /// Wrap `buf` if it holds the fixed header and the declared payload.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < IPV6_HEADER_LEN {
            return Err(buf);
        }
        let container = Self { buf };
        if usize::from(container.payload_len()) + IPV6_HEADER_LEN > container.buf.remaining() {
            return Err(container.buf);
        }
        Ok(container)
    }

    /// IP version, 6 for a well-formed packet.
    #[inline]
    pub fn version(&self) -> u8 {
        self.buf.chunk()[0] >> 4
    }

    /// Traffic class.
    #[inline]
    pub fn traffic_class(&self) -> u8 {
        ((NetworkEndian::read_u16(&self.buf.chunk()[0..2]) >> 4) & 0xff) as u8
    }

    /// 20-bit flow label.
    #[inline]
    pub fn flow_label(&self) -> u32 {
        NetworkEndian::read_u24(&self.buf.chunk()[1..4]) & 0xfffff
    }

    /// Length of everything behind the fixed header.
    #[inline]
    pub fn payload_len(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[4..6])
    }

    /// Next header.
    #[inline]
    pub fn next_header(&self) -> IpProtocol {
        IpProtocol::from(self.buf.chunk()[6])
    }

    /// Hop limit.
    #[inline]
    pub fn hop_limit(&self) -> u8 {
        self.buf.chunk()[7]
    }

    /// Source address.
    #[inline]
    pub fn src_addr(&self) -> Ipv6Addr {
        read_addr(&self.buf.chunk()[8..24])
    }

    /// Destination address.
    #[inline]
    pub fn dst_addr(&self) -> Ipv6Addr {
        read_addr(&self.buf.chunk()[24..40])
    }
}

impl<T: PktBuf> Ipv6Packet<T> {
    /// Consume the view, returning the buffer positioned at the payload and
    /// trimmed to `payload_len`.
    #[inline]
    pub fn payload(self) -> T {
        let packet_len = usize::from(self.payload_len()) + IPV6_HEADER_LEN;
        assert!(packet_len <= self.buf.remaining());
        let trim_size = self.buf.remaining() - packet_len;
        let mut buf = self.buf;
        if trim_size > 0 {
            buf.trim_off(trim_size);
        }
        buf.advance(IPV6_HEADER_LEN);
        buf
    }
}

impl<T: PktBufMut> Ipv6Packet<T> {
    /// Write `header` into the headroom in front of `buf` and set the payload
    /// length to the bytes behind it.
    ///
    /// # Panics
    /// Panics if the headroom is shorter than the header or the payload does
    /// not fit the 16-bit length field.
    #[inline]
    pub fn prepend_header(mut buf: T, header: &[u8; IPV6_HEADER_LEN]) -> Self {
        assert!(buf.chunk_headroom() >= IPV6_HEADER_LEN);
        let payload_len = buf.remaining();
        assert!(payload_len <= 65535);
        buf.move_back(IPV6_HEADER_LEN);
        buf.chunk_mut()[0..IPV6_HEADER_LEN].copy_from_slice(&header[..]);
        let mut container = Self { buf };
        container.set_payload_len(payload_len as u16);
        container
    }

    /// Set the traffic class.
    #[inline]
    pub fn set_traffic_class(&mut self, value: u8) {
        let data = &mut self.buf.chunk_mut()[0..2];
        let write_value = (NetworkEndian::read_u16(data) & 0xf00f) | ((value as u16) << 4);
        NetworkEndian::write_u16(data, write_value);
    }

    /// Set the 20-bit flow label.
    #[inline]
    pub fn set_flow_label(&mut self, value: u32) {
        assert!(value <= 0xfffff);
        let data = &mut self.buf.chunk_mut()[1..4];
        let write_value = (NetworkEndian::read_u24(data) & 0xf00000) | value;
        NetworkEndian::write_u24(data, write_value);
    }

    /// Set the payload length.
    #[inline]
    pub fn set_payload_len(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[4..6], value);
    }

    /// Set the hop limit.
    #[inline]
    pub fn set_hop_limit(&mut self, value: u8) {
        self.buf.chunk_mut()[7] = value;
    }

    /// Set the source address.
    #[inline]
    pub fn set_src_addr(&mut self, value: &Ipv6Addr) {
        self.buf.chunk_mut()[8..24].copy_from_slice(&value.octets());
    }

    /// Set the destination address.
    #[inline]
    pub fn set_dst_addr(&mut self, value: &Ipv6Addr) {
        self.buf.chunk_mut()[24..40].copy_from_slice(&value.octets());
    }
}

#[inline]
pub(crate) fn read_addr(data: &[u8]) -> Ipv6Addr {
    let mut octets = [0; 16];
    octets.copy_from_slice(data);
    Ipv6Addr::from(octets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cursor, CursorMut};

    #[test]
    fn header_fields_round_trip() {
        let mut bytes = [0u8; IPV6_HEADER_LEN + 8];
        let mut buf = CursorMut::new(&mut bytes[..]);
        buf.advance(IPV6_HEADER_LEN);

        let src: Ipv6Addr = "fe80::201:2ff:fe03:405".parse().unwrap();
        let dst: Ipv6Addr = "ff02::1:2".parse().unwrap();

        let mut ippkt = Ipv6Packet::prepend_header(buf, &IPV6_HEADER_TEMPLATE);
        ippkt.set_traffic_class(0xb8);
        ippkt.set_flow_label(0xabcde);
        ippkt.set_hop_limit(1);
        ippkt.set_src_addr(&src);
        ippkt.set_dst_addr(&dst);

        let raw = ippkt.release();
        let ippkt = Ipv6Packet::parse(Cursor::new(raw.chunk())).unwrap();
        assert_eq!(ippkt.version(), 6);
        assert_eq!(ippkt.traffic_class(), 0xb8);
        assert_eq!(ippkt.flow_label(), 0xabcde);
        assert_eq!(ippkt.payload_len(), 8);
        assert_eq!(ippkt.next_header(), IpProtocol::UDP);
        assert_eq!(ippkt.hop_limit(), 1);
        assert_eq!(ippkt.src_addr(), src);
        assert_eq!(ippkt.dst_addr(), dst);
        assert_eq!(ippkt.payload().remaining(), 8);
    }

    #[test]
    fn parse_rejects_short_payload() {
        let mut bytes = [0u8; IPV6_HEADER_LEN];
        bytes.copy_from_slice(&IPV6_HEADER_TEMPLATE);
        bytes[5] = 4;
        assert!(Ipv6Packet::parse(Cursor::new(&bytes[..])).is_err());
    }

    #[test]
    fn payload_drops_link_padding() {
        let mut bytes = [0u8; IPV6_HEADER_LEN + 6];
        bytes[..IPV6_HEADER_LEN].copy_from_slice(&IPV6_HEADER_TEMPLATE);
        bytes[5] = 2;
        let ippkt = Ipv6Packet::parse(Cursor::new(&bytes[..])).unwrap();
        assert_eq!(ippkt.payload().remaining(), 2);
    }
}
