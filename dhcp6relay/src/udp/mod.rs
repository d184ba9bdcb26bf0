//! UDP datagrams and their IPv6 checksum.

use std::net::Ipv6Addr;

use byteorder::{ByteOrder, NetworkEndian};

use crate::checksum_utils;
use crate::ipv6::IpProtocol;
use crate::{Buf, PktBuf, PktBufMut};

/// A constant that defines the fixed byte length of the Udp protocol header.
pub const UDP_HEADER_LEN: usize = 8;
/// A fixed Udp header.
pub const UDP_HEADER_TEMPLATE: [u8; UDP_HEADER_LEN] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00];

/// A view of a UDP datagram.
#[derive(Debug, Clone, Copy)]
pub struct UdpPacket<T> {
    buf: T,
}

impl<T: Buf> UdpPacket<T> {
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

    /// Wrap `buf` if the header is present and the length field is consistent
    /// with the buffer.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < UDP_HEADER_LEN {
            return Err(buf);
        }
        let container = Self { buf };
        if (container.packet_len() as usize) < UDP_HEADER_LEN
            || (container.packet_len() as usize) > container.buf.remaining()
        {
            return Err(container.buf);
        }
        Ok(container)
    }

    /// Source port.
    #[inline]
    pub fn src_port(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[0..2])
    }

    /// Destination port.
    #[inline]
    pub fn dst_port(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[2..4])
    }

    /// Length of header and payload.
    #[inline]
    pub fn packet_len(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[4..6])
    }

    /// Checksum field.
    #[inline]
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[6..8])
    }

    /// Checksum over the IPv6 pseudo header and the whole datagram, without
    /// the final complement.
    fn calc_ipv6_checksum(&self, src_addr: &Ipv6Addr, dst_addr: &Ipv6Addr) -> u16 {
        let packet_len = self.packet_len();
        checksum_utils::combine(&[
            checksum_utils::ipv6_pseudo_header(
                src_addr,
                dst_addr,
                IpProtocol::UDP,
                u32::from(packet_len),
            ),
            checksum_utils::from_slice(&self.buf.chunk()[..usize::from(packet_len)]),
        ])
    }

    /// Validate the checksum. A zero checksum is invalid over IPv6.
    #[inline]
    pub fn verify_ipv6_checksum(&self, src_addr: &Ipv6Addr, dst_addr: &Ipv6Addr) -> bool {
        self.checksum() != 0 && self.calc_ipv6_checksum(src_addr, dst_addr) == !0
    }
}

impl<T: PktBuf> UdpPacket<T> {
    /// Consume the view, returning the buffer positioned at the payload and
    /// trimmed to `packet_len`.
    #[inline]
    pub fn payload(self) -> T {
        assert!((self.packet_len() as usize) <= self.buf.remaining());
        let trim_size = self.buf.remaining() - self.packet_len() as usize;
        let mut buf = self.buf;
        if trim_size > 0 {
            buf.trim_off(trim_size);
        }
        buf.advance(UDP_HEADER_LEN);
        buf
    }
}

impl<T: PktBufMut> UdpPacket<T> {
    /// Write `header` into the headroom in front of `buf` and set the length
    /// field to cover the bytes behind it.
    ///
    /// # Panics
    /// Panics if the headroom is shorter than the header or the datagram does
    /// not fit the 16-bit length field.
    #[inline]
    pub fn prepend_header(mut buf: T, header: &[u8; UDP_HEADER_LEN]) -> Self {
        assert!(buf.chunk_headroom() >= UDP_HEADER_LEN);
        buf.move_back(UDP_HEADER_LEN);
        let packet_len = buf.remaining();
        assert!(packet_len <= 65535);
        buf.chunk_mut()[0..UDP_HEADER_LEN].copy_from_slice(&header[..]);
        let mut container = Self { buf };
        container.set_packet_len(packet_len as u16);
        container
    }

    /// Set the source port.
    #[inline]
    pub fn set_src_port(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[0..2], value);
    }

    /// Set the destination port.
    #[inline]
    pub fn set_dst_port(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[2..4], value);
    }

    /// Set the length field.
    #[inline]
    pub fn set_packet_len(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[4..6], value);
    }

    /// Set the checksum field.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[6..8], value);
    }

    /// Recompute the checksum for the given IPv6 endpoints.
    #[inline]
    pub fn adjust_ipv6_checksum(&mut self, src_addr: &Ipv6Addr, dst_addr: &Ipv6Addr) {
        self.set_checksum(0);
        let cksum = !self.calc_ipv6_checksum(src_addr, dst_addr);
        // Zero means "no checksum", which IPv6 forbids; all-ones is the same
        // value in one's complement arithmetic.
        self.set_checksum(if cksum == 0 { 0xffff } else { cksum });
    }
}
