//! Ethernet II framing.

use core::fmt;

use byteorder::{ByteOrder, NetworkEndian};

use crate::{Buf, PktBuf, PktBufMut};

enum_sim! {
    /// An enum-like type for representing Ethertype in Ethernet frame.
    pub struct EtherType (u16) {
        /// Frame payload is Ipv4 protocol.
        IPV4 = 0x0800,
        /// Frame payload is an 802.1Q VLAN tag.
        VLAN = 0x8100,
        /// Frame payload is Ipv6 protocol.
        IPV6 = 0x86DD,
    }
}

/// A six-octet Ethernet II address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct EtherAddr(pub [u8; 6]);

impl EtherAddr {
    /// Construct an Ethernet address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not six octets long.
    pub fn from_bytes(data: &[u8]) -> EtherAddr {
        let mut bytes = [0; 6];
        bytes.copy_from_slice(data);
        EtherAddr(bytes)
    }

    /// Return an Ethernet address as a sequence of octets, in big-endian.
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EtherAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
        )
    }
}

/// A constant that defines the fixed byte length of the Ether protocol header.
pub const ETHER_HEADER_LEN: usize = 14;
/// A fixed Ether header carrying an IPv6 payload.
pub const ETHER_HEADER_TEMPLATE: [u8; ETHER_HEADER_LEN] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x86, 0xdd,
];

/// A view of an Ethernet II frame.
#[derive(Debug, Clone, Copy)]
pub struct EtherPacket<T> {
    buf: T,
}

impl<T: Buf> EtherPacket<T> {
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

    /// Wrap `buf` if it holds at least a full header.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < ETHER_HEADER_LEN {
            return Err(buf);
        }
        Ok(Self { buf })
    }

    /// Destination MAC address.
    #[inline]
    pub fn dst_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.chunk()[0..6])
    }

    /// Source MAC address.
    #[inline]
    pub fn src_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.chunk()[6..12])
    }

    /// Ethertype of the payload.
    #[inline]
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.chunk()[12..14]))
    }
}

impl<T: PktBuf> EtherPacket<T> {
    /// Consume the view, returning the buffer positioned at the payload.
    #[inline]
    pub fn payload(self) -> T {
        let mut buf = self.buf;
        buf.advance(ETHER_HEADER_LEN);
        buf
    }
}

impl<T: PktBufMut> EtherPacket<T> {
    /// Write `header` into the headroom in front of `buf`.
    ///
    /// # Panics
    /// Panics if the headroom is shorter than the header.
    #[inline]
    pub fn prepend_header(mut buf: T, header: &[u8; ETHER_HEADER_LEN]) -> Self {
        assert!(buf.chunk_headroom() >= ETHER_HEADER_LEN);
        buf.move_back(ETHER_HEADER_LEN);
        buf.chunk_mut()[0..ETHER_HEADER_LEN].copy_from_slice(&header[..]);
        Self { buf }
    }

    /// Set the destination MAC address.
    #[inline]
    pub fn set_dst_addr(&mut self, value: EtherAddr) {
        self.buf.chunk_mut()[0..6].copy_from_slice(value.as_bytes());
    }

    /// Set the source MAC address.
    #[inline]
    pub fn set_src_addr(&mut self, value: EtherAddr) {
        self.buf.chunk_mut()[6..12].copy_from_slice(value.as_bytes());
    }

    /// Set the payload ethertype.
    #[inline]
    pub fn set_ethertype(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[12..14], u16::from(value));
    }
}
