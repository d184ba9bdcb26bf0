//! IEEE 802.1Q VLAN tags.
//!
//! A tag sits between the Ethernet header and the payload and carries a
//! 3-bit priority code point, a drop-eligible flag, a 12-bit VLAN id and the
//! ethertype of what follows:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | PCP |D|        VLAN id        |           ethertype           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use core::fmt;

use byteorder::{ByteOrder, NetworkEndian};

use crate::ether::EtherType;
use crate::{Buf, PktBuf, PktBufMut};

/// A VLAN id as carried by topology and server configuration.
///
/// [`VlanId::NONE`] stands for an untagged frame. It lies outside the 12-bit
/// range so it can never collide with a real tag.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct VlanId(u16);

impl VlanId {
    /// Untagged.
    pub const NONE: VlanId = VlanId(0xffff);

    /// Largest id that fits in a tag.
    pub const MAX: u16 = 0xfff;

    /// A tagged VLAN id, `None` if `id` does not fit in 12 bits.
    pub fn new(id: u16) -> Option<Self> {
        (id <= Self::MAX).then_some(VlanId(id))
    }

    /// The raw value, `0xffff` for [`VlanId::NONE`].
    #[inline]
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Whether this is a real tag rather than [`VlanId::NONE`].
    #[inline]
    pub fn is_tagged(&self) -> bool {
        *self != Self::NONE
    }
}

impl Default for VlanId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tagged() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("None")
        }
    }
}

/// A constant that defines the fixed byte length of the VLAN tag.
pub const VLAN_HEADER_LEN: usize = 4;
/// A fixed VLAN tag: priority 0, VLAN 1, IPv6 payload.
pub const VLAN_HEADER_TEMPLATE: [u8; VLAN_HEADER_LEN] = [0x00, 0x01, 0x86, 0xdd];

/// A view of an 802.1Q tag and the payload behind it.
#[derive(Debug, Clone, Copy)]
pub struct VlanPacket<T> {
    buf: T,
}

impl<T: Buf> VlanPacket<T> {
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

    /// Release the underlying buffer, positioned at the tag.
    #[inline]
    pub fn release(self) -> T {
        self.buf
    }

    /// Wrap `buf` if it holds at least a full tag.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < VLAN_HEADER_LEN {
            return Err(buf);
        }
        Ok(Self { buf })
    }

    /// Priority code point.
    #[inline]
    pub fn priority(&self) -> u8 {
        self.buf.chunk()[0] >> 5
    }

    /// Drop eligible indicator.
    #[inline]
    pub fn dei_flag(&self) -> bool {
        self.buf.chunk()[0] & 0x10 != 0
    }

    /// The 12-bit VLAN id.
    #[inline]
    pub fn vlan_id(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[0..2]) & 0xfff
    }

    /// Ethertype of the payload.
    #[inline]
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.chunk()[2..4]))
    }
}

impl<T: PktBuf> VlanPacket<T> {
    /// Consume the view, returning the buffer positioned at the payload.
    #[inline]
    pub fn payload(self) -> T {
        let mut buf = self.buf;
        buf.advance(VLAN_HEADER_LEN);
        buf
    }
}

impl<T: PktBufMut> VlanPacket<T> {
    /// Write `header` into the headroom in front of `buf`.
    ///
    /// # Panics
    /// Panics if the headroom is shorter than the tag.
    #[inline]
    pub fn prepend_header(mut buf: T, header: &[u8; VLAN_HEADER_LEN]) -> Self {
        assert!(buf.chunk_headroom() >= VLAN_HEADER_LEN);
        buf.move_back(VLAN_HEADER_LEN);
        buf.chunk_mut()[0..VLAN_HEADER_LEN].copy_from_slice(&header[..]);
        Self { buf }
    }

    /// Set the priority code point.
    #[inline]
    pub fn set_priority(&mut self, value: u8) {
        assert!(value <= 0x7);
        self.buf.chunk_mut()[0] = (self.buf.chunk_mut()[0] & 0x1f) | (value << 5);
    }

    /// Set the drop eligible indicator.
    #[inline]
    pub fn set_dei_flag(&mut self, value: bool) {
        let value = if value { 1 } else { 0 };
        self.buf.chunk_mut()[0] = (self.buf.chunk_mut()[0] & 0xef) | (value << 4);
    }

    /// Set the 12-bit VLAN id, keeping priority and DEI.
    #[inline]
    pub fn set_vlan_id(&mut self, value: u16) {
        assert!(value <= VlanId::MAX);
        let data = &mut self.buf.chunk_mut()[0..2];
        let write_value = (NetworkEndian::read_u16(data) & 0xf000) | value;
        NetworkEndian::write_u16(data, write_value);
    }

    /// Set the payload ethertype.
    #[inline]
    pub fn set_ethertype(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[2..4], u16::from(value));
    }
}
