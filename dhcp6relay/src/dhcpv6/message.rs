use core::fmt;
use std::net::Ipv6Addr;

use bytes::{BufMut, Bytes, BytesMut};
use byteorder::{ByteOrder, NetworkEndian};

use crate::error::{Error, Result};
use crate::ipv6::read_addr;

use super::option::{decode_options, encode_options, options_len, Dhcpv6Option};
use super::MessageType;

/// Fixed header of a client/server message: type and 24-bit transaction id.
pub const LEAF_HEADER_LEN: usize = 4;
/// Fixed header of a relay message: type, hop count, link and peer address.
pub const RELAY_HEADER_LEN: usize = 34;

/// Largest transaction id, the field is 24 bits wide.
pub const MAX_TRANSACTION_ID: u32 = 0xff_ffff;

/// A client/server message, the innermost message of a relay chain.
///
/// Built through [`LeafMessage::new`] or by decoding, so the type is always a
/// known non-relay type and the transaction id fits in 24 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafMessage {
    msg_type: MessageType,
    transaction_id: u32,
    options: Vec<Dhcpv6Option>,
}

impl LeafMessage {
    /// A client/server message.
    ///
    /// Fails for a relay or unknown `msg_type` and for a `transaction_id`
    /// above [`MAX_TRANSACTION_ID`].
    pub fn new(
        msg_type: MessageType,
        transaction_id: u32,
        options: Vec<Dhcpv6Option>,
    ) -> Result<Self> {
        if msg_type.is_relay() {
            return Err(Error::InvalidMessage("relay type in a client/server message"));
        }
        if !msg_type.is_known() {
            return Err(Error::UnknownMessageType(msg_type.raw()));
        }
        if transaction_id > MAX_TRANSACTION_ID {
            return Err(Error::InvalidMessage("transaction id wider than 24 bits"));
        }
        Ok(Self {
            msg_type,
            transaction_id,
            options,
        })
    }

    fn decode(msg_type: MessageType, buf: Bytes) -> Result<Self> {
        check_len(&buf, LEAF_HEADER_LEN)?;
        Ok(Self {
            msg_type,
            transaction_id: NetworkEndian::read_u24(&buf[1..4]),
            options: decode_options(buf.slice(LEAF_HEADER_LEN..))?,
        })
    }

    /// The message type, never RELAY_FORW or RELAY_REPL.
    #[inline]
    pub fn msg_type(&self) -> MessageType {
        self.msg_type
    }

    /// The 24-bit transaction id.
    #[inline]
    pub fn transaction_id(&self) -> u32 {
        self.transaction_id
    }

    /// Options in wire order.
    #[inline]
    pub fn options(&self) -> &[Dhcpv6Option] {
        &self.options
    }

    /// Append the wire form to `buf`.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.msg_type.raw());
        let mut xid = [0; 3];
        NetworkEndian::write_u24(&mut xid, self.transaction_id);
        buf.put_slice(&xid);
        encode_options(&self.options, buf);
    }

    /// Length of the wire form.
    pub fn buffer_len(&self) -> usize {
        LEAF_HEADER_LEN + options_len(&self.options)
    }
}

/// A RELAY_FORW or RELAY_REPL message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEnvelope {
    msg_type: MessageType,
    /// Number of relay agents that already relayed this message.
    pub hop_count: u8,
    /// Address the server uses to pick the client's link.
    pub link_address: Ipv6Addr,
    /// Address of the client or relay agent the message was received from.
    pub peer_address: Ipv6Addr,
    /// Options in wire order, usually including a relay-message option.
    pub options: Vec<Dhcpv6Option>,
}

impl RelayEnvelope {
    /// A relay message of type `msg_type`, which must be RELAY_FORW or
    /// RELAY_REPL.
    pub fn new(
        msg_type: MessageType,
        hop_count: u8,
        link_address: Ipv6Addr,
        peer_address: Ipv6Addr,
        options: Vec<Dhcpv6Option>,
    ) -> Result<Self> {
        if !msg_type.is_relay() {
            return Err(Error::InvalidMessage("client/server type in a relay message"));
        }
        Ok(Self {
            msg_type,
            hop_count,
            link_address,
            peer_address,
            options,
        })
    }

    /// A relay-forward with the given addressing and options.
    pub fn forward(
        hop_count: u8,
        link_address: Ipv6Addr,
        peer_address: Ipv6Addr,
        options: Vec<Dhcpv6Option>,
    ) -> Self {
        Self {
            msg_type: MessageType::RELAY_FORW,
            hop_count,
            link_address,
            peer_address,
            options,
        }
    }

    fn decode(msg_type: MessageType, buf: Bytes) -> Result<Self> {
        check_len(&buf, RELAY_HEADER_LEN)?;
        Ok(Self {
            msg_type,
            hop_count: buf[1],
            link_address: read_addr(&buf[2..18]),
            peer_address: read_addr(&buf[18..34]),
            options: decode_options(buf.slice(RELAY_HEADER_LEN..))?,
        })
    }

    /// RELAY_FORW or RELAY_REPL.
    #[inline]
    pub fn msg_type(&self) -> MessageType {
        self.msg_type
    }

    /// Append the wire form to `buf`.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.msg_type.raw());
        buf.put_u8(self.hop_count);
        buf.put_slice(&self.link_address.octets());
        buf.put_slice(&self.peer_address.octets());
        encode_options(&self.options, buf);
    }

    /// Length of the wire form.
    pub fn buffer_len(&self) -> usize {
        RELAY_HEADER_LEN + options_len(&self.options)
    }
}

/// A decoded DHCPv6 message: either a leaf or one level of relay envelope.
///
/// The relayed message inside an envelope stays encoded in its
/// relay-message option until the traversal engine asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dhcpv6Message {
    /// Client/server message.
    Leaf(LeafMessage),
    /// Relay-forward or relay-reply.
    Relay(RelayEnvelope),
}

impl Dhcpv6Message {
    /// Decode a message, choosing the layout from the message-type byte.
    pub fn decode(buf: Bytes) -> Result<Self> {
        check_len(&buf, 1)?;
        let msg_type = MessageType::from(buf[0]);
        if msg_type.is_relay() {
            Ok(Dhcpv6Message::Relay(RelayEnvelope::decode(msg_type, buf)?))
        } else if msg_type.is_known() {
            Ok(Dhcpv6Message::Leaf(LeafMessage::decode(msg_type, buf)?))
        } else {
            Err(Error::UnknownMessageType(msg_type.raw()))
        }
    }

    /// Decode a message from a borrowed slice.
    pub fn decode_from_slice(buf: &[u8]) -> Result<Self> {
        Self::decode(Bytes::copy_from_slice(buf))
    }

    /// Append the wire form of the message to `buf`.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        match self {
            Dhcpv6Message::Leaf(leaf) => leaf.encode(buf),
            Dhcpv6Message::Relay(relay) => relay.encode(buf),
        }
    }

    /// The wire form of the message.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.buffer_len());
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Length of the wire form.
    pub fn buffer_len(&self) -> usize {
        match self {
            Dhcpv6Message::Leaf(leaf) => leaf.buffer_len(),
            Dhcpv6Message::Relay(relay) => relay.buffer_len(),
        }
    }

    /// The message type.
    pub fn msg_type(&self) -> MessageType {
        match self {
            Dhcpv6Message::Leaf(leaf) => leaf.msg_type,
            Dhcpv6Message::Relay(relay) => relay.msg_type,
        }
    }

    /// The top-level options.
    pub fn options(&self) -> &[Dhcpv6Option] {
        match self {
            Dhcpv6Message::Leaf(leaf) => &leaf.options,
            Dhcpv6Message::Relay(relay) => &relay.options,
        }
    }

    /// The hop count of a relay envelope, `None` for a leaf.
    pub fn hop_count(&self) -> Option<u8> {
        match self {
            Dhcpv6Message::Leaf(_) => None,
            Dhcpv6Message::Relay(relay) => Some(relay.hop_count),
        }
    }

    /// Whether the message is a relay envelope.
    pub fn is_relay(&self) -> bool {
        matches!(self, Dhcpv6Message::Relay(_))
    }
}

impl From<LeafMessage> for Dhcpv6Message {
    fn from(value: LeafMessage) -> Self {
        Dhcpv6Message::Leaf(value)
    }
}

impl From<RelayEnvelope> for Dhcpv6Message {
    fn from(value: RelayEnvelope) -> Self {
        Dhcpv6Message::Relay(value)
    }
}

impl fmt::Display for Dhcpv6Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dhcpv6Message::Leaf(leaf) => write!(
                f,
                "DHCPv6 msg-type={} trans-id={:#08x} options={}",
                leaf.msg_type,
                leaf.transaction_id,
                leaf.options.len()
            ),
            Dhcpv6Message::Relay(relay) => write!(
                f,
                "DHCPv6 msg-type={} hop-count={} link-addr={} peer-addr={} options={}",
                relay.msg_type,
                relay.hop_count,
                relay.link_address,
                relay.peer_address,
                relay.options.len()
            ),
        }
    }
}

fn check_len(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        Err(Error::Truncated {
            needed,
            available: buf.len(),
        })
    } else {
        Ok(())
    }
}
