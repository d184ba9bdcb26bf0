//! DHCPv6 messages as seen by a relay agent (RFC 8415).
//!
//! A relay only needs to understand two shapes of message. Client/server
//! messages carry a type, a transaction id and options:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    msg-type   |               transaction-id                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! .                            options                            .
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Relay-forward and relay-reply messages carry a hop count, a link address,
//! a peer address and options, one of which (OPTION_RELAY_MSG) holds the
//! relayed message:
//!
//! ```text
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    msg-type   |   hop-count   |                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
//! |                         link-address                          |
//! |                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                               |                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
//! |                         peer-address                          |
//! |                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                               |                               .
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               .
//! .                            options                            .
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

mod message;
pub use message::{Dhcpv6Message, LeafMessage, RelayEnvelope};
pub use message::{LEAF_HEADER_LEN, MAX_TRANSACTION_ID, RELAY_HEADER_LEN};

mod option;
pub use option::{decode_options, encode_options, find_option, options_len, Dhcpv6Option};
pub use option::OPTION_HEADER_LEN;

/// UDP port DHCPv6 servers and relay agents listen on.
pub const SERVER_PORT: u16 = 547;
/// UDP port DHCPv6 clients listen on.
pub const CLIENT_PORT: u16 = 546;

enum_sim! {
    /// The message types of a DHCPv6 packet.
    pub struct MessageType (u8) {
        /// Client looking for servers.
        SOLICIT = 1,
        /// Server offering service.
        ADVERTISE = 2,
        /// Client requesting addresses from a chosen server.
        REQUEST = 3,
        /// Client checking its addresses are still on-link.
        CONFIRM = 4,
        /// Client extending leases with the original server.
        RENEW = 5,
        /// Client extending leases with any server.
        REBIND = 6,
        /// Server answer.
        REPLY = 7,
        /// Client giving addresses back.
        RELEASE = 8,
        /// Client reporting duplicate addresses.
        DECLINE = 9,
        /// Server asking the client to renew or rebind.
        RECONFIGURE = 10,
        /// Client asking for configuration without addresses.
        INFORMATION_REQUEST = 11,
        /// Relay agent forwarding toward servers.
        RELAY_FORW = 12,
        /// Server reply to be relayed back toward the client.
        RELAY_REPL = 13,
    }
}

impl MessageType {
    /// Whether the type is RELAY_FORW or RELAY_REPL.
    #[inline]
    pub fn is_relay(&self) -> bool {
        *self == Self::RELAY_FORW || *self == Self::RELAY_REPL
    }
}

/// Label used by counters for a message type, `"UNKNOWN"` for unlisted values.
pub fn message_type_label(msg_type: MessageType) -> &'static str {
    msg_type.name().unwrap_or("UNKNOWN")
}

/// Option codes.
pub mod option_code {
    /// Client identifier (DUID).
    pub const CLIENTID: u16 = 1;
    /// Server identifier (DUID).
    pub const SERVERID: u16 = 2;
    /// Identity association for non-temporary addresses.
    pub const IA_NA: u16 = 3;
    /// Option request option.
    pub const ORO: u16 = 6;
    /// Elapsed time.
    pub const ELAPSED_TIME: u16 = 8;
    /// The relayed DHCPv6 message.
    pub const RELAY_MSG: u16 = 9;
    /// Opaque value chosen by the relay agent, echoed by the server.
    pub const INTERFACE_ID: u16 = 18;
}
