use crate::relay::ConnectPoint;

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while decoding relay chains or building a relay-forward.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The option area could not be walked.
    #[error("malformed dhcpv6 option: {0}")]
    MalformedOption(Malformed),

    /// The message-type byte is not a DHCPv6 message type.
    #[error("unknown dhcpv6 message type {0}")]
    UnknownMessageType(u8),

    /// A message was built from values its wire form cannot carry.
    #[error("invalid dhcpv6 message: {0}")]
    InvalidMessage(&'static str),

    /// A fixed header is cut short.
    #[error("truncated header: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes the header needs.
        needed: usize,
        /// Bytes the buffer holds.
        available: usize,
    },

    /// A relay envelope carries no relay-message option.
    #[error("relay message without a relay-message option")]
    MissingRelayPayload,

    /// Option data does not fit the 16-bit length field.
    #[error("option {code} carries {len} bytes, more than an option can hold")]
    OptionTooLong {
        /// Option code.
        code: u16,
        /// Data length that was attempted.
        len: usize,
    },

    /// A relay-forward would not fit in a UDP datagram.
    #[error("relay-forward of {len} bytes does not fit in a udp datagram")]
    DatagramTooLong {
        /// Encoded relay-forward length.
        len: usize,
    },

    /// The frame is not Ethernet/IPv6/UDP.
    #[error("unsupported frame: {0}")]
    UnsupportedFrame(&'static str),

    /// A fact needed to forward the packet is not available yet.
    #[error("configuration incomplete: {0}")]
    ConfigurationIncomplete(MissingFact),
}

impl Error {
    /// Whether the error stems from missing configuration rather than from
    /// the packet itself.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::ConfigurationIncomplete(_))
    }
}

/// Ways the option area of a message can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    /// An option declares more data than the buffer holds.
    #[error("option at offset {offset} declares {declared} bytes, {remaining} remain")]
    Overrun {
        /// Offset of the option header within the option area.
        offset: usize,
        /// Declared option length.
        declared: usize,
        /// Bytes left behind the option header.
        remaining: usize,
    },

    /// Fewer than four bytes are left for an option header.
    #[error("dangling bytes at offset {offset}")]
    TruncatedHeader {
        /// Offset of the partial header within the option area.
        offset: usize,
    },

    /// Relay-message options nest deeper than the configured limit.
    #[error("relay messages nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
}

/// The forwarding fact that was missing when a relay-forward was built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissingFact {
    /// No IPv6 address or MAC on the client-facing interfaces.
    #[error("no relay agent ipv6 address or mac on client interfaces at {0}")]
    RelayAgentAddress(ConnectPoint),

    /// The server-facing interface lacks an IPv6 address or a MAC.
    #[error("no ipv6 address or mac on server interface {0}")]
    ServerInterface(String),

    /// The next-hop MAC toward the server or gateway is not resolved.
    #[error("next-hop mac for {0} not yet resolved")]
    ConnectMac(String),
}

impl From<Malformed> for Error {
    fn from(value: Malformed) -> Self {
        Error::MalformedOption(value)
    }
}

impl From<MissingFact> for Error {
    fn from(value: MissingFact) -> Self {
        Error::ConfigurationIncomplete(value)
    }
}
