use crate::config::RelayConfig;
use crate::dhcpv6::{
    find_option, message_type_label, option_code, Dhcpv6Message, LeafMessage, MessageType,
    RelayEnvelope,
};
use crate::error::{Error, Malformed, Result};

/// Label reported when a relay chain holds no decodable leaf message.
pub const INVALID_PACKET_LABEL: &str = "INVALID_PACKET";

/// Walks relay chains down to the client/server message they carry.
///
/// Every walk is bounded by `max_depth` unwraps, so a crafted chain of
/// nested relay messages costs at most that many decodes.
///
/// The `try_` methods report why a walk failed. Their plain counterparts map
/// failures to `None` or to a conservative answer and leave a debug trace,
/// which is what a packet pipeline that drops bad input wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    max_depth: usize,
}

impl Traversal {
    /// A traversal allowing at most `max_depth` unwraps.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// A traversal bounded by `config.max_relay_depth`.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.max_relay_depth)
    }

    /// The unwrap bound.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decode the message held by the first relay-message option of `relay`.
    pub fn try_unwrap_once(&self, relay: &RelayEnvelope) -> Result<Dhcpv6Message> {
        let option =
            find_option(&relay.options, option_code::RELAY_MSG).ok_or(Error::MissingRelayPayload)?;
        Dhcpv6Message::decode(option.data().clone())
    }

    /// See [`Traversal::try_unwrap_once`].
    pub fn unwrap_once(&self, relay: &RelayEnvelope) -> Option<Dhcpv6Message> {
        self.try_unwrap_once(relay)
            .map_err(|e| log::debug!("cannot unwrap {} message: {}", relay.msg_type(), e))
            .ok()
    }

    /// The innermost client/server message of `msg`.
    pub fn try_find_leaf(&self, msg: &Dhcpv6Message) -> Result<LeafMessage> {
        let mut relay = match msg {
            Dhcpv6Message::Leaf(leaf) => return Ok(leaf.clone()),
            Dhcpv6Message::Relay(relay) => relay.clone(),
        };

        for _ in 0..self.max_depth {
            match self.try_unwrap_once(&relay)? {
                Dhcpv6Message::Leaf(leaf) => return Ok(leaf),
                Dhcpv6Message::Relay(inner) => relay = inner,
            }
        }

        Err(Malformed::NestingTooDeep {
            limit: self.max_depth,
        }
        .into())
    }

    /// See [`Traversal::try_find_leaf`].
    pub fn find_leaf(&self, msg: &Dhcpv6Message) -> Option<LeafMessage> {
        self.try_find_leaf(msg)
            .map_err(|e| log::debug!("no leaf message in {} message: {}", msg.msg_type(), e))
            .ok()
    }

    /// Whether the sender of `msg` sits on the relay's own link.
    ///
    /// Only one level is looked at. A relay-forward is direct when it holds
    /// a client message, while a relay-reply is direct unless it holds
    /// another relay-reply. A relay message that cannot be unwrapped counts
    /// as direct.
    pub fn is_directly_connected(&self, msg: &Dhcpv6Message) -> bool {
        let relay = match msg {
            Dhcpv6Message::Leaf(_) => return true,
            Dhcpv6Message::Relay(relay) => relay,
        };

        let inner = match self.unwrap_once(relay) {
            Some(inner) => inner,
            None => return true,
        };

        let direct = if relay.msg_type() == MessageType::RELAY_FORW {
            !inner.is_relay()
        } else {
            inner.msg_type() != MessageType::RELAY_REPL
        };
        log::debug!(
            "{} holding {}: {}",
            relay.msg_type(),
            inner.msg_type(),
            if direct { "direct" } else { "indirect" }
        );
        direct
    }

    /// The counter label for `msg`: its own type when `direct`, otherwise
    /// the type of its leaf message, or [`INVALID_PACKET_LABEL`] if there is
    /// none.
    pub fn leaf_message_type_label(&self, direct: bool, msg: &Dhcpv6Message) -> &'static str {
        if direct {
            return message_type_label(msg.msg_type());
        }
        match self.find_leaf(msg) {
            Some(leaf) => message_type_label(leaf.msg_type()),
            None => INVALID_PACKET_LABEL,
        }
    }

    /// Whether `msg` is, or carries, a RELEASE.
    pub fn is_release(&self, msg: &Dhcpv6Message) -> bool {
        self.leaf_type_is(msg, MessageType::RELEASE)
    }

    /// Whether `msg` is, or carries, a REPLY.
    pub fn is_reply(&self, msg: &Dhcpv6Message) -> bool {
        self.leaf_type_is(msg, MessageType::REPLY)
    }

    fn leaf_type_is(&self, msg: &Dhcpv6Message, msg_type: MessageType) -> bool {
        match msg {
            Dhcpv6Message::Leaf(leaf) => leaf.msg_type() == msg_type,
            Dhcpv6Message::Relay(_) => self
                .find_leaf(msg)
                .map_or(false, |leaf| leaf.msg_type() == msg_type),
        }
    }
}

impl Default for Traversal {
    fn default() -> Self {
        Self::from_config(&RelayConfig::default())
    }
}
