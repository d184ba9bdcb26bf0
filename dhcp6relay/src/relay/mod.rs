//! The relay agent side of DHCPv6: classifying what a client sent and
//! wrapping it into a relay-forward toward a server.
//!
//! [`Traversal`] answers questions about a message without side effects
//! beyond debug traces. [`RelayForwarder`] combines its answers with the
//! topology and server facts supplied by the caller to build the outgoing
//! frame.

mod builder;
pub use builder::{interface_id_option, Notice, RelayForward, RelayForwarder};

mod frame;
pub use frame::ClientFrame;

pub mod guards;

mod topology;
pub use topology::{interface_contains_vlan, relay_agent_ipv6_address};
pub use topology::{ConnectPoint, DeviceId, Interface, InternalPacket, PortNumber, ServerInfo};

mod traversal;
pub use traversal::{Traversal, INVALID_PACKET_LABEL};
