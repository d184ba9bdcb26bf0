#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! DHCPv6 relay-chain traversal and relay-forward construction.
//!
//! The crate takes a raw client frame (Ethernet, optional 802.1Q tag, IPv6,
//! UDP, DHCPv6), works out whether the client sits directly on the relay's
//! link or behind other relay agents, and builds the RELAY-FORW frame that
//! carries the client message on toward a DHCPv6 server.
//!
//! Packet layers are exposed as thin typed views over byte cursors, the same
//! way for parsing and for building: a frame is assembled back to front by
//! prepending headers into the headroom of a [`CursorMut`].

#[macro_use]
mod macros;

mod traits;
pub use traits::{Buf, PktBuf, PktBufMut};

mod cursors;
pub use cursors::{Cursor, CursorMut};

pub mod checksum_utils;

pub mod ether;
pub mod ipv6;
pub mod udp;
pub mod vlan;

pub mod dhcpv6;
pub mod relay;

mod config;
pub use config::{ConfigError, RelayConfig};

mod error;
pub use error::{Error, Malformed, MissingFact, Result};
