//! Checks on [`ServerInfo`] made before a packet is forwarded.

use super::topology::{DeviceId, ServerInfo};

/// Whether a server address is configured.
#[inline]
pub fn has_server_ip(info: &ServerInfo) -> bool {
    info.server_ip6.is_some()
}

/// Whether the next-hop MAC toward the server or gateway is resolved.
#[inline]
pub fn has_connect_mac(info: &ServerInfo) -> bool {
    info.connect_mac.is_some()
}

/// Whether a relay agent address is statically configured for `device`.
#[inline]
pub fn has_static_relay_agent_ip(info: &ServerInfo, device: &DeviceId) -> bool {
    info.relay_agent_ips.contains_key(device)
}

/// Whether the server connect point is configured.
#[inline]
pub fn has_server_connect_point(info: &ServerInfo) -> bool {
    info.server_connect_point.is_some()
}

/// Like [`has_server_connect_point`], logging a warning when it is missing.
pub fn check_server_connect_point(direct: bool, info: &ServerInfo) -> bool {
    if has_server_connect_point(info) {
        return true;
    }
    log::warn!(
        "dhcp6 server connect point missing for {} client",
        if direct { "direct" } else { "indirect" }
    );
    false
}
