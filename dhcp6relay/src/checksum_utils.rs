//! RFC 1071 checksum helpers for the transport layer.

use std::net::Ipv6Addr;

use byteorder::{ByteOrder, NetworkEndian};

use crate::ipv6::IpProtocol;

/// Compute an RFC 1071 compliant checksum (without the final complement).
pub fn from_slice(mut data: &[u8]) -> u16 {
    let mut accum = 0;

    // For each 32-byte chunk...
    const CHUNK_SIZE: usize = 32;
    while data.len() >= CHUNK_SIZE {
        let mut d = &data[..CHUNK_SIZE];
        // ... take by 2 bytes and sum them.
        while d.len() >= 2 {
            accum += NetworkEndian::read_u16(d) as u32;
            d = &d[2..];
        }

        data = &data[CHUNK_SIZE..];
    }

    while data.len() >= 2 {
        accum += NetworkEndian::read_u16(data) as u32;
        data = &data[2..];
    }

    // Add the last remaining odd byte, if any.
    if let Some(&value) = data.first() {
        accum += (value as u32) << 8;
    }

    propagate_carries(accum)
}

/// Combine several RFC 1071 compliant checksums.
pub fn combine(checksums: &[u16]) -> u16 {
    let mut accum: u32 = 0;
    for &word in checksums {
        accum += word as u32;
    }
    propagate_carries(accum)
}

/// Checksum of the IPv6 pseudo header (RFC 8200, section 8.1).
///
/// `upper_len` is the length of the upper-layer packet, header included.
pub fn ipv6_pseudo_header(
    src_addr: &Ipv6Addr,
    dst_addr: &Ipv6Addr,
    next_header: IpProtocol,
    upper_len: u32,
) -> u16 {
    let mut proto_len = [0u8; 8];
    NetworkEndian::write_u32(&mut proto_len[0..4], upper_len);
    proto_len[7] = next_header.raw();

    combine(&[
        from_slice(&src_addr.octets()),
        from_slice(&dst_addr.octets()),
        from_slice(&proto_len),
    ])
}

fn propagate_carries(word: u32) -> u16 {
    let sum = (word >> 16) + (word & 0xffff);
    ((sum >> 16) as u16) + (sum as u16)
}
