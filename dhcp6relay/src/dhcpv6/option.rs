use bytes::{BufMut, Bytes};
use byteorder::{ByteOrder, NetworkEndian};

use crate::error::{Error, Malformed, Result};

use super::option_code;

/// Length of the code and length fields in front of every option.
pub const OPTION_HEADER_LEN: usize = 4;

// 0                   1                   2                   3
// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |          option-code          |           option-len          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                          option-data                          |
// |                      (option-len octets)                      |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
/// A single DHCPv6 option.
///
/// The data is shared with the buffer it was decoded from, so decoding a
/// relay chain does not copy the nested messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dhcpv6Option {
    code: u16,
    data: Bytes,
}

impl Dhcpv6Option {
    /// Build an option, failing if `data` does not fit the length field.
    pub fn new(code: u16, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.len() > usize::from(u16::MAX) {
            return Err(Error::OptionTooLong {
                code,
                len: data.len(),
            });
        }
        Ok(Self { code, data })
    }

    /// An OPTION_RELAY_MSG carrying an encoded message.
    pub fn relay_message(message: impl Into<Bytes>) -> Result<Self> {
        Self::new(option_code::RELAY_MSG, message)
    }

    /// An OPTION_INTERFACE_ID carrying relay-chosen bytes.
    pub fn interface_id(data: impl Into<Bytes>) -> Result<Self> {
        Self::new(option_code::INTERFACE_ID, data)
    }

    /// The option code.
    #[inline]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The option data.
    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Length of the option data, as written into the length field.
    #[inline]
    pub fn data_len(&self) -> u16 {
        // Bounded by the check in `new`.
        self.data.len() as u16
    }

    /// Encoded length including the option header.
    #[inline]
    pub fn buffer_len(&self) -> usize {
        OPTION_HEADER_LEN + self.data.len()
    }
}

/// Decode an option area into its options, in wire order.
pub fn decode_options(buf: Bytes) -> Result<Vec<Dhcpv6Option>> {
    let mut options = Vec::new();
    let mut offset = 0;

    while offset < buf.len() {
        let rest = &buf[offset..];
        if rest.len() < OPTION_HEADER_LEN {
            return Err(Malformed::TruncatedHeader { offset }.into());
        }

        let code = NetworkEndian::read_u16(&rest[0..2]);
        let declared = usize::from(NetworkEndian::read_u16(&rest[2..4]));
        let remaining = rest.len() - OPTION_HEADER_LEN;
        if declared > remaining {
            return Err(Malformed::Overrun {
                offset,
                declared,
                remaining,
            }
            .into());
        }

        let start = offset + OPTION_HEADER_LEN;
        options.push(Dhcpv6Option {
            code,
            data: buf.slice(start..start + declared),
        });
        offset = start + declared;
    }

    Ok(options)
}

/// Total encoded length of `options`.
pub fn options_len(options: &[Dhcpv6Option]) -> usize {
    options.iter().map(Dhcpv6Option::buffer_len).sum()
}

/// Append `options` to `buf` in list order.
pub fn encode_options<B: BufMut>(options: &[Dhcpv6Option], buf: &mut B) {
    for option in options {
        buf.put_u16(option.code);
        buf.put_u16(option.data_len());
        buf.put_slice(&option.data);
    }
}

/// The first option with the given code.
pub fn find_option(options: &[Dhcpv6Option], code: u16) -> Option<&Dhcpv6Option> {
    options.iter().find(|opt| opt.code == code)
}
