//! IPv4 header decoder.

use compact_str::CompactString;
use smallvec::SmallVec;

use super::cursor::Cursor;
use crate::checksum::{verify_checksum, ChecksumStatus, IpPair};
use crate::error::{DecodeError, Result};
use crate::format::format_ipv4;

/// Minimum IPv4 header size (IHL = 5).
pub const IPV4_MIN_HEADER_LEN: usize = 20;

/// Bits of the flags / fragment-offset word.
pub mod flags {
    pub const RESERVED: u16 = 0x8000;
    pub const DONT_FRAGMENT: u16 = 0x4000;
    pub const MORE_FRAGMENTS: u16 = 0x2000;
    pub const OFFSET_MASK: u16 = 0x1fff;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header {
    pub version: u8,
    /// Header length in 32-bit words
    pub ihl: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    /// Raw flags / fragment-offset word
    pub flags_fragment: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: ChecksumStatus,
    pub src: [u8; 4],
    pub dst: [u8; 4],
    pub options: SmallVec<[u8; 40]>,
}

impl Ipv4Header {
    /// Decode the header and return it with its payload.
    ///
    /// The payload is bounded by the total length field so link-layer padding
    /// is never passed upward. A total length that claims more than was
    /// captured yields whatever is available.
    pub fn decode(data: &[u8]) -> Result<(Self, &[u8])> {
        let mut cursor = Cursor::new(data, "IPv4");
        cursor.require(IPV4_MIN_HEADER_LEN)?;

        let version_ihl = cursor.read_u8()?;
        let version = version_ihl >> 4;
        let ihl = version_ihl & 0x0f;
        if version != 4 {
            return Err(DecodeError::UnsupportedVariant {
                layer: "IPv4",
                what: "version",
                value: version as u32,
            });
        }
        if ihl < 5 {
            return Err(DecodeError::UnsupportedVariant {
                layer: "IPv4",
                what: "header length",
                value: ihl as u32,
            });
        }
        let header_len = ihl as usize * 4;
        cursor.require(header_len - 1)?;

        let tos = cursor.read_u8()?;
        let total_length = cursor.read_u16()?;
        let identification = cursor.read_u16()?;
        let flags_fragment = cursor.read_u16()?;
        let ttl = cursor.read_u8()?;
        let protocol = cursor.read_u8()?;
        cursor.skip(2)?; // checksum, verified below
        let src = cursor.read_array()?;
        let dst = cursor.read_array()?;
        let options = SmallVec::from_slice(cursor.read_bytes(header_len - IPV4_MIN_HEADER_LEN)?);

        let checksum = verify_checksum(&[], &data[..header_len], 10);

        let end = (total_length as usize).clamp(header_len, data.len());
        let header = Self {
            version,
            ihl,
            dscp: tos >> 2,
            ecn: tos & 0x03,
            total_length,
            identification,
            flags_fragment,
            ttl,
            protocol,
            checksum,
            src,
            dst,
            options,
        };
        Ok((header, &data[header_len..end]))
    }

    pub fn header_len(&self) -> usize {
        self.ihl as usize * 4
    }

    pub fn reserved_flag(&self) -> bool {
        self.flags_fragment & flags::RESERVED != 0
    }

    pub fn dont_fragment(&self) -> bool {
        self.flags_fragment & flags::DONT_FRAGMENT != 0
    }

    pub fn more_fragments(&self) -> bool {
        self.flags_fragment & flags::MORE_FRAGMENTS != 0
    }

    /// Fragment offset in 8-byte units.
    pub fn fragment_offset(&self) -> u16 {
        self.flags_fragment & flags::OFFSET_MASK
    }

    pub fn src_text(&self) -> CompactString {
        format_ipv4(self.src)
    }

    pub fn dst_text(&self) -> CompactString {
        format_ipv4(self.dst)
    }

    /// Addresses for transport checksum verification.
    pub fn ip_pair(&self) -> IpPair {
        IpPair::V4 {
            src: self.src,
            dst: self.dst,
        }
    }

    /// Short flag list, e.g. `"DF"` or `"DF MF"`; empty when no flag is set.
    pub fn flags_text(&self, verbose: bool) -> String {
        let names: [(bool, &str, &str); 3] = [
            (self.reserved_flag(), "RF", "RF (Reserved)"),
            (self.dont_fragment(), "DF", "DF (Don't Fragment)"),
            (self.more_fragments(), "MF", "MF (More Fragments)"),
        ];
        names
            .iter()
            .filter(|(set, _, _)| *set)
            .map(|(_, short, long)| if verbose { *long } else { *short })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
