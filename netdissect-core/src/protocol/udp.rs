//! UDP header decoder.

use super::cursor::Cursor;
use crate::checksum::{build_transport_pseudo_header, verify_checksum, ChecksumStatus, IpPair};
use crate::error::Result;
use crate::format::describe::ip_proto;

pub const UDP_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    /// Length field (header plus payload)
    pub length: u16,
    pub checksum: ChecksumStatus,
}

impl UdpHeader {
    /// Decode a UDP datagram and return the header with its payload.
    ///
    /// When the length field is consistent with the captured bytes the payload
    /// and checksum coverage stop at it; otherwise everything captured is used.
    pub fn decode<'a>(data: &'a [u8], addrs: &IpPair) -> Result<(Self, &'a [u8])> {
        let mut cursor = Cursor::new(data, "UDP");
        cursor.require(UDP_HEADER_LEN)?;

        let src_port = cursor.read_u16()?;
        let dst_port = cursor.read_u16()?;
        let length = cursor.read_u16()?;

        let datagram = match length as usize {
            len if (UDP_HEADER_LEN..=data.len()).contains(&len) => &data[..len],
            _ => data,
        };

        let pseudo = build_transport_pseudo_header(addrs, ip_proto::UDP, length as u32);
        let checksum = verify_checksum(&pseudo, datagram, 6);

        let header = Self {
            src_port,
            dst_port,
            length,
            checksum,
        };
        Ok((header, &datagram[UDP_HEADER_LEN..]))
    }

    /// A zero checksum means the sender did not compute one.
    pub fn checksum_present(&self) -> bool {
        self.checksum.wire != 0
    }

    /// Lenient verdict; an absent checksum counts as valid.
    pub fn is_checksum_valid(&self) -> bool {
        !self.checksum_present() || self.checksum.is_valid()
    }

    pub fn is_checksum_valid_strict(&self) -> bool {
        !self.checksum_present() || self.checksum.is_valid_strict()
    }

    pub fn payload_len(&self) -> usize {
        (self.length as usize).saturating_sub(UDP_HEADER_LEN)
    }
}
