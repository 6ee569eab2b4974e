//! ICMP (IPv4) message decoder.
//!
//! Echo messages keep identifier, sequence and payload. Destination
//! unreachable messages carry the original IPv4 header, decoded with the
//! regular IPv4 decoder, followed by the first 8 bytes of the original
//! transport header.

use smallvec::SmallVec;

use super::cursor::Cursor;
use super::ipv4::Ipv4Header;
use crate::checksum::{verify_checksum, ChecksumStatus};
use crate::error::Result;

pub const ICMP_HEADER_LEN: usize = 8;

/// Bytes of the original transport header quoted in error messages.
pub const QUOTED_TRANSPORT_LEN: usize = 8;

pub mod icmp_type {
    pub const ECHO_REPLY: u8 = 0;
    pub const DESTINATION_UNREACHABLE: u8 = 3;
    pub const ECHO_REQUEST: u8 = 8;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcmpBody {
    Echo {
        identifier: u16,
        sequence: u16,
        payload: Vec<u8>,
    },
    DestinationUnreachable {
        /// Second header word; carries the next-hop MTU for code 4
        rest_of_header: u32,
        original: Box<Ipv4Header>,
        original_transport: SmallVec<[u8; QUOTED_TRANSPORT_LEN]>,
    },
    Other {
        rest_of_header: u32,
        data: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpMessage {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: ChecksumStatus,
    pub body: IcmpBody,
}

impl IcmpMessage {
    /// Decode an ICMP message. The checksum covers all of `data`.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data, "ICMP");
        cursor.require(ICMP_HEADER_LEN)?;

        let icmp_type = cursor.read_u8()?;
        let code = cursor.read_u8()?;
        cursor.skip(2)?;
        let checksum = verify_checksum(&[], data, 2);

        let body = match icmp_type {
            icmp_type::ECHO_REQUEST | icmp_type::ECHO_REPLY => IcmpBody::Echo {
                identifier: cursor.read_u16()?,
                sequence: cursor.read_u16()?,
                payload: cursor.rest().to_vec(),
            },
            icmp_type::DESTINATION_UNREACHABLE => {
                let rest_of_header = cursor.read_u32()?;
                let quoted = cursor.rest();
                let (original, _) = Ipv4Header::decode(quoted)?;
                let after_header = &quoted[original.header_len()..];
                let take = after_header.len().min(QUOTED_TRANSPORT_LEN);
                IcmpBody::DestinationUnreachable {
                    rest_of_header,
                    original: Box::new(original),
                    original_transport: SmallVec::from_slice(&after_header[..take]),
                }
            }
            _ => IcmpBody::Other {
                rest_of_header: cursor.read_u32()?,
                data: cursor.rest().to_vec(),
            },
        };

        Ok(Self {
            icmp_type,
            code,
            checksum,
            body,
        })
    }

    pub fn echo(&self) -> Option<(u16, u16)> {
        match &self.body {
            IcmpBody::Echo {
                identifier,
                sequence,
                ..
            } => Some((*identifier, *sequence)),
            _ => None,
        }
    }

    /// Next-hop MTU of a "fragmentation needed" message.
    pub fn next_hop_mtu(&self) -> Option<u16> {
        match &self.body {
            IcmpBody::DestinationUnreachable { rest_of_header, .. } if self.code == 4 => {
                Some((*rest_of_header & 0xffff) as u16)
            }
            _ => None,
        }
    }

    /// Text for the code, when this type defines code names.
    pub fn code_text(&self, verbose: bool) -> Option<&'static str> {
        match self.icmp_type {
            icmp_type::DESTINATION_UNREACHABLE if verbose => unreachable_code_description(self.code),
            icmp_type::DESTINATION_UNREACHABLE => unreachable_code_name(self.code),
            _ => None,
        }
    }
}

pub fn type_name(icmp_type: u8) -> Option<&'static str> {
    match icmp_type {
        icmp_type::ECHO_REPLY => Some("Echo Reply"),
        icmp_type::DESTINATION_UNREACHABLE => Some("Destination Unreachable"),
        icmp_type::ECHO_REQUEST => Some("Echo Request"),
        _ => None,
    }
}

pub fn unreachable_code_name(code: u8) -> Option<&'static str> {
    const NAMES: [&str; 16] = [
        "bad net",
        "bad host",
        "bad protocol",
        "bad port",
        "IP_DF caused drop",
        "src route failed",
        "unknown net",
        "unknown host",
        "src host isolated",
        "prohibited access",
        "ditto",
        "bad ToS for net",
        "bad ToS for host",
        "admin prohib",
        "host prec vio.",
        "prec cutoff",
    ];
    NAMES.get(code as usize).copied()
}

pub fn unreachable_code_description(code: u8) -> Option<&'static str> {
    const DESCRIPTIONS: [&str; 16] = [
        "Network Unreachable",
        "Host Unreachable",
        "Protocol Unreachable",
        "Port Unreachable",
        "Fragmentation Needed and Don't Fragment was Set",
        "Source Route Failed",
        "Destination Network Unknown",
        "Destination Host Unknown",
        "Source Host Isolated",
        "Communication with Destination Network is Administratively Prohibited",
        "Communication with Destination Host is Administratively Prohibited",
        "Network Unreachable for Type of Service",
        "Host Unreachable for Type of Service",
        "Communication Administratively Prohibited",
        "Host Precedence Violation",
        "Precedence cutoff in effect",
    ];
    DESCRIPTIONS.get(code as usize).copied()
}
