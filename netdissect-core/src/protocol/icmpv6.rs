//! ICMPv6 message decoder.
//!
//! The checksum is computed over the IPv6 pseudo-header (next header 58) so
//! the decoder takes both 16-byte addresses from the caller.

use smallvec::SmallVec;

use super::cursor::Cursor;
use super::icmp::QUOTED_TRANSPORT_LEN;
use super::ipv6::{Ipv6Header, IPV6_HEADER_LEN};
use crate::checksum::{build_transport_pseudo_header, verify_checksum, ChecksumStatus, IpPair};
use crate::error::Result;
use crate::format::describe::ip_proto;

pub const ICMPV6_HEADER_LEN: usize = 8;

pub mod icmpv6_type {
    pub const DESTINATION_UNREACHABLE: u8 = 1;
    pub const ECHO_REQUEST: u8 = 128;
    pub const ECHO_REPLY: u8 = 129;
    pub const NEIGHBOR_SOLICITATION: u8 = 135;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icmpv6Body {
    Echo {
        identifier: u16,
        sequence: u16,
        payload: Vec<u8>,
    },
    DestinationUnreachable {
        original: Box<Ipv6Header>,
        original_transport: SmallVec<[u8; QUOTED_TRANSPORT_LEN]>,
    },
    NeighborSolicitation {
        target: [u8; 16],
        /// Raw neighbor discovery options following the target
        options: Vec<u8>,
    },
    Other {
        rest_of_header: u32,
        data: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icmpv6Message {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: ChecksumStatus,
    pub body: Icmpv6Body,
}

impl Icmpv6Message {
    pub fn decode(data: &[u8], src: &[u8; 16], dst: &[u8; 16]) -> Result<Self> {
        let mut cursor = Cursor::new(data, "ICMPv6");
        cursor.require(ICMPV6_HEADER_LEN)?;

        let icmp_type = cursor.read_u8()?;
        let code = cursor.read_u8()?;
        cursor.skip(2)?;

        let addrs = IpPair::V6 {
            src: *src,
            dst: *dst,
        };
        let pseudo = build_transport_pseudo_header(&addrs, ip_proto::ICMPV6, data.len() as u32);
        let checksum = verify_checksum(&pseudo, data, 2);

        let body = match icmp_type {
            icmpv6_type::ECHO_REQUEST | icmpv6_type::ECHO_REPLY => Icmpv6Body::Echo {
                identifier: cursor.read_u16()?,
                sequence: cursor.read_u16()?,
                payload: cursor.rest().to_vec(),
            },
            icmpv6_type::DESTINATION_UNREACHABLE => {
                cursor.skip(4)?;
                let quoted = cursor.rest();
                let (original, _) = Ipv6Header::decode(quoted)?;
                let after_header = &quoted[IPV6_HEADER_LEN..];
                let take = after_header.len().min(QUOTED_TRANSPORT_LEN);
                Icmpv6Body::DestinationUnreachable {
                    original: Box::new(original),
                    original_transport: SmallVec::from_slice(&after_header[..take]),
                }
            }
            icmpv6_type::NEIGHBOR_SOLICITATION => {
                cursor.skip(4)?; // reserved
                Icmpv6Body::NeighborSolicitation {
                    target: cursor.read_array()?,
                    options: cursor.rest().to_vec(),
                }
            }
            _ => Icmpv6Body::Other {
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
            Icmpv6Body::Echo {
                identifier,
                sequence,
                ..
            } => Some((*identifier, *sequence)),
            _ => None,
        }
    }

    /// Target address of a neighbor solicitation.
    pub fn target(&self) -> Option<&[u8; 16]> {
        match &self.body {
            Icmpv6Body::NeighborSolicitation { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn code_text(&self, verbose: bool) -> Option<&'static str> {
        match self.icmp_type {
            icmpv6_type::DESTINATION_UNREACHABLE if verbose => unreachable_code_description(self.code),
            icmpv6_type::DESTINATION_UNREACHABLE => unreachable_code_name(self.code),
            _ => None,
        }
    }
}

pub fn type_name(icmp_type: u8) -> Option<&'static str> {
    match icmp_type {
        icmpv6_type::DESTINATION_UNREACHABLE => Some("dest unreachable"),
        icmpv6_type::ECHO_REQUEST => Some("Echo Request"),
        icmpv6_type::ECHO_REPLY => Some("Echo Reply"),
        icmpv6_type::NEIGHBOR_SOLICITATION => Some("Neighbor Solicitation"),
        _ => None,
    }
}

pub fn type_description(icmp_type: u8) -> Option<&'static str> {
    match icmp_type {
        icmpv6_type::DESTINATION_UNREACHABLE => Some("Destination Unreachable"),
        other => type_name(other),
    }
}

pub fn unreachable_code_name(code: u8) -> Option<&'static str> {
    match code {
        0 => Some("no route to dest"),
        1 => Some("admin prohibited"),
        2 => Some("beyond scope of src addr"),
        3 => Some("addr unreachable"),
        4 => Some("port unreachable"),
        _ => None,
    }
}

pub fn unreachable_code_description(code: u8) -> Option<&'static str> {
    match code {
        0 => Some("No Route to Destination"),
        1 => Some("Communication with Destination Administratively Prohibited"),
        2 => Some("Beyond Scope of Source Address"),
        3 => Some("Address Unreachable"),
        4 => Some("Port Unreachable"),
        _ => None,
    }
}
