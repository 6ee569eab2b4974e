//! DNS message decoder.
//!
//! A message is a 12-byte header followed by the question, answer, authority
//! and additional sections. Names are sequences of length-prefixed labels
//! ending in a zero label, or ending in a compression pointer: two bytes whose
//! top bits are `11` and whose low 14 bits are an offset from the start of the
//! message.
//!
//! [`read_name`] follows pointers with a visited-offset set and an indirection
//! limit, so a self-referential or cyclic pointer chain fails with
//! [`DecodeError::MalformedName`] instead of looping.

use smallvec::SmallVec;
use tracing::trace;

use super::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::format::printable_text;

pub const DNS_HEADER_LEN: usize = 12;
pub const DNS_PORT: u16 = 53;

/// Pointer hops allowed while decoding one name.
pub const DEFAULT_MAX_NAME_INDIRECTIONS: usize = 16;

const MAX_NAME_LEN: usize = 255;
const POINTER_MASK: u8 = 0xc0;

/// Header flag bits (third and fourth header bytes as one word).
pub mod header_flags {
    pub const QR: u16 = 0x8000;
    pub const OPCODE_MASK: u16 = 0x7800;
    pub const AA: u16 = 0x0400;
    pub const TC: u16 = 0x0200;
    pub const RD: u16 = 0x0100;
    pub const RA: u16 = 0x0080;
    pub const Z_MASK: u16 = 0x0070;
    pub const RCODE_MASK: u16 = 0x000f;
}

pub mod record_type {
    pub const A: u16 = 1;
    pub const NS: u16 = 2;
    pub const CNAME: u16 = 5;
    pub const SOA: u16 = 6;
    pub const PTR: u16 = 12;
    pub const HINFO: u16 = 13;
    pub const MINFO: u16 = 14;
    pub const MX: u16 = 15;
    pub const TXT: u16 = 16;
    pub const AAAA: u16 = 28;
    pub const HTTPS: u16 = 65;
}

pub mod class {
    pub const IN: u16 = 1;
    pub const CH: u16 = 3;
    pub const HS: u16 = 4;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
    /// Printable rendering of `rdata`
    pub rendered_rdata: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,
    pub is_response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub z: u8,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl DnsMessage {
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with_limit(data, DEFAULT_MAX_NAME_INDIRECTIONS)
    }

    /// Decode with a custom pointer-indirection limit per name.
    pub fn decode_with_limit(data: &[u8], max_indirections: usize) -> Result<Self> {
        let mut cursor = Cursor::new(data, "DNS");
        cursor.require(DNS_HEADER_LEN)?;

        let id = cursor.read_u16()?;
        let flags = cursor.read_u16()?;
        let qdcount = cursor.read_u16()?;
        let ancount = cursor.read_u16()?;
        let nscount = cursor.read_u16()?;
        let arcount = cursor.read_u16()?;

        let mut questions = Vec::with_capacity(section_capacity(qdcount));
        for _ in 0..qdcount {
            let name = read_name_at(data, &mut cursor, max_indirections)?;
            let qtype = cursor.read_u16()?;
            let qclass = cursor.read_u16()?;
            trace!(%name, qtype, qclass, "DNS question");
            questions.push(DnsQuestion { name, qtype, qclass });
        }

        let answers = read_records(data, &mut cursor, ancount, max_indirections)?;
        let authorities = read_records(data, &mut cursor, nscount, max_indirections)?;
        let additionals = read_records(data, &mut cursor, arcount, max_indirections)?;

        Ok(Self {
            id,
            is_response: flags & header_flags::QR != 0,
            opcode: ((flags & header_flags::OPCODE_MASK) >> 11) as u8,
            authoritative: flags & header_flags::AA != 0,
            truncated: flags & header_flags::TC != 0,
            recursion_desired: flags & header_flags::RD != 0,
            recursion_available: flags & header_flags::RA != 0,
            z: ((flags & header_flags::Z_MASK) >> 4) as u8,
            rcode: (flags & header_flags::RCODE_MASK) as u8,
            qdcount,
            ancount,
            nscount,
            arcount,
            questions,
            answers,
            authorities,
            additionals,
        })
    }
}

/// Counts come from the wire; do not let them size allocations.
fn section_capacity(count: u16) -> usize {
    (count as usize).min(32)
}

fn read_records(
    message: &[u8],
    cursor: &mut Cursor<'_>,
    count: u16,
    max_indirections: usize,
) -> Result<Vec<ResourceRecord>> {
    let mut records = Vec::with_capacity(section_capacity(count));
    for _ in 0..count {
        let name = read_name_at(message, cursor, max_indirections)?;
        let rtype = cursor.read_u16()?;
        let class = cursor.read_u16()?;
        let ttl = cursor.read_u32()?;
        let rdlength = cursor.read_u16()?;
        let rdata = cursor.read_bytes(rdlength as usize)?.to_vec();
        trace!(%name, rtype, rdlength, "DNS record");
        records.push(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            rendered_rdata: printable_text(&rdata),
            rdata,
        });
    }
    Ok(records)
}

/// Read a name at the cursor and move the cursor past it.
fn read_name_at(message: &[u8], cursor: &mut Cursor<'_>, max_indirections: usize) -> Result<String> {
    let start = cursor.position();
    let (name, next) = read_name(message, start, max_indirections)?;
    cursor.skip(next - start)?;
    Ok(name)
}

/// Decode the name starting at `offset` in `message`.
///
/// Returns the dotted name (`"."` for the root) and the offset just past the
/// name in the original byte stream. When the name ends in a pointer that is
/// the pointer's offset plus 2, however long the name it points to.
///
/// # Example
///
/// ```
/// use netdissect_core::protocol::dns::read_name;
///
/// let wire = b"\x03www\x07example\x03com\x00";
/// let (name, next) = read_name(wire, 0, 16).unwrap();
/// assert_eq!(name, "www.example.com");
/// assert_eq!(next, wire.len());
/// ```
pub fn read_name(message: &[u8], offset: usize, max_indirections: usize) -> Result<(String, usize)> {
    let mut name = String::new();
    let mut pos = offset;
    let mut resume_at = None;
    let mut visited: SmallVec<[usize; 16]> = SmallVec::new();

    loop {
        let len = *message
            .get(pos)
            .ok_or_else(|| DecodeError::truncated("DNS", pos + 1, message.len()))?;

        match len & POINTER_MASK {
            POINTER_MASK => {
                let low = *message
                    .get(pos + 1)
                    .ok_or_else(|| DecodeError::truncated("DNS", pos + 2, message.len()))?;
                let target = (((len & !POINTER_MASK) as usize) << 8) | low as usize;

                if target >= message.len() {
                    return Err(DecodeError::MalformedName {
                        offset: pos,
                        reason: "pointer out of range",
                    });
                }
                if visited.contains(&target) {
                    return Err(DecodeError::MalformedName {
                        offset: pos,
                        reason: "pointer loop",
                    });
                }
                if visited.len() >= max_indirections {
                    return Err(DecodeError::MalformedName {
                        offset: pos,
                        reason: "too many indirections",
                    });
                }

                visited.push(target);
                resume_at.get_or_insert(pos + 2);
                pos = target;
            }
            0 if len == 0 => {
                pos += 1;
                break;
            }
            0 => {
                let label = message.get(pos + 1..pos + 1 + len as usize).ok_or_else(|| {
                    DecodeError::truncated("DNS", pos + 1 + len as usize, message.len())
                })?;
                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&printable_text(label));
                if name.len() > MAX_NAME_LEN {
                    return Err(DecodeError::MalformedName {
                        offset,
                        reason: "name too long",
                    });
                }
                pos += 1 + len as usize;
            }
            _ => {
                return Err(DecodeError::MalformedName {
                    offset: pos,
                    reason: "reserved label type",
                });
            }
        }
    }

    if name.is_empty() {
        name.push('.');
    }
    Ok((name, resume_at.unwrap_or(pos)))
}

pub fn type_name(rtype: u16) -> Option<&'static str> {
    match rtype {
        record_type::A => Some("A"),
        record_type::NS => Some("NS"),
        record_type::CNAME => Some("CNAME"),
        record_type::SOA => Some("SOA"),
        record_type::PTR => Some("PTR"),
        record_type::HINFO => Some("HINFO"),
        record_type::MINFO => Some("MINFO"),
        record_type::MX => Some("MX"),
        record_type::TXT => Some("TXT"),
        record_type::AAAA => Some("AAAA"),
        record_type::HTTPS => Some("HTTPS"),
        _ => None,
    }
}

pub fn type_description(rtype: u16) -> Option<&'static str> {
    match rtype {
        record_type::A => Some("host address"),
        record_type::NS => Some("authoritative name server"),
        record_type::CNAME => Some("canonical name"),
        record_type::SOA => Some("zone of authority"),
        record_type::PTR => Some("domain name pointer"),
        record_type::HINFO => Some("host information"),
        record_type::MINFO => Some("mailbox or mail list information"),
        record_type::MX => Some("mail exchange"),
        record_type::TXT => Some("text strings"),
        record_type::AAAA => Some("IPv6 host address"),
        record_type::HTTPS => Some("Specific Service Endpoints"),
        _ => None,
    }
}

pub fn class_name(qclass: u16) -> Option<&'static str> {
    match qclass {
        class::IN => Some("IN"),
        class::CH => Some("CH"),
        class::HS => Some("HS"),
        _ => None,
    }
}

pub fn class_description(qclass: u16) -> Option<&'static str> {
    match qclass {
        class::IN => Some("the Internet"),
        class::CH => Some("the CHAOS class"),
        class::HS => Some("Hesiod"),
        _ => None,
    }
}

pub fn opcode_name(opcode: u8) -> Option<&'static str> {
    match opcode {
        0 => Some("QUERY"),
        1 => Some("IQUERY"),
        2 => Some("STATUS"),
        _ => None,
    }
}

pub fn opcode_description(opcode: u8) -> Option<&'static str> {
    match opcode {
        0 => Some("Standard query"),
        1 => Some("Inverse query"),
        2 => Some("Server status request"),
        _ => None,
    }
}

/// Terse result marker used on one-line renderings.
pub fn rcode_name(rcode: u8) -> &'static str {
    match rcode {
        0 => "0 !",
        1 => "format !",
        2 => "server !",
        3 => "name !",
        4 => "!impl",
        5 => "X",
        _ => "?",
    }
}

pub fn rcode_description(rcode: u8) -> Option<&'static str> {
    match rcode {
        0 => Some("No error"),
        1 => Some("Format error"),
        2 => Some("Server failure"),
        3 => Some("Name error"),
        4 => Some("Not implemented"),
        5 => Some("Refused"),
        _ => None,
    }
}
