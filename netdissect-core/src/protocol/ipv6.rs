//! IPv6 fixed header decoder.
//!
//! Version, traffic class and flow label share the first 32-bit word and are
//! extracted by mask and shift; the traffic class straddles a byte boundary.
//! Extension headers are not walked: the next-header value is handed to the
//! transport dispatch as is.

use compact_str::CompactString;

use super::cursor::Cursor;
use crate::checksum::IpPair;
use crate::error::{DecodeError, Result};
use crate::format::format_ipv6;

pub const IPV6_HEADER_LEN: usize = 40;

const VERSION_SHIFT: u32 = 28;
const TRAFFIC_CLASS_SHIFT: u32 = 20;
const DSCP_MASK: u32 = 0x0fc0_0000;
const DSCP_SHIFT: u32 = 22;
const ECN_MASK: u32 = 0x0030_0000;
const ECN_SHIFT: u32 = 20;
const FLOW_LABEL_MASK: u32 = 0x000f_ffff;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Header {
    pub version: u8,
    pub traffic_class: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub flow_label: u32,
    pub payload_length: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub src: [u8; 16],
    pub dst: [u8; 16],
}

impl Ipv6Header {
    /// Decode the fixed header and return it with its payload, bounded by the
    /// payload length field.
    pub fn decode(data: &[u8]) -> Result<(Self, &[u8])> {
        let mut cursor = Cursor::new(data, "IPv6");
        cursor.require(IPV6_HEADER_LEN)?;

        let word = cursor.read_u32()?;
        let version = (word >> VERSION_SHIFT) as u8;
        if version != 6 {
            return Err(DecodeError::UnsupportedVariant {
                layer: "IPv6",
                what: "version",
                value: version as u32,
            });
        }

        let payload_length = cursor.read_u16()?;
        let next_header = cursor.read_u8()?;
        let hop_limit = cursor.read_u8()?;
        let src = cursor.read_array()?;
        let dst = cursor.read_array()?;

        let header = Self {
            version,
            traffic_class: ((word >> TRAFFIC_CLASS_SHIFT) & 0xff) as u8,
            dscp: ((word & DSCP_MASK) >> DSCP_SHIFT) as u8,
            ecn: ((word & ECN_MASK) >> ECN_SHIFT) as u8,
            flow_label: word & FLOW_LABEL_MASK,
            payload_length,
            next_header,
            hop_limit,
            src,
            dst,
        };

        let rest = cursor.rest();
        let end = (payload_length as usize).min(rest.len());
        Ok((header, &rest[..end]))
    }

    pub fn src_text(&self) -> CompactString {
        format_ipv6(self.src)
    }

    pub fn dst_text(&self) -> CompactString {
        format_ipv6(self.dst)
    }

    pub fn ip_pair(&self) -> IpPair {
        IpPair::V6 {
            src: self.src,
            dst: self.dst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::test_utils::Ipv6Builder;

    #[test]
    fn test_decode_basic() {
        let packet = Ipv6Builder::new()
            .next_header(58)
            .hop_limit(255)
            .payload(vec![0x80, 0x00, 0x00, 0x00])
            .build();

        let (ip, payload) = Ipv6Header::decode(&packet).unwrap();
        assert_eq!(ip.version, 6);
        assert_eq!(ip.payload_length, 4);
        assert_eq!(ip.next_header, 58);
        assert_eq!(ip.hop_limit, 255);
        assert_eq!(ip.src_text(), "fe80::1");
        assert_eq!(ip.dst_text(), "fe80::2");
        assert_eq!(payload, &[0x80, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_first_word_bit_fields() {
        // Traffic class 0xb9 = DSCP 46 (EF) << 2 | ECN 1, flow label 0xabcde
        let packet = Ipv6Builder::new()
            .traffic_class(0xb9)
            .flow_label(0xabcde)
            .build();
        assert_eq!(&packet[..4], &[0x6b, 0x9a, 0xbc, 0xde]);

        let (ip, _) = Ipv6Header::decode(&packet).unwrap();
        assert_eq!(ip.traffic_class, 0xb9);
        assert_eq!(ip.dscp, 46);
        assert_eq!(ip.ecn, 1);
        assert_eq!(ip.flow_label, 0xabcde);
    }

    #[test]
    fn test_payload_bounded_by_length() {
        let mut packet = Ipv6Builder::new().payload(vec![1, 2]).build();
        packet.extend_from_slice(&[0xee; 4]);
        let (_, payload) = Ipv6Header::decode(&packet).unwrap();
        assert_eq!(payload, &[1, 2]);
    }

    #[test]
    fn test_too_short() {
        let packet = Ipv6Builder::new().build();
        let err = Ipv6Header::decode(&packet[..39]).unwrap_err();
        assert_eq!(err, DecodeError::truncated("IPv6", 40, 39));
    }

    #[test]
    fn test_wrong_version() {
        let mut packet = Ipv6Builder::new().build();
        packet[0] = 0x45;
        assert!(matches!(
            Ipv6Header::decode(&packet),
            Err(DecodeError::UnsupportedVariant { what: "version", value: 4, .. })
        ));
    }
}
