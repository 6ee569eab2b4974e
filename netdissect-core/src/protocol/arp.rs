//! ARP / RARP / InARP decoder.
//!
//! Addresses are stored as raw bytes sized by the header's declared lengths.
//! Only the Ethernet + IPv4 combination has a text form; other combinations
//! report [`DecodeError::UnsupportedVariant`] from the text accessors.

use compact_str::CompactString;
use smallvec::SmallVec;

use super::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::format::describe::ethertype;
use crate::format::{format_ipv4, format_mac};

/// Fixed part of an ARP packet before the addresses.
pub const ARP_FIXED_LEN: usize = 8;

/// ARP operation codes.
pub mod operation {
    pub const REQUEST: u16 = 1;
    pub const REPLY: u16 = 2;
    pub const REVERSE_REQUEST: u16 = 3;
    pub const REVERSE_REPLY: u16 = 4;
    pub const INVERSE_REQUEST: u16 = 8;
    pub const INVERSE_REPLY: u16 = 9;
}

/// ARP hardware types.
pub mod hardware_type {
    pub const ETHERNET: u16 = 1;
    pub const IEEE802: u16 = 6;
    pub const FRAME_RELAY: u16 = 15;
    pub const IEEE1394: u16 = 24;
    pub const EUI64: u16 = 27;
}

pub type AddressBytes = SmallVec<[u8; 16]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpPacket {
    pub hardware_type: u16,
    pub protocol_type: u16,
    pub hardware_len: u8,
    pub protocol_len: u8,
    pub operation: u16,
    pub sender_hardware: AddressBytes,
    pub sender_protocol: AddressBytes,
    pub target_hardware: AddressBytes,
    pub target_protocol: AddressBytes,
}

impl ArpPacket {
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data, "ARP");
        cursor.require(ARP_FIXED_LEN)?;

        let hardware_type = cursor.read_u16()?;
        let protocol_type = cursor.read_u16()?;
        let hardware_len = cursor.read_u8()?;
        let protocol_len = cursor.read_u8()?;
        let operation = cursor.read_u16()?;

        let hlen = hardware_len as usize;
        let plen = protocol_len as usize;
        cursor.require(2 * (hlen + plen))?;

        let sender_hardware = SmallVec::from_slice(cursor.read_bytes(hlen)?);
        let sender_protocol = SmallVec::from_slice(cursor.read_bytes(plen)?);
        let target_hardware = SmallVec::from_slice(cursor.read_bytes(hlen)?);
        let target_protocol = SmallVec::from_slice(cursor.read_bytes(plen)?);

        Ok(Self {
            hardware_type,
            protocol_type,
            hardware_len,
            protocol_len,
            operation,
            sender_hardware,
            sender_protocol,
            target_hardware,
            target_protocol,
        })
    }

    /// True for Ethernet hardware addresses carrying IPv4 protocol addresses.
    pub fn is_ethernet_ipv4(&self) -> bool {
        self.hardware_type == hardware_type::ETHERNET
            && self.hardware_len == 6
            && self.protocol_type == ethertype::IPV4
            && self.protocol_len == 4
    }

    pub fn sender_hardware_text(&self) -> Result<CompactString> {
        self.hardware_text(&self.sender_hardware)
    }

    pub fn target_hardware_text(&self) -> Result<CompactString> {
        self.hardware_text(&self.target_hardware)
    }

    pub fn sender_protocol_text(&self) -> Result<CompactString> {
        self.protocol_text(&self.sender_protocol)
    }

    pub fn target_protocol_text(&self) -> Result<CompactString> {
        self.protocol_text(&self.target_protocol)
    }

    fn hardware_text(&self, bytes: &[u8]) -> Result<CompactString> {
        self.check_renderable()?;
        format_mac(bytes).ok_or(DecodeError::UnsupportedVariant {
            layer: "ARP",
            what: "hardware address length",
            value: bytes.len() as u32,
        })
    }

    fn protocol_text(&self, bytes: &[u8]) -> Result<CompactString> {
        self.check_renderable()?;
        let octets: [u8; 4] =
            bytes
                .try_into()
                .map_err(|_| DecodeError::UnsupportedVariant {
                    layer: "ARP",
                    what: "protocol address length",
                    value: bytes.len() as u32,
                })?;
        Ok(format_ipv4(octets))
    }

    fn check_renderable(&self) -> Result<()> {
        if self.hardware_type != hardware_type::ETHERNET || self.hardware_len != 6 {
            return Err(DecodeError::UnsupportedVariant {
                layer: "ARP",
                what: "hardware type",
                value: self.hardware_type as u32,
            });
        }
        if self.protocol_type != ethertype::IPV4 || self.protocol_len != 4 {
            return Err(DecodeError::UnsupportedVariant {
                layer: "ARP",
                what: "protocol type",
                value: self.protocol_type as u32,
            });
        }
        Ok(())
    }
}

pub fn operation_name(op: u16) -> Option<&'static str> {
    match op {
        operation::REQUEST => Some("Request"),
        operation::REPLY => Some("Reply"),
        operation::REVERSE_REQUEST => Some("Reverse Request"),
        operation::REVERSE_REPLY => Some("Reverse Reply"),
        operation::INVERSE_REQUEST => Some("Inverse Request"),
        operation::INVERSE_REPLY => Some("Inverse Reply"),
        _ => None,
    }
}

pub fn operation_description(op: u16) -> Option<&'static str> {
    match op {
        operation::REQUEST => Some("Request to resolve address"),
        operation::REPLY => Some("Response to previous request"),
        operation::REVERSE_REQUEST => Some("Request protocol address given hardware"),
        operation::REVERSE_REPLY => Some("Response giving protocol address"),
        operation::INVERSE_REQUEST => Some("Request to identify peer"),
        operation::INVERSE_REPLY => Some("Response identifying peer"),
        _ => None,
    }
}

pub fn hardware_type_name(htype: u16) -> Option<&'static str> {
    match htype {
        hardware_type::ETHERNET => Some("Ethernet"),
        hardware_type::IEEE802 => Some("IEEE802"),
        hardware_type::FRAME_RELAY => Some("Frame Relay"),
        hardware_type::IEEE1394 => Some("IEEE1394"),
        hardware_type::EUI64 => Some("IEEE1394 EUI-64"),
        _ => None,
    }
}
