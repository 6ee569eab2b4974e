//! Ethernet II link layer with an optional single 802.1Q tag.

use super::cursor::Cursor;
use super::vlan::VlanTag;
use crate::error::{DecodeError, Result};
use crate::format::describe::ethertype;

/// Untagged Ethernet II header size.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Ethernet II header size with one VLAN tag.
pub const VLAN_HEADER_LEN: usize = 18;

/// Decoded Ethernet II header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst: [u8; 6],
    pub src: [u8; 6],
    /// Type field as it appears after the source address (0x8100 when tagged)
    pub ethertype: u16,
    pub vlan: Option<VlanTag>,
}

impl EthernetHeader {
    /// Decode the header and return it with the link payload.
    pub fn decode(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < ETHERNET_HEADER_LEN {
            return Err(DecodeError::truncated(
                "Ethernet",
                ETHERNET_HEADER_LEN,
                data.len(),
            ));
        }

        let mut cursor = Cursor::new(data, "Ethernet");
        let dst = cursor.read_array()?;
        let src = cursor.read_array()?;
        let eth_type = cursor.read_u16()?;

        let vlan = if eth_type == ethertype::VLAN {
            if data.len() < VLAN_HEADER_LEN {
                return Err(DecodeError::truncated(
                    "VLAN",
                    VLAN_HEADER_LEN,
                    data.len(),
                ));
            }
            let tci = cursor.read_u16()?;
            let inner = cursor.read_u16()?;
            Some(VlanTag::from_tci(tci, inner))
        } else {
            None
        };

        let header = Self {
            dst,
            src,
            ethertype: eth_type,
            vlan,
        };
        Ok((header, cursor.rest()))
    }

    /// EtherType of the payload, looking through a VLAN tag.
    pub fn payload_type(&self) -> u16 {
        match self.vlan {
            Some(tag) => tag.inner_ethertype,
            None => self.ethertype,
        }
    }

    pub fn header_len(&self) -> usize {
        if self.vlan.is_some() {
            VLAN_HEADER_LEN
        } else {
            ETHERNET_HEADER_LEN
        }
    }
}
