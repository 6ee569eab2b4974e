//! IEEE 802.1Q VLAN tag.

/// A single 802.1Q tag following the 0x8100 TPID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlanTag {
    /// VLAN identifier (12 bits)
    pub id: u16,
    /// Priority code point (3 bits)
    pub priority: u8,
    /// Drop eligible indicator (1 bit)
    pub drop_eligible: bool,
    /// EtherType of the encapsulated payload
    pub inner_ethertype: u16,
}

impl VlanTag {
    /// Split a Tag Control Information word and pair it with the inner type.
    pub fn from_tci(tci: u16, inner_ethertype: u16) -> Self {
        Self {
            priority: ((tci >> 13) & 0x07) as u8,
            drop_eligible: (tci >> 12) & 0x01 != 0,
            id: tci & 0x0fff,
            inner_ethertype,
        }
    }

    /// Reassemble the TCI word.
    pub fn tci(&self) -> u16 {
        ((self.priority as u16) << 13) | ((self.drop_eligible as u16) << 12) | self.id
    }
}
