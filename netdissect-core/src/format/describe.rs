//! Numeric value to description lookups shared by several layers.
//!
//! Each table has a short form (used by minimal and summary renderings) and,
//! where the verbose text differs, a long form used by the full rendering.

/// Ethertype values.
pub mod ethertype {
    pub const PUP: u16 = 0x0200;
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const REVARP: u16 = 0x8035;
    pub const VLAN: u16 = 0x8100;
    pub const IPV6: u16 = 0x86DD;
}

/// IP protocol numbers (also IPv6 next-header values).
pub mod ip_proto {
    pub const ICMP: u8 = 1;
    pub const IGMP: u8 = 2;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
    pub const IPV6: u8 = 41;
    pub const ICMPV6: u8 = 58;
}

pub fn ethertype_name(value: u16) -> Option<&'static str> {
    match value {
        ethertype::PUP => Some("PUP"),
        ethertype::IPV4 => Some("IP"),
        ethertype::ARP => Some("ARP"),
        ethertype::REVARP => Some("Reverse ARP"),
        ethertype::IPV6 => Some("IPv6"),
        ethertype::VLAN => Some("VLAN"),
        _ => None,
    }
}

pub fn ip_protocol_name(value: u8) -> Option<&'static str> {
    match value {
        ip_proto::ICMP => Some("ICMP"),
        ip_proto::IGMP => Some("IGMP"),
        ip_proto::TCP => Some("TCP"),
        ip_proto::UDP => Some("UDP"),
        ip_proto::IPV6 => Some("IPv6 Encap"),
        ip_proto::ICMPV6 => Some("ICMPv6"),
        _ => None,
    }
}

pub fn ip_protocol_description(value: u8) -> Option<&'static str> {
    match value {
        ip_proto::ICMP => Some("ICMP (Internet Control Message Protocol)"),
        ip_proto::IGMP => Some("IGMP (Internet Group Management Protocol)"),
        ip_proto::TCP => Some("TCP (Transmission Control Protocol)"),
        ip_proto::UDP => Some("UDP (User Datagram Protocol)"),
        ip_proto::IPV6 => Some("IPv6 Encapsulated"),
        ip_proto::ICMPV6 => Some("ICMPv6 (Internet Control Message Protocol version 6)"),
        _ => None,
    }
}

/// Short DSCP codepoint name (`CS0`..`CS7`, `AFxy`, `EF`, `VA`, `LE`).
///
/// Returns `None` for codepoints with no registered meaning.
pub fn dscp_name(dscp: u8) -> Option<&'static str> {
    dscp_entry(dscp).map(|(short, _)| short)
}

/// Long DSCP description, e.g. `"AF21: Class 2, Low Drop Probability"`.
pub fn dscp_description(dscp: u8) -> Option<&'static str> {
    dscp_entry(dscp).map(|(_, long)| long)
}

fn dscp_entry(dscp: u8) -> Option<(&'static str, &'static str)> {
    let entry = match dscp {
        0 => ("CS0", "CS0: Best Effort / Standard"),
        8 => ("CS1", "CS1: Low-Priority Data"),
        16 => ("CS2", "CS2: Network OAM"),
        24 => ("CS3", "CS3: Broadcast Video"),
        32 => ("CS4", "CS4: Real-Time Interactive"),
        40 => ("CS5", "CS5: Signaling"),
        48 => ("CS6", "CS6: Network Control"),
        56 => ("CS7", "CS7: Reserved for future use"),
        10 => ("AF11", "AF11: Class 1, Low Drop Probability"),
        12 => ("AF12", "AF12: Class 1, Medium Drop Probability"),
        14 => ("AF13", "AF13: Class 1, High Drop Probability"),
        18 => ("AF21", "AF21: Class 2, Low Drop Probability"),
        20 => ("AF22", "AF22: Class 2, Medium Drop Probability"),
        22 => ("AF23", "AF23: Class 2, High Drop Probability"),
        26 => ("AF31", "AF31: Class 3, Low Drop Probability"),
        28 => ("AF32", "AF32: Class 3, Medium Drop Probability"),
        30 => ("AF33", "AF33: Class 3, High Drop Probability"),
        34 => ("AF41", "AF41: Class 4, Low Drop Probability"),
        36 => ("AF42", "AF42: Class 4, Medium Drop Probability"),
        38 => ("AF43", "AF43: Class 4, High Drop Probability"),
        44 => ("VA", "Voice Admit"),
        46 => ("EF", "EF: Expedited Forwarding"),
        1 => ("LE", "Low Effort"),
        _ => return None,
    };
    Some(entry)
}

/// Short ECN name. Only the low two bits are meaningful.
pub fn ecn_name(ecn: u8) -> Option<&'static str> {
    match ecn {
        0 => Some("Not-ECT"),
        1 => Some("ECT(1)"),
        2 => Some("ECT(0)"),
        3 => Some("CE"),
        _ => None,
    }
}

pub fn ecn_description(ecn: u8) -> Option<&'static str> {
    match ecn {
        0 => Some("Not-ECT: Not ECN-Capable Transport"),
        1 => Some("ECT(1): ECN-Capable Transport (1)"),
        2 => Some("ECT(0): ECN-Capable Transport (0)"),
        3 => Some("CE: Congestion Experienced"),
        _ => None,
    }
}
