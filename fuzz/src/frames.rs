//! Header prefixes that fuzz input is appended to. Length fields are patched
//! once the payload size is known.

/// Ethernet + IPv4 + UDP (10.0.0.1:40000 > 10.0.0.2:53), 42 bytes.
pub const DNS_FRAME: [u8; 42] = [
    0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x08, 0x00,
    0x45, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x40, 0x11, 0x00, 0x00,
    10, 0, 0, 1, 10, 0, 0, 2,
    0x9c, 0x40, 0x00, 0x35, 0x00, 0x00, 0x00, 0x00,
];

/// Ethernet + IPv4 + UDP (0.0.0.0:68 > 255.255.255.255:67), 42 bytes.
pub const DHCP_FRAME: [u8; 42] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x08, 0x00,
    0x45, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x40, 0x11, 0x00, 0x00,
    0, 0, 0, 0, 255, 255, 255, 255,
    0x00, 0x44, 0x00, 0x43, 0x00, 0x00, 0x00, 0x00,
];

/// Ethernet + IPv4 with protocol TCP, 34 bytes.
pub const TCP_OPTIONS_FRAME: [u8; 34] = [
    0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x08, 0x00,
    0x45, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x40, 0x06, 0x00, 0x00,
    10, 0, 0, 1, 10, 0, 0, 2,
];

/// Ethernet + IPv4 with protocol ICMP, 34 bytes.
pub const ICMP_FRAME: [u8; 34] = [
    0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x08, 0x00,
    0x45, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x40, 0x01, 0x00, 0x00,
    10, 0, 0, 1, 10, 0, 0, 2,
];

/// Ethernet + IPv6 (fe80::1 > fe80::2) with next header ICMPv6, 54 bytes.
pub const ICMPV6_FRAME: [u8; 54] = [
    0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x86, 0xdd,
    0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3a, 0xff,
    0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01,
    0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x02,
];

/// Append `payload` to a 42-byte Ethernet/IPv4/UDP prefix, fixing both lengths.
pub fn udp_frame(prefix: &[u8; 42], payload: &[u8]) -> Vec<u8> {
    let mut frame = prefix.to_vec();
    let ip_len = ((28 + payload.len()) as u16).to_be_bytes();
    frame[16..18].copy_from_slice(&ip_len);
    let udp_len = ((8 + payload.len()) as u16).to_be_bytes();
    frame[38..40].copy_from_slice(&udp_len);
    frame.extend_from_slice(payload);
    frame
}

/// Append `payload` to a 34-byte Ethernet/IPv4 prefix, fixing the total length.
pub fn ipv4_frame(prefix: &[u8; 34], payload: &[u8]) -> Vec<u8> {
    let mut frame = prefix.to_vec();
    let ip_len = ((20 + payload.len()) as u16).to_be_bytes();
    frame[16..18].copy_from_slice(&ip_len);
    frame.extend_from_slice(payload);
    frame
}

/// Append `payload` to a 54-byte Ethernet/IPv6 prefix, fixing the payload length.
pub fn ipv6_frame(prefix: &[u8; 54], payload: &[u8]) -> Vec<u8> {
    let mut frame = prefix.to_vec();
    frame[18..20].copy_from_slice(&(payload.len() as u16).to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}
