//! Address and raw-byte formatting.

use std::net::{Ipv4Addr, Ipv6Addr};

use compact_str::{format_compact, CompactString};

/// Format 6 bytes as a MAC address in colon-separated lowercase hex.
///
/// Returns `None` if the slice is not exactly 6 bytes.
///
/// # Example
///
/// ```
/// use netdissect_core::format::format_mac;
///
/// let bytes = [0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb];
/// assert_eq!(format_mac(&bytes).as_deref(), Some("66:77:88:99:aa:bb"));
/// ```
pub fn format_mac(bytes: &[u8]) -> Option<CompactString> {
    let b: &[u8; 6] = bytes.try_into().ok()?;
    Some(format_compact!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        b[0],
        b[1],
        b[2],
        b[3],
        b[4],
        b[5]
    ))
}

/// Format 4 bytes as a dotted-decimal IPv4 address.
///
/// # Example
///
/// ```
/// use netdissect_core::format::format_ipv4;
///
/// assert_eq!(format_ipv4([192, 168, 1, 1]), "192.168.1.1");
/// ```
pub fn format_ipv4(octets: [u8; 4]) -> CompactString {
    format_compact!("{}", Ipv4Addr::from(octets))
}

/// Format 16 bytes as a compressed IPv6 address.
///
/// # Example
///
/// ```
/// use netdissect_core::format::format_ipv6;
///
/// let bytes = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
/// assert_eq!(format_ipv6(bytes), "2001:db8::1");
/// ```
pub fn format_ipv6(octets: [u8; 16]) -> CompactString {
    format_compact!("{}", Ipv6Addr::from(octets))
}

/// Space-separated lowercase hex dump, e.g. `"fe 80 00 01"`.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Best-effort text rendering: printable ASCII is kept, anything else is `.`.
pub fn printable_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// Text from a NUL-padded fixed-width field (BOOTP `sname`/`file`).
pub fn fixed_field_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    printable_text(&bytes[..end])
}
