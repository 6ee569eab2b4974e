//! Internet checksum (RFC 1071) and transport pseudo-headers.
//!
//! Validation never touches the caller's buffer: [`verify_checksum`] copies
//! the pseudo-header and segment into a scratch buffer, zeroes the checksum
//! field there and recomputes.
//!
//! Two verdicts are exposed by [`ChecksumStatus`]:
//!
//! | Verdict | Accepts |
//! |---------|---------|
//! | strict  | recomputed value equals the wire value |
//! | lenient | strict, or recomputed value is `0x0000`/`0xFFFF` (NIC offload sentinels) |

use smallvec::SmallVec;

/// IPv4 pseudo-header size.
pub const IPV4_PSEUDO_HEADER_LEN: usize = 12;

/// IPv6 pseudo-header size.
pub const IPV6_PSEUDO_HEADER_LEN: usize = 40;

/// Compute the Internet checksum of `data`.
///
/// Big-endian 16-bit words are summed, a trailing odd byte counts as the high
/// byte of a zero-padded word, carries are folded back in and the one's
/// complement is returned.
///
/// # Example
///
/// ```
/// use netdissect_core::checksum::internet_checksum;
///
/// let header = [
///     0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11,
///     0x00, 0x00, 0xc0, 0xa8, 0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
/// ];
/// assert_eq!(internet_checksum(&header), 0xb861);
/// ```
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut words = data.chunks_exact(2);

    for word in &mut words {
        sum += u16::from_be_bytes([word[0], word[1]]) as u32;
        // Keep the accumulator from overflowing on very long buffers
        if sum > 0xffff_0000 {
            sum = (sum & 0xffff) + (sum >> 16);
        }
    }

    if let [last] = words.remainder() {
        sum += (*last as u32) << 8;
    }

    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }

    !(sum as u16)
}

/// Source and destination addresses a transport checksum is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpPair {
    V4 { src: [u8; 4], dst: [u8; 4] },
    V6 { src: [u8; 16], dst: [u8; 16] },
}

/// Build the pseudo-header for a transport checksum.
///
/// IPv4 yields 12 bytes (addresses, zero, protocol, 16-bit length); IPv6 yields
/// 40 bytes (addresses, 32-bit length, three zero bytes, next header).
pub fn build_transport_pseudo_header(
    addrs: &IpPair,
    protocol: u8,
    length: u32,
) -> SmallVec<[u8; IPV6_PSEUDO_HEADER_LEN]> {
    let mut header = SmallVec::new();
    match addrs {
        IpPair::V4 { src, dst } => {
            header.extend_from_slice(src);
            header.extend_from_slice(dst);
            header.push(0);
            header.push(protocol);
            // IPv4 carries a 16-bit length; larger values cannot occur on the wire
            header.extend_from_slice(&(length as u16).to_be_bytes());
        }
        IpPair::V6 { src, dst } => {
            header.extend_from_slice(src);
            header.extend_from_slice(dst);
            header.extend_from_slice(&length.to_be_bytes());
            header.extend_from_slice(&[0, 0, 0]);
            header.push(protocol);
        }
    }
    header
}

/// Outcome of recomputing a checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumStatus {
    /// Value carried in the packet
    pub wire: u16,
    /// Value recomputed with the checksum field zeroed
    pub computed: u16,
}

impl ChecksumStatus {
    /// Byte-for-byte agreement between wire and recomputed values.
    pub fn is_valid_strict(&self) -> bool {
        self.computed == self.wire
    }

    /// Strict agreement, or a recomputed offload sentinel.
    pub fn is_valid(&self) -> bool {
        self.is_valid_strict() || self.is_offload_sentinel()
    }

    /// Recomputed value is one of the checksum-offload placeholders.
    pub fn is_offload_sentinel(&self) -> bool {
        self.computed == 0x0000 || self.computed == 0xffff
    }
}

/// Recompute the checksum of `segment` prefixed by `pseudo_header`.
///
/// `field_offset` is the offset of the 16-bit checksum field inside `segment`.
/// The field is zeroed in a private copy; `segment` itself is left untouched.
pub fn verify_checksum(pseudo_header: &[u8], segment: &[u8], field_offset: usize) -> ChecksumStatus {
    let wire = segment
        .get(field_offset..field_offset + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .unwrap_or(0);

    let mut scratch = Vec::with_capacity(pseudo_header.len() + segment.len() + 1);
    scratch.extend_from_slice(pseudo_header);
    scratch.extend_from_slice(segment);
    let field = pseudo_header.len() + field_offset;
    if let Some(bytes) = scratch.get_mut(field..field + 2) {
        bytes.fill(0);
    }
    if scratch.len() % 2 == 1 {
        scratch.push(0);
    }

    ChecksumStatus {
        wire,
        computed: internet_checksum(&scratch),
    }
}
