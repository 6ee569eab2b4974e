//! TCP header and option decoder.

use compact_str::{format_compact, CompactString};
use smallvec::SmallVec;
use tracing::trace;

use super::cursor::Cursor;
use crate::checksum::{build_transport_pseudo_header, verify_checksum, ChecksumStatus, IpPair};
use crate::error::{DecodeError, Result};
use crate::format::describe::ip_proto;

pub const TCP_MIN_HEADER_LEN: usize = 20;

/// TCP flag bits of the flags byte.
pub mod flags {
    pub const FIN: u8 = 0x01;
    pub const SYN: u8 = 0x02;
    pub const RST: u8 = 0x04;
    pub const PSH: u8 = 0x08;
    pub const ACK: u8 = 0x10;
    pub const URG: u8 = 0x20;
    pub const ECE: u8 = 0x40;
    pub const CWR: u8 = 0x80;
}

/// TCP option kinds.
pub mod option_kind {
    pub const END_OF_LIST: u8 = 0;
    pub const NOP: u8 = 1;
    pub const MSS: u8 = 2;
    pub const WINDOW_SCALE: u8 = 3;
    pub const SACK_PERMITTED: u8 = 4;
    pub const TIMESTAMP: u8 = 8;
}

/// One decoded TCP option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TcpOption {
    EndOfList,
    Nop,
    Mss(u16),
    WindowScale(u8),
    SackPermitted,
    Timestamp { value: u32, echo: u32 },
    /// Any other kind, skipped by its declared length
    Unknown { kind: u8, data: SmallVec<[u8; 8]> },
}

impl TcpOption {
    /// Rendered option, short (`"mss (1460)"`) or verbose
    /// (`"Maximum Segment Size (1460)"`).
    pub fn text(&self, verbose: bool) -> CompactString {
        match (self, verbose) {
            (TcpOption::EndOfList, false) => "eopl".into(),
            (TcpOption::EndOfList, true) => "End of option list".into(),
            (TcpOption::Nop, false) => "no-op".into(),
            (TcpOption::Nop, true) => "No-Operation".into(),
            (TcpOption::Mss(v), false) => format_compact!("mss ({v})"),
            (TcpOption::Mss(v), true) => format_compact!("Maximum Segment Size ({v})"),
            (TcpOption::WindowScale(s), false) => format_compact!("wscale ({s})"),
            (TcpOption::WindowScale(s), true) => format_compact!("Window Scale ({s})"),
            (TcpOption::SackPermitted, false) => "sackOK".into(),
            (TcpOption::SackPermitted, true) => "SACK Permitted".into(),
            (TcpOption::Timestamp { value, echo }, false) => format_compact!("TS ({value} {echo})"),
            (TcpOption::Timestamp { value, echo }, true) => {
                format_compact!("Timestamps (val {value}, ecr {echo})")
            }
            (TcpOption::Unknown { .. }, false) => "? op".into(),
            (TcpOption::Unknown { kind, .. }, true) => format_compact!("Unknown option ({kind})"),
        }
    }
}

pub type TcpOptions = SmallVec<[TcpOption; 8]>;

/// Decode an options area (the `(data_offset - 5) * 4` bytes after the fixed
/// header).
///
/// An option whose declared length runs past the area fails with
/// [`DecodeError::Truncated`]; nothing beyond `area` is ever read.
pub fn parse_tcp_options(area: &[u8]) -> Result<TcpOptions> {
    let (options, error) = walk_options(area);
    match error {
        Some(err) => Err(err),
        None => Ok(options),
    }
}

/// Walk options, keeping every option decoded before a failure.
fn walk_options(area: &[u8]) -> (TcpOptions, Option<DecodeError>) {
    let mut options = TcpOptions::new();
    let mut pos = 0;

    while pos < area.len() {
        let kind = area[pos];
        match kind {
            option_kind::END_OF_LIST => {
                options.push(TcpOption::EndOfList);
                break;
            }
            option_kind::NOP => {
                options.push(TcpOption::Nop);
                pos += 1;
                continue;
            }
            _ => {}
        }

        let Some(&len) = area.get(pos + 1) else {
            return (options, Some(option_truncated(pos + 2, area.len())));
        };
        let len = len as usize;
        if len < 2 {
            // A length below 2 cannot cover its own kind and length bytes
            return (options, Some(option_truncated(pos + 2, pos + len)));
        }
        if pos + len > area.len() {
            return (options, Some(option_truncated(pos + len, area.len())));
        }

        let data = &area[pos + 2..pos + len];
        trace!(kind, len, "TCP option");
        let option = match (kind, data.len()) {
            (option_kind::MSS, 2) => TcpOption::Mss(u16::from_be_bytes([data[0], data[1]])),
            (option_kind::WINDOW_SCALE, 1) => TcpOption::WindowScale(data[0]),
            (option_kind::SACK_PERMITTED, 0) => TcpOption::SackPermitted,
            (option_kind::TIMESTAMP, 8) => TcpOption::Timestamp {
                value: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
                echo: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            },
            _ => TcpOption::Unknown {
                kind,
                data: SmallVec::from_slice(data),
            },
        };
        options.push(option);
        pos += len;
    }

    (options, None)
}

fn option_truncated(needed: usize, have: usize) -> DecodeError {
    DecodeError::truncated("TCP option", needed, have)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub sequence: u32,
    pub acknowledgment: u32,
    /// Header length in 32-bit words
    pub data_offset: u8,
    pub flags: u8,
    pub window: u16,
    pub checksum: ChecksumStatus,
    pub urgent_pointer: u16,
    pub options: TcpOptions,
    /// Error that stopped option decoding; `options` holds what came before
    pub options_error: Option<DecodeError>,
}

impl TcpHeader {
    /// Decode a TCP segment and return the header with the segment payload.
    ///
    /// `segment` must be the whole segment as bounded by the IP layer; the
    /// checksum covers all of it plus the pseudo-header built from `addrs`.
    pub fn decode<'a>(segment: &'a [u8], addrs: &IpPair) -> Result<(Self, &'a [u8])> {
        let mut cursor = Cursor::new(segment, "TCP");
        cursor.require(TCP_MIN_HEADER_LEN)?;

        let src_port = cursor.read_u16()?;
        let dst_port = cursor.read_u16()?;
        let sequence = cursor.read_u32()?;
        let acknowledgment = cursor.read_u32()?;
        let data_offset = cursor.read_u8()? >> 4;
        let flags = cursor.read_u8()?;
        let window = cursor.read_u16()?;
        cursor.skip(2)?;
        let urgent_pointer = cursor.read_u16()?;

        if data_offset < 5 {
            return Err(DecodeError::UnsupportedVariant {
                layer: "TCP",
                what: "data offset",
                value: data_offset as u32,
            });
        }
        let header_len = data_offset as usize * 4;
        let area = cursor.read_bytes(header_len - TCP_MIN_HEADER_LEN)?;
        let (options, options_error) = walk_options(area);

        let pseudo = build_transport_pseudo_header(addrs, ip_proto::TCP, segment.len() as u32);
        let checksum = verify_checksum(&pseudo, segment, 16);

        let header = Self {
            src_port,
            dst_port,
            sequence,
            acknowledgment,
            data_offset,
            flags,
            window,
            checksum,
            urgent_pointer,
            options,
            options_error,
        };
        Ok((header, cursor.rest()))
    }

    pub fn header_len(&self) -> usize {
        self.data_offset as usize * 4
    }

    /// Bytes reserved for options.
    pub fn options_len(&self) -> usize {
        self.header_len() - TCP_MIN_HEADER_LEN
    }

    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Mss option value, if present.
    pub fn mss(&self) -> Option<u16> {
        self.options.iter().find_map(|opt| match opt {
            TcpOption::Mss(v) => Some(*v),
            _ => None,
        })
    }

    /// Names of the set flags in wire order, e.g. `"SYN ACK"`.
    pub fn flags_text(&self) -> String {
        const NAMES: [(u8, &str); 8] = [
            (flags::FIN, "FIN"),
            (flags::SYN, "SYN"),
            (flags::RST, "RST"),
            (flags::PSH, "PSH"),
            (flags::ACK, "ACK"),
            (flags::URG, "URG"),
            (flags::ECE, "ECE"),
            (flags::CWR, "CWR"),
        ];
        NAMES
            .iter()
            .filter(|(bit, _)| self.has_flag(*bit))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flag names followed by the raw byte, e.g. `"SYN ACK (0x12)"`.
    pub fn flags_description(&self, verbose: bool) -> String {
        let names = self.flags_text();
        let names = match (names.is_empty(), verbose) {
            (false, _) => names,
            (true, false) => "none/?".to_string(),
            (true, true) => "None / Unknown".to_string(),
        };
        format!("{names} (0x{:x})", self.flags)
    }

    /// Space-separated option list; a trailing `?` marks a malformed option.
    pub fn options_text(&self, verbose: bool) -> String {
        let mut parts: Vec<CompactString> = self.options.iter().map(|opt| opt.text(verbose)).collect();
        if self.options_error.is_some() {
            parts.push(if verbose { "Malformed option".into() } else { "?".into() });
        }
        parts.join(" ")
    }
}
