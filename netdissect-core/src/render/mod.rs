//! Text rendering of dissected frames.
//!
//! Three verbosity levels are supported:
//!
//! | Level | Output |
//! |-------|--------|
//! | [`Verbosity::Minimal`] | one line per frame |
//! | [`Verbosity::Summary`] | one line per decoded layer |
//! | [`Verbosity::Full`] | an indented field tree |
//!
//! Every rendering opens with a separator line and closes with a blank line.
//! Values that have no registered name render as `?` (short forms) or
//! `Unknown` (long forms).

mod minimal;
mod summary;
mod tree;

use std::fmt;

use compact_str::CompactString;

use crate::format::{ethertype_name, format_mac};
use crate::protocol::arp::{operation, operation_name};
use crate::protocol::{ArpPacket, Frame};

pub use tree::TreeWriter;

/// Line printed before every frame.
pub const SEPARATOR: &str =
    "------------------------------------------------------------------";

/// How much detail to print per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verbosity {
    Minimal,
    #[default]
    Summary,
    Full,
}

/// Render a frame to a string.
pub fn render(frame: &Frame, verbosity: Verbosity) -> String {
    FrameDisplay::new(frame, verbosity).to_string()
}

/// [`fmt::Display`] adapter over a frame at a fixed verbosity.
pub struct FrameDisplay<'a> {
    frame: &'a Frame,
    verbosity: Verbosity,
}

impl<'a> FrameDisplay<'a> {
    pub fn new(frame: &'a Frame, verbosity: Verbosity) -> Self {
        Self { frame, verbosity }
    }
}

impl fmt::Display for FrameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame;
        writeln!(f, "{SEPARATOR}")?;
        let time = frame.timestamp.format("%H:%M:%S");

        match self.verbosity {
            Verbosity::Minimal => {
                write!(f, "{time} ")?;
                minimal::write_frame(f, frame)?;
            }
            Verbosity::Summary => {
                writeln!(f, "Timestamp: {time}")?;
                summary::write_frame(f, frame)?;
            }
            Verbosity::Full => {
                writeln!(f, "Packet {}", frame.number)?;
                writeln!(f, "Timestamp: {time}")?;
                tree::write_frame(f, frame)?;
            }
        }
        writeln!(f)
    }
}

/// Short name lookup with the `?` fallback.
fn short(name: Option<&'static str>) -> &'static str {
    name.unwrap_or("?")
}

/// Long name lookup with the `Unknown` fallback.
fn long(name: Option<&'static str>) -> &'static str {
    name.unwrap_or("Unknown")
}

fn mac(bytes: &[u8]) -> CompactString {
    format_mac(bytes).unwrap_or_else(|| "?".into())
}

fn link_type(frame: &Frame) -> &'static str {
    short(ethertype_name(frame.link.payload_type()))
}

/// `"(correct)"`, or `"(incorrect) calculated: 1a2b"` on a mismatch.
fn checksum_verdict(valid: bool, computed: u16) -> String {
    if valid {
        "(correct)".to_string()
    } else {
        format!("(incorrect) calculated: {computed:x}")
    }
}

/// `"Who has T ? Tell S"` for requests, `"S is at MAC"` for replies.
fn arp_statement(arp: &ArpPacket) -> String {
    let text = |r: crate::error::Result<CompactString>| r.unwrap_or_else(|_| "?".into());
    match arp.operation {
        operation::REQUEST => format!(
            "Who has {} ? Tell {}",
            text(arp.target_protocol_text()),
            text(arp.sender_protocol_text())
        ),
        operation::REPLY => format!(
            "{} is at {}",
            text(arp.sender_protocol_text()),
            text(arp.sender_hardware_text())
        ),
        other => short(operation_name(other)).to_string(),
    }
}
