//! Error types for netdissect-core.
//!
//! Every decoder returns [`DecodeError`] through the crate [`Result`] alias.
//! The taxonomy is deliberately small:
//!
//! - [`DecodeError::Truncated`] - not enough bytes left for a field or header
//! - [`DecodeError::MalformedName`] - a DNS name pointer is out of range or loops
//! - [`DecodeError::UnsupportedVariant`] - a well-formed value this engine does
//!   not render (for example non-Ethernet ARP hardware)
//!
//! Checksum mismatches are not errors. They are reported through
//! [`ChecksumStatus`](crate::checksum::ChecksumStatus).

use thiserror::Error;

/// Errors produced while decoding a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Insufficient bytes for the current field or header
    #[error("{layer}: truncated (need {needed} bytes, have {have})")]
    Truncated {
        layer: &'static str,
        needed: usize,
        have: usize,
    },

    /// DNS name pointer out of range, or indirection limit exceeded
    #[error("DNS: malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: &'static str },

    /// Address family, hardware type or option kind that is not rendered
    #[error("{layer}: unsupported {what} ({value:#x})")]
    UnsupportedVariant {
        layer: &'static str,
        what: &'static str,
        value: u32,
    },
}

impl DecodeError {
    /// Shorthand for a [`DecodeError::Truncated`].
    pub fn truncated(layer: &'static str, needed: usize, have: usize) -> Self {
        DecodeError::Truncated {
            layer,
            needed,
            have,
        }
    }

    /// Name of the layer the error was raised in.
    pub fn layer(&self) -> &'static str {
        match self {
            DecodeError::Truncated { layer, .. } => layer,
            DecodeError::MalformedName { .. } => "DNS",
            DecodeError::UnsupportedVariant { layer, .. } => layer,
        }
    }
}

/// Result type alias using [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;
