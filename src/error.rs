//! Error types for the netdissect driver.

use netdissect_core::DecodeError;
use thiserror::Error;

/// Main error type for driver operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A frame line is not valid hex
    #[error("line {line}: invalid hex: {reason}")]
    InvalidHex { line: usize, reason: String },

    /// A timestamp prefix could not be parsed or is out of range
    #[error("line {line}: invalid timestamp {value:?}")]
    InvalidTimestamp { line: usize, value: String },

    /// The frame was read but could not be dissected
    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: DecodeError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::InvalidHex { line, .. }
            | Error::InvalidTimestamp { line, .. }
            | Error::Decode { line, .. } => Some(*line),
            Error::Io(_) => None,
        }
    }
}

/// Result type alias using the driver Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line() {
        let err = Error::Decode {
            line: 4,
            source: DecodeError::truncated("Ethernet", 14, 3),
        };
        assert_eq!(
            err.to_string(),
            "line 4: Ethernet: truncated (need 14 bytes, have 3)"
        );
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_io_has_no_line() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.line(), None);
    }
}
