//! Hex frame input.
//!
//! One frame per line:
//!
//! ```text
//! # comment
//! 1700000000.250000 ffffffffffff001122334455 0806 ...
//! ffffffffffff0011223344550806...
//! ```
//!
//! An optional `secs.micros` timestamp comes first. It is recognised only by
//! its `.` and must be followed by more tokens, so digit-only hex groups such
//! as `001122334455` always count as frame data. The remaining tokens are hex
//! and may be split by spaces or colons. Frames without a timestamp are
//! stamped with the Unix epoch.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// A frame read from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFrame {
    /// 1-based line number
    pub line: usize,
    pub timestamp: DateTime<Utc>,
    pub data: Vec<u8>,
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<InputFrame>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    let timestamp = if is_timestamp_token(&tokens) {
        let stamp = tokens.remove(0);
        parse_timestamp(line, stamp)?
    } else {
        epoch(line)?
    };

    let digits: String = tokens.concat().chars().filter(|c| *c != ':').collect();
    let data = decode_hex(line, &digits)?;
    Ok(Some(InputFrame {
        line,
        timestamp,
        data,
    }))
}

fn is_timestamp_token(tokens: &[&str]) -> bool {
    match tokens {
        [first, _, ..] => first.contains('.'),
        _ => false,
    }
}

/// Parse `secs` or `secs.micros`. The line reader only passes dotted values.
pub fn parse_timestamp(line: usize, value: &str) -> Result<DateTime<Utc>> {
    let invalid = || Error::InvalidTimestamp {
        line,
        value: value.to_string(),
    };

    let (secs, micros) = match value.split_once('.') {
        Some((secs, frac)) => {
            if frac.is_empty() || frac.len() > 6 || !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            // Right-pad so ".25" means 250000 microseconds.
            let padded = format!("{frac:0<6}");
            let micros: u32 = padded.parse().map_err(|_| invalid())?;
            (secs, micros)
        }
        None => (value, 0),
    };
    let secs: i64 = secs.parse().map_err(|_| invalid())?;

    Utc.timestamp_opt(secs, micros * 1_000)
        .single()
        .ok_or_else(invalid)
}

fn epoch(line: usize) -> Result<DateTime<Utc>> {
    parse_timestamp(line, "0")
}

fn decode_hex(line: usize, digits: &str) -> Result<Vec<u8>> {
    hex::decode(digits).map_err(|e| Error::InvalidHex {
        line,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_hex() {
        let frame = parse_line(1, "0011aabb").unwrap().unwrap();
        assert_eq!(frame.data, vec![0x00, 0x11, 0xaa, 0xbb]);
        assert_eq!(frame.timestamp.timestamp(), 0);
    }

    #[test]
    fn test_spaced_and_colon_hex() {
        let frame = parse_line(1, "00 11:22 33").unwrap().unwrap();
        assert_eq!(frame.data, vec![0x00, 0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_timestamp_prefix() {
        let frame = parse_line(3, "1700000000.25 ffff").unwrap().unwrap();
        assert_eq!(frame.line, 3);
        assert_eq!(frame.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(frame.timestamp.timestamp_subsec_micros(), 250_000);
        assert_eq!(frame.data, vec![0xff, 0xff]);
    }

    #[test]
    fn test_whole_second_timestamp_prefix() {
        let frame = parse_line(1, "86400.0 0a0b").unwrap().unwrap();
        assert_eq!(frame.timestamp.timestamp(), 86_400);
        assert_eq!(frame.data, vec![0x0a, 0x0b]);
    }

    #[test]
    fn test_two_digit_first_token_is_data() {
        let frame = parse_line(1, "12 34").unwrap().unwrap();
        assert_eq!(frame.data, vec![0x12, 0x34]);
        assert_eq!(frame.timestamp.timestamp(), 0);
    }

    #[test]
    fn test_digit_only_first_group_is_data() {
        let frame = parse_line(
            1,
            "001122334455 665544332211 0806 0001080006040001 665544332211 0a000001 \
             000000000000 0a000002",
        )
        .unwrap()
        .unwrap();
        assert_eq!(frame.timestamp.timestamp(), 0);
        assert_eq!(frame.data.len(), 42);
        assert_eq!(&frame.data[..6], &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line(1, "   ").unwrap(), None);
        assert_eq!(parse_line(2, "# ping capture").unwrap(), None);
    }

    #[test]
    fn test_odd_digits() {
        let err = parse_line(5, "abc").unwrap_err();
        assert!(matches!(err, Error::InvalidHex { line: 5, .. }));
    }

    #[test]
    fn test_bad_digits() {
        let err = parse_line(2, "zz00").unwrap_err();
        assert!(matches!(err, Error::InvalidHex { line: 2, .. }));
        assert!(err.to_string().contains("'z'"), "{err}");
    }

    #[test]
    fn test_bad_timestamp_fraction() {
        let err = parse_line(7, "12.1234567 00").unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { line: 7, .. }));
    }
}
