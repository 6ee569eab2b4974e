//! Fuzz target for TCP option parsing.
//!
//! Fuzz bytes become the option area of a SYN segment, padded to a 4-byte
//! boundary, so both the option walker and the header's data offset
//! handling are exercised.

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use netdissect_core::protocol::parse_tcp_options;
use netdissect_core::{dissect_partial, render, Verbosity};
use netdissect_fuzz::frames::{ipv4_frame, TCP_OPTIONS_FRAME};

/// SYN from 12345 to 80 with `options` appended and zero padding.
fn tcp_header(options: &[u8]) -> Vec<u8> {
    let padding = (4 - options.len() % 4) % 4;
    let len = 20 + options.len() + padding;

    let mut header = vec![
        0x30, 0x39, 0x00, 0x50, // ports
        0x00, 0x00, 0x00, 0x01, // seq
        0x00, 0x00, 0x00, 0x00, // ack
        ((len / 4) as u8) << 4,
        0x02, // SYN
        0xff, 0xff, // window
        0x00, 0x00, // checksum
        0x00, 0x00, // urgent
    ];
    header.extend_from_slice(options);
    header.resize(len, 0);
    header
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 40 {
        return;
    }

    let _ = parse_tcp_options(data);

    let frame = ipv4_frame(&TCP_OPTIONS_FRAME, &tcp_header(data));

    if let Ok(decoded) = dissect_partial(&frame, Utc.timestamp_opt(0, 0).unwrap()) {
        let _ = render(&decoded, Verbosity::Summary);
        let _ = render(&decoded, Verbosity::Full);
    }
});
