//! Fuzz target for the DHCP/BOOTP decoder.
//!
//! Covers the fixed BOOTP fields, the magic cookie and option TLV walking.

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use netdissect_core::protocol::DhcpMessage;
use netdissect_core::{dissect_partial, render, Verbosity};
use netdissect_fuzz::frames::{udp_frame, DHCP_FRAME};

fuzz_target!(|data: &[u8]| {
    let _ = DhcpMessage::decode(data);

    let frame = udp_frame(&DHCP_FRAME, data);
    if let Ok(decoded) = dissect_partial(&frame, Utc.timestamp_opt(0, 0).unwrap()) {
        let _ = render(&decoded, Verbosity::Full);
        let _ = render(&decoded, Verbosity::Minimal);
    }
});
