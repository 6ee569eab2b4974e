//! Fuzz target for the DNS decoder.
//!
//! Covers header and section counts, name compression pointers and the
//! indirection limit, both directly and behind a UDP port 53 frame.

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use netdissect_core::protocol::DnsMessage;
use netdissect_core::{dissect_partial, render, Dissector, Verbosity};
use netdissect_fuzz::frames::{udp_frame, DNS_FRAME};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let _ = DnsMessage::decode(data);
    let _ = DnsMessage::decode_with_limit(data, 1);

    let frame = udp_frame(&DNS_FRAME, data);
    let ts = Utc.timestamp_opt(0, 0).unwrap();
    if let Ok(decoded) = dissect_partial(&frame, ts) {
        let _ = render(&decoded, Verbosity::Full);
    }

    let strict = Dissector {
        max_name_indirections: 2,
    };
    let _ = strict.dissect(&frame, ts);
});
