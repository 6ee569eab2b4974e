//! Fuzz target for ICMP and ICMPv6.
//!
//! Covers echo, destination unreachable with its quoted header, and
//! neighbor solicitation option walking.

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use netdissect_core::protocol::{IcmpMessage, Icmpv6Message};
use netdissect_core::{dissect_partial, render, Verbosity};
use netdissect_fuzz::frames::{ipv4_frame, ipv6_frame, ICMPV6_FRAME, ICMP_FRAME};

const LINK_LOCAL_1: [u8; 16] = [0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
const LINK_LOCAL_2: [u8; 16] = [0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2];

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > u16::MAX as usize - 40 {
        return;
    }
    let ts = Utc.timestamp_opt(0, 0).unwrap();

    let _ = IcmpMessage::decode(data);
    let _ = Icmpv6Message::decode(data, &LINK_LOCAL_1, &LINK_LOCAL_2);

    if let Ok(decoded) = dissect_partial(&ipv4_frame(&ICMP_FRAME, data), ts) {
        let _ = render(&decoded, Verbosity::Full);
    }

    if let Ok(decoded) = dissect_partial(&ipv6_frame(&ICMPV6_FRAME, data), ts) {
        let _ = render(&decoded, Verbosity::Full);
    }
});
