//! Fuzz target for the whole dissection pipeline.
//!
//! Raw input is treated as an Ethernet frame and pushed through strict and
//! partial dissection. Partial results are rendered at every level so the
//! renderers see half-decoded frames too.

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use netdissect_core::{dissect, dissect_partial, render, Verbosity};

fuzz_target!(|data: &[u8]| {
    let ts = Utc.timestamp_opt(0, 0).unwrap();

    if let Ok(frame) = dissect(data, ts) {
        assert!(frame.error.is_none());
        let _ = render(&frame, Verbosity::Full);
    }

    if let Ok(frame) = dissect_partial(data, ts) {
        for level in [Verbosity::Minimal, Verbosity::Summary, Verbosity::Full] {
            let _ = render(&frame, level);
        }
    }
});
